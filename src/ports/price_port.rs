//! Price-list storage port trait.

use crate::domain::candidate::{CandidateFilter, PriceCandidate};
use crate::domain::entry::{NewPriceEntry, PriceListEntry};
use crate::domain::error::PricerError;
use crate::domain::sku::Sku;

pub trait PricePort {
    /// Candidates matching the filter, already narrowed by SKU, quantity
    /// eligibility, validity date, currency and supplier where given.
    fn valid_candidates(&self, filter: &CandidateFilter)
        -> Result<Vec<PriceCandidate>, PricerError>;

    /// All persisted entries for one (supplier, SKU) pair, used for overlap
    /// checks against incoming batches.
    fn entries_for(&self, supplier_id: i64, sku: &Sku)
        -> Result<Vec<PriceListEntry>, PricerError>;

    /// Persist a batch inside one transaction. Either every entry is stored or
    /// none are; returns the number stored.
    fn import_entries(&self, entries: &[NewPriceEntry]) -> Result<usize, PricerError>;
}
