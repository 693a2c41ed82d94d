//! Price candidates: read-only projections of persisted offers that compete
//! for a best-price request.

use crate::domain::currency::Currency;
use crate::domain::interval::ValidityInterval;
use crate::domain::money::Money;
use crate::domain::quantity::Quantity;
use crate::domain::sku::Sku;
use chrono::NaiveDate;

/// One supplier offer eligible to compete for a best-price request.
/// Constructed fresh per query from storage and discarded after the response.
#[derive(Debug, Clone)]
pub struct PriceCandidate {
    pub entry_id: i64,
    pub supplier_id: i64,
    pub supplier_name: String,
    pub supplier_preferred: bool,
    pub supplier_lead_time_days: u32,
    pub sku: Sku,
    pub unit_price: Money,
    pub minimum_quantity: Quantity,
    pub validity: ValidityInterval,
}

impl PriceCandidate {
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.validity.contains(date)
    }

    pub fn supports_quantity(&self, quantity: Quantity) -> bool {
        quantity.meets_minimum(self.minimum_quantity)
    }

    pub fn is_applicable_for(&self, quantity: Quantity, date: NaiveDate) -> bool {
        self.is_valid_on(date) && self.supports_quantity(quantity)
    }
}

/// Storage-side filter for candidate lookups. All criteria are optional and
/// combine conjunctively.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    pub sku: Option<Sku>,
    pub quantity: Option<Quantity>,
    pub valid_on: Option<NaiveDate>,
    pub currency: Option<Currency>,
    pub supplier_id: Option<i64>,
}

impl CandidateFilter {
    pub fn for_best_price(sku: Sku, quantity: Quantity, valid_on: NaiveDate) -> Self {
        Self {
            sku: Some(sku),
            quantity: Some(quantity),
            valid_on: Some(valid_on),
            currency: None,
            supplier_id: None,
        }
    }
}
