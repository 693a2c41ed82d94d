//! Best-price selection: ranks eligible supplier offers into a single winner.

use crate::domain::candidate::PriceCandidate;
use crate::domain::currency::Currency;
use crate::domain::error::PricerError;
use crate::domain::money::round_half_up;
use crate::domain::quantity::Quantity;
use crate::domain::sku::Sku;
use crate::ports::rate_port::RatePort;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// How ties are broken, reported verbatim with every winning offer.
pub const RANKING_REASON: &str =
    "Lowest unit price (then preferred supplier, lead time, supplier id)";

/// A fully validated best-price request. Construction via [`parse`] rejects
/// malformed input before any storage lookup happens.
///
/// [`parse`]: BestPriceQuery::parse
#[derive(Debug, Clone)]
pub struct BestPriceQuery {
    pub sku: Sku,
    pub quantity: Quantity,
    pub currency: Currency,
    pub on_date: NaiveDate,
}

impl BestPriceQuery {
    pub fn parse(sku: &str, qty: i64, currency: &str, date: &str) -> Result<Self, PricerError> {
        let sku = Sku::new(sku)?;
        let quantity = Quantity::new(qty)?;
        let currency = Currency::from_code(currency)?;
        let on_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            PricerError::InvalidDate {
                value: date.to_string(),
            }
        })?;
        Ok(Self {
            sku,
            quantity,
            currency,
            on_date,
        })
    }
}

/// The winning offer, with prices already converted to the requested currency.
#[derive(Debug, Clone)]
pub struct BestPrice {
    pub sku: Sku,
    pub quantity: Quantity,
    pub currency: Currency,
    /// Converted unit price, rounded to 4 decimal places.
    pub unit_price: Decimal,
    /// Converted total for the requested quantity, rounded to 2 decimal places.
    pub total: Decimal,
    pub supplier_id: i64,
    pub supplier_name: String,
    pub supplier_preferred: bool,
    pub supplier_lead_time_days: u32,
    pub reason: &'static str,
}

struct RankedCandidate {
    candidate: PriceCandidate,
    unit_price: Decimal,
    total: Decimal,
}

/// Ranking order, applied key by key:
/// converted unit price ascending, preferred suppliers first, lead time
/// ascending, supplier id ascending.
fn rank(a: &RankedCandidate, b: &RankedCandidate) -> Ordering {
    a.unit_price
        .cmp(&b.unit_price)
        .then_with(|| b.candidate.supplier_preferred.cmp(&a.candidate.supplier_preferred))
        .then_with(|| {
            a.candidate
                .supplier_lead_time_days
                .cmp(&b.candidate.supplier_lead_time_days)
        })
        .then_with(|| a.candidate.supplier_id.cmp(&b.candidate.supplier_id))
}

/// Select the single best offer among `candidates` for `query`.
///
/// Ineligible candidates (wrong SKU, below-minimum quantity, out-of-range
/// date) are dropped before ranking. An empty eligible set is a legitimate
/// `Ok(None)`. A conversion failure on any candidate aborts the whole
/// request; it is never skipped.
pub fn select_best_price(
    query: &BestPriceQuery,
    candidates: Vec<PriceCandidate>,
    rates: &dyn RatePort,
) -> Result<Option<BestPrice>, PricerError> {
    let eligible = candidates
        .into_iter()
        .filter(|c| c.sku == query.sku && c.is_applicable_for(query.quantity, query.on_date));

    let mut ranked = Vec::new();
    for candidate in eligible {
        let unit_price = rates.convert(
            candidate.unit_price.amount(),
            candidate.unit_price.currency(),
            query.currency,
        )?;
        let total = unit_price * Decimal::from(query.quantity.value());
        ranked.push(RankedCandidate {
            candidate,
            unit_price,
            total,
        });
    }

    if ranked.is_empty() {
        return Ok(None);
    }

    ranked.sort_by(rank);
    let best = &ranked[0];

    Ok(Some(BestPrice {
        sku: query.sku.clone(),
        quantity: query.quantity,
        currency: query.currency,
        unit_price: round_half_up(best.unit_price, 4),
        total: round_half_up(best.total, 2),
        supplier_id: best.candidate.supplier_id,
        supplier_name: best.candidate.supplier_name.clone(),
        supplier_preferred: best.candidate.supplier_preferred,
        supplier_lead_time_days: best.candidate.supplier_lead_time_days,
        reason: RANKING_REASON,
    }))
}
