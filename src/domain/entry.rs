//! Persisted price-list entries.

use crate::domain::interval::ValidityInterval;
use crate::domain::money::Money;
use crate::domain::quantity::Quantity;
use crate::domain::sku::Sku;
use chrono::NaiveDate;

/// A price-list entry as stored: one supplier's price for one SKU over one
/// validity interval.
#[derive(Debug, Clone)]
pub struct PriceListEntry {
    pub id: i64,
    pub supplier_id: i64,
    pub sku: Sku,
    pub validity: ValidityInterval,
    pub price: Money,
    pub minimum_quantity: Quantity,
}

impl PriceListEntry {
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.validity.contains(date)
    }
}

/// An entry ready to be persisted; storage assigns the id.
#[derive(Debug, Clone)]
pub struct NewPriceEntry {
    pub supplier_id: i64,
    pub sku: Sku,
    pub validity: ValidityInterval,
    pub price: Money,
    pub minimum_quantity: Quantity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::currency::Currency;

    #[test]
    fn is_valid_on_delegates_to_the_interval() {
        let entry = PriceListEntry {
            id: 1,
            supplier_id: 2,
            sku: Sku::new("SKU-1001").unwrap(),
            validity: ValidityInterval::new(
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                Some(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()),
            )
            .unwrap(),
            price: Money::new("18.75".parse().unwrap(), Currency::Eur).unwrap(),
            minimum_quantity: Quantity::new(5).unwrap(),
        };
        assert!(entry.is_valid_on(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()));
        assert!(!entry.is_valid_on(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()));
    }
}
