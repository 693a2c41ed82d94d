#![allow(dead_code)]

use chrono::NaiveDate;
use pricer::domain::candidate::{CandidateFilter, PriceCandidate};
use pricer::domain::currency::Currency;
use pricer::domain::entry::{NewPriceEntry, PriceListEntry};
use pricer::domain::error::PricerError;
use pricer::domain::interval::ValidityInterval;
use pricer::domain::money::Money;
use pricer::domain::quantity::Quantity;
use pricer::domain::sku::Sku;
use pricer::ports::catalog_port::CatalogPort;
use pricer::ports::price_port::PricePort;
use pricer::ports::rate_port::RatePort;
use rust_decimal::Decimal;
use std::cell::RefCell;
use std::collections::HashSet;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn sku(value: &str) -> Sku {
    Sku::new(value).unwrap()
}

pub fn qty(value: i64) -> Quantity {
    Quantity::new(value).unwrap()
}

pub fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

pub fn interval(from: NaiveDate, to: Option<NaiveDate>) -> ValidityInterval {
    ValidityInterval::new(from, to).unwrap()
}

pub fn make_candidate(
    supplier_id: i64,
    name: &str,
    price: &str,
    currency: Currency,
    preferred: bool,
    lead_time_days: u32,
) -> PriceCandidate {
    PriceCandidate {
        entry_id: supplier_id * 100,
        supplier_id,
        supplier_name: name.to_string(),
        supplier_preferred: preferred,
        supplier_lead_time_days: lead_time_days,
        sku: sku("SKU-1001"),
        unit_price: Money::new(dec(price), currency).unwrap(),
        minimum_quantity: qty(10),
        validity: interval(date(2025, 1, 1), Some(date(2025, 12, 31))),
    }
}

/// Catalog with fixed supplier ids and product SKUs.
pub struct MockCatalog {
    pub suppliers: HashSet<i64>,
    pub products: HashSet<String>,
}

impl MockCatalog {
    pub fn new(suppliers: &[i64], products: &[&str]) -> Self {
        Self {
            suppliers: suppliers.iter().copied().collect(),
            products: products.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CatalogPort for MockCatalog {
    fn supplier_exists(&self, supplier_id: i64) -> Result<bool, PricerError> {
        Ok(self.suppliers.contains(&supplier_id))
    }

    fn product_exists(&self, sku: &Sku) -> Result<bool, PricerError> {
        Ok(self.products.contains(sku.as_str()))
    }
}

/// In-memory price store: candidates to serve, persisted entries for overlap
/// checks, and a record of what was imported.
pub struct MockStore {
    pub candidates: Vec<PriceCandidate>,
    pub existing: Vec<PriceListEntry>,
    pub imported: RefCell<Vec<NewPriceEntry>>,
    pub fail_import: Option<String>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
            existing: Vec::new(),
            imported: RefCell::new(Vec::new()),
            fail_import: None,
        }
    }

    pub fn with_candidates(mut self, candidates: Vec<PriceCandidate>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn with_existing(mut self, existing: Vec<PriceListEntry>) -> Self {
        self.existing = existing;
        self
    }

    pub fn failing_import(mut self, reason: &str) -> Self {
        self.fail_import = Some(reason.to_string());
        self
    }
}

impl PricePort for MockStore {
    fn valid_candidates(
        &self,
        _filter: &CandidateFilter,
    ) -> Result<Vec<PriceCandidate>, PricerError> {
        Ok(self.candidates.clone())
    }

    fn entries_for(&self, supplier_id: i64, sku: &Sku) -> Result<Vec<PriceListEntry>, PricerError> {
        Ok(self
            .existing
            .iter()
            .filter(|e| e.supplier_id == supplier_id && &e.sku == sku)
            .cloned()
            .collect())
    }

    fn import_entries(&self, entries: &[NewPriceEntry]) -> Result<usize, PricerError> {
        if let Some(reason) = &self.fail_import {
            return Err(PricerError::Database {
                reason: reason.clone(),
            });
        }
        self.imported.borrow_mut().extend_from_slice(entries);
        Ok(entries.len())
    }
}

pub fn make_entry(
    id: i64,
    supplier_id: i64,
    sku_value: &str,
    from: NaiveDate,
    to: Option<NaiveDate>,
) -> PriceListEntry {
    PriceListEntry {
        id,
        supplier_id,
        sku: sku(sku_value),
        validity: interval(from, to),
        price: Money::new(dec("10.00"), Currency::Usd).unwrap(),
        minimum_quantity: qty(1),
    }
}

/// Converts every amount 1:1. For tests where conversion is not the point.
pub struct IdentityRates;

impl RatePort for IdentityRates {
    fn convert(
        &self,
        amount: Decimal,
        _from: Currency,
        _to: Currency,
    ) -> Result<Decimal, PricerError> {
        Ok(amount)
    }

    fn supported_currencies(&self) -> Vec<Currency> {
        vec![Currency::Eur, Currency::Usd, Currency::Egp]
    }
}

pub const CSV_HEADER: &str = "SupplierId,Sku,ValidFrom,ValidTo,Currency,PricePerUom,MinQty";

/// Build an import payload from data lines.
pub fn csv_file(lines: &[&str]) -> String {
    let mut out = String::from(CSV_HEADER);
    for line in lines {
        out.push('\n');
        out.push_str(line);
    }
    out.push('\n');
    out
}
