//! Per-row field validation.
//!
//! Every field is checked independently and all errors are collected, so a row
//! with three bad fields reports three errors in one pass. A well-formed SKU
//! that names an unknown product is a warning, not an error: price lists may
//! legitimately arrive before the product catalog entry does.

use crate::domain::currency::Currency;
use crate::domain::error::PricerError;
use crate::domain::import::row::CsvRow;
use crate::domain::interval::ValidityInterval;
use crate::domain::quantity::Quantity;
use crate::domain::sku::Sku;
use crate::ports::catalog_port::CatalogPort;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// The outcome of validating one row. Parsed fields are present only when
/// their raw counterpart parsed cleanly.
#[derive(Debug, Clone)]
pub struct RowValidation {
    pub row_number: usize,
    pub supplier_id: Option<i64>,
    pub sku: Option<Sku>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    pub currency: Option<Currency>,
    pub price: Option<Decimal>,
    pub min_qty: Option<Quantity>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub valid: bool,
}

impl RowValidation {
    /// The row's validity interval, available once both date fields are in
    /// order. Always `Some` for a row that passed validation.
    pub fn interval(&self) -> Option<ValidityInterval> {
        let from = self.valid_from?;
        ValidityInterval::new(from, self.valid_to).ok()
    }
}

fn parse_exact_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Validate one parsed row against the catalog. Field checks are local;
/// supplier and product existence go through `catalog`.
pub fn validate_row(row: &CsvRow, catalog: &dyn CatalogPort) -> Result<RowValidation, PricerError> {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let supplier_id = match row.supplier_id.parse::<i64>() {
        Ok(id) => {
            if catalog.supplier_exists(id)? {
                Some(id)
            } else {
                errors.push(format!("Supplier with ID {id} does not exist"));
                Some(id)
            }
        }
        Err(_) => {
            errors.push("Invalid supplier ID format".to_string());
            None
        }
    };

    let sku = if row.sku.is_empty() {
        errors.push("SKU is required".to_string());
        None
    } else {
        match Sku::new(&row.sku) {
            Ok(sku) => {
                if !catalog.product_exists(&sku)? {
                    warnings.push(format!(
                        "Product with SKU {} does not exist in the system",
                        row.sku
                    ));
                }
                Some(sku)
            }
            Err(e) => {
                errors.push(format!("Invalid SKU format: {e}"));
                None
            }
        }
    };

    let valid_from = match parse_exact_date(&row.valid_from) {
        Some(date) => Some(date),
        None => {
            errors.push("Invalid ValidFrom date format. Expected yyyy-MM-dd".to_string());
            None
        }
    };

    let valid_to = if row.valid_to.is_empty() {
        None
    } else {
        match parse_exact_date(&row.valid_to) {
            Some(to) => {
                if let Some(from) = valid_from {
                    if to <= from {
                        errors.push("ValidTo date must be after ValidFrom date".to_string());
                    }
                }
                Some(to)
            }
            None => {
                errors.push("Invalid ValidTo date format. Expected yyyy-MM-dd".to_string());
                None
            }
        }
    };

    let currency = if row.currency.is_empty() {
        errors.push("Currency is required".to_string());
        None
    } else {
        match Currency::from_code(&row.currency) {
            Ok(c) => Some(c),
            Err(_) => {
                errors.push(format!("Unsupported currency code: {}", row.currency));
                None
            }
        }
    };

    let price = match row.price_per_uom.parse::<Decimal>() {
        Ok(p) if p > Decimal::ZERO => Some(p),
        _ => {
            errors.push("Invalid price format or price must be greater than 0".to_string());
            None
        }
    };

    let min_qty = match row.min_qty.parse::<i64>().ok().and_then(|q| Quantity::new(q).ok()) {
        Some(q) => Some(q),
        None => {
            errors.push(
                "Invalid minimum quantity format or quantity must be greater than 0".to_string(),
            );
            None
        }
    };

    let valid = errors.is_empty();
    Ok(RowValidation {
        row_number: row.row_number,
        supplier_id,
        sku,
        valid_from,
        valid_to,
        currency,
        price,
        min_qty,
        errors,
        warnings,
        valid,
    })
}
