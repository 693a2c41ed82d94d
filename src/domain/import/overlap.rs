//! Overlap detection for import batches.
//!
//! Two entries for the same (supplier, SKU) must never share a validity date.
//! A batch is checked two ways: every unordered pair of valid rows within the
//! batch, and every valid row against the entries already persisted for its
//! (supplier, SKU). The persisted check runs exactly once per row.

use crate::domain::error::PricerError;
use crate::domain::import::validate::RowValidation;
use crate::domain::sku::Sku;
use crate::ports::price_port::PricePort;

/// One detected conflict. `other_row` is the second batch row involved, or
/// `None` when the conflict is with an already-persisted entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapError {
    pub row: usize,
    pub other_row: Option<usize>,
    pub supplier_id: i64,
    pub sku: Sku,
    pub message: String,
}

impl OverlapError {
    /// True when `row_number` is one of the batch rows this conflict names.
    pub fn involves(&self, row_number: usize) -> bool {
        self.row == row_number || self.other_row == Some(row_number)
    }
}

/// Find every conflict among `rows` (which must be the field-valid subset of
/// the batch, in batch order) and against persisted entries.
pub fn detect_overlaps(
    rows: &[&RowValidation],
    store: &dyn PricePort,
) -> Result<Vec<OverlapError>, PricerError> {
    let mut conflicts = Vec::new();

    // Pairwise within the batch, i < j in batch order.
    for i in 0..rows.len() {
        for j in (i + 1)..rows.len() {
            let (a, b) = (rows[i], rows[j]);
            let (Some(supplier_a), Some(supplier_b)) = (a.supplier_id, b.supplier_id) else {
                continue;
            };
            let (Some(sku_a), Some(sku_b)) = (a.sku.as_ref(), b.sku.as_ref()) else {
                continue;
            };
            if supplier_a != supplier_b || sku_a != sku_b {
                continue;
            }
            let (Some(iv_a), Some(iv_b)) = (a.interval(), b.interval()) else {
                continue;
            };
            if iv_a.overlaps_with(&iv_b) {
                conflicts.push(OverlapError {
                    row: a.row_number,
                    other_row: Some(b.row_number),
                    supplier_id: supplier_a,
                    sku: sku_a.clone(),
                    message: format!(
                        "Date ranges overlap for supplier {} and SKU {} between rows {} and {}",
                        supplier_a, sku_a, a.row_number, b.row_number
                    ),
                });
            }
        }
    }

    // Against persisted entries, once per row.
    for row in rows {
        let (Some(supplier_id), Some(sku), Some(interval)) =
            (row.supplier_id, row.sku.as_ref(), row.interval())
        else {
            continue;
        };
        for entry in store.entries_for(supplier_id, sku)? {
            if entry.validity.overlaps_with(&interval) {
                conflicts.push(OverlapError {
                    row: row.row_number,
                    other_row: None,
                    supplier_id,
                    sku: sku.clone(),
                    message: format!(
                        "Date range overlaps with existing entry for supplier {} and SKU {} at row {}",
                        supplier_id, sku, row.row_number
                    ),
                });
            }
        }
    }

    Ok(conflicts)
}
