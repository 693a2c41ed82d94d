//! Import orchestration: parse, validate, detect overlaps, persist.

use crate::domain::entry::NewPriceEntry;
use crate::domain::error::PricerError;
use crate::domain::import::overlap::{detect_overlaps, OverlapError};
use crate::domain::import::row::parse_rows;
use crate::domain::import::validate::{validate_row, RowValidation};
use crate::domain::money::Money;
use crate::ports::catalog_port::CatalogPort;
use crate::ports::price_port::PricePort;

/// Batch-level validation outcome: counts after overlap processing, every
/// row's result, and the detected conflicts.
#[derive(Debug, Clone, Default)]
pub struct ValidationSummary {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub invalid_rows: usize,
    pub global_errors: Vec<String>,
    pub results: Vec<RowValidation>,
    pub overlap_errors: Vec<OverlapError>,
}

/// The final import outcome handed back to the caller.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub success: bool,
    pub message: String,
    pub imported_count: usize,
    pub summary: ValidationSummary,
}

/// Demote every row named by a conflict: the overlap message joins the row's
/// errors and the counters move once per row, no matter how many conflicts
/// name it.
fn apply_overlaps(summary: &mut ValidationSummary, conflicts: Vec<OverlapError>) {
    for conflict in &conflicts {
        for result in summary
            .results
            .iter_mut()
            .filter(|r| conflict.involves(r.row_number))
        {
            result.errors.push(conflict.message.clone());
            if result.valid {
                result.valid = false;
                summary.valid_rows -= 1;
                summary.invalid_rows += 1;
            }
        }
    }
    summary.overlap_errors = conflicts;
}

fn entries_from(results: &[RowValidation]) -> Vec<NewPriceEntry> {
    results
        .iter()
        .filter(|r| r.valid)
        .map(|r| {
            // Valid rows always carry every parsed field.
            let sku = r.sku.clone().expect("valid row has a SKU");
            let validity = r.interval().expect("valid row has an interval");
            let currency = r.currency.expect("valid row has a currency");
            let amount = r.price.expect("valid row has a price");
            NewPriceEntry {
                supplier_id: r.supplier_id.expect("valid row has a supplier"),
                sku,
                validity,
                price: Money::new(amount, currency).expect("validated price is positive"),
                minimum_quantity: r.min_qty.expect("valid row has a minimum quantity"),
            }
        })
        .collect()
}

/// Run the whole import: parse `input`, field-validate every row, detect
/// overlaps among the valid ones (and against persisted entries), then persist
/// the survivors in one transaction via `store`.
///
/// A batch where nothing survives is a failed report, not an error; only
/// collaborator failures (catalog lookups, storage) propagate as `Err`.
pub fn run_import(
    input: &str,
    catalog: &dyn CatalogPort,
    store: &dyn PricePort,
) -> Result<ImportReport, PricerError> {
    let rows = parse_rows(input);

    if rows.is_empty() {
        let message = "CSV file is empty or contains no valid data rows.".to_string();
        return Ok(ImportReport {
            success: false,
            message: message.clone(),
            imported_count: 0,
            summary: ValidationSummary {
                global_errors: vec![message],
                ..ValidationSummary::default()
            },
        });
    }

    let mut summary = ValidationSummary {
        total_rows: rows.len(),
        ..ValidationSummary::default()
    };

    for row in &rows {
        let result = validate_row(row, catalog)?;
        if result.valid {
            summary.valid_rows += 1;
        } else {
            summary.invalid_rows += 1;
        }
        summary.results.push(result);
    }

    let valid_refs: Vec<&RowValidation> =
        summary.results.iter().filter(|r| r.valid).collect();
    let conflicts = detect_overlaps(&valid_refs, store)?;
    apply_overlaps(&mut summary, conflicts);

    if summary.valid_rows == 0 {
        return Ok(ImportReport {
            success: false,
            message: "No valid rows found in CSV file.".to_string(),
            imported_count: 0,
            summary,
        });
    }

    let entries = entries_from(&summary.results);
    let imported_count = store.import_entries(&entries)?;

    Ok(ImportReport {
        success: imported_count > 0,
        message: format!(
            "Successfully imported {} price entries. {} rows had errors.",
            imported_count, summary.invalid_rows
        ),
        imported_count,
        summary,
    })
}
