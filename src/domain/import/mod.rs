//! Bulk price-list import: CSV row parsing, per-row validation, overlap
//! detection and the orchestrating pipeline.

pub mod overlap;
pub mod pipeline;
pub mod row;
pub mod validate;

pub use overlap::OverlapError;
pub use pipeline::{run_import, ImportReport, ValidationSummary};
pub use row::CsvRow;
pub use validate::RowValidation;
