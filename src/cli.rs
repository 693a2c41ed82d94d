//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::rates_adapter::RateTableAdapter;
use crate::domain::best_price::{select_best_price, BestPriceQuery};
use crate::domain::candidate::{CandidateFilter, PriceCandidate};
use crate::domain::currency::Currency;
use crate::domain::error::PricerError;
use crate::domain::import::{run_import, ImportReport};
use crate::domain::sku::Sku;
use crate::ports::catalog_port::CatalogPort;
use crate::ports::price_port::PricePort;
use crate::ports::rate_port::RatePort;
use chrono::NaiveDate;

#[derive(Parser, Debug)]
#[command(name = "pricer", about = "Supplier price-list service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find the best offer for a SKU, quantity, currency and date
    BestPrice {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        sku: String,
        #[arg(long)]
        qty: i64,
        #[arg(long)]
        currency: String,
        /// Effective date, yyyy-MM-dd
        #[arg(long)]
        date: String,
    },
    /// Validate and import a price-list CSV file
    Import {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        file: PathBuf,
    },
    /// List stored price entries, optionally filtered
    ListPrices {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        sku: Option<String>,
        /// Only entries valid on this date, yyyy-MM-dd
        #[arg(long)]
        valid_on: Option<String>,
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        supplier_id: Option<i64>,
    },
    /// Create the database schema
    InitDb {
        #[arg(short, long)]
        config: PathBuf,
        /// Also load the demo suppliers and products
        #[arg(long)]
        seed: bool,
    },
    /// Write the CSV import template
    Template {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::BestPrice {
            config,
            sku,
            qty,
            currency,
            date,
        } => run_best_price(&config, &sku, qty, &currency, &date),
        Command::Import { config, file } => run_import_file(&config, &file),
        Command::ListPrices {
            config,
            sku,
            valid_on,
            currency,
            supplier_id,
        } => run_list_prices(
            &config,
            sku.as_deref(),
            valid_on.as_deref(),
            currency.as_deref(),
            supplier_id,
        ),
        Command::InitDb { config, seed } => run_init_db(&config, seed),
        Command::Template { output } => run_template(output.as_ref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = PricerError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn run_best_price(
    config_path: &PathBuf,
    sku: &str,
    qty: i64,
    currency: &str,
    date: &str,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    // Reject malformed input before touching storage.
    let query = match BestPriceQuery::parse(sku, qty, currency, date) {
        Ok(q) => q,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let rates = match RateTableAdapter::from_config(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    #[cfg(feature = "postgres")]
    {
        use crate::adapters::postgres_adapter::PostgresAdapter;

        let store = match PostgresAdapter::from_config(&config) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };
        best_price_pipeline(&store, &query, &rates)
    }

    #[cfg(all(feature = "sqlite", not(feature = "postgres")))]
    {
        use crate::adapters::sqlite_adapter::SqliteAdapter;

        let store = match SqliteAdapter::from_config(&config) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };
        best_price_pipeline(&store, &query, &rates)
    }

    #[cfg(not(any(feature = "sqlite", feature = "postgres")))]
    {
        let _ = (query, rates);
        eprintln!("error: a storage feature (sqlite or postgres) is required");
        ExitCode::from(1)
    }
}

pub fn best_price_pipeline(
    store: &dyn PricePort,
    query: &BestPriceQuery,
    rates: &dyn RatePort,
) -> ExitCode {
    let filter = CandidateFilter::for_best_price(query.sku.clone(), query.quantity, query.on_date);

    let candidates = match store.valid_candidates(&filter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!(
        "Found {} price candidates for {}",
        candidates.len(),
        query.sku
    );

    match select_best_price(query, candidates, rates) {
        Ok(Some(best)) => {
            println!(
                "Best price for {} x {} ({}, {}):",
                best.sku, best.quantity, best.currency, query.on_date
            );
            println!(
                "  Supplier:   {} ({}){}, lead time {} days",
                best.supplier_name,
                best.supplier_id,
                if best.supplier_preferred {
                    ", preferred"
                } else {
                    ""
                },
                best.supplier_lead_time_days
            );
            println!("  Unit price: {} {}", best.unit_price, best.currency);
            println!("  Total:      {} {}", best.total, best.currency);
            println!("  Reason:     {}", best.reason);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!(
                "No valid price found for {} x {} in {} on {}",
                query.sku, query.quantity, query.currency, query.on_date
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_import_file(config_path: &PathBuf, file: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    eprintln!("Importing prices from {}", file.display());
    let content = match fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: failed to read {}: {}", file.display(), e);
            return ExitCode::from(1);
        }
    };

    #[cfg(feature = "postgres")]
    {
        use crate::adapters::postgres_adapter::PostgresAdapter;

        let store = match PostgresAdapter::from_config(&config) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };
        import_pipeline(&store, &store, &content)
    }

    #[cfg(all(feature = "sqlite", not(feature = "postgres")))]
    {
        use crate::adapters::sqlite_adapter::SqliteAdapter;

        let store = match SqliteAdapter::from_config(&config) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };
        import_pipeline(&store, &store, &content)
    }

    #[cfg(not(any(feature = "sqlite", feature = "postgres")))]
    {
        let _ = content;
        eprintln!("error: a storage feature (sqlite or postgres) is required");
        ExitCode::from(1)
    }
}

pub fn import_pipeline(
    catalog: &dyn CatalogPort,
    store: &dyn PricePort,
    content: &str,
) -> ExitCode {
    let report = match run_import(content, catalog, store) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    print_import_report(&report);

    if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_import_report(report: &ImportReport) {
    let summary = &report.summary;

    eprintln!("\n=== Import Summary ===");
    eprintln!("Total rows:    {}", summary.total_rows);
    eprintln!("Valid rows:    {}", summary.valid_rows);
    eprintln!("Invalid rows:  {}", summary.invalid_rows);
    eprintln!("Imported:      {}", report.imported_count);

    for error in &summary.global_errors {
        eprintln!("error: {error}");
    }

    for result in summary.results.iter().filter(|r| !r.valid) {
        for error in &result.errors {
            eprintln!("  row {}: {}", result.row_number, error);
        }
    }
    for result in &summary.results {
        for warning in &result.warnings {
            eprintln!("  row {}: warning: {}", result.row_number, warning);
        }
    }

    if !summary.overlap_errors.is_empty() {
        eprintln!("Overlap conflicts: {}", summary.overlap_errors.len());
    }

    println!("{}", report.message);
}

fn run_list_prices(
    config_path: &PathBuf,
    sku: Option<&str>,
    valid_on: Option<&str>,
    currency: Option<&str>,
    supplier_id: Option<i64>,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let filter = match build_filter(sku, valid_on, currency, supplier_id) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    #[cfg(feature = "postgres")]
    {
        use crate::adapters::postgres_adapter::PostgresAdapter;

        let store = match PostgresAdapter::from_config(&config) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };
        list_prices_pipeline(&store, &filter)
    }

    #[cfg(all(feature = "sqlite", not(feature = "postgres")))]
    {
        use crate::adapters::sqlite_adapter::SqliteAdapter;

        let store = match SqliteAdapter::from_config(&config) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };
        list_prices_pipeline(&store, &filter)
    }

    #[cfg(not(any(feature = "sqlite", feature = "postgres")))]
    {
        let _ = filter;
        eprintln!("error: a storage feature (sqlite or postgres) is required");
        ExitCode::from(1)
    }
}

pub fn build_filter(
    sku: Option<&str>,
    valid_on: Option<&str>,
    currency: Option<&str>,
    supplier_id: Option<i64>,
) -> Result<CandidateFilter, PricerError> {
    let sku = sku.map(Sku::new).transpose()?;
    let valid_on = valid_on
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| PricerError::InvalidDate {
                value: raw.to_string(),
            })
        })
        .transpose()?;
    let currency = currency.map(Currency::from_code).transpose()?;

    Ok(CandidateFilter {
        sku,
        quantity: None,
        valid_on,
        currency,
        supplier_id,
    })
}

pub fn list_prices_pipeline(store: &dyn PricePort, filter: &CandidateFilter) -> ExitCode {
    let candidates = match store.valid_candidates(filter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if candidates.is_empty() {
        eprintln!("No price entries found");
        return ExitCode::SUCCESS;
    }

    for c in &candidates {
        println!("{}", format_candidate(c));
    }
    eprintln!("{} entries", candidates.len());
    ExitCode::SUCCESS
}

fn format_candidate(c: &PriceCandidate) -> String {
    format!(
        "#{}  {}  supplier {} ({})  {} {}  min qty {}  {}",
        c.entry_id,
        c.sku,
        c.supplier_id,
        c.supplier_name,
        c.unit_price.amount(),
        c.unit_price.currency(),
        c.minimum_quantity,
        c.validity
    )
}

fn run_init_db(config_path: &PathBuf, seed: bool) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    #[cfg(feature = "postgres")]
    {
        use crate::adapters::postgres_adapter::PostgresAdapter;

        let store = match PostgresAdapter::from_config(&config) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };
        init_db_pipeline(|| store.initialize_schema(), || store.seed_demo_data(), seed)
    }

    #[cfg(all(feature = "sqlite", not(feature = "postgres")))]
    {
        use crate::adapters::sqlite_adapter::SqliteAdapter;

        let store = match SqliteAdapter::from_config(&config) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };
        init_db_pipeline(|| store.initialize_schema(), || store.seed_demo_data(), seed)
    }

    #[cfg(not(any(feature = "sqlite", feature = "postgres")))]
    {
        let _ = seed;
        eprintln!("error: a storage feature (sqlite or postgres) is required");
        ExitCode::from(1)
    }
}

#[cfg(any(feature = "sqlite", feature = "postgres"))]
fn init_db_pipeline(
    initialize: impl FnOnce() -> Result<(), PricerError>,
    seed_demo: impl FnOnce() -> Result<(), PricerError>,
    seed: bool,
) -> ExitCode {
    if let Err(e) = initialize() {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!("Schema created");

    if seed {
        if let Err(e) = seed_demo() {
            eprintln!("error: {e}");
            return (&e).into();
        }
        eprintln!("Demo catalog seeded");
    }

    ExitCode::SUCCESS
}

pub const TEMPLATE_ROWS: [[&str; 7]; 5] = [
    ["SupplierId", "Sku", "ValidFrom", "ValidTo", "Currency", "PricePerUom", "MinQty"],
    ["1", "SKU-1001", "2025-01-01", "2025-12-31", "USD", "25.50", "10"],
    ["1", "SKU-1002", "2025-01-01", "", "EUR", "18.75", "5"],
    ["2", "SKU-1001", "2026-02-01", "2026-11-30", "USD", "24.00", "15"],
    ["3", "SKU-1003", "2025-01-15", "2025-06-30", "EGP", "750.00", "20"],
];

fn run_template(output: Option<&PathBuf>) -> ExitCode {
    let result = match output {
        Some(path) => csv::Writer::from_path(path)
            .and_then(write_template_rows)
            .map_err(|e| e.to_string()),
        None => write_template_rows(csv::Writer::from_writer(std::io::stdout()))
            .map_err(|e| e.to_string()),
    };

    match result {
        Ok(()) => {
            if let Some(path) = output {
                eprintln!("Template written to {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write template: {e}");
            ExitCode::from(1)
        }
    }
}

fn write_template_rows<W: std::io::Write>(mut wtr: csv::Writer<W>) -> Result<(), csv::Error> {
    for row in TEMPLATE_ROWS {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}
