//! SQLite storage adapter: suppliers, products and price-list entries.

use crate::domain::candidate::{CandidateFilter, PriceCandidate};
use crate::domain::currency::Currency;
use crate::domain::entry::{NewPriceEntry, PriceListEntry};
use crate::domain::error::PricerError;
use crate::domain::interval::ValidityInterval;
use crate::domain::money::Money;
use crate::domain::product::Product;
use crate::domain::quantity::Quantity;
use crate::domain::sku::Sku;
use crate::domain::supplier::Supplier;
use crate::ports::catalog_port::CatalogPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::price_port::PricePort;
use chrono::NaiveDate;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Row};
use rust_decimal::Decimal;

pub struct SqliteAdapter {
    pool: Pool<SqliteConnectionManager>,
}

const DATE_FMT: &str = "%Y-%m-%d";

impl SqliteAdapter {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, PricerError> {
        let db_path =
            config
                .get_string("sqlite", "path")
                .ok_or_else(|| PricerError::ConfigMissing {
                    section: "sqlite".into(),
                    key: "path".into(),
                })?;

        let pool_size = config.get_int("sqlite", "pool_size", 4) as u32;

        let manager = SqliteConnectionManager::file(&db_path);
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(|e: r2d2::Error| PricerError::Database {
                reason: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    pub fn in_memory() -> Result<Self, PricerError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e: r2d2::Error| PricerError::Database {
                reason: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    fn conn(
        &self,
    ) -> Result<r2d2::PooledConnection<SqliteConnectionManager>, PricerError> {
        self.pool
            .get()
            .map_err(|e: r2d2::Error| PricerError::Database {
                reason: e.to_string(),
            })
    }

    pub fn initialize_schema(&self) -> Result<(), PricerError> {
        let conn = self.conn()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS suppliers (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                country TEXT,
                preferred INTEGER NOT NULL DEFAULT 0,
                lead_time_days INTEGER NOT NULL DEFAULT 0
            );
            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY,
                sku TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                unit_of_measure TEXT NOT NULL DEFAULT 'EA',
                hazard_class TEXT
            );
            CREATE TABLE IF NOT EXISTS price_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                supplier_id INTEGER NOT NULL REFERENCES suppliers(id),
                sku TEXT NOT NULL,
                valid_from TEXT NOT NULL,
                valid_to TEXT,
                currency TEXT NOT NULL,
                price_per_uom TEXT NOT NULL,
                min_qty INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_price_entries_supplier_sku
                ON price_entries(supplier_id, sku);
            CREATE INDEX IF NOT EXISTS idx_price_entries_sku ON price_entries(sku);",
        )
        .map_err(|e: rusqlite::Error| PricerError::DatabaseQuery {
            reason: e.to_string(),
        })?;

        Ok(())
    }

    pub fn add_supplier(&self, supplier: &Supplier) -> Result<(), PricerError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO suppliers (id, name, country, preferred, lead_time_days)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                supplier.id,
                supplier.name,
                supplier.country,
                supplier.preferred,
                supplier.lead_time_days,
            ],
        )
        .map_err(|e: rusqlite::Error| PricerError::DatabaseQuery {
            reason: e.to_string(),
        })?;
        Ok(())
    }

    pub fn add_product(&self, product: &Product) -> Result<(), PricerError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO products (id, sku, name, unit_of_measure, hazard_class)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                product.id,
                product.sku.as_str(),
                product.name,
                product.unit_of_measure,
                product.hazard_class,
            ],
        )
        .map_err(|e: rusqlite::Error| PricerError::DatabaseQuery {
            reason: e.to_string(),
        })?;
        Ok(())
    }

    /// Load the demo catalog used by `init-db --seed`.
    pub fn seed_demo_data(&self) -> Result<(), PricerError> {
        let (suppliers, products) = crate::adapters::demo_catalog();
        for supplier in &suppliers {
            self.add_supplier(supplier)?;
        }
        for product in &products {
            self.add_product(product)?;
        }
        Ok(())
    }

    fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<RawEntry> {
        Ok(RawEntry {
            id: row.get(0)?,
            supplier_id: row.get(1)?,
            sku: row.get(2)?,
            valid_from: row.get(3)?,
            valid_to: row.get(4)?,
            currency: row.get(5)?,
            price_per_uom: row.get(6)?,
            min_qty: row.get(7)?,
        })
    }
}

/// Row data as stored, before domain conversion.
struct RawEntry {
    id: i64,
    supplier_id: i64,
    sku: String,
    valid_from: String,
    valid_to: Option<String>,
    currency: String,
    price_per_uom: String,
    min_qty: i64,
}

impl RawEntry {
    fn into_entry(self) -> Result<PriceListEntry, PricerError> {
        let corrupt = |what: &str, detail: String| PricerError::Database {
            reason: format!("corrupt price entry {}: {} {}", self.id, what, detail),
        };

        let sku = Sku::new(&self.sku).map_err(|e| corrupt("sku", e.to_string()))?;
        let from = NaiveDate::parse_from_str(&self.valid_from, DATE_FMT)
            .map_err(|e| corrupt("valid_from", e.to_string()))?;
        let to = match &self.valid_to {
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw, DATE_FMT)
                    .map_err(|e| corrupt("valid_to", e.to_string()))?,
            ),
            None => None,
        };
        let validity =
            ValidityInterval::new(from, to).map_err(|e| corrupt("validity", e.to_string()))?;
        let currency = Currency::from_code(&self.currency)
            .map_err(|e| corrupt("currency", e.to_string()))?;
        let amount: Decimal = self
            .price_per_uom
            .parse()
            .map_err(|_| corrupt("price", self.price_per_uom.clone()))?;
        let price = Money::new(amount, currency).map_err(|e| corrupt("price", e.to_string()))?;
        let minimum_quantity =
            Quantity::new(self.min_qty).map_err(|e| corrupt("min_qty", e.to_string()))?;

        Ok(PriceListEntry {
            id: self.id,
            supplier_id: self.supplier_id,
            sku,
            validity,
            price,
            minimum_quantity,
        })
    }
}

impl CatalogPort for SqliteAdapter {
    fn supplier_exists(&self, supplier_id: i64) -> Result<bool, PricerError> {
        let conn = self.conn()?;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM suppliers WHERE id = ?1",
                params![supplier_id],
                |row| row.get(0),
            )
            .map_err(|e: rusqlite::Error| PricerError::DatabaseQuery {
                reason: e.to_string(),
            })?;
        Ok(count > 0)
    }

    fn product_exists(&self, sku: &Sku) -> Result<bool, PricerError> {
        let conn = self.conn()?;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM products WHERE sku = ?1",
                params![sku.as_str()],
                |row| row.get(0),
            )
            .map_err(|e: rusqlite::Error| PricerError::DatabaseQuery {
                reason: e.to_string(),
            })?;
        Ok(count > 0)
    }
}

impl PricePort for SqliteAdapter {
    fn valid_candidates(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<PriceCandidate>, PricerError> {
        let conn = self.conn()?;

        let query = "SELECT p.id, p.supplier_id, p.sku, p.valid_from, p.valid_to,
                            p.currency, p.price_per_uom, p.min_qty,
                            s.name, s.preferred, s.lead_time_days
                     FROM price_entries p
                     JOIN suppliers s ON s.id = p.supplier_id
                     WHERE (?1 IS NULL OR p.sku = ?1)
                       AND (?2 IS NULL OR p.min_qty <= ?2)
                       AND (?3 IS NULL OR (p.valid_from <= ?3
                            AND (p.valid_to IS NULL OR p.valid_to >= ?3)))
                       AND (?4 IS NULL OR p.currency = ?4)
                       AND (?5 IS NULL OR p.supplier_id = ?5)
                     ORDER BY p.id ASC";

        let sku = filter.sku.as_ref().map(|s| s.as_str().to_string());
        let quantity = filter.quantity.map(|q| q.value() as i64);
        let valid_on = filter.valid_on.map(|d| d.format(DATE_FMT).to_string());
        let currency = filter.currency.map(|c| c.code().to_string());

        let mut stmt =
            conn.prepare(query)
                .map_err(|e: rusqlite::Error| PricerError::DatabaseQuery {
                    reason: e.to_string(),
                })?;

        let rows = stmt
            .query_map(
                params![sku, quantity, valid_on, currency, filter.supplier_id],
                |row| {
                    let raw = RawCandidate {
                        entry: SqliteAdapter::entry_from_row(row)?,
                        supplier_name: row.get(8)?,
                        supplier_preferred: row.get(9)?,
                        supplier_lead_time_days: row.get(10)?,
                    };
                    Ok(raw)
                },
            )
            .map_err(|e: rusqlite::Error| PricerError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        let mut candidates = Vec::new();
        for row in rows {
            let raw = row.map_err(|e: rusqlite::Error| PricerError::DatabaseQuery {
                reason: e.to_string(),
            })?;
            candidates.push(raw.into_candidate()?);
        }

        Ok(candidates)
    }

    fn entries_for(
        &self,
        supplier_id: i64,
        sku: &Sku,
    ) -> Result<Vec<PriceListEntry>, PricerError> {
        let conn = self.conn()?;

        let mut stmt = conn
            .prepare(
                "SELECT id, supplier_id, sku, valid_from, valid_to, currency, price_per_uom, min_qty
                 FROM price_entries
                 WHERE supplier_id = ?1 AND sku = ?2
                 ORDER BY valid_from ASC",
            )
            .map_err(|e: rusqlite::Error| PricerError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        let rows = stmt
            .query_map(params![supplier_id, sku.as_str()], Self::entry_from_row)
            .map_err(|e: rusqlite::Error| PricerError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        let mut entries = Vec::new();
        for row in rows {
            let raw = row.map_err(|e: rusqlite::Error| PricerError::DatabaseQuery {
                reason: e.to_string(),
            })?;
            entries.push(raw.into_entry()?);
        }

        Ok(entries)
    }

    fn import_entries(&self, entries: &[NewPriceEntry]) -> Result<usize, PricerError> {
        let mut conn = self.conn()?;

        let tx = conn
            .transaction()
            .map_err(|e: rusqlite::Error| PricerError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        for entry in entries {
            tx.execute(
                "INSERT INTO price_entries
                    (supplier_id, sku, valid_from, valid_to, currency, price_per_uom, min_qty)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    entry.supplier_id,
                    entry.sku.as_str(),
                    entry.validity.from().format(DATE_FMT).to_string(),
                    entry.validity.to().map(|d| d.format(DATE_FMT).to_string()),
                    entry.price.currency().code(),
                    entry.price.amount().to_string(),
                    entry.minimum_quantity.value(),
                ],
            )
            .map_err(|e: rusqlite::Error| PricerError::DatabaseQuery {
                reason: e.to_string(),
            })?;
        }

        tx.commit()
            .map_err(|e: rusqlite::Error| PricerError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        Ok(entries.len())
    }
}

struct RawCandidate {
    entry: RawEntry,
    supplier_name: String,
    supplier_preferred: bool,
    supplier_lead_time_days: i64,
}

impl RawCandidate {
    fn into_candidate(self) -> Result<PriceCandidate, PricerError> {
        let entry = self.entry.into_entry()?;
        Ok(PriceCandidate {
            entry_id: entry.id,
            supplier_id: entry.supplier_id,
            supplier_name: self.supplier_name,
            supplier_preferred: self.supplier_preferred,
            supplier_lead_time_days: self.supplier_lead_time_days.max(0) as u32,
            sku: entry.sku,
            unit_price: entry.price,
            minimum_quantity: entry.minimum_quantity,
            validity: entry.validity,
        })
    }
}
