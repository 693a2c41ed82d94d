//! PostgreSQL storage adapter, port-compatible with [`SqliteAdapter`].
//!
//! [`SqliteAdapter`]: crate::adapters::sqlite_adapter::SqliteAdapter

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
use postgres::types::ToSql;
use postgres::NoTls;
use r2d2::Pool;
use r2d2_postgres::PostgresConnectionManager;
use rust_decimal::Decimal;

pub struct PostgresAdapter {
    pool: Pool<PostgresConnectionManager<NoTls>>,
}

impl PostgresAdapter {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, PricerError> {
        // Try [postgres] connection_string first, fall back to [database] conninfo
        let connection_string = config
            .get_string("postgres", "connection_string")
            .or_else(|| config.get_string("database", "conninfo"))
            .ok_or_else(|| PricerError::ConfigMissing {
                section: "database".into(),
                key: "conninfo".into(),
            })?;

        let pg_config =
            connection_string
                .parse::<postgres::Config>()
                .map_err(|e| PricerError::Database {
                    reason: e.to_string(),
                })?;

        let pool_size = config.get_int("postgres", "pool_size", 4) as u32;
        let manager = PostgresConnectionManager::new(pg_config, NoTls);
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(|e: r2d2::Error| PricerError::Database {
                reason: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    fn conn(
        &self,
    ) -> Result<r2d2::PooledConnection<PostgresConnectionManager<NoTls>>, PricerError> {
        self.pool
            .get()
            .map_err(|e: r2d2::Error| PricerError::Database {
                reason: e.to_string(),
            })
    }

    pub fn initialize_schema(&self) -> Result<(), PricerError> {
        let mut conn = self.conn()?;
        conn.batch_execute(
            "CREATE TABLE IF NOT EXISTS suppliers (
                id BIGINT PRIMARY KEY,
                name TEXT NOT NULL,
                country TEXT,
                preferred BOOLEAN NOT NULL DEFAULT FALSE,
                lead_time_days INT NOT NULL DEFAULT 0
            );
            CREATE TABLE IF NOT EXISTS products (
                id BIGINT PRIMARY KEY,
                sku TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                unit_of_measure TEXT NOT NULL DEFAULT 'EA',
                hazard_class TEXT
            );
            CREATE TABLE IF NOT EXISTS price_entries (
                id BIGSERIAL PRIMARY KEY,
                supplier_id BIGINT NOT NULL REFERENCES suppliers(id),
                sku TEXT NOT NULL,
                valid_from DATE NOT NULL,
                valid_to DATE,
                currency TEXT NOT NULL,
                price_per_uom NUMERIC(18, 6) NOT NULL,
                min_qty BIGINT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_price_entries_supplier_sku
                ON price_entries(supplier_id, sku);
            CREATE INDEX IF NOT EXISTS idx_price_entries_sku ON price_entries(sku);",
        )
        .map_err(|e: postgres::Error| PricerError::DatabaseQuery {
            reason: e.to_string(),
        })?;

        Ok(())
    }

    pub fn add_supplier(&self, supplier: &Supplier) -> Result<(), PricerError> {
        let mut conn = self.conn()?;
        conn.execute(
            "INSERT INTO suppliers (id, name, country, preferred, lead_time_days)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE
                SET name = EXCLUDED.name,
                    country = EXCLUDED.country,
                    preferred = EXCLUDED.preferred,
                    lead_time_days = EXCLUDED.lead_time_days",
            &[
                &supplier.id,
                &supplier.name,
                &supplier.country,
                &supplier.preferred,
                &(supplier.lead_time_days as i32),
            ],
        )
        .map_err(|e: postgres::Error| PricerError::DatabaseQuery {
            reason: e.to_string(),
        })?;
        Ok(())
    }

    pub fn add_product(&self, product: &Product) -> Result<(), PricerError> {
        let mut conn = self.conn()?;
        conn.execute(
            "INSERT INTO products (id, sku, name, unit_of_measure, hazard_class)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE
                SET sku = EXCLUDED.sku,
                    name = EXCLUDED.name,
                    unit_of_measure = EXCLUDED.unit_of_measure,
                    hazard_class = EXCLUDED.hazard_class",
            &[
                &product.id,
                &product.sku.as_str(),
                &product.name,
                &product.unit_of_measure,
                &product.hazard_class,
            ],
        )
        .map_err(|e: postgres::Error| PricerError::DatabaseQuery {
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

    fn entry_from_columns(row: &postgres::Row) -> Result<PriceListEntry, PricerError> {
        let id: i64 = row.get(0);
        let supplier_id: i64 = row.get(1);
        let sku_raw: String = row.get(2);
        let valid_from: NaiveDate = row.get(3);
        let valid_to: Option<NaiveDate> = row.get(4);
        let currency_raw: String = row.get(5);
        let amount: Decimal = row.get(6);
        let min_qty: i64 = row.get(7);

        let corrupt = |what: &str, detail: String| PricerError::Database {
            reason: format!("corrupt price entry {id}: {what} {detail}"),
        };

        let sku = Sku::new(&sku_raw).map_err(|e| corrupt("sku", e.to_string()))?;
        let validity = ValidityInterval::new(valid_from, valid_to)
            .map_err(|e| corrupt("validity", e.to_string()))?;
        let currency =
            Currency::from_code(&currency_raw).map_err(|e| corrupt("currency", e.to_string()))?;
        let price = Money::new(amount, currency).map_err(|e| corrupt("price", e.to_string()))?;
        let minimum_quantity =
            Quantity::new(min_qty).map_err(|e| corrupt("min_qty", e.to_string()))?;

        Ok(PriceListEntry {
            id,
            supplier_id,
            sku,
            validity,
            price,
            minimum_quantity,
        })
    }
}

impl CatalogPort for PostgresAdapter {
    fn supplier_exists(&self, supplier_id: i64) -> Result<bool, PricerError> {
        let mut conn = self.conn()?;
        let row = conn
            .query_one(
                "SELECT COUNT(*) FROM suppliers WHERE id = $1",
                &[&supplier_id],
            )
            .map_err(|e: postgres::Error| PricerError::DatabaseQuery {
                reason: e.to_string(),
            })?;
        let count: i64 = row.get(0);
        Ok(count > 0)
    }

    fn product_exists(&self, sku: &Sku) -> Result<bool, PricerError> {
        let mut conn = self.conn()?;
        let row = conn
            .query_one("SELECT COUNT(*) FROM products WHERE sku = $1", &[&sku.as_str()])
            .map_err(|e: postgres::Error| PricerError::DatabaseQuery {
                reason: e.to_string(),
            })?;
        let count: i64 = row.get(0);
        Ok(count > 0)
    }
}

impl PricePort for PostgresAdapter {
    fn valid_candidates(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<PriceCandidate>, PricerError> {
        let mut conn = self.conn()?;

        let query = "SELECT p.id, p.supplier_id, p.sku, p.valid_from, p.valid_to,
                            p.currency, p.price_per_uom, p.min_qty,
                            s.name, s.preferred, s.lead_time_days
                     FROM price_entries p
                     JOIN suppliers s ON s.id = p.supplier_id
                     WHERE ($1::text IS NULL OR p.sku = $1)
                       AND ($2::bigint IS NULL OR p.min_qty <= $2)
                       AND ($3::date IS NULL OR (p.valid_from <= $3
                            AND (p.valid_to IS NULL OR p.valid_to >= $3)))
                       AND ($4::text IS NULL OR p.currency = $4)
                       AND ($5::bigint IS NULL OR p.supplier_id = $5)
                     ORDER BY p.id ASC";

        let sku = filter.sku.as_ref().map(|s| s.as_str().to_string());
        let quantity = filter.quantity.map(|q| q.value() as i64);
        let currency = filter.currency.map(|c| c.code().to_string());

        let params: &[&(dyn ToSql + Sync)] = &[
            &sku,
            &quantity,
            &filter.valid_on,
            &currency,
            &filter.supplier_id,
        ];
        let rows = conn
            .query(query, params)
            .map_err(|e: postgres::Error| PricerError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        let mut candidates = Vec::new();
        for row in &rows {
            let entry = Self::entry_from_columns(row)?;
            let supplier_name: String = row.get(8);
            let supplier_preferred: bool = row.get(9);
            let supplier_lead_time_days: i32 = row.get(10);
            candidates.push(PriceCandidate {
                entry_id: entry.id,
                supplier_id: entry.supplier_id,
                supplier_name,
                supplier_preferred,
                supplier_lead_time_days: supplier_lead_time_days.max(0) as u32,
                sku: entry.sku,
                unit_price: entry.price,
                minimum_quantity: entry.minimum_quantity,
                validity: entry.validity,
            });
        }

        Ok(candidates)
    }

    fn entries_for(
        &self,
        supplier_id: i64,
        sku: &Sku,
    ) -> Result<Vec<PriceListEntry>, PricerError> {
        let mut conn = self.conn()?;
        let rows = conn
            .query(
                "SELECT id, supplier_id, sku, valid_from, valid_to, currency, price_per_uom, min_qty
                 FROM price_entries
                 WHERE supplier_id = $1 AND sku = $2
                 ORDER BY valid_from ASC",
                &[&supplier_id, &sku.as_str()],
            )
            .map_err(|e: postgres::Error| PricerError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        let mut entries = Vec::new();
        for row in &rows {
            entries.push(Self::entry_from_columns(row)?);
        }
        Ok(entries)
    }

    fn import_entries(&self, entries: &[NewPriceEntry]) -> Result<usize, PricerError> {
        let mut conn = self.conn()?;
        let mut tx = conn
            .transaction()
            .map_err(|e: postgres::Error| PricerError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        for entry in entries {
            tx.execute(
                "INSERT INTO price_entries
                    (supplier_id, sku, valid_from, valid_to, currency, price_per_uom, min_qty)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
                &[
                    &entry.supplier_id,
                    &entry.sku.as_str(),
                    &entry.validity.from(),
                    &entry.validity.to(),
                    &entry.price.currency().code(),
                    &entry.price.amount(),
                    &(entry.minimum_quantity.value() as i64),
                ],
            )
            .map_err(|e: postgres::Error| PricerError::DatabaseQuery {
                reason: e.to_string(),
            })?;
        }

        tx.commit()
            .map_err(|e: postgres::Error| PricerError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        Ok(entries.len())
    }
}
