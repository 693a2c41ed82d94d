//! Catalog lookup port trait: supplier and product existence checks used by
//! the import validator.

use crate::domain::error::PricerError;
use crate::domain::sku::Sku;

pub trait CatalogPort {
    fn supplier_exists(&self, supplier_id: i64) -> Result<bool, PricerError>;

    fn product_exists(&self, sku: &Sku) -> Result<bool, PricerError>;
}
