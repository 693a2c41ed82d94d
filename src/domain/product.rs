//! Product catalog records.

use crate::domain::sku::Sku;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub sku: Sku,
    pub name: String,
    pub unit_of_measure: String,
    pub hazard_class: Option<String>,
}

impl Product {
    pub fn is_hazardous(&self) -> bool {
        self.hazard_class.as_deref().is_some_and(|c| !c.is_empty())
    }
}
