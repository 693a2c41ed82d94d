//! Concrete adapter implementations for ports.

pub mod file_config_adapter;
#[cfg(feature = "postgres")]
pub mod postgres_adapter;
pub mod rates_adapter;
#[cfg(feature = "sqlite")]
pub mod sqlite_adapter;

use crate::domain::product::Product;
use crate::domain::sku::Sku;
use crate::domain::supplier::Supplier;

/// Demo catalog used by `init-db --seed`: three suppliers and the products
/// named by the CSV template.
pub fn demo_catalog() -> (Vec<Supplier>, Vec<Product>) {
    let suppliers = vec![
        Supplier {
            id: 1,
            name: "Alpha Supplies".into(),
            country: Some("DE".into()),
            preferred: true,
            lead_time_days: 5,
        },
        Supplier {
            id: 2,
            name: "Beta Trading".into(),
            country: Some("CN".into()),
            preferred: false,
            lead_time_days: 12,
        },
        Supplier {
            id: 3,
            name: "Gamma Industrial".into(),
            country: Some("EG".into()),
            preferred: false,
            lead_time_days: 7,
        },
    ];

    let products = [
        ("SKU-1001", "Hex bolts M8", "EA", None),
        ("SKU-1002", "Industrial solvent", "L", Some("3")),
        ("SKU-1003", "Copper wire 2mm", "M", None),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (sku, name, uom, hazard))| Product {
        id: index as i64 + 1,
        sku: Sku::new(sku).expect("demo SKU is well-formed"),
        name: name.into(),
        unit_of_measure: uom.into(),
        hazard_class: hazard.map(String::from),
    })
    .collect();

    (suppliers, products)
}
