//! Supplier catalog records.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub country: Option<String>,
    pub preferred: bool,
    pub lead_time_days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplier_fields() {
        let s = Supplier {
            id: 1,
            name: "Acme Chemicals".into(),
            country: Some("DE".into()),
            preferred: true,
            lead_time_days: 5,
        };
        assert_eq!(s.id, 1);
        assert!(s.preferred);
        assert_eq!(s.lead_time_days, 5);
    }
}
