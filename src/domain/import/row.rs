//! Raw CSV rows for price-list import.
//!
//! The wire format is fixed: a discarded header line, then comma-separated
//! lines of `SupplierId,Sku,ValidFrom,ValidTo,Currency,PricePerUom,MinQty`.
//! Double quotes toggle an in-quotes state so quoted fields may contain
//! literal commas; the quote characters themselves are dropped and there is
//! no escape sequence.

pub const EXPECTED_FIELDS: usize = 7;

/// One raw data row. `row_number` is the physical line number in the file,
/// header included (header = 1, first data row = 2), so blank lines still
/// advance the numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub row_number: usize,
    pub supplier_id: String,
    pub sku: String,
    pub valid_from: String,
    pub valid_to: String,
    pub currency: String,
    pub price_per_uom: String,
    pub min_qty: String,
}

/// Split one line on commas, honoring double-quoted sections.
fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Parse the full import payload into raw rows.
///
/// Blank lines are skipped. Lines with fewer than the expected seven fields
/// are dropped without an error and never reach validation.
pub fn parse_rows(input: &str) -> Vec<CsvRow> {
    let mut rows = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let row_number = index + 1;
        if row_number == 1 {
            continue; // header
        }
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_line(line);
        if fields.len() < EXPECTED_FIELDS {
            continue;
        }

        rows.push(CsvRow {
            row_number,
            supplier_id: fields[0].trim().to_string(),
            sku: fields[1].trim().to_string(),
            valid_from: fields[2].trim().to_string(),
            valid_to: fields[3].trim().to_string(),
            currency: fields[4].trim().to_string(),
            price_per_uom: fields[5].trim().to_string(),
            min_qty: fields[6].trim().to_string(),
        });
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "SupplierId,Sku,ValidFrom,ValidTo,Currency,PricePerUom,MinQty";

    #[test]
    fn parses_a_simple_file() {
        let input = format!("{HEADER}\n1,SKU-1001,2025-01-01,2025-12-31,USD,25.50,10\n");
        let rows = parse_rows(&input);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.row_number, 2);
        assert_eq!(row.supplier_id, "1");
        assert_eq!(row.sku, "SKU-1001");
        assert_eq!(row.valid_from, "2025-01-01");
        assert_eq!(row.valid_to, "2025-12-31");
        assert_eq!(row.currency, "USD");
        assert_eq!(row.price_per_uom, "25.50");
        assert_eq!(row.min_qty, "10");
    }

    #[test]
    fn header_only_yields_no_rows() {
        assert!(parse_rows(&format!("{HEADER}\n")).is_empty());
        assert!(parse_rows("").is_empty());
    }

    #[test]
    fn empty_valid_to_is_allowed() {
        let input = format!("{HEADER}\n1,SKU-1002,2025-01-01,,EUR,18.75,5\n");
        let rows = parse_rows(&input);
        assert_eq!(rows[0].valid_to, "");
    }

    #[test]
    fn blank_lines_are_skipped_but_numbering_is_physical() {
        let input = format!(
            "{HEADER}\n\n1,SKU-1001,2025-01-01,,USD,10,1\n\n2,SKU-1001,2026-01-01,,USD,10,1\n"
        );
        let rows = parse_rows(&input);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row_number, 3);
        assert_eq!(rows[1].row_number, 5);
    }

    #[test]
    fn short_rows_are_dropped() {
        let input = format!("{HEADER}\n1,SKU-1001,2025-01-01\n1,SKU-1001,2025-01-01,,USD,10,1\n");
        let rows = parse_rows(&input);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].row_number, 3);
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let line = r#"1,"SKU-1001",2025-01-01,,USD,"1,250.00",10"#;
        let fields = split_line(line);
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[1], "SKU-1001");
        assert_eq!(fields[5], "1,250.00");
    }

    #[test]
    fn quotes_toggle_and_are_dropped() {
        let fields = split_line(r#"a"b"c,d"#);
        assert_eq!(fields, vec!["abc".to_string(), "d".to_string()]);
    }

    #[test]
    fn unterminated_quote_swallows_the_rest_of_the_line() {
        let fields = split_line(r#"1,"no end,2,3"#);
        assert_eq!(fields, vec!["1".to_string(), "no end,2,3".to_string()]);
    }

    #[test]
    fn fields_are_trimmed() {
        let input = format!("{HEADER}\n 1 , SKU-1001 ,2025-01-01, ,USD, 25.50 , 10 \n");
        let row = &parse_rows(&input)[0];
        assert_eq!(row.supplier_id, "1");
        assert_eq!(row.sku, "SKU-1001");
        assert_eq!(row.valid_to, "");
        assert_eq!(row.price_per_uom, "25.50");
    }

    #[test]
    fn extra_fields_are_kept_out_of_the_row() {
        // Eight fields parse fine; the eighth is ignored.
        let input = format!("{HEADER}\n1,SKU-1001,2025-01-01,,USD,10,1,extra\n");
        let rows = parse_rows(&input);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].min_qty, "1");
    }
}
