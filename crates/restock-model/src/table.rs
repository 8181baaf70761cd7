use std::collections::HashMap;

/// A parsed tabular source: ordered headers, equal-length rows, and a
/// header-to-column index.
///
/// Every row is exactly as wide as the header row; the parser pads short rows
/// with empty cells and truncates long ones. The index is built by
/// enumerating headers left-to-right with plain insertion, so a duplicated
/// header name resolves to its last position. Source exports are not supposed
/// to repeat headers; the behavior is kept as observed rather than rejected.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    index: HashMap<String, usize>,
}

impl Table {
    /// Builds a table from raw headers and rows, normalizing every row to
    /// header width.
    pub fn from_parts(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.truncate(width);
                row.resize(width, String::new());
                row
            })
            .collect();
        let mut index = HashMap::with_capacity(width);
        for (position, header) in headers.iter().enumerate() {
            index.insert(header.clone(), position);
        }
        Self {
            headers,
            rows,
            index,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column position for a header, by exact case-sensitive name.
    pub fn column(&self, header: &str) -> Option<usize> {
        self.index.get(header).copied()
    }

    /// Cell value at `(row, header)`; empty string when the header is absent.
    pub fn cell<'a>(&'a self, row: &'a [String], header: &str) -> &'a str {
        self.column(header)
            .and_then(|position| row.get(position))
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn rows_are_normalized_to_header_width() {
        let table = Table::from_parts(
            strings(&["A", "B", "C"]),
            vec![strings(&["1"]), strings(&["1", "2", "3", "4"])],
        );
        assert_eq!(table.rows()[0], strings(&["1", "", ""]));
        assert_eq!(table.rows()[1], strings(&["1", "2", "3"]));
    }

    #[test]
    fn index_matches_header_positions() {
        let table = Table::from_parts(strings(&["A", "B", "C"]), vec![]);
        assert_eq!(table.column("A"), Some(0));
        assert_eq!(table.column("B"), Some(1));
        assert_eq!(table.column("C"), Some(2));
        assert_eq!(table.column("D"), None);
    }

    #[test]
    fn header_lookup_is_case_sensitive() {
        let table = Table::from_parts(strings(&["Sku"]), vec![]);
        assert_eq!(table.column("Sku"), Some(0));
        assert_eq!(table.column("SKU"), None);
    }

    #[test]
    fn duplicate_header_resolves_to_last_position() {
        // Kept as observed: a repeated header name shadows the earlier column.
        let table = Table::from_parts(
            strings(&["Sku", "Qty", "Sku"]),
            vec![strings(&["left", "5", "right"])],
        );
        assert_eq!(table.column("Sku"), Some(2));
        assert_eq!(table.cell(&table.rows()[0], "Sku"), "right");
    }

    #[test]
    fn cell_for_missing_header_is_empty() {
        let table = Table::from_parts(strings(&["A"]), vec![strings(&["1"])]);
        assert_eq!(table.cell(&table.rows()[0], "B"), "");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // index[h] equals the position of h in headers, for every
            // distinct header h.
            #[test]
            fn index_reflects_distinct_headers(
                headers in proptest::collection::hash_set("[A-Za-z ]{1,12}", 1..8)
            ) {
                let headers: Vec<String> = headers.into_iter().collect();
                let table = Table::from_parts(headers.clone(), vec![]);
                for (position, header) in headers.iter().enumerate() {
                    prop_assert_eq!(table.column(header), Some(position));
                }
            }
        }
    }
}
