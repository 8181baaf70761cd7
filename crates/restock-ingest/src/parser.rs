//! Delimiter-auto-detecting CSV parsing.
//!
//! The exports this tool consumes come from three different back offices and
//! disagree on delimiters, line endings, and quoting. The parser normalizes
//! all of that: it strips a UTF-8 BOM, accepts CRLF or LF, probes the header
//! line for the delimiter, and strips surrounding quotes and whitespace from
//! every cell.

use restock_model::{SourceKind, Table};

use crate::error::{IngestError, Result};

/// Delimiters probed in the header line, in priority order; first hit wins.
const DELIMITERS: [char; 3] = ['\t', ';', ','];

/// Picks the delimiter for a file from its header line, defaulting to comma.
pub fn detect_delimiter(header_line: &str) -> char {
    DELIMITERS
        .iter()
        .copied()
        .find(|delimiter| header_line.contains(*delimiter))
        .unwrap_or(',')
}

/// Strips one layer of surrounding quotes, then whitespace.
fn clean_cell(raw: &str) -> String {
    let stripped = raw.strip_prefix('"').unwrap_or(raw);
    let stripped = stripped.strip_suffix('"').unwrap_or(stripped);
    stripped.trim().to_string()
}

/// Parses raw source text into a [`Table`].
///
/// Fails only when the text is empty once the BOM and outer whitespace are
/// gone; malformed cells are carried through as-is and left to the lenient
/// numeric policy downstream.
pub fn parse_table(kind: SourceKind, text: &str) -> Result<Table> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text).trim();
    if text.is_empty() {
        return Err(IngestError::EmptyInput { kind });
    }

    let mut lines = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line));

    // Non-empty trimmed text always yields a first line.
    let header_line = lines.next().unwrap_or_default();
    let delimiter = detect_delimiter(header_line);

    let headers: Vec<String> = header_line.split(delimiter).map(clean_cell).collect();
    let rows: Vec<Vec<String>> = lines
        .map(|line| line.split(delimiter).map(clean_cell).collect())
        .collect();

    Ok(Table::from_parts(headers, rows))
}
