//! Source loading: raw text or file path in, validated [`Table`] out.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use restock_model::{SourceKind, Table};

use crate::error::{IngestError, Result};
use crate::parser::parse_table;
use crate::validate::validate_table;

/// Well-known location of the SKU cross-reference, relative to the data
/// directory. The original deployment served this file next to the app; a
/// missing or unreadable file is a load failure, not a fatal error.
pub const MAPPING_RELATIVE_PATH: &str = "data/sku_mapping.csv";

/// Parses and validates raw source text.
pub fn load_source_text(kind: SourceKind, text: &str) -> Result<Table> {
    let table = parse_table(kind, text)?;
    validate_table(kind, &table)?;
    debug!(
        source = %kind,
        rows = table.row_count(),
        columns = table.headers().len(),
        "source validated"
    );
    Ok(table)
}

/// Reads, parses, and validates a source file.
pub fn load_source_file(kind: SourceKind, path: &Path) -> Result<Table> {
    let text = fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        kind,
        path: path.to_path_buf(),
        source,
    })?;
    load_source_text(kind, &text)
}

/// Resolves the mapping file location under `base_dir`.
pub fn mapping_path(base_dir: &Path) -> PathBuf {
    base_dir.join(MAPPING_RELATIVE_PATH)
}

/// Loads the SKU cross-reference from its well-known location.
pub fn load_mapping(base_dir: &Path) -> Result<Table> {
    load_source_file(SourceKind::Mapping, &mapping_path(base_dir))
}
