//! Structural header validation.

use restock_model::{SourceKind, Table};

use crate::error::{IngestError, Result};

/// Checks that every required header for `kind` is present by exact
/// case-sensitive match, failing fast on the first one missing.
///
/// Header order is irrelevant and extra headers are permitted, which is what
/// lets the richer sale-export variant pass the canonical schema. The check
/// is pure: no logging, no mutation.
pub fn validate_headers(kind: SourceKind, headers: &[String]) -> Result<()> {
    for required in kind.required_headers() {
        if !headers.iter().any(|header| header == required) {
            return Err(IngestError::MissingHeader {
                kind,
                header: (*required).to_string(),
            });
        }
    }
    Ok(())
}

/// Validates a parsed table against the schema for `kind`.
pub fn validate_table(kind: SourceKind, table: &Table) -> Result<()> {
    validate_headers(kind, table.headers())
}
