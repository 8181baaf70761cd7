//! Error types for source ingestion.

use std::path::PathBuf;

use thiserror::Error;

use restock_model::SourceKind;

/// Errors that abort a single source load.
///
/// Every variant is local to one source slot: the pipeline clears the slot,
/// records the message on its event log, and stays not ready. Nothing here is
/// fatal to the process; re-supplying the offending source recovers.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Source text was empty after BOM and whitespace stripping.
    #[error("{kind}: empty source text")]
    EmptyInput { kind: SourceKind },

    /// A required header is absent from the parsed header row.
    #[error("{kind}: missing required header: {header}")]
    MissingHeader { kind: SourceKind, header: String },

    /// Reading the source from disk failed.
    #[error("{kind}: failed to read {path}: {source}")]
    FileRead {
        kind: SourceKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    /// The source the failed load was feeding.
    pub fn kind(&self) -> SourceKind {
        match self {
            IngestError::EmptyInput { kind }
            | IngestError::MissingHeader { kind, .. }
            | IngestError::FileRead { kind, .. } => *kind,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
