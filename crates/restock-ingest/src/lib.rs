//! Source ingestion for the restock planner: CSV parsing, header-schema
//! validation, and typed views over the four inventory sources.

pub mod error;
pub mod loader;
pub mod parser;
pub mod sources;
pub mod validate;

pub use error::{IngestError, Result};
pub use loader::{
    MAPPING_RELATIVE_PATH, load_mapping, load_source_file, load_source_text, mapping_path,
};
pub use parser::{detect_delimiter, parse_table};
pub use sources::{
    CentralRow, CentralView, MappingRow, MappingView, SaleRow, SaleView, SnapshotRow, SnapshotView,
};
pub use validate::{validate_headers, validate_table};
