use std::path::PathBuf;

use restock_report::CenterGroup;

#[derive(Debug)]
pub struct PlanResult {
    /// Records grouped by fulfillment center, ready for rendering.
    pub groups: Vec<CenterGroup>,
    /// Total record count across all centers.
    pub record_count: usize,
    /// Append-only pipeline event log, one line per event.
    pub events: Vec<String>,
    /// Load and export failures, in occurrence order.
    pub errors: Vec<String>,
    pub csv_report: Option<PathBuf>,
    pub json_report: Option<PathBuf>,
    pub has_errors: bool,
}
