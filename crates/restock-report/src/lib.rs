//! Report assembly for the restock planner: grouping, pagination, and file
//! exports of the decision engine's record set. Everything here consumes the
//! records read-only.

pub mod export;
pub mod group;

pub use export::{write_csv_report, write_json_report};
pub use group::{CenterGroup, DEFAULT_PAGE_SIZE, group_by_center, paginate};
