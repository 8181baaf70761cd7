//! Aggregation and decision core for the restock planner.

pub mod aggregate;
pub mod decide;
pub mod pipeline;
pub mod policy;

pub use aggregate::{
    Aggregation, SNAPSHOT_DATE_FORMAT, aggregate_fc_stock, aggregate_sales, build_central_stock,
    build_sku_mapping, latest_snapshot_date,
};
pub use decide::{KeyMetrics, apply_rule, decide};
pub use pipeline::{EventLog, Pipeline, PipelineError, SourceSlots, Stage};
pub use policy::{DecisionPolicy, PolicyError};
