use std::fmt;

use crate::RestockKey;

/// Outcome of the decision rule for one SKU/FC pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Send,
    DoNotSend,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Send => f.write_str("SEND"),
            Decision::DoNotSend => f.write_str("DO NOT SEND"),
        }
    }
}

/// Remark attached when FC cover fell short of the target.
pub const REMARK_LOW_COVER: &str = "Low stock cover";
/// Remark attached when cover or the return rate exceeded its limit.
pub const REMARK_OVERSTOCK: &str = "Overstock / Returns";
/// Remark attached when central stock could not justify a send.
pub const REMARK_CENTRAL_CONSTRAINT: &str = "Uniware constraint";

/// One fully-computed planning row for a SKU/FC pair.
///
/// A run of the decision engine produces the complete set from scratch;
/// records from a previous run are discarded wholesale, never merged.
/// Renderers consume the set read-only.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RestockRecord {
    #[serde(flatten)]
    pub key: RestockKey,
    /// Sellable units at the fulfillment center, latest snapshot date.
    pub fc_stock: f64,
    /// Units available at the central warehouse for the mapped SKU.
    pub central_stock: f64,
    /// Units sold over the reporting window.
    pub sale_30d: f64,
    /// Daily run rate: mean units sold per day.
    pub drr: f64,
    /// Returned units as a percentage of gross movement.
    pub return_pct: f64,
    /// Days of inventory remaining at the current FC stock level.
    pub stock_cover: f64,
    pub decision: Decision,
    /// Units to ship when the decision is SEND.
    pub send_qty: i64,
    /// Excess units to pull back when cover or returns ran over.
    pub recall_qty: i64,
    pub remarks: &'static str,
}
