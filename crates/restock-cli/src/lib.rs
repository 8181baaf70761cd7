//! CLI library components for the Restock Planner.

pub mod logging;
