//! Planning pipeline: source slots, readiness, staged execution.
//!
//! The pipeline is a plain immutable value. Every operation consumes the
//! current state and returns the next one, so consumers only ever observe
//! complete states: the record set from a previous run stays visible until a
//! new run replaces it wholesale. Loads for the four sources are independent
//! and unordered; readiness is a pure predicate over the slots, recomputed
//! after every load completion or failure. Re-loading a source simply
//! overwrites its slot, which is what makes racing writers safe: the last
//! completion wins the whole slot.

use std::fmt;

use tracing::{info, warn};

use restock_ingest::{
    CentralView, IngestError, MappingView, SaleView, SnapshotView,
};
use restock_model::{RestockRecord, SourceKind, Table};

use crate::aggregate::Aggregation;
use crate::decide::decide;
use crate::policy::DecisionPolicy;

/// Where the pipeline currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    SourcesLoaded,
    Aggregated,
    Decided,
    Rendered,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Idle => "idle",
            Stage::SourcesLoaded => "sources loaded",
            Stage::Aggregated => "aggregated",
            Stage::Decided => "decided",
            Stage::Rendered => "rendered",
        };
        f.write_str(label)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// One or more source slots are empty or invalidated.
    #[error("pipeline not ready: missing sources: {missing}")]
    NotReady { missing: String },

    /// An operation was attempted out of stage order.
    #[error("{operation} requires an aggregated pipeline, current stage: {stage}")]
    OutOfOrder {
        operation: &'static str,
        stage: Stage,
    },

    /// A slot table failed view construction. Slots only hold validated
    /// tables, so this indicates a slot filled outside the load path.
    #[error("source view: {0}")]
    Source(#[from] IngestError),
}

/// Append-only, human-readable diagnostic log: one line per validation or
/// pipeline event.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    lines: Vec<String>,
}

impl EventLog {
    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// The four validated-source slots.
#[derive(Debug, Clone, Default)]
pub struct SourceSlots {
    sale: Option<Table>,
    fc_snapshot: Option<Table>,
    central: Option<Table>,
    mapping: Option<Table>,
}

impl SourceSlots {
    fn slot_mut(&mut self, kind: SourceKind) -> &mut Option<Table> {
        match kind {
            SourceKind::Sale => &mut self.sale,
            SourceKind::FcSnapshot => &mut self.fc_snapshot,
            SourceKind::Central => &mut self.central,
            SourceKind::Mapping => &mut self.mapping,
        }
    }

    pub fn get(&self, kind: SourceKind) -> Option<&Table> {
        match kind {
            SourceKind::Sale => self.sale.as_ref(),
            SourceKind::FcSnapshot => self.fc_snapshot.as_ref(),
            SourceKind::Central => self.central.as_ref(),
            SourceKind::Mapping => self.mapping.as_ref(),
        }
    }

    /// Sources whose slots are currently empty.
    pub fn missing(&self) -> Vec<SourceKind> {
        SourceKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind).is_none())
            .collect()
    }

    /// True iff all four slots hold validated tables.
    pub fn ready(&self) -> bool {
        self.missing().is_empty()
    }
}

/// The planning pipeline state value.
#[derive(Debug, Clone)]
pub struct Pipeline {
    slots: SourceSlots,
    aggregation: Option<Aggregation>,
    records: Vec<RestockRecord>,
    stage: Stage,
    events: EventLog,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            slots: SourceSlots::default(),
            aggregation: None,
            records: Vec::new(),
            stage: Stage::Idle,
            events: EventLog::default(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn ready(&self) -> bool {
        self.slots.ready()
    }

    pub fn missing_sources(&self) -> Vec<SourceKind> {
        self.slots.missing()
    }

    /// Record set from the most recent completed run; empty before the first.
    pub fn records(&self) -> &[RestockRecord] {
        &self.records
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Applies the outcome of one source load.
    ///
    /// A success fills the slot (overwriting any prior content); a failure
    /// clears it. Either way the derived aggregation is dropped and the
    /// stage falls back to the load phase; only a completed `decide`
    /// replaces the visible record set.
    pub fn load(mut self, kind: SourceKind, outcome: Result<Table, IngestError>) -> Self {
        match outcome {
            Ok(table) => {
                info!(source = %kind, rows = table.row_count(), "source slot filled");
                self.events
                    .push(format!("{kind} source validated ({} rows)", table.row_count()));
                *self.slots.slot_mut(kind) = Some(table);
            }
            Err(error) => {
                warn!(source = %kind, %error, "source load failed");
                self.events.push(format!("load failed: {error}"));
                *self.slots.slot_mut(kind) = None;
            }
        }
        self.aggregation = None;
        self.stage = if self.slots.ready() {
            self.events.push("all sources validated".to_string());
            Stage::SourcesLoaded
        } else {
            Stage::Idle
        };
        self
    }

    /// Runs the reduction passes over the loaded sources.
    pub fn aggregate(mut self) -> Result<Self, PipelineError> {
        let SourceSlots {
            sale: Some(sale),
            fc_snapshot: Some(fc_snapshot),
            central: Some(central),
            mapping: Some(mapping),
        } = &self.slots
        else {
            return Err(PipelineError::NotReady {
                missing: join_kinds(&self.slots.missing()),
            });
        };

        let sale = SaleView::new(sale.clone())?;
        let snapshot = SnapshotView::new(fc_snapshot.clone())?;
        let central = CentralView::new(central.clone())?;
        let mapping = MappingView::new(mapping.clone())?;

        let aggregation = Aggregation::build(&sale, &snapshot, &central, &mapping);
        let candidates = aggregation.candidate_keys().len();
        info!(candidate_keys = candidates, "aggregation complete");
        self.events
            .push(format!("aggregation complete ({candidates} candidate keys)"));
        self.aggregation = Some(aggregation);
        self.stage = Stage::Aggregated;
        Ok(self)
    }

    /// Applies the decision rule, replacing the record set wholesale.
    pub fn decide(mut self, policy: &DecisionPolicy) -> Result<Self, PipelineError> {
        let Some(aggregation) = &self.aggregation else {
            return Err(PipelineError::OutOfOrder {
                operation: "decide",
                stage: self.stage(),
            });
        };
        let records = decide(aggregation, policy);
        info!(record_count = records.len(), "decision complete");
        self.events
            .push(format!("decision complete ({} records)", records.len()));
        self.records = records;
        self.stage = Stage::Decided;
        Ok(self)
    }

    /// Aggregates and decides in one step.
    pub fn run(self, policy: &DecisionPolicy) -> Result<Self, PipelineError> {
        self.aggregate()?.decide(policy)
    }

    /// Marks the current record set as handed to a renderer.
    pub fn rendered(mut self) -> Self {
        if self.stage() == Stage::Decided {
            self.events
                .push(format!("report rendered ({} records)", self.records.len()));
            self.stage = Stage::Rendered;
        }
        self
    }
}

fn join_kinds(kinds: &[SourceKind]) -> String {
    kinds
        .iter()
        .copied()
        .map(SourceKind::label)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use restock_ingest::{load_source_text, parse_table};

    const SALE: &str = "Transaction Type,Sku,Quantity,Warehouse Id\nShipment,SKU1,100,FC1";
    const FC: &str = "Date,MSKU,Disposition,Ending Warehouse Balance,Location\n\
                      01-01-2024,SKU1,SELLABLE,200,FC1";
    const CENTRAL: &str = "Sku Code,Total Inventory\nUSKU1,500";
    const MAPPING: &str = "Amazon Seller SKU,Uniware SKU\nSKU1,USKU1";

    fn loaded() -> Pipeline {
        Pipeline::new()
            .load(SourceKind::Sale, load_source_text(SourceKind::Sale, SALE))
            .load(
                SourceKind::FcSnapshot,
                load_source_text(SourceKind::FcSnapshot, FC),
            )
            .load(
                SourceKind::Central,
                load_source_text(SourceKind::Central, CENTRAL),
            )
            .load(
                SourceKind::Mapping,
                load_source_text(SourceKind::Mapping, MAPPING),
            )
    }

    #[test]
    fn readiness_requires_all_four_slots() {
        let mut pipeline = Pipeline::new();
        assert_eq!(pipeline.stage(), Stage::Idle);
        assert!(!pipeline.ready());

        pipeline = pipeline.load(SourceKind::Sale, load_source_text(SourceKind::Sale, SALE));
        assert!(!pipeline.ready());
        assert_eq!(pipeline.missing_sources().len(), 3);

        let pipeline = loaded();
        assert!(pipeline.ready());
        assert_eq!(pipeline.stage(), Stage::SourcesLoaded);
    }

    #[test]
    fn failed_load_clears_the_slot() {
        let pipeline = loaded();
        assert!(pipeline.ready());

        // Re-load the central source with an invalid file.
        let pipeline = pipeline.load(
            SourceKind::Central,
            load_source_text(SourceKind::Central, "Sku Code,Stock\nUSKU1,500"),
        );
        assert!(!pipeline.ready());
        assert_eq!(pipeline.missing_sources(), vec![SourceKind::Central]);
        assert_eq!(pipeline.stage(), Stage::Idle);
        assert!(pipeline.run(&DecisionPolicy::default()).is_err());
    }

    #[test]
    fn reload_overwrites_the_slot() {
        let pipeline = loaded().load(
            SourceKind::Sale,
            load_source_text(
                SourceKind::Sale,
                "Transaction Type,Sku,Quantity,Warehouse Id\nShipment,SKU9,5,FC9",
            ),
        );
        let pipeline = pipeline.run(&DecisionPolicy::default()).expect("run");
        assert_eq!(pipeline.records().len(), 2);
        assert!(
            pipeline
                .records()
                .iter()
                .any(|record| record.key.sku == "SKU9")
        );
    }

    #[test]
    fn run_when_not_ready_names_missing_sources() {
        let pipeline =
            Pipeline::new().load(SourceKind::Sale, load_source_text(SourceKind::Sale, SALE));
        let err = pipeline.run(&DecisionPolicy::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("FC Snapshot"));
        assert!(message.contains("Central Stock"));
        assert!(message.contains("SKU Mapping"));
    }

    #[test]
    fn decide_before_aggregate_is_rejected() {
        let err = loaded().decide(&DecisionPolicy::default()).unwrap_err();
        assert!(matches!(err, PipelineError::OutOfOrder { .. }));
    }

    #[test]
    fn full_run_walks_the_stages() {
        let pipeline = loaded();
        let pipeline = pipeline.aggregate().expect("aggregate");
        assert_eq!(pipeline.stage(), Stage::Aggregated);
        let pipeline = pipeline.decide(&DecisionPolicy::default()).expect("decide");
        assert_eq!(pipeline.stage(), Stage::Decided);
        assert_eq!(pipeline.records().len(), 1);
        let pipeline = pipeline.rendered();
        assert_eq!(pipeline.stage(), Stage::Rendered);
    }

    #[test]
    fn previous_records_stay_visible_until_replaced() {
        let pipeline = loaded().run(&DecisionPolicy::default()).expect("run");
        let before: Vec<_> = pipeline.records().to_vec();
        assert!(!before.is_empty());

        // A re-load keeps the prior run's output visible; only the next
        // completed decide replaces it.
        let pipeline = pipeline.load(SourceKind::Sale, load_source_text(SourceKind::Sale, SALE));
        assert_eq!(pipeline.records(), before.as_slice());
    }

    #[test]
    fn repeated_runs_are_idempotent() {
        let pipeline = loaded();
        let first = pipeline
            .clone()
            .run(&DecisionPolicy::default())
            .expect("first run");
        let second = pipeline.run(&DecisionPolicy::default()).expect("second run");
        assert_eq!(first.records(), second.records());
    }

    #[test]
    fn events_trace_loads_and_stages() {
        let pipeline = loaded().run(&DecisionPolicy::default()).expect("run");
        let lines = pipeline.events().lines();
        assert!(lines.iter().any(|line| line.contains("Sale source validated")));
        assert!(lines.iter().any(|line| line == "all sources validated"));
        assert!(lines.iter().any(|line| line.contains("aggregation complete")));
        assert!(lines.iter().any(|line| line.contains("decision complete")));
    }

    #[test]
    fn load_failure_is_logged_not_fatal() {
        let pipeline = Pipeline::new().load(
            SourceKind::Mapping,
            load_source_text(SourceKind::Mapping, ""),
        );
        assert!(
            pipeline
                .events()
                .lines()
                .iter()
                .any(|line| line.contains("empty source text"))
        );
        // Recoverable: supplying the source again fills the slot.
        let pipeline = pipeline.load(
            SourceKind::Mapping,
            load_source_text(SourceKind::Mapping, MAPPING),
        );
        assert_eq!(pipeline.missing_sources().len(), 3);
        assert!(pipeline.slots.get(SourceKind::Mapping).is_some());
    }

    #[test]
    fn slots_expose_loaded_tables() {
        let table = parse_table(SourceKind::Central, CENTRAL).expect("parse");
        let pipeline = Pipeline::new().load(SourceKind::Central, Ok(table));
        let slot = pipeline.slots.get(SourceKind::Central).expect("slot");
        assert_eq!(slot.row_count(), 1);
    }
}
