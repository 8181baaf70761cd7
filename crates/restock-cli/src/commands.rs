use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use restock_core::{DecisionPolicy, Pipeline};
use restock_ingest::{load_mapping, load_source_file};
use restock_model::SourceKind;
use restock_report::{group_by_center, write_csv_report, write_json_report};

use crate::cli::PlanArgs;
use crate::summary::apply_table_style;
use crate::types::PlanResult;

pub fn run_schemas() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Source", "Required headers"]);
    apply_table_style(&mut table);
    for kind in SourceKind::ALL {
        table.add_row(vec![
            kind.label().to_string(),
            kind.required_headers().join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_plan(args: &PlanArgs) -> Result<PlanResult> {
    let plan_span = info_span!("plan");
    let _plan_guard = plan_span.enter();
    let plan_start = Instant::now();
    let mut errors = Vec::new();

    let policy = match &args.policy {
        Some(path) => DecisionPolicy::load(path)
            .with_context(|| format!("load policy profile {}", path.display()))?,
        None => DecisionPolicy::default(),
    };

    // =========================================================================
    // Stage 1: Load - four independent source loads, any order
    // =========================================================================
    let loads = [
        (
            SourceKind::Sale,
            load_source_file(SourceKind::Sale, &args.sale),
        ),
        (
            SourceKind::FcSnapshot,
            load_source_file(SourceKind::FcSnapshot, &args.fc_snapshot),
        ),
        (
            SourceKind::Central,
            load_source_file(SourceKind::Central, &args.central),
        ),
        (SourceKind::Mapping, load_mapping(&args.data_dir)),
    ];

    let mut pipeline = Pipeline::new();
    for (kind, outcome) in loads {
        if let Err(error) = &outcome {
            errors.push(error.to_string());
        }
        pipeline = pipeline.load(kind, outcome);
    }

    // =========================================================================
    // Stage 2: Aggregate + Decide - only against a complete source set
    // =========================================================================
    let pipeline = if pipeline.ready() {
        pipeline.run(&policy).context("run planning pipeline")?
    } else {
        let missing: Vec<&str> = pipeline
            .missing_sources()
            .into_iter()
            .map(SourceKind::label)
            .collect();
        errors.push(format!(
            "plan not computed: missing sources: {}",
            missing.join(", ")
        ));
        pipeline
    };

    // =========================================================================
    // Stage 3: Assemble - group, paginate, export
    // =========================================================================
    let records = pipeline.records().to_vec();
    let groups = group_by_center(&records);

    let csv_report = match &args.csv_out {
        Some(path) if !records.is_empty() => match write_csv_report(path, &records) {
            Ok(()) => Some(path.clone()),
            Err(error) => {
                errors.push(format!("csv report: {error}"));
                None
            }
        },
        _ => None,
    };
    let json_report = match &args.json_out {
        Some(path) if !records.is_empty() => match write_json_report(path, &records) {
            Ok(()) => Some(path.clone()),
            Err(error) => {
                errors.push(format!("json report: {error}"));
                None
            }
        },
        _ => None,
    };

    let pipeline = pipeline.rendered();
    info!(
        center_count = groups.len(),
        record_count = records.len(),
        duration_ms = plan_start.elapsed().as_millis(),
        "plan complete"
    );

    let has_errors = !errors.is_empty();
    Ok(PlanResult {
        groups,
        record_count: records.len(),
        events: pipeline.events().lines().to_vec(),
        errors,
        csv_report,
        json_report,
        has_errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn plan_args(dir: &Path) -> PlanArgs {
        PlanArgs {
            sale: dir.join("sale.csv"),
            fc_snapshot: dir.join("fc.csv"),
            central: dir.join("central.csv"),
            data_dir: dir.to_path_buf(),
            policy: None,
            page_size: 25,
            csv_out: None,
            json_out: None,
            show_events: false,
        }
    }

    fn write_sources(dir: &Path) {
        fs::write(
            dir.join("sale.csv"),
            "Transaction Type,Sku,Quantity,Warehouse Id\nShipment,SKU1,100,FC1\n",
        )
        .unwrap();
        fs::write(
            dir.join("fc.csv"),
            "Date,MSKU,Disposition,Ending Warehouse Balance,Location\n\
             01-01-2024,SKU1,SELLABLE,50,FC1\n",
        )
        .unwrap();
        fs::write(dir.join("central.csv"), "Sku Code,Total Inventory\nUSKU1,500\n").unwrap();
        fs::create_dir_all(dir.join("data")).unwrap();
        fs::write(
            dir.join("data/sku_mapping.csv"),
            "Amazon Seller SKU,Uniware SKU\nSKU1,USKU1\n",
        )
        .unwrap();
    }

    #[test]
    fn plan_runs_end_to_end_from_files() {
        let dir = tempfile::tempdir().unwrap();
        write_sources(dir.path());
        let mut args = plan_args(dir.path());
        args.csv_out = Some(dir.path().join("plan.csv"));

        let result = run_plan(&args).expect("run plan");
        assert!(!result.has_errors);
        assert_eq!(result.record_count, 1);
        assert_eq!(result.groups.len(), 1);
        assert_eq!(result.groups[0].fulfillment_center, "FC1");
        assert!(result.csv_report.is_some());
        assert!(dir.path().join("plan.csv").exists());
        assert!(
            result
                .events
                .iter()
                .any(|line| line.contains("decision complete"))
        );
    }

    #[test]
    fn missing_mapping_blocks_the_plan_but_not_the_command() {
        let dir = tempfile::tempdir().unwrap();
        write_sources(dir.path());
        fs::remove_file(dir.path().join("data/sku_mapping.csv")).unwrap();

        let result = run_plan(&plan_args(dir.path())).expect("run plan");
        assert!(result.has_errors);
        assert_eq!(result.record_count, 0);
        assert!(
            result
                .errors
                .iter()
                .any(|error| error.contains("missing sources"))
        );
    }

    #[test]
    fn schemas_listing_succeeds() {
        run_schemas().expect("run schemas");
    }
}
