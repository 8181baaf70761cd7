//! File exports of the planning record set.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

use restock_model::RestockRecord;

const CSV_HEADERS: [&str; 12] = [
    "Fulfillment Center",
    "Sku",
    "FC Stock",
    "Central Stock",
    "Sale (30d)",
    "DRR",
    "Return %",
    "Stock Cover",
    "Decision",
    "Send Qty",
    "Recall Qty",
    "Remarks",
];

/// Writes the record set as a CSV report, one row per record.
pub fn write_csv_report(path: &Path, records: &[RestockRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create csv report {}", path.display()))?;
    writer
        .write_record(CSV_HEADERS)
        .context("write csv header")?;
    for record in records {
        writer
            .write_record([
                record.key.fulfillment_center.clone(),
                record.key.sku.clone(),
                format!("{:.0}", record.fc_stock),
                format!("{:.0}", record.central_stock),
                format!("{:.0}", record.sale_30d),
                format!("{:.2}", record.drr),
                format!("{:.2}", record.return_pct),
                format!("{:.2}", record.stock_cover),
                record.decision.to_string(),
                record.send_qty.to_string(),
                record.recall_qty.to_string(),
                record.remarks.to_string(),
            ])
            .with_context(|| format!("write csv row for {}", record.key.sku))?;
    }
    writer.flush().context("flush csv report")?;
    Ok(())
}

/// Writes the record set as a JSON report.
pub fn write_json_report(path: &Path, records: &[RestockRecord]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("create json report {}", path.display()))?;
    serde_json::to_writer_pretty(file, records).context("serialize json report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use restock_model::{Decision, REMARK_OVERSTOCK, RestockKey};

    fn sample() -> Vec<RestockRecord> {
        vec![RestockRecord {
            key: RestockKey::new("SKU1", "FC1"),
            fc_stock: 200.0,
            central_stock: 500.0,
            sale_30d: 100.0,
            drr: 100.0 / 30.0,
            return_pct: 0.0,
            stock_cover: 60.0,
            decision: Decision::DoNotSend,
            send_qty: 0,
            recall_qty: 50,
            remarks: REMARK_OVERSTOCK,
        }]
    }

    #[test]
    fn csv_report_has_header_and_one_row_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.csv");
        write_csv_report(&path, &sample()).expect("write csv");

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Fulfillment Center,Sku"));
        assert!(lines[1].contains("DO NOT SEND"));
        assert!(lines[1].contains("Overstock / Returns"));
        assert!(lines[1].contains("3.33"));
    }

    #[test]
    fn json_report_round_trips_core_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        write_json_report(&path, &sample()).expect("write json");

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed[0]["sku"], "SKU1");
        assert_eq!(parsed[0]["recall_qty"], 50);
        assert_eq!(parsed[0]["decision"], "DO_NOT_SEND");
    }
}
