use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use restock_model::{Decision, RestockRecord};
use restock_report::paginate;

use crate::types::PlanResult;

pub fn print_summary(result: &PlanResult, page_size: usize, show_events: bool) {
    println!(
        "Centers: {}  Records: {}",
        result.groups.len(),
        result.record_count
    );
    if let Some(path) = &result.csv_report {
        println!("CSV report: {}", path.display());
    }
    if let Some(path) = &result.json_report {
        println!("JSON report: {}", path.display());
    }

    for group in &result.groups {
        println!();
        println!(
            "{} ({} records)",
            group.fulfillment_center,
            group.records.len()
        );
        let pages = paginate(&group.records, page_size);
        let page_count = pages.len();
        for (page_index, page) in pages.into_iter().enumerate() {
            print_page(page);
            if page_count > 1 {
                println!("page {}/{page_count}", page_index + 1);
            }
        }
    }

    if show_events && !result.events.is_empty() {
        println!();
        println!("Events:");
        for line in &result.events {
            println!("- {line}");
        }
    }

    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

fn print_page(records: &[RestockRecord]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sku"),
        header_cell("FC Stock"),
        header_cell("Central"),
        header_cell("Sale 30d"),
        header_cell("DRR"),
        header_cell("Return %"),
        header_cell("Cover"),
        header_cell("Decision"),
        header_cell("Send"),
        header_cell("Recall"),
        header_cell("Remarks"),
    ]);
    apply_record_table_style(&mut table);
    for index in 1..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 7, CellAlignment::Center);
    align_column(&mut table, 8, CellAlignment::Right);
    align_column(&mut table, 9, CellAlignment::Right);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.key.sku),
            Cell::new(format!("{:.0}", record.fc_stock)),
            Cell::new(format!("{:.0}", record.central_stock)),
            Cell::new(format!("{:.0}", record.sale_30d)),
            Cell::new(format!("{:.2}", record.drr)),
            Cell::new(format!("{:.2}", record.return_pct)),
            Cell::new(format!("{:.2}", record.stock_cover)),
            decision_cell(record.decision),
            qty_cell(record.send_qty),
            qty_cell(record.recall_qty),
            Cell::new(record.remarks),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_record_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn decision_cell(decision: Decision) -> Cell {
    match decision {
        Decision::Send => Cell::new("SEND")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Decision::DoNotSend => Cell::new("DO NOT SEND").fg(Color::Yellow),
    }
}

fn qty_cell(quantity: i64) -> Cell {
    if quantity == 0 {
        Cell::new(quantity).fg(Color::DarkGrey)
    } else {
        Cell::new(quantity).add_attribute(Attribute::Bold)
    }
}
