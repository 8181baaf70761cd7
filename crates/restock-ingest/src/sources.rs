//! Typed row views over validated source tables.
//!
//! A view resolves its required columns once at construction and then hands
//! out borrowed, field-named rows. Construction goes through the same header
//! check as validation, so building a view from a validated table cannot
//! fail in practice; the fallible signature keeps the column resolution
//! explicit instead of panicking.

use restock_model::{SourceKind, Table, source};

use crate::error::{IngestError, Result};

fn resolve(kind: SourceKind, table: &Table, header: &str) -> Result<usize> {
    table
        .column(header)
        .ok_or_else(|| IngestError::MissingHeader {
            kind,
            header: header.to_string(),
        })
}

/// Sale transactions, one row per marketplace event.
#[derive(Debug, Clone)]
pub struct SaleView {
    table: Table,
    transaction_type: usize,
    sku: usize,
    quantity: usize,
    warehouse_id: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct SaleRow<'a> {
    pub transaction_type: &'a str,
    pub sku: &'a str,
    pub quantity: &'a str,
    pub warehouse_id: &'a str,
}

impl SaleView {
    pub fn new(table: Table) -> Result<Self> {
        let kind = SourceKind::Sale;
        let transaction_type = resolve(kind, &table, source::sale::TRANSACTION_TYPE)?;
        let sku = resolve(kind, &table, source::sale::SKU)?;
        let quantity = resolve(kind, &table, source::sale::QUANTITY)?;
        let warehouse_id = resolve(kind, &table, source::sale::WAREHOUSE_ID)?;
        Ok(Self {
            table,
            transaction_type,
            sku,
            quantity,
            warehouse_id,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = SaleRow<'_>> {
        self.table.rows().iter().map(|row| SaleRow {
            transaction_type: row[self.transaction_type].as_str(),
            sku: row[self.sku].as_str(),
            quantity: row[self.quantity].as_str(),
            warehouse_id: row[self.warehouse_id].as_str(),
        })
    }
}

/// Fulfillment-center inventory snapshots, one row per SKU/disposition/day.
#[derive(Debug, Clone)]
pub struct SnapshotView {
    table: Table,
    date: usize,
    msku: usize,
    disposition: usize,
    ending_balance: usize,
    location: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct SnapshotRow<'a> {
    pub date: &'a str,
    pub msku: &'a str,
    pub disposition: &'a str,
    pub ending_balance: &'a str,
    pub location: &'a str,
}

impl SnapshotView {
    pub fn new(table: Table) -> Result<Self> {
        let kind = SourceKind::FcSnapshot;
        let date = resolve(kind, &table, source::fc_snapshot::DATE)?;
        let msku = resolve(kind, &table, source::fc_snapshot::MSKU)?;
        let disposition = resolve(kind, &table, source::fc_snapshot::DISPOSITION)?;
        let ending_balance = resolve(kind, &table, source::fc_snapshot::ENDING_BALANCE)?;
        let location = resolve(kind, &table, source::fc_snapshot::LOCATION)?;
        Ok(Self {
            table,
            date,
            msku,
            disposition,
            ending_balance,
            location,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = SnapshotRow<'_>> {
        self.table.rows().iter().map(|row| SnapshotRow {
            date: row[self.date].as_str(),
            msku: row[self.msku].as_str(),
            disposition: row[self.disposition].as_str(),
            ending_balance: row[self.ending_balance].as_str(),
            location: row[self.location].as_str(),
        })
    }
}

/// Central-warehouse stock, one row per central SKU.
#[derive(Debug, Clone)]
pub struct CentralView {
    table: Table,
    sku_code: usize,
    total_inventory: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct CentralRow<'a> {
    pub sku_code: &'a str,
    pub total_inventory: &'a str,
}

impl CentralView {
    pub fn new(table: Table) -> Result<Self> {
        let kind = SourceKind::Central;
        let sku_code = resolve(kind, &table, source::central::SKU_CODE)?;
        let total_inventory = resolve(kind, &table, source::central::TOTAL_INVENTORY)?;
        Ok(Self {
            table,
            sku_code,
            total_inventory,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = CentralRow<'_>> {
        self.table.rows().iter().map(|row| CentralRow {
            sku_code: row[self.sku_code].as_str(),
            total_inventory: row[self.total_inventory].as_str(),
        })
    }
}

/// SKU cross-reference, one row per marketplace SKU.
#[derive(Debug, Clone)]
pub struct MappingView {
    table: Table,
    marketplace_sku: usize,
    central_sku: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct MappingRow<'a> {
    pub marketplace_sku: &'a str,
    pub central_sku: &'a str,
}

impl MappingView {
    pub fn new(table: Table) -> Result<Self> {
        let kind = SourceKind::Mapping;
        let marketplace_sku = resolve(kind, &table, source::mapping::MARKETPLACE_SKU)?;
        let central_sku = resolve(kind, &table, source::mapping::CENTRAL_SKU)?;
        Ok(Self {
            table,
            marketplace_sku,
            central_sku,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = MappingRow<'_>> {
        self.table.rows().iter().map(|row| MappingRow {
            marketplace_sku: row[self.marketplace_sku].as_str(),
            central_sku: row[self.central_sku].as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_table;

    #[test]
    fn test_sale_view_reads_columns_by_name() {
        let table = parse_table(
            SourceKind::Sale,
            "Warehouse Id,Quantity,Sku,Transaction Type\nFC1,5,SKU1,Shipment",
        )
        .expect("parse");
        let view = SaleView::new(table).expect("view");
        let row = view.rows().next().expect("row");
        assert_eq!(row.transaction_type, "Shipment");
        assert_eq!(row.sku, "SKU1");
        assert_eq!(row.quantity, "5");
        assert_eq!(row.warehouse_id, "FC1");
    }

    #[test]
    fn test_view_construction_rejects_missing_columns() {
        let table = parse_table(SourceKind::Mapping, "Amazon Seller SKU\nSKU1").expect("parse");
        let err = MappingView::new(table).unwrap_err();
        assert!(matches!(err, IngestError::MissingHeader { .. }));
    }

    #[test]
    fn test_snapshot_view_roundtrip() {
        let table = parse_table(
            SourceKind::FcSnapshot,
            "Date,MSKU,Disposition,Ending Warehouse Balance,Location\n\
             01-01-2024,SKU1,SELLABLE,200,FC1",
        )
        .expect("parse");
        let view = SnapshotView::new(table).expect("view");
        let row = view.rows().next().expect("row");
        assert_eq!(row.date, "01-01-2024");
        assert_eq!(row.disposition, "SELLABLE");
        assert_eq!(row.ending_balance, "200");
    }
}
