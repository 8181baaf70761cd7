//! Per-key reduction of the four sources.
//!
//! Three independent passes, each keyed by SKU + fulfillment center: sales
//! and returns from the transaction export, sellable stock from the latest
//! snapshot date, plus two flat lookups (SKU cross-reference, central stock).

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::debug;

use restock_ingest::{CentralView, MappingView, SaleView, SnapshotView};
use restock_model::{RestockKey, lenient_quantity};

/// Snapshot dates arrive day-month-year.
pub const SNAPSHOT_DATE_FORMAT: &str = "%d-%m-%Y";

/// Transaction-type prefixes that count as outbound sales.
const SALE_PREFIXES: [&str; 2] = ["Shipment", "FreeReplacement"];
/// Transaction-type prefix that counts as a return.
const RETURN_PREFIX: &str = "Refund";

/// Disposition code for stock that is actually available to sell.
const SELLABLE: &str = "SELLABLE";

/// Everything the decision engine needs, reduced from the raw sources.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Units sold per SKU/FC over the reporting window.
    pub sales: BTreeMap<RestockKey, f64>,
    /// Units returned per SKU/FC over the reporting window.
    pub returns: BTreeMap<RestockKey, f64>,
    /// Sellable units per SKU/FC at the latest snapshot date.
    pub fc_stock: BTreeMap<RestockKey, f64>,
    /// Marketplace SKU to central SKU; last occurrence wins.
    pub sku_mapping: BTreeMap<String, String>,
    /// Central SKU to units on hand; last occurrence wins.
    pub central_stock: BTreeMap<String, f64>,
    /// The snapshot date the stock pass selected, if any row carried one.
    pub snapshot_date: Option<NaiveDate>,
}

impl Aggregation {
    /// Runs all passes over validated source views.
    pub fn build(
        sale: &SaleView,
        snapshot: &SnapshotView,
        central: &CentralView,
        mapping: &MappingView,
    ) -> Self {
        let (sales, returns) = aggregate_sales(sale);
        let snapshot_date = latest_snapshot_date(snapshot);
        let fc_stock = aggregate_fc_stock(snapshot, snapshot_date);
        let sku_mapping = build_sku_mapping(mapping);
        let central_stock = build_central_stock(central);
        debug!(
            sale_keys = sales.len(),
            return_keys = returns.len(),
            stock_keys = fc_stock.len(),
            mapped_skus = sku_mapping.len(),
            central_skus = central_stock.len(),
            snapshot_date = ?snapshot_date,
            "aggregation passes complete"
        );
        Self {
            sales,
            returns,
            fc_stock,
            sku_mapping,
            central_stock,
            snapshot_date,
        }
    }

    /// Union of every key seen by the sales, returns, and stock passes.
    pub fn candidate_keys(&self) -> BTreeSet<RestockKey> {
        let mut keys = BTreeSet::new();
        keys.extend(self.sales.keys().cloned());
        keys.extend(self.returns.keys().cloned());
        keys.extend(self.fc_stock.keys().cloned());
        keys
    }
}

/// Sales pass: shipments and free replacements add to sales, refunds to
/// returns; every other transaction type is ignored without error.
pub fn aggregate_sales(
    view: &SaleView,
) -> (BTreeMap<RestockKey, f64>, BTreeMap<RestockKey, f64>) {
    let mut sales: BTreeMap<RestockKey, f64> = BTreeMap::new();
    let mut returns: BTreeMap<RestockKey, f64> = BTreeMap::new();
    for row in view.rows() {
        let is_sale = SALE_PREFIXES
            .iter()
            .any(|prefix| row.transaction_type.starts_with(prefix));
        let bucket = if is_sale {
            &mut sales
        } else if row.transaction_type.starts_with(RETURN_PREFIX) {
            &mut returns
        } else {
            continue;
        };
        let key = RestockKey::new(row.sku, row.warehouse_id);
        *bucket.entry(key).or_insert(0.0) += lenient_quantity(row.quantity);
    }
    (sales, returns)
}

/// The maximum parseable snapshot date in the export; rows whose date fails
/// to parse never participate.
pub fn latest_snapshot_date(view: &SnapshotView) -> Option<NaiveDate> {
    view.rows()
        .filter_map(|row| NaiveDate::parse_from_str(row.date.trim(), SNAPSHOT_DATE_FORMAT).ok())
        .max()
}

/// Inventory pass: only rows at the latest snapshot date with a SELLABLE
/// disposition contribute; everything else is skipped entirely, not summed
/// as zero.
pub fn aggregate_fc_stock(
    view: &SnapshotView,
    latest: Option<NaiveDate>,
) -> BTreeMap<RestockKey, f64> {
    let mut stock: BTreeMap<RestockKey, f64> = BTreeMap::new();
    let Some(latest) = latest else {
        return stock;
    };
    for row in view.rows() {
        let date = NaiveDate::parse_from_str(row.date.trim(), SNAPSHOT_DATE_FORMAT).ok();
        if date != Some(latest) || row.disposition != SELLABLE {
            continue;
        }
        let key = RestockKey::new(row.msku, row.location);
        *stock.entry(key).or_insert(0.0) += lenient_quantity(row.ending_balance);
    }
    stock
}

/// Cross-reference pass; a duplicated marketplace SKU keeps its last row.
pub fn build_sku_mapping(view: &MappingView) -> BTreeMap<String, String> {
    let mut mapping = BTreeMap::new();
    for row in view.rows() {
        mapping.insert(
            row.marketplace_sku.to_string(),
            row.central_sku.to_string(),
        );
    }
    mapping
}

/// Central stock pass; non-numeric inventory cells contribute zero.
pub fn build_central_stock(view: &CentralView) -> BTreeMap<String, f64> {
    let mut stock = BTreeMap::new();
    for row in view.rows() {
        stock.insert(row.sku_code.to_string(), lenient_quantity(row.total_inventory));
    }
    stock
}
