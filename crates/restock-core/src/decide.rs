//! The send/recall decision rule.

use tracing::debug;

use restock_model::{
    Decision, REMARK_CENTRAL_CONSTRAINT, REMARK_LOW_COVER, REMARK_OVERSTOCK, RestockKey,
    RestockRecord,
};

use crate::aggregate::Aggregation;
use crate::policy::DecisionPolicy;

/// Per-key inputs to the rule, derived from the accumulators.
#[derive(Debug, Clone, Copy)]
pub struct KeyMetrics {
    pub fc_stock: f64,
    pub central_stock: f64,
    pub sale_30d: f64,
    pub drr: f64,
    pub return_pct: f64,
    pub stock_cover: f64,
}

impl KeyMetrics {
    /// Derives the metric set for one key.
    ///
    /// The window is a fixed reporting period, not a sliding range over the
    /// observed transaction dates; DRR and cover follow from it directly.
    pub fn derive(aggregation: &Aggregation, key: &RestockKey, policy: &DecisionPolicy) -> Self {
        let sale_30d = aggregation.sales.get(key).copied().unwrap_or(0.0);
        let returns = aggregation.returns.get(key).copied().unwrap_or(0.0);
        let fc_stock = aggregation.fc_stock.get(key).copied().unwrap_or(0.0);

        let drr = sale_30d / policy.window_days;
        let gross = sale_30d + returns;
        let return_pct = if gross > 0.0 {
            returns / gross * 100.0
        } else {
            0.0
        };
        let stock_cover = if drr > 0.0 { fc_stock / drr } else { 0.0 };
        let central_stock = aggregation
            .sku_mapping
            .get(&key.sku)
            .and_then(|central_sku| aggregation.central_stock.get(central_sku))
            .copied()
            .unwrap_or(0.0);

        Self {
            fc_stock,
            central_stock,
            sale_30d,
            drr,
            return_pct,
            stock_cover,
        }
    }
}

/// Applies the ordered decision rule; first match wins.
///
/// Thresholds are strict as written: cover exactly at the target neither
/// sends nor recalls, and a return rate exactly at the limit still permits a
/// send. The send quantity is the raw ceiling of the cover-target shortfall,
/// unclamped, matching the long-standing desk behavior for zero-rate keys.
pub fn apply_rule(policy: &DecisionPolicy, key: RestockKey, metrics: KeyMetrics) -> RestockRecord {
    let target_units = policy.target_cover_days * metrics.drr;

    let (decision, send_qty, recall_qty, remarks) = if metrics.stock_cover
        < policy.target_cover_days
        && metrics.central_stock >= policy.min_central_units
        && metrics.return_pct <= policy.max_return_pct
    {
        let send_qty = (target_units - metrics.fc_stock).ceil() as i64;
        (Decision::Send, send_qty, 0, REMARK_LOW_COVER)
    } else if metrics.stock_cover > policy.target_cover_days
        || metrics.return_pct > policy.max_return_pct
    {
        let recall_qty = (metrics.fc_stock - target_units).floor().max(0.0) as i64;
        (Decision::DoNotSend, 0, recall_qty, REMARK_OVERSTOCK)
    } else {
        (Decision::DoNotSend, 0, 0, REMARK_CENTRAL_CONSTRAINT)
    };

    RestockRecord {
        key,
        fc_stock: metrics.fc_stock,
        central_stock: metrics.central_stock,
        sale_30d: metrics.sale_30d,
        drr: metrics.drr,
        return_pct: metrics.return_pct,
        stock_cover: metrics.stock_cover,
        decision,
        send_qty,
        recall_qty,
        remarks,
    }
}

/// Computes the full record set for every key with observable activity.
///
/// Keys with zero sales and zero FC stock are dropped outright; they carry
/// nothing to plan against, even when returns exist.
pub fn decide(aggregation: &Aggregation, policy: &DecisionPolicy) -> Vec<RestockRecord> {
    let mut records = Vec::new();
    for key in aggregation.candidate_keys() {
        let metrics = KeyMetrics::derive(aggregation, &key, policy);
        if metrics.sale_30d == 0.0 && metrics.fc_stock == 0.0 {
            continue;
        }
        records.push(apply_rule(policy, key, metrics));
    }
    debug!(record_count = records.len(), "decision rule applied");
    records
}
