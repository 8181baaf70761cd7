//! Grouping and pagination of the planning record set.

use std::collections::BTreeMap;

use restock_model::RestockRecord;

/// Page length the paginated views default to.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// All records for one fulfillment center, SKU-ordered.
#[derive(Debug, Clone)]
pub struct CenterGroup {
    pub fulfillment_center: String,
    pub records: Vec<RestockRecord>,
}

/// Groups records by fulfillment center.
///
/// Centers come out in lexicographic order with records SKU-ordered inside
/// each, so repeated runs render identically.
pub fn group_by_center(records: &[RestockRecord]) -> Vec<CenterGroup> {
    let mut buckets: BTreeMap<String, Vec<RestockRecord>> = BTreeMap::new();
    for record in records {
        buckets
            .entry(record.key.fulfillment_center.clone())
            .or_default()
            .push(record.clone());
    }
    buckets
        .into_iter()
        .map(|(fulfillment_center, mut records)| {
            records.sort_by(|a, b| a.key.sku.cmp(&b.key.sku));
            CenterGroup {
                fulfillment_center,
                records,
            }
        })
        .collect()
}

/// Splits records into presentation pages.
pub fn paginate(records: &[RestockRecord], page_size: usize) -> Vec<&[RestockRecord]> {
    records.chunks(page_size.max(1)).collect()
}
