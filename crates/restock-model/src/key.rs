/// Aggregation bucket identity: one SKU at one fulfillment center.
///
/// A structural pair rather than a concatenated string, so SKUs containing a
/// would-be separator can never collide across centers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct RestockKey {
    pub sku: String,
    pub fulfillment_center: String,
}

impl RestockKey {
    pub fn new(sku: impl Into<String>, fulfillment_center: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            fulfillment_center: fulfillment_center.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn keys_with_embedded_separators_stay_distinct() {
        let left = RestockKey::new("SKU|1", "FC");
        let right = RestockKey::new("SKU", "1|FC");
        assert_ne!(left, right);

        let mut set = BTreeSet::new();
        set.insert(left);
        set.insert(right);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn ordering_groups_by_sku_then_center() {
        let mut keys = vec![
            RestockKey::new("B", "FC1"),
            RestockKey::new("A", "FC2"),
            RestockKey::new("A", "FC1"),
        ];
        keys.sort();
        assert_eq!(keys[0], RestockKey::new("A", "FC1"));
        assert_eq!(keys[1], RestockKey::new("A", "FC2"));
        assert_eq!(keys[2], RestockKey::new("B", "FC1"));
    }
}
