use std::fmt;

/// The four tabular inputs the planner consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Marketplace sale transactions export.
    Sale,
    /// Fulfillment-center inventory snapshot export.
    FcSnapshot,
    /// Central-warehouse stock export.
    Central,
    /// Marketplace SKU to central SKU cross-reference.
    Mapping,
}

impl SourceKind {
    pub const ALL: [SourceKind; 4] = [
        SourceKind::Sale,
        SourceKind::FcSnapshot,
        SourceKind::Central,
        SourceKind::Mapping,
    ];

    /// Headers that must be present, by exact case-sensitive match.
    ///
    /// The sale export exists in a richer variant that also carries
    /// `Ship To State` and `Fulfillment Channel`; those are accepted but
    /// never required.
    pub fn required_headers(self) -> &'static [&'static str] {
        match self {
            SourceKind::Sale => sale::REQUIRED,
            SourceKind::FcSnapshot => fc_snapshot::REQUIRED,
            SourceKind::Central => central::REQUIRED,
            SourceKind::Mapping => mapping::REQUIRED,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Sale => "Sale",
            SourceKind::FcSnapshot => "FC Snapshot",
            SourceKind::Central => "Central Stock",
            SourceKind::Mapping => "SKU Mapping",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Column names of the sale transactions export.
pub mod sale {
    pub const TRANSACTION_TYPE: &str = "Transaction Type";
    pub const SKU: &str = "Sku";
    pub const QUANTITY: &str = "Quantity";
    pub const WAREHOUSE_ID: &str = "Warehouse Id";

    pub(super) const REQUIRED: &[&str] = &[TRANSACTION_TYPE, SKU, QUANTITY, WAREHOUSE_ID];
}

/// Column names of the fulfillment-center snapshot export.
pub mod fc_snapshot {
    pub const DATE: &str = "Date";
    pub const MSKU: &str = "MSKU";
    pub const DISPOSITION: &str = "Disposition";
    pub const ENDING_BALANCE: &str = "Ending Warehouse Balance";
    pub const LOCATION: &str = "Location";

    pub(super) const REQUIRED: &[&str] = &[DATE, MSKU, DISPOSITION, ENDING_BALANCE, LOCATION];
}

/// Column names of the central-warehouse stock export.
pub mod central {
    pub const SKU_CODE: &str = "Sku Code";
    pub const TOTAL_INVENTORY: &str = "Total Inventory";

    pub(super) const REQUIRED: &[&str] = &[SKU_CODE, TOTAL_INVENTORY];
}

/// Column names of the SKU cross-reference.
pub mod mapping {
    pub const MARKETPLACE_SKU: &str = "Amazon Seller SKU";
    pub const CENTRAL_SKU: &str = "Uniware SKU";

    pub(super) const REQUIRED: &[&str] = &[MARKETPLACE_SKU, CENTRAL_SKU];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_headers_per_kind() {
        assert_eq!(
            SourceKind::Sale.required_headers(),
            ["Transaction Type", "Sku", "Quantity", "Warehouse Id"]
        );
        assert_eq!(
            SourceKind::FcSnapshot.required_headers(),
            [
                "Date",
                "MSKU",
                "Disposition",
                "Ending Warehouse Balance",
                "Location"
            ]
        );
        assert_eq!(
            SourceKind::Central.required_headers(),
            ["Sku Code", "Total Inventory"]
        );
        assert_eq!(
            SourceKind::Mapping.required_headers(),
            ["Amazon Seller SKU", "Uniware SKU"]
        );
    }

    #[test]
    fn labels_are_human_readable() {
        assert_eq!(SourceKind::FcSnapshot.to_string(), "FC Snapshot");
        assert_eq!(SourceKind::Mapping.to_string(), "SKU Mapping");
    }
}
