// ==========================================
// Labstock - import report types
// ==========================================
// The aggregate result of one import request: counters, row
// messages, and the serializable boundary response.
// ==========================================

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ==========================================
// ImportSummary - the four counters
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    pub items_created: usize,
    pub items_updated: usize,
    pub supplier_items_created: usize,
    pub supplier_items_updated: usize,
}

// ==========================================
// ImportOutcome - full result of a completed run
// ==========================================
// A completed run can still carry row errors; partial success is an
// expected outcome, never silently swallowed.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub summary: ImportSummary,

    /// Row-fatal messages, "Row <n>: <reason>"
    pub errors: Vec<String>,

    /// Non-blocking data-quality messages
    pub warnings: Vec<String>,

    /// 1-based grid position of the located header row
    pub header_row: usize,

    /// Data rows seen after the header (including rejected ones)
    pub total_rows: usize,

    /// Rows that passed validation
    pub valid_rows: usize,

    pub elapsed: Duration,
}

// ==========================================
// ImportDetails - serializable counter/error block
// ==========================================
// Field names follow the boundary contract consumed by the
// presentation layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDetails {
    pub items_created: usize,
    pub items_updated: usize,
    pub supplier_items_created: usize,
    pub supplier_items_updated: usize,
    pub errors: Vec<String>,
}

impl From<&ImportOutcome> for ImportDetails {
    fn from(outcome: &ImportOutcome) -> Self {
        ImportDetails {
            items_created: outcome.summary.items_created,
            items_updated: outcome.summary.items_updated,
            supplier_items_created: outcome.summary.supplier_items_created,
            supplier_items_updated: outcome.summary.supplier_items_updated,
            errors: outcome.errors.clone(),
        }
    }
}

// ==========================================
// ImportResponse - boundary response
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub success: bool,
    pub message: String,
    pub details: ImportDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_wire_field_names() {
        let details = ImportDetails {
            items_created: 2,
            items_updated: 1,
            supplier_items_created: 3,
            supplier_items_updated: 0,
            errors: vec!["Row 4: missing item name".to_string()],
        };

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["itemsCreated"], 2);
        assert_eq!(json["itemsUpdated"], 1);
        assert_eq!(json["supplierItemsCreated"], 3);
        assert_eq!(json["supplierItemsUpdated"], 0);
        assert_eq!(json["errors"][0], "Row 4: missing item name");
    }
}
