// ==========================================
// Labstock - catalog item domain model
// ==========================================
// Item carries identification and descriptive master data;
// SupplierItem carries the commercial data for one supplier.
// The import pipeline intermediates live here as well.
// ==========================================

use crate::domain::types::SupplierRole;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Item - catalog master data
// ==========================================
// Identity rule: external_id is the unique key when present;
// otherwise identity falls back to (name, manufacturer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub item_id: String,

    pub name: String,
    pub manufacturer: Option<String>,
    pub notes: Option<String>,
    pub hazard_codes: Option<String>,
    pub certification: Option<String>,
    pub internal_reference: Option<String>,
    pub external_id: Option<String>,
    pub standing_order_details: Option<String>,

    // Reference entity foreign keys (best-effort categorization)
    pub department_id: Option<String>,
    pub category_id: Option<String>,
    pub location_id: Option<String>,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// SupplierItem - supplier-specific commercial data
// ==========================================
// (item_id, supplier_id) is the composite unique key.
// A SupplierItem only exists when at least one of part_number
// and price came in with the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierItem {
    pub supplier_item_id: String,

    pub item_id: String,
    pub supplier_id: String,

    pub part_number: Option<String>,
    pub price: Option<f64>,
    pub discount_percent: Option<f64>,
    pub agreement_reference: Option<String>,
    pub package_description: Option<String>,
    pub quantity_per_package: Option<f64>,
    pub product_url: Option<String>,
    pub last_verified_date: Option<NaiveDate>,
    pub last_verified_by: Option<String>,
    pub role: SupplierRole,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// RawItemRow - mapped but unnormalized row
// ==========================================
// Produced by the column mapper: raw cell text keyed by canonical
// field. Only exists inside the import pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawItemRow {
    pub name: Option<String>,
    pub external_id: Option<String>,
    pub manufacturer: Option<String>,
    pub notes: Option<String>,
    pub hazard_codes: Option<String>,
    pub certification: Option<String>,
    pub internal_reference: Option<String>,
    pub standing_order: Option<String>,

    // Reference names, resolved later
    pub department: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub supplier: Option<String>,

    // Commercial columns, still raw text
    pub supplier_part_number: Option<String>,
    pub price: Option<String>,
    pub discount_percent: Option<String>,
    pub agreement_reference: Option<String>,
    pub package_description: Option<String>,
    pub quantity_per_package: Option<String>,
    pub product_url: Option<String>,
    pub last_verified: Option<String>,
    pub supplier_role: Option<String>,

    // 1-based position in the uploaded grid, used in row messages
    pub row_number: usize,
}

// ==========================================
// ItemCandidate - cleaned catalog fields for one row
// ==========================================
#[derive(Debug, Clone)]
pub struct ItemCandidate {
    pub name: String,
    pub manufacturer: Option<String>,
    pub notes: Option<String>,
    pub hazard_codes: Option<String>,
    pub certification: Option<String>,
    pub internal_reference: Option<String>,
    pub external_id: Option<String>,
    pub standing_order_details: Option<String>,

    // Raw reference names; resolution attaches the ids
    pub department: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,

    pub row_number: usize,
}

// ==========================================
// SupplierItemCandidate - cleaned commercial fields for one row
// ==========================================
#[derive(Debug, Clone)]
pub struct SupplierItemCandidate {
    pub supplier: Option<String>,
    pub part_number: Option<String>,
    pub price: Option<f64>,
    pub discount_percent: Option<f64>,
    pub agreement_reference: Option<String>,
    pub package_description: Option<String>,
    pub quantity_per_package: Option<f64>,
    pub product_url: Option<String>,
    pub last_verified_date: Option<NaiveDate>,
    pub last_verified_by: Option<String>,
    pub role: SupplierRole,
}

impl SupplierItemCandidate {
    /// A supplier item is only worth persisting when it carries at
    /// least one of the two commercial anchors.
    pub fn has_commercial_data(&self) -> bool {
        self.part_number.is_some() || self.price.is_some()
    }
}
