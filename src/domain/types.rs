// ==========================================
// Labstock - shared domain types
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// SupplierRole - role of a supplier for an item
// ==========================================
// Stored as TEXT (PRIMARY/SECONDARY/BACKUP) in supplier_item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SupplierRole {
    #[default]
    Primary,
    Secondary,
    Backup,
}

impl SupplierRole {
    /// Database/wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplierRole::Primary => "PRIMARY",
            SupplierRole::Secondary => "SECONDARY",
            SupplierRole::Backup => "BACKUP",
        }
    }

    /// Parse the stored representation. Unknown values fall back to
    /// PRIMARY, mirroring the import default.
    pub fn from_db_str(raw: &str) -> Self {
        match raw.trim() {
            "SECONDARY" => SupplierRole::Secondary,
            "BACKUP" => SupplierRole::Backup,
            _ => SupplierRole::Primary,
        }
    }
}
