// ==========================================
// Labstock - domain layer
// ==========================================
// Entities and types; no persistence logic here
// ==========================================

pub mod item;
pub mod reference;
pub mod report;
pub mod types;

pub use item::{Item, ItemCandidate, RawItemRow, SupplierItem, SupplierItemCandidate};
pub use reference::{Category, Department, StorageLocation, Supplier};
pub use report::{ImportDetails, ImportOutcome, ImportResponse, ImportSummary};
pub use types::SupplierRole;
