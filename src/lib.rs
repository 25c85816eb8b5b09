// ==========================================
// Labstock - laboratory supply catalog core
// ==========================================
// Stack: Rust + SQLite
// Scope: master data import engine; the UI and
// ordering workflows live in other services
// ==========================================

// Initialize localization
rust_i18n::i18n!("locales", fallback = "nb");

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and types
pub mod domain;

// Repository layer - data access
pub mod repository;

// Import layer - spreadsheet ingestion
pub mod importer;

// Configuration layer
pub mod config;

// Database infrastructure (connection init / unified PRAGMAs)
pub mod db;

// Logging
pub mod logging;

// Localization
pub mod i18n;

// API layer - boundary operations
pub mod api;

// ==========================================
// Re-exports
// ==========================================

// Domain types
pub use domain::types::SupplierRole;

// Domain entities
pub use domain::{
    Category, Department, ImportDetails, ImportOutcome, ImportResponse, ImportSummary, Item,
    StorageLocation, Supplier, SupplierItem,
};

// Import pipeline
pub use importer::{
    CatalogImporter, CatalogImporterImpl, ColumnMapper, EntityResolver, HeaderLocator,
    ImportError, ImportResult, ResolvePolicy, RowValidator, UpsertEngine,
};

// API
pub use api::ImportApi;

// ==========================================
// Constants
// ==========================================

// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Application name
pub const APP_NAME: &str = "Labstock varekatalog";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
