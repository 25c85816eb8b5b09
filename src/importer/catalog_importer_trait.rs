// ==========================================
// Labstock - catalog importer trait
// ==========================================
// The one boundary operation this engine exposes. Callers hand over
// an uploaded document and get the aggregate report back.
// ==========================================

use crate::domain::report::ImportOutcome;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// CatalogImporter trait
// ==========================================
// Implementor: CatalogImporterImpl
#[async_trait]
pub trait CatalogImporter: Send + Sync {
    /// Import one uploaded catalog document.
    ///
    /// # Returns
    /// - Ok(ImportOutcome): counters and row messages; row failures
    ///   do not fail the request
    /// - Err(ImportError): request-fatal conditions only (unreadable
    ///   document, no header row, zero valid rows)
    ///
    /// # Pipeline
    /// 1. Parse the document into a raw grid
    /// 2. Locate the header row within the scan window
    /// 3. Per data row: map columns, validate, normalize values,
    ///    resolve references, upsert — each row inside its own
    ///    failure boundary
    async fn import_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportOutcome>;
}
