// ==========================================
// Labstock - import configuration trait
// ==========================================
// Read-only configuration interface for the import pipeline.
// No writes, no business logic.
// ==========================================

use async_trait::async_trait;
use std::error::Error;

// ==========================================
// ImportConfigReader trait
// ==========================================
// Implementor: ConfigManager (reads the config_kv table)
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    /// Number of leading grid rows scanned for the header row.
    ///
    /// Default: 10
    async fn get_header_scan_window(&self) -> Result<usize, Box<dyn Error>>;

    /// Minimum trimmed length for an item name to count as a real row.
    ///
    /// Default: 3
    async fn get_min_name_length(&self) -> Result<usize, Box<dyn Error>>;

    /// Locale used for the report summary sentence ("nb" or "en").
    ///
    /// Default: "nb"
    async fn get_report_locale(&self) -> Result<String, Box<dyn Error>>;
}
