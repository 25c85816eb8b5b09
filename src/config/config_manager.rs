// ==========================================
// Labstock - configuration manager
// ==========================================
// Storage: config_kv table (key → value). Unset keys fall back to
// compiled defaults so a fresh database needs no seeding.
// ==========================================

use crate::config::import_config_trait::ImportConfigReader;
use crate::db::open_sqlite_connection;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::sync::{Arc, Mutex};

/// Well-known configuration keys
pub mod config_keys {
    pub const HEADER_SCAN_WINDOW: &str = "import.header_scan_window";
    pub const MIN_NAME_LENGTH: &str = "import.min_name_length";
    pub const REPORT_LOCALE: &str = "import.report_locale";
}

/// Compiled defaults
pub mod config_defaults {
    pub const HEADER_SCAN_WINDOW: usize = crate::importer::header_locator::HEADER_SCAN_WINDOW;
    pub const MIN_NAME_LENGTH: usize = 3;
    pub const REPORT_LOCALE: &str = "nb";
}

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Build on an existing connection. Re-applies the unified PRAGMAs
    /// (idempotent) so connection behavior stays consistent.
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn
                .lock()
                .map_err(|e| format!("lock acquisition failed: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }
        Ok(Self { conn })
    }

    fn read_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| format!("lock acquisition failed: {}", e))?;
        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM config_kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Write a configuration value (insert or overwrite).
    pub fn set_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| format!("lock acquisition failed: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (key, value, updated_at) VALUES (?1, ?2, datetime('now')) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }

    fn read_usize(&self, key: &str, default: usize) -> Result<usize, Box<dyn Error>> {
        match self.read_value(key)? {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid value for {}: {} ({})", key, raw, e).into()),
        }
    }
}

#[async_trait]
impl ImportConfigReader for ConfigManager {
    async fn get_header_scan_window(&self) -> Result<usize, Box<dyn Error>> {
        self.read_usize(
            config_keys::HEADER_SCAN_WINDOW,
            config_defaults::HEADER_SCAN_WINDOW,
        )
    }

    async fn get_min_name_length(&self) -> Result<usize, Box<dyn Error>> {
        self.read_usize(
            config_keys::MIN_NAME_LENGTH,
            config_defaults::MIN_NAME_LENGTH,
        )
    }

    async fn get_report_locale(&self) -> Result<String, Box<dyn Error>> {
        Ok(self
            .read_value(config_keys::REPORT_LOCALE)?
            .unwrap_or_else(|| config_defaults::REPORT_LOCALE.to_string()))
    }
}
