// ==========================================
// Test helpers
// ==========================================
// Temp database setup, supplier seeding, and full-pipeline wiring
// shared by the integration tests.
// ==========================================
#![allow(dead_code)] // each test binary uses its own subset

use labstock::config::ConfigManager;
use labstock::db;
use labstock::importer::{
    CatalogImporterImpl, EntityResolver, UniversalFileParser, UpsertEngine,
};
use labstock::repository::{
    ItemRepositoryImpl, ReferenceRepositoryImpl, SupplierItemRepositoryImpl,
};
use rusqlite::{params, Connection};
use std::error::Error;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Create a temp database file with the schema applied.
///
/// The NamedTempFile must stay alive for as long as the database is
/// in use.
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = db::open_sqlite_connection(&db_path)?;
    db::init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// Insert a supplier directly; the import engine itself never
/// creates one.
pub fn seed_supplier(db_path: &str, name: &str) -> Result<String, Box<dyn Error>> {
    let conn = Connection::open(db_path)?;
    let supplier_id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now();
    conn.execute(
        "INSERT INTO supplier (supplier_id, name, code, created_at, updated_at) \
         VALUES (?1, ?2, NULL, ?3, ?4)",
        params![supplier_id, name, now, now],
    )?;
    Ok(supplier_id)
}

/// Wire the full import pipeline over one shared connection.
pub fn build_importer(db_path: &str) -> CatalogImporterImpl<ConfigManager> {
    let conn = db::open_sqlite_connection(db_path).expect("open test db");
    let conn = Arc::new(Mutex::new(conn));

    let config = ConfigManager::from_connection(conn.clone()).expect("config manager");
    let items = Arc::new(ItemRepositoryImpl::from_connection(conn.clone()));
    let supplier_items = Arc::new(SupplierItemRepositoryImpl::from_connection(conn.clone()));
    let references = Arc::new(ReferenceRepositoryImpl::from_connection(conn));

    CatalogImporterImpl::new(
        config,
        Box::new(UniversalFileParser),
        EntityResolver::new(references),
        UpsertEngine::new(items, supplier_items),
    )
}

/// Write CSV content to a temp file with a .csv suffix.
pub fn write_csv_file(content: &str) -> NamedTempFile {
    let mut temp_file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("create temp csv");
    write!(temp_file, "{}", content).expect("write temp csv");
    temp_file
}

/// Count rows in a table.
pub fn count_rows(db_path: &str, table: &str) -> i64 {
    let conn = Connection::open(db_path).expect("open test db");
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })
    .expect("count query")
}
