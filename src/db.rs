// ==========================================
// Labstock - SQLite connection setup
// ==========================================
// Goals:
// - one place for Connection::open PRAGMA behavior, so every module
//   gets foreign keys and the same busy_timeout
// - embedded schema bootstrap for fresh databases
// ==========================================

use rusqlite::Connection;
use std::path::PathBuf;
use std::time::Duration;

/// Default busy_timeout (milliseconds)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Configure unified PRAGMAs on a SQLite connection.
///
/// foreign_keys and busy_timeout are per-connection settings and must
/// be applied to every connection.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the unified configuration applied.
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Default database location for the CLI entry point.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("labstock").join("labstock.db"))
        .unwrap_or_else(|| PathBuf::from("labstock.db"))
}

/// Create the catalog schema if it does not exist yet.
///
/// Idempotent; safe to run on every startup.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS config_kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS department (
            department_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            code TEXT NOT NULL UNIQUE,
            description TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS category (
            category_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            code TEXT NOT NULL UNIQUE,
            description TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS storage_location (
            location_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            code TEXT NOT NULL UNIQUE,
            location_type TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS supplier (
            supplier_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            code TEXT UNIQUE,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS item (
            item_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            manufacturer TEXT,
            notes TEXT,
            hazard_codes TEXT,
            certification TEXT,
            internal_reference TEXT,
            external_id TEXT UNIQUE,
            standing_order_details TEXT,
            department_id TEXT REFERENCES department(department_id),
            category_id TEXT REFERENCES category(category_id),
            location_id TEXT REFERENCES storage_location(location_id),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_item_name_manufacturer
            ON item(name, manufacturer);

        CREATE TABLE IF NOT EXISTS supplier_item (
            supplier_item_id TEXT PRIMARY KEY,
            item_id TEXT NOT NULL REFERENCES item(item_id),
            supplier_id TEXT NOT NULL REFERENCES supplier(supplier_id),
            part_number TEXT,
            price REAL,
            discount_percent REAL,
            agreement_reference TEXT,
            package_description TEXT,
            quantity_per_package REAL,
            product_url TEXT,
            last_verified_date TEXT,
            last_verified_by TEXT,
            supplier_role TEXT NOT NULL DEFAULT 'PRIMARY',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE(item_id, supplier_id)
        );
        "#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM item", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
