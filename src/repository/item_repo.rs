// ==========================================
// Labstock - item repository
// ==========================================
// Data access for catalog items. No business rules here; the
// identity fallback is driven by the upsert engine, which decides
// which finder to call.
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::item::Item;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// ItemRepository trait
// ==========================================
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Look up by the external id unique key.
    async fn find_by_external_id(&self, external_id: &str) -> RepositoryResult<Option<Item>>;

    /// Fallback identity: case-insensitive (name, manufacturer) pair.
    /// Deterministic on multiple matches: the oldest record wins.
    async fn find_by_name_and_manufacturer(
        &self,
        name: &str,
        manufacturer: Option<&str>,
    ) -> RepositoryResult<Option<Item>>;

    async fn insert(&self, item: &Item) -> RepositoryResult<()>;

    /// Update every column of an existing item (matched on item_id).
    async fn update(&self, item: &Item) -> RepositoryResult<()>;

    async fn count(&self) -> RepositoryResult<usize>;
}

// ==========================================
// ItemRepositoryImpl (rusqlite)
// ==========================================
pub struct ItemRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl ItemRepositoryImpl {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

const ITEM_COLUMNS: &str = "item_id, name, manufacturer, notes, hazard_codes, certification, \
     internal_reference, external_id, standing_order_details, \
     department_id, category_id, location_id, created_at, updated_at";

fn map_item_row(row: &Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        item_id: row.get(0)?,
        name: row.get(1)?,
        manufacturer: row.get(2)?,
        notes: row.get(3)?,
        hazard_codes: row.get(4)?,
        certification: row.get(5)?,
        internal_reference: row.get(6)?,
        external_id: row.get(7)?,
        standing_order_details: row.get(8)?,
        department_id: row.get(9)?,
        category_id: row.get(10)?,
        location_id: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

#[async_trait]
impl ItemRepository for ItemRepositoryImpl {
    async fn find_by_external_id(&self, external_id: &str) -> RepositoryResult<Option<Item>> {
        let conn = self.lock()?;
        let sql = format!("SELECT {ITEM_COLUMNS} FROM item WHERE external_id = ?1");
        let item = conn
            .query_row(&sql, params![external_id], map_item_row)
            .optional()?;
        Ok(item)
    }

    async fn find_by_name_and_manufacturer(
        &self,
        name: &str,
        manufacturer: Option<&str>,
    ) -> RepositoryResult<Option<Item>> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM item \
             WHERE LOWER(name) = LOWER(?1) \
               AND ((?2 IS NULL AND manufacturer IS NULL) \
                    OR LOWER(manufacturer) = LOWER(?2)) \
             ORDER BY created_at LIMIT 1"
        );
        let item = conn
            .query_row(&sql, params![name, manufacturer], map_item_row)
            .optional()?;
        Ok(item)
    }

    async fn insert(&self, item: &Item) -> RepositoryResult<()> {
        let conn = self.lock()?;
        conn.execute(
            r#"
            INSERT INTO item (
                item_id, name, manufacturer, notes, hazard_codes, certification,
                internal_reference, external_id, standing_order_details,
                department_id, category_id, location_id, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#,
            params![
                item.item_id,
                item.name,
                item.manufacturer,
                item.notes,
                item.hazard_codes,
                item.certification,
                item.internal_reference,
                item.external_id,
                item.standing_order_details,
                item.department_id,
                item.category_id,
                item.location_id,
                item.created_at,
                item.updated_at,
            ],
        )?;
        Ok(())
    }

    async fn update(&self, item: &Item) -> RepositoryResult<()> {
        let conn = self.lock()?;
        let affected = conn.execute(
            r#"
            UPDATE item SET
                name = ?2, manufacturer = ?3, notes = ?4, hazard_codes = ?5,
                certification = ?6, internal_reference = ?7, external_id = ?8,
                standing_order_details = ?9, department_id = ?10,
                category_id = ?11, location_id = ?12, updated_at = ?13
            WHERE item_id = ?1
            "#,
            params![
                item.item_id,
                item.name,
                item.manufacturer,
                item.notes,
                item.hazard_codes,
                item.certification,
                item.internal_reference,
                item.external_id,
                item.standing_order_details,
                item.department_id,
                item.category_id,
                item.location_id,
                item.updated_at,
            ],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Item".to_string(),
                id: item.item_id.clone(),
            });
        }
        Ok(())
    }

    async fn count(&self) -> RepositoryResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM item", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
