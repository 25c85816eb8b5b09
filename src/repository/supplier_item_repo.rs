// ==========================================
// Labstock - supplier item repository
// ==========================================
// Commercial data keyed by the (item_id, supplier_id) composite.
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::item::SupplierItem;
use crate::domain::types::SupplierRole;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// SupplierItemRepository trait
// ==========================================
#[async_trait]
pub trait SupplierItemRepository: Send + Sync {
    async fn find_by_item_and_supplier(
        &self,
        item_id: &str,
        supplier_id: &str,
    ) -> RepositoryResult<Option<SupplierItem>>;

    async fn insert(&self, supplier_item: &SupplierItem) -> RepositoryResult<()>;

    async fn update(&self, supplier_item: &SupplierItem) -> RepositoryResult<()>;

    async fn count(&self) -> RepositoryResult<usize>;
}

// ==========================================
// SupplierItemRepositoryImpl (rusqlite)
// ==========================================
pub struct SupplierItemRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl SupplierItemRepositoryImpl {
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

fn map_supplier_item_row(row: &Row<'_>) -> rusqlite::Result<SupplierItem> {
    let role_raw: String = row.get(12)?;
    Ok(SupplierItem {
        supplier_item_id: row.get(0)?,
        item_id: row.get(1)?,
        supplier_id: row.get(2)?,
        part_number: row.get(3)?,
        price: row.get(4)?,
        discount_percent: row.get(5)?,
        agreement_reference: row.get(6)?,
        package_description: row.get(7)?,
        quantity_per_package: row.get(8)?,
        product_url: row.get(9)?,
        last_verified_date: row.get(10)?,
        last_verified_by: row.get(11)?,
        role: SupplierRole::from_db_str(&role_raw),
        created_at: row.get(13)?,
        updated_at: row.get(14)?,
    })
}

#[async_trait]
impl SupplierItemRepository for SupplierItemRepositoryImpl {
    async fn find_by_item_and_supplier(
        &self,
        item_id: &str,
        supplier_id: &str,
    ) -> RepositoryResult<Option<SupplierItem>> {
        let conn = self.lock()?;
        let supplier_item = conn
            .query_row(
                r#"
                SELECT supplier_item_id, item_id, supplier_id, part_number, price,
                       discount_percent, agreement_reference, package_description,
                       quantity_per_package, product_url, last_verified_date,
                       last_verified_by, supplier_role, created_at, updated_at
                FROM supplier_item
                WHERE item_id = ?1 AND supplier_id = ?2
                "#,
                params![item_id, supplier_id],
                map_supplier_item_row,
            )
            .optional()?;
        Ok(supplier_item)
    }

    async fn insert(&self, supplier_item: &SupplierItem) -> RepositoryResult<()> {
        let conn = self.lock()?;
        conn.execute(
            r#"
            INSERT INTO supplier_item (
                supplier_item_id, item_id, supplier_id, part_number, price,
                discount_percent, agreement_reference, package_description,
                quantity_per_package, product_url, last_verified_date,
                last_verified_by, supplier_role, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            "#,
            params![
                supplier_item.supplier_item_id,
                supplier_item.item_id,
                supplier_item.supplier_id,
                supplier_item.part_number,
                supplier_item.price,
                supplier_item.discount_percent,
                supplier_item.agreement_reference,
                supplier_item.package_description,
                supplier_item.quantity_per_package,
                supplier_item.product_url,
                supplier_item.last_verified_date,
                supplier_item.last_verified_by,
                supplier_item.role.as_str(),
                supplier_item.created_at,
                supplier_item.updated_at,
            ],
        )?;
        Ok(())
    }

    async fn update(&self, supplier_item: &SupplierItem) -> RepositoryResult<()> {
        let conn = self.lock()?;
        let affected = conn.execute(
            r#"
            UPDATE supplier_item SET
                part_number = ?2, price = ?3, discount_percent = ?4,
                agreement_reference = ?5, package_description = ?6,
                quantity_per_package = ?7, product_url = ?8,
                last_verified_date = ?9, last_verified_by = ?10,
                supplier_role = ?11, updated_at = ?12
            WHERE supplier_item_id = ?1
            "#,
            params![
                supplier_item.supplier_item_id,
                supplier_item.part_number,
                supplier_item.price,
                supplier_item.discount_percent,
                supplier_item.agreement_reference,
                supplier_item.package_description,
                supplier_item.quantity_per_package,
                supplier_item.product_url,
                supplier_item.last_verified_date,
                supplier_item.last_verified_by,
                supplier_item.role.as_str(),
                supplier_item.updated_at,
            ],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "SupplierItem".to_string(),
                id: supplier_item.supplier_item_id.clone(),
            });
        }
        Ok(())
    }

    async fn count(&self) -> RepositoryResult<usize> {
        let conn = self.lock()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM supplier_item", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
