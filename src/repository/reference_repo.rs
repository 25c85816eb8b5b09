// ==========================================
// Labstock - reference entity repository
// ==========================================
// Departments, categories, storage locations and suppliers.
// Lookup is case-insensitive exact-name. The engine creates the
// first three lazily; suppliers are only ever read here —
// create_supplier exists for seeding and administration.
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::reference::{Category, Department, StorageLocation, Supplier};
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// ReferenceRepository trait
// ==========================================
#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    // ===== Department =====
    async fn find_department_by_name(&self, name: &str) -> RepositoryResult<Option<Department>>;
    async fn department_code_exists(&self, code: &str) -> RepositoryResult<bool>;
    async fn create_department(&self, department: &Department) -> RepositoryResult<()>;

    // ===== Category =====
    async fn find_category_by_name(&self, name: &str) -> RepositoryResult<Option<Category>>;
    async fn category_code_exists(&self, code: &str) -> RepositoryResult<bool>;
    async fn create_category(&self, category: &Category) -> RepositoryResult<()>;

    // ===== StorageLocation =====
    async fn find_location_by_name(&self, name: &str)
        -> RepositoryResult<Option<StorageLocation>>;
    async fn location_code_exists(&self, code: &str) -> RepositoryResult<bool>;
    async fn create_location(&self, location: &StorageLocation) -> RepositoryResult<()>;

    // ===== Supplier (resolve-only from the import engine) =====
    async fn find_supplier_by_name(&self, name: &str) -> RepositoryResult<Option<Supplier>>;
    async fn create_supplier(&self, supplier: &Supplier) -> RepositoryResult<()>;
}

// ==========================================
// ReferenceRepositoryImpl (rusqlite)
// ==========================================
pub struct ReferenceRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl ReferenceRepositoryImpl {
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

    fn code_exists(&self, table: &str, code: &str) -> RepositoryResult<bool> {
        let conn = self.lock()?;
        let sql = format!("SELECT 1 FROM {table} WHERE code = ?1 LIMIT 1");
        let hit: Option<i64> = conn
            .query_row(&sql, params![code], |row| row.get(0))
            .optional()?;
        Ok(hit.is_some())
    }
}

fn map_department_row(row: &Row<'_>) -> rusqlite::Result<Department> {
    Ok(Department {
        department_id: row.get(0)?,
        name: row.get(1)?,
        code: row.get(2)?,
        description: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn map_category_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        category_id: row.get(0)?,
        name: row.get(1)?,
        code: row.get(2)?,
        description: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn map_location_row(row: &Row<'_>) -> rusqlite::Result<StorageLocation> {
    Ok(StorageLocation {
        location_id: row.get(0)?,
        name: row.get(1)?,
        code: row.get(2)?,
        location_type: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn map_supplier_row(row: &Row<'_>) -> rusqlite::Result<Supplier> {
    Ok(Supplier {
        supplier_id: row.get(0)?,
        name: row.get(1)?,
        code: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

#[async_trait]
impl ReferenceRepository for ReferenceRepositoryImpl {
    // ===== Department =====

    async fn find_department_by_name(&self, name: &str) -> RepositoryResult<Option<Department>> {
        let conn = self.lock()?;
        let department = conn
            .query_row(
                "SELECT department_id, name, code, description, created_at, updated_at \
                 FROM department WHERE LOWER(name) = LOWER(?1)",
                params![name],
                map_department_row,
            )
            .optional()?;
        Ok(department)
    }

    async fn department_code_exists(&self, code: &str) -> RepositoryResult<bool> {
        self.code_exists("department", code)
    }

    async fn create_department(&self, department: &Department) -> RepositoryResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO department (department_id, name, code, description, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                department.department_id,
                department.name,
                department.code,
                department.description,
                department.created_at,
                department.updated_at,
            ],
        )?;
        Ok(())
    }

    // ===== Category =====

    async fn find_category_by_name(&self, name: &str) -> RepositoryResult<Option<Category>> {
        let conn = self.lock()?;
        let category = conn
            .query_row(
                "SELECT category_id, name, code, description, created_at, updated_at \
                 FROM category WHERE LOWER(name) = LOWER(?1)",
                params![name],
                map_category_row,
            )
            .optional()?;
        Ok(category)
    }

    async fn category_code_exists(&self, code: &str) -> RepositoryResult<bool> {
        self.code_exists("category", code)
    }

    async fn create_category(&self, category: &Category) -> RepositoryResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO category (category_id, name, code, description, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                category.category_id,
                category.name,
                category.code,
                category.description,
                category.created_at,
                category.updated_at,
            ],
        )?;
        Ok(())
    }

    // ===== StorageLocation =====

    async fn find_location_by_name(
        &self,
        name: &str,
    ) -> RepositoryResult<Option<StorageLocation>> {
        let conn = self.lock()?;
        let location = conn
            .query_row(
                "SELECT location_id, name, code, location_type, created_at, updated_at \
                 FROM storage_location WHERE LOWER(name) = LOWER(?1)",
                params![name],
                map_location_row,
            )
            .optional()?;
        Ok(location)
    }

    async fn location_code_exists(&self, code: &str) -> RepositoryResult<bool> {
        self.code_exists("storage_location", code)
    }

    async fn create_location(&self, location: &StorageLocation) -> RepositoryResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO storage_location (location_id, name, code, location_type, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                location.location_id,
                location.name,
                location.code,
                location.location_type,
                location.created_at,
                location.updated_at,
            ],
        )?;
        Ok(())
    }

    // ===== Supplier =====

    async fn find_supplier_by_name(&self, name: &str) -> RepositoryResult<Option<Supplier>> {
        let conn = self.lock()?;
        let supplier = conn
            .query_row(
                "SELECT supplier_id, name, code, created_at, updated_at \
                 FROM supplier WHERE LOWER(name) = LOWER(?1)",
                params![name],
                map_supplier_row,
            )
            .optional()?;
        Ok(supplier)
    }

    async fn create_supplier(&self, supplier: &Supplier) -> RepositoryResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO supplier (supplier_id, name, code, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                supplier.supplier_id,
                supplier.name,
                supplier.code,
                supplier.created_at,
                supplier.updated_at,
            ],
        )?;
        Ok(())
    }
}
