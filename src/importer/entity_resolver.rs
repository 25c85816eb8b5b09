// ==========================================
// Labstock - entity resolver
// ==========================================
// Resolves textual references from catalog rows to reference entity
// ids. The create policy is asymmetric and deliberately explicit:
// departments, categories and locations are created on first
// reference; suppliers never are, because commercial pricing must
// not attach to a supplier nobody vetted.
// ==========================================

use crate::domain::reference::{Category, Department, StorageLocation};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::value_normalizer::{reference_code_base, short_unique_suffix};
use crate::repository::{ReferenceRepository, RepositoryResult};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Generated codes: base length and attempts before giving up.
const CODE_BASE_LEN: usize = 8;
const CODE_MAX_ATTEMPTS: usize = 5;

/// Auto-created categories carry a note about where they came from.
const CATEGORY_IMPORT_DESCRIPTION: &str = "Automatisk opprettet ved import";

/// Auto-created locations get a generic type.
const DEFAULT_LOCATION_TYPE: &str = "GENERAL";

// ==========================================
// ResolvePolicy - what to do on a lookup miss
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvePolicy {
    /// Create the entity on first unmatched name.
    CreateIfMissing,
    /// Absence is an error condition; never create.
    RequireExisting,
}

// ==========================================
// ReferenceKind - which reference entity a name points at
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Department,
    Category,
    Location,
    Supplier,
}

impl ReferenceKind {
    /// The per-kind create policy.
    pub fn policy(&self) -> ResolvePolicy {
        match self {
            ReferenceKind::Supplier => ResolvePolicy::RequireExisting,
            _ => ResolvePolicy::CreateIfMissing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::Department => "department",
            ReferenceKind::Category => "category",
            ReferenceKind::Location => "location",
            ReferenceKind::Supplier => "supplier",
        }
    }

    /// Code base when the name has no alphanumeric characters at all.
    fn code_fallback(&self) -> &'static str {
        match self {
            ReferenceKind::Department => "DEP",
            ReferenceKind::Category => "CAT",
            ReferenceKind::Location => "LOC",
            ReferenceKind::Supplier => "SUP",
        }
    }
}

// ==========================================
// EntityResolver
// ==========================================
pub struct EntityResolver {
    refs: Arc<dyn ReferenceRepository>,
}

impl EntityResolver {
    pub fn new(refs: Arc<dyn ReferenceRepository>) -> Self {
        Self { refs }
    }

    /// Resolve a reference name to an entity id under the kind's
    /// policy.
    ///
    /// - blank/missing name → Ok(None)
    /// - hit → Ok(Some(id))
    /// - miss + CreateIfMissing → create; creation failure degrades
    ///   to Ok(None) with a logged warning (categorization is
    ///   best-effort)
    /// - miss + RequireExisting → Err (escalated to a row-fatal
    ///   error by the coordinator)
    pub async fn resolve(
        &self,
        kind: ReferenceKind,
        name: Option<&str>,
    ) -> ImportResult<Option<String>> {
        let name = match name.map(str::trim) {
            None | Some("") => return Ok(None),
            Some(name) => name,
        };

        if let Some(id) = self.find(kind, name).await? {
            return Ok(Some(id));
        }

        match kind.policy() {
            ResolvePolicy::RequireExisting => Err(ImportError::UnknownSupplier {
                name: name.to_string(),
            }),
            ResolvePolicy::CreateIfMissing => match self.create_with_unique_code(kind, name).await
            {
                Ok(id) => {
                    debug!(kind = kind.as_str(), name = %name, id = %id, "reference entity created");
                    Ok(Some(id))
                }
                Err(e) => {
                    // Best-effort categorization: the row keeps going
                    // with a null reference.
                    warn!(kind = kind.as_str(), name = %name, error = %e, "reference entity creation failed");
                    Ok(None)
                }
            },
        }
    }

    async fn find(&self, kind: ReferenceKind, name: &str) -> ImportResult<Option<String>> {
        let id = match kind {
            ReferenceKind::Department => self
                .refs
                .find_department_by_name(name)
                .await?
                .map(|d| d.department_id),
            ReferenceKind::Category => self
                .refs
                .find_category_by_name(name)
                .await?
                .map(|c| c.category_id),
            ReferenceKind::Location => self
                .refs
                .find_location_by_name(name)
                .await?
                .map(|l| l.location_id),
            ReferenceKind::Supplier => self
                .refs
                .find_supplier_by_name(name)
                .await?
                .map(|s| s.supplier_id),
        };
        Ok(id)
    }

    /// Generate a code from the name and create the entity. The code
    /// is checked against the store and retried with a random suffix
    /// on collision, rather than trusting a time-derived value.
    async fn create_with_unique_code(
        &self,
        kind: ReferenceKind,
        name: &str,
    ) -> RepositoryResult<String> {
        let base = {
            let stripped = reference_code_base(name, CODE_BASE_LEN);
            if stripped.is_empty() {
                kind.code_fallback().to_string()
            } else {
                stripped
            }
        };

        let mut code = base.clone();
        for attempt in 0..CODE_MAX_ATTEMPTS {
            if attempt > 0 {
                code = format!("{}-{}", base, short_unique_suffix());
            }
            if !self.code_exists(kind, &code).await? {
                return self.create(kind, name, &code).await;
            }
        }

        Err(crate::repository::RepositoryError::UniqueConstraintViolation(format!(
            "could not generate a unique {} code for {:?}",
            kind.as_str(),
            name
        )))
    }

    async fn code_exists(&self, kind: ReferenceKind, code: &str) -> RepositoryResult<bool> {
        match kind {
            ReferenceKind::Department => self.refs.department_code_exists(code).await,
            ReferenceKind::Category => self.refs.category_code_exists(code).await,
            ReferenceKind::Location => self.refs.location_code_exists(code).await,
            // Suppliers are never created here; their codes are not ours.
            ReferenceKind::Supplier => Ok(true),
        }
    }

    async fn create(
        &self,
        kind: ReferenceKind,
        name: &str,
        code: &str,
    ) -> RepositoryResult<String> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        match kind {
            ReferenceKind::Department => {
                self.refs
                    .create_department(&Department {
                        department_id: id.clone(),
                        name: name.to_string(),
                        code: code.to_string(),
                        description: None,
                        created_at: now,
                        updated_at: now,
                    })
                    .await?
            }
            ReferenceKind::Category => {
                self.refs
                    .create_category(&Category {
                        category_id: id.clone(),
                        name: name.to_string(),
                        code: code.to_string(),
                        description: Some(CATEGORY_IMPORT_DESCRIPTION.to_string()),
                        created_at: now,
                        updated_at: now,
                    })
                    .await?
            }
            ReferenceKind::Location => {
                self.refs
                    .create_location(&StorageLocation {
                        location_id: id.clone(),
                        name: name.to_string(),
                        code: code.to_string(),
                        location_type: Some(DEFAULT_LOCATION_TYPE.to_string()),
                        created_at: now,
                        updated_at: now,
                    })
                    .await?
            }
            ReferenceKind::Supplier => {
                return Err(crate::repository::RepositoryError::ValidationError(
                    "suppliers are never created by the import engine".to_string(),
                ))
            }
        }

        Ok(id)
    }
}
