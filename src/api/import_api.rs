// ==========================================
// Labstock - import API
// ==========================================
// The boundary operation other services call. Maps the pipeline
// result onto the response contract: a success flag, a localized
// summary sentence, and the counter/error details object. Partial
// success is still success; the error list says what was skipped.
// ==========================================

use crate::domain::report::{ImportDetails, ImportResponse};
use crate::i18n::{t, t_with_args};
use crate::importer::{CatalogImporter, ImportError};
use std::path::Path;
use tracing::error;

pub struct ImportApi<I>
where
    I: CatalogImporter,
{
    importer: I,
}

impl<I> ImportApi<I>
where
    I: CatalogImporter,
{
    pub fn new(importer: I) -> Self {
        Self { importer }
    }

    /// Import one uploaded catalog document and report the outcome.
    ///
    /// Never returns an Err: request-fatal conditions become a
    /// response with success = false and an explanatory message.
    pub async fn import_catalog_file<P: AsRef<Path> + Send>(&self, file_path: P) -> ImportResponse {
        match self.importer.import_file(file_path).await {
            Ok(outcome) => {
                let summary = &outcome.summary;
                let message = t_with_args(
                    "import.summary",
                    &[
                        ("items_created", &summary.items_created.to_string()),
                        ("items_updated", &summary.items_updated.to_string()),
                        (
                            "supplier_items_created",
                            &summary.supplier_items_created.to_string(),
                        ),
                        (
                            "supplier_items_updated",
                            &summary.supplier_items_updated.to_string(),
                        ),
                    ],
                );
                ImportResponse {
                    success: true,
                    message,
                    details: ImportDetails::from(&outcome),
                }
            }
            Err(e) => {
                error!(error = %e, "catalog import request failed");
                Self::failure_response(e)
            }
        }
    }

    fn failure_response(e: ImportError) -> ImportResponse {
        let (message, errors) = match e {
            ImportError::HeaderNotFound { scanned } => (
                t_with_args("import.no_header", &[("window", &scanned.to_string())]),
                Vec::new(),
            ),
            ImportError::NoValidRows { reasons } => (t("import.no_valid_rows"), reasons),
            ImportError::FileNotFound(_)
            | ImportError::UnsupportedFormat(_)
            | ImportError::FileReadError(_)
            | ImportError::ExcelParseError(_)
            | ImportError::CsvParseError(_) => (
                t_with_args("import.unreadable", &[("error", &e.to_string())]),
                Vec::new(),
            ),
            other => (
                t_with_args("import.failed", &[("error", &other.to_string())]),
                Vec::new(),
            ),
        };

        ImportResponse {
            success: false,
            message,
            details: ImportDetails {
                errors,
                ..Default::default()
            },
        }
    }
}
