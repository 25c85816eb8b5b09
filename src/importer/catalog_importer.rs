// ==========================================
// Labstock - catalog importer implementation
// ==========================================
// Orchestrates the pipeline per row and isolates row failures so one
// malformed row never aborts a multi-thousand-row batch.
// Flow: parse → locate header → map → validate/normalize →
//       resolve references → upsert → aggregate
//
// Processing is strictly sequential: a reference entity created for
// one row must be visible to the next row's lookup.
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::item::{ItemCandidate, RawItemRow, SupplierItemCandidate};
use crate::domain::report::{ImportOutcome, ImportSummary};
use crate::importer::catalog_importer_trait::CatalogImporter;
use crate::importer::column_mapper::ColumnMapper;
use crate::importer::entity_resolver::{EntityResolver, ReferenceKind};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::FileParser;
use crate::importer::header_locator::HeaderLocator;
use crate::importer::row_validator::RowValidator;
use crate::importer::upsert_engine::{ResolvedReferences, UpsertEngine, UpsertOutcome};
use crate::importer::value_normalizer::{
    extract_initials, normalize_percentage, normalize_price, normalize_quantity,
    parse_short_date, parse_supplier_role,
};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

// ==========================================
// CatalogImporterImpl
// ==========================================
pub struct CatalogImporterImpl<C>
where
    C: ImportConfigReader,
{
    config: C,
    file_parser: Box<dyn FileParser>,
    resolver: EntityResolver,
    upserts: UpsertEngine,
}

impl<C> CatalogImporterImpl<C>
where
    C: ImportConfigReader,
{
    pub fn new(
        config: C,
        file_parser: Box<dyn FileParser>,
        resolver: EntityResolver,
        upserts: UpsertEngine,
    ) -> Self {
        Self {
            config,
            file_parser,
            resolver,
            upserts,
        }
    }
}

#[async_trait::async_trait]
impl<C> CatalogImporter for CatalogImporterImpl<C>
where
    C: ImportConfigReader + Send + Sync,
{
    #[instrument(skip(self, file_path))]
    async fn import_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportOutcome> {
        use std::time::Instant;
        let start_time = Instant::now();

        let file_path_str = file_path.as_ref().to_str().unwrap_or("unknown");
        info!(file_path = %file_path_str, "catalog import started");

        // === Step 1: parse the document into a raw grid ===
        debug!("step 1: parse document");
        let grid = self
            .file_parser
            .parse_to_grid(file_path.as_ref())
            .map_err(|e| match e.downcast::<ImportError>() {
                Ok(known) => *known,
                Err(other) => ImportError::FileReadError(other.to_string()),
            })?;
        info!(grid_rows = grid.len(), "document parsed");

        // === Step 2: locate the header row ===
        debug!("step 2: locate header");
        let scan_window = self
            .config
            .get_header_scan_window()
            .await
            .map_err(|e| ImportError::ConfigReadError {
                key: crate::config::config_keys::HEADER_SCAN_WINDOW.to_string(),
                message: e.to_string(),
            })?;
        let header_index = HeaderLocator::locate(&grid, scan_window)
            .ok_or(ImportError::HeaderNotFound {
                scanned: scan_window,
            })?;
        info!(header_row = header_index + 1, "header row located");

        let column_index = ColumnMapper::build_index(&grid[header_index]);

        let min_name_length = self
            .config
            .get_min_name_length()
            .await
            .map_err(|e| ImportError::ConfigReadError {
                key: crate::config::config_keys::MIN_NAME_LENGTH.to_string(),
                message: e.to_string(),
            })?;
        let validator = RowValidator::new(min_name_length);

        // === Step 3: process rows sequentially ===
        debug!("step 3: process rows");
        let mut summary = ImportSummary::default();
        let mut errors: Vec<String> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();
        let mut total_rows = 0usize;
        let mut valid_rows = 0usize;

        for (offset, cells) in grid[header_index + 1..].iter().enumerate() {
            // 1-based position in the uploaded grid; row messages must
            // line up with what the user sees in their spreadsheet.
            let row_number = header_index + offset + 2;

            // Fully blank rows are layout noise, not data
            if cells.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            total_rows += 1;

            let raw = ColumnMapper::map_row(cells, &column_index, row_number);

            // --- Row boundary 1: validation + normalization ---
            if let Err(e) = validator.validate(&raw) {
                warn!(row = row_number, error = %e, "row rejected");
                errors.push(format!("Row {}: {}", row_number, e));
                continue;
            }
            valid_rows += 1;

            let (item_candidate, supplier_candidate) = build_candidates(&raw);

            if !supplier_candidate.has_commercial_data() {
                // Pricing absence does not invalidate the item
                warnings.push(format!(
                    "Row {}: no supplier part number or price",
                    row_number
                ));
            }

            // --- Row boundary 2: resolution + persistence ---
            let refs = match self.resolve_item_references(&item_candidate).await {
                Ok(refs) => refs,
                Err(e) => {
                    warn!(row = row_number, error = %e, "reference resolution failed");
                    errors.push(format!("Row {}: {}", row_number, e));
                    continue;
                }
            };

            let item_id = match self.upserts.upsert_item(&item_candidate, &refs).await {
                Ok((item_id, UpsertOutcome::Created)) => {
                    summary.items_created += 1;
                    item_id
                }
                Ok((item_id, UpsertOutcome::Updated)) => {
                    summary.items_updated += 1;
                    item_id
                }
                Err(e) => {
                    warn!(row = row_number, error = %e, "item persistence failed");
                    errors.push(format!("Row {}: {}", row_number, e));
                    continue;
                }
            };

            // The item is already persisted at this point; a supplier
            // failure is row-fatal only for the commercial side.
            match self
                .persist_supplier_side(&item_id, &supplier_candidate)
                .await
            {
                Ok(Some(UpsertOutcome::Created)) => summary.supplier_items_created += 1,
                Ok(Some(UpsertOutcome::Updated)) => summary.supplier_items_updated += 1,
                Ok(None) => {}
                Err(e) => {
                    warn!(row = row_number, error = %e, "supplier item persistence failed");
                    errors.push(format!("Row {}: {}", row_number, e));
                }
            }
        }

        // === Step 4: aggregate ===
        if valid_rows == 0 {
            warn!(rejected = errors.len(), "no rows survived validation");
            return Err(ImportError::NoValidRows { reasons: errors });
        }

        let elapsed = start_time.elapsed();
        info!(
            items_created = summary.items_created,
            items_updated = summary.items_updated,
            supplier_items_created = summary.supplier_items_created,
            supplier_items_updated = summary.supplier_items_updated,
            row_errors = errors.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "catalog import finished"
        );

        Ok(ImportOutcome {
            summary,
            errors,
            warnings,
            header_row: header_index + 1,
            total_rows,
            valid_rows,
            elapsed,
        })
    }
}

impl<C> CatalogImporterImpl<C>
where
    C: ImportConfigReader,
{
    /// Best-effort resolution of the three categorization references.
    async fn resolve_item_references(
        &self,
        candidate: &ItemCandidate,
    ) -> ImportResult<ResolvedReferences> {
        Ok(ResolvedReferences {
            department_id: self
                .resolver
                .resolve(ReferenceKind::Department, candidate.department.as_deref())
                .await?,
            category_id: self
                .resolver
                .resolve(ReferenceKind::Category, candidate.category.as_deref())
                .await?,
            location_id: self
                .resolver
                .resolve(ReferenceKind::Location, candidate.location.as_deref())
                .await?,
        })
    }

    /// Resolve the supplier (strict policy) and upsert the commercial
    /// record. Rows without a supplier name have nothing to persist
    /// here.
    async fn persist_supplier_side(
        &self,
        item_id: &str,
        candidate: &SupplierItemCandidate,
    ) -> ImportResult<Option<UpsertOutcome>> {
        let Some(supplier_name) = candidate.supplier.as_deref() else {
            return Ok(None);
        };

        let supplier_id = self
            .resolver
            .resolve(ReferenceKind::Supplier, Some(supplier_name))
            .await?;
        let Some(supplier_id) = supplier_id else {
            return Ok(None);
        };

        self.upserts
            .upsert_supplier_item(item_id, &supplier_id, candidate)
            .await
    }
}

/// Turn a mapped row into typed candidates via the value normalizers.
fn build_candidates(raw: &RawItemRow) -> (ItemCandidate, SupplierItemCandidate) {
    let item = ItemCandidate {
        name: raw.name.clone().unwrap_or_default(),
        manufacturer: raw.manufacturer.clone(),
        notes: raw.notes.clone(),
        hazard_codes: raw.hazard_codes.clone(),
        certification: raw.certification.clone(),
        internal_reference: raw.internal_reference.clone(),
        external_id: raw.external_id.clone(),
        standing_order_details: raw.standing_order.clone(),
        department: raw.department.clone(),
        category: raw.category.clone(),
        location: raw.location.clone(),
        row_number: raw.row_number,
    };

    let last_verified = raw.last_verified.as_deref();
    let supplier_item = SupplierItemCandidate {
        supplier: raw.supplier.clone(),
        part_number: raw.supplier_part_number.clone(),
        price: raw.price.as_deref().and_then(normalize_price),
        discount_percent: raw.discount_percent.as_deref().and_then(normalize_percentage),
        agreement_reference: raw.agreement_reference.clone(),
        package_description: raw.package_description.clone(),
        quantity_per_package: raw.quantity_per_package.as_deref().and_then(normalize_quantity),
        product_url: raw.product_url.clone(),
        last_verified_date: last_verified.and_then(parse_short_date),
        last_verified_by: last_verified.and_then(extract_initials),
        role: raw
            .supplier_role
            .as_deref()
            .map(parse_supplier_role)
            .unwrap_or_default(),
    };

    (item, supplier_item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_candidates_normalizes_commercial_fields() {
        let raw = RawItemRow {
            name: Some("Natriumklorid".to_string()),
            supplier: Some("VWR".to_string()),
            price: Some("1 234,50 kr".to_string()),
            discount_percent: Some("38,12 %".to_string()),
            quantity_per_package: Some("10 stk".to_string()),
            last_verified: Some("18.06.25 ILK".to_string()),
            supplier_role: Some("Reserve".to_string()),
            row_number: 7,
            ..Default::default()
        };

        let (item, supplier_item) = build_candidates(&raw);

        assert_eq!(item.name, "Natriumklorid");
        assert_eq!(item.row_number, 7);
        assert_eq!(supplier_item.price, Some(1234.50));
        assert_eq!(supplier_item.discount_percent, Some(38.12));
        assert_eq!(supplier_item.quantity_per_package, Some(10.0));
        assert_eq!(
            supplier_item.last_verified_date,
            chrono::NaiveDate::from_ymd_opt(2025, 6, 18)
        );
        assert_eq!(supplier_item.last_verified_by.as_deref(), Some("ILK"));
        assert_eq!(
            supplier_item.role,
            crate::domain::types::SupplierRole::Secondary
        );
    }

    #[test]
    fn test_build_candidates_malformed_values_become_none() {
        let raw = RawItemRow {
            name: Some("Hansker".to_string()),
            price: Some("gratis".to_string()),
            discount_percent: Some("150".to_string()),
            quantity_per_package: Some("eske".to_string()),
            last_verified: Some("neste uke".to_string()),
            row_number: 3,
            ..Default::default()
        };

        let (_, supplier_item) = build_candidates(&raw);

        assert_eq!(supplier_item.price, None);
        assert_eq!(supplier_item.discount_percent, None);
        assert_eq!(supplier_item.quantity_per_package, None);
        assert_eq!(supplier_item.last_verified_date, None);
        assert_eq!(supplier_item.last_verified_by, None);
    }
}
