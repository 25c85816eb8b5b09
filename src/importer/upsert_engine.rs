// ==========================================
// Labstock - upsert engine
// ==========================================
// Persists items and supplier items with fallback identity rules:
// an item is matched on external_id when present, else on the
// (name, manufacturer) pair; a supplier item on the
// (item_id, supplier_id) composite. Values present in the row
// overwrite; absent values leave existing data untouched.
// ==========================================

use crate::domain::item::{Item, ItemCandidate, SupplierItem, SupplierItemCandidate};
use crate::importer::error::ImportResult;
use crate::importer::value_normalizer::generate_item_code;
use crate::repository::{ItemRepository, SupplierItemRepository};
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

// ==========================================
// UpsertOutcome
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

// ==========================================
// ResolvedReferences - FK ids attached by the resolver
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ResolvedReferences {
    pub department_id: Option<String>,
    pub category_id: Option<String>,
    pub location_id: Option<String>,
}

// ==========================================
// UpsertEngine
// ==========================================
pub struct UpsertEngine {
    items: Arc<dyn ItemRepository>,
    supplier_items: Arc<dyn SupplierItemRepository>,
}

impl UpsertEngine {
    pub fn new(
        items: Arc<dyn ItemRepository>,
        supplier_items: Arc<dyn SupplierItemRepository>,
    ) -> Self {
        Self {
            items,
            supplier_items,
        }
    }

    /// Upsert one item. Returns the item id and whether it was
    /// created or updated.
    pub async fn upsert_item(
        &self,
        candidate: &ItemCandidate,
        refs: &ResolvedReferences,
    ) -> ImportResult<(String, UpsertOutcome)> {
        let existing = match candidate.external_id.as_deref() {
            Some(external_id) => self.items.find_by_external_id(external_id).await?,
            None => {
                self.items
                    .find_by_name_and_manufacturer(
                        &candidate.name,
                        candidate.manufacturer.as_deref(),
                    )
                    .await?
            }
        };

        match existing {
            Some(mut item) => {
                item.name = candidate.name.clone();
                overwrite(&mut item.manufacturer, &candidate.manufacturer);
                overwrite(&mut item.notes, &candidate.notes);
                overwrite(&mut item.hazard_codes, &candidate.hazard_codes);
                overwrite(&mut item.certification, &candidate.certification);
                overwrite(&mut item.internal_reference, &candidate.internal_reference);
                overwrite(&mut item.external_id, &candidate.external_id);
                overwrite(
                    &mut item.standing_order_details,
                    &candidate.standing_order_details,
                );
                overwrite(&mut item.department_id, &refs.department_id);
                overwrite(&mut item.category_id, &refs.category_id);
                overwrite(&mut item.location_id, &refs.location_id);
                item.updated_at = Utc::now();

                self.items.update(&item).await?;
                debug!(item_id = %item.item_id, name = %item.name, "item updated");
                Ok((item.item_id, UpsertOutcome::Updated))
            }
            None => {
                let now = Utc::now();
                // A default reference is generated only when the row
                // supplied neither an external id nor an explicit one.
                let internal_reference = candidate.internal_reference.clone().or_else(|| {
                    if candidate.external_id.is_none() {
                        Some(generate_item_code(
                            &candidate.name,
                            candidate.manufacturer.as_deref(),
                        ))
                    } else {
                        None
                    }
                });

                let item = Item {
                    item_id: Uuid::new_v4().to_string(),
                    name: candidate.name.clone(),
                    manufacturer: candidate.manufacturer.clone(),
                    notes: candidate.notes.clone(),
                    hazard_codes: candidate.hazard_codes.clone(),
                    certification: candidate.certification.clone(),
                    internal_reference,
                    external_id: candidate.external_id.clone(),
                    standing_order_details: candidate.standing_order_details.clone(),
                    department_id: refs.department_id.clone(),
                    category_id: refs.category_id.clone(),
                    location_id: refs.location_id.clone(),
                    created_at: now,
                    updated_at: now,
                };

                self.items.insert(&item).await?;
                debug!(item_id = %item.item_id, name = %item.name, "item created");
                Ok((item.item_id, UpsertOutcome::Created))
            }
        }
    }

    /// Upsert the supplier-specific record for an item. Skipped
    /// (Ok(None)) when the row carries neither a part number nor a
    /// price.
    pub async fn upsert_supplier_item(
        &self,
        item_id: &str,
        supplier_id: &str,
        candidate: &SupplierItemCandidate,
    ) -> ImportResult<Option<UpsertOutcome>> {
        if !candidate.has_commercial_data() {
            return Ok(None);
        }

        let existing = self
            .supplier_items
            .find_by_item_and_supplier(item_id, supplier_id)
            .await?;

        match existing {
            Some(mut supplier_item) => {
                overwrite(&mut supplier_item.part_number, &candidate.part_number);
                overwrite_value(&mut supplier_item.price, &candidate.price);
                overwrite_value(
                    &mut supplier_item.discount_percent,
                    &candidate.discount_percent,
                );
                overwrite(
                    &mut supplier_item.agreement_reference,
                    &candidate.agreement_reference,
                );
                overwrite(
                    &mut supplier_item.package_description,
                    &candidate.package_description,
                );
                overwrite_value(
                    &mut supplier_item.quantity_per_package,
                    &candidate.quantity_per_package,
                );
                overwrite(&mut supplier_item.product_url, &candidate.product_url);
                overwrite_value(
                    &mut supplier_item.last_verified_date,
                    &candidate.last_verified_date,
                );
                overwrite(
                    &mut supplier_item.last_verified_by,
                    &candidate.last_verified_by,
                );
                supplier_item.role = candidate.role;
                supplier_item.updated_at = Utc::now();

                self.supplier_items.update(&supplier_item).await?;
                Ok(Some(UpsertOutcome::Updated))
            }
            None => {
                let now = Utc::now();
                let supplier_item = SupplierItem {
                    supplier_item_id: Uuid::new_v4().to_string(),
                    item_id: item_id.to_string(),
                    supplier_id: supplier_id.to_string(),
                    part_number: candidate.part_number.clone(),
                    price: candidate.price,
                    discount_percent: candidate.discount_percent,
                    agreement_reference: candidate.agreement_reference.clone(),
                    package_description: candidate.package_description.clone(),
                    quantity_per_package: candidate.quantity_per_package,
                    product_url: candidate.product_url.clone(),
                    last_verified_date: candidate.last_verified_date,
                    last_verified_by: candidate.last_verified_by.clone(),
                    role: candidate.role,
                    created_at: now,
                    updated_at: now,
                };

                self.supplier_items.insert(&supplier_item).await?;
                Ok(Some(UpsertOutcome::Created))
            }
        }
    }
}

fn overwrite(target: &mut Option<String>, source: &Option<String>) {
    if source.is_some() {
        *target = source.clone();
    }
}

fn overwrite_value<T: Copy>(target: &mut Option<T>, source: &Option<T>) {
    if source.is_some() {
        *target = *source;
    }
}
