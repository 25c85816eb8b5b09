// ==========================================
// Labstock - column mapper
// ==========================================
// Fixed dictionary from source header text to canonical field, or an
// explicit Ignored marker for workflow columns (ad-hoc ordering
// state) that belong to a different subsystem and must never leak
// into catalog data. Headers absent from the table are dropped.
// ==========================================

use crate::domain::item::RawItemRow;

// ==========================================
// CanonicalField - internal property names
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalField {
    Name,
    ExternalId,
    Manufacturer,
    Notes,
    HazardCodes,
    Certification,
    InternalReference,
    StandingOrder,
    Department,
    Category,
    Location,
    Supplier,
    SupplierPartNumber,
    Price,
    DiscountPercent,
    AgreementReference,
    PackageDescription,
    QuantityPerPackage,
    ProductUrl,
    LastVerified,
    SupplierRole,
}

// ==========================================
// ColumnTarget - where a recognized header routes
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnTarget {
    Field(CanonicalField),
    /// Recognized but deliberately excluded (ordering workflow columns)
    Ignored,
}

pub struct ColumnMapper;

impl ColumnMapper {
    /// The fixed mapping table. Known aliases of a header map to the
    /// same canonical field; anything else returns None and the
    /// column is silently dropped.
    pub fn map_header(header: &str) -> Option<ColumnTarget> {
        use CanonicalField::*;
        let target = match header.trim() {
            "Name" => ColumnTarget::Field(Name),
            "Item ID" | "ItemID" => ColumnTarget::Field(ExternalId),
            "Manufacturer" | "Produsent" => ColumnTarget::Field(Manufacturer),
            "Notes" | "Merknad" => ColumnTarget::Field(Notes),
            "Hazards" | "Faremerking" => ColumnTarget::Field(HazardCodes),
            "Certification" | "Sertifisering" => ColumnTarget::Field(Certification),
            "Internal ref." | "Intern referanse" => ColumnTarget::Field(InternalReference),
            "Standing order" | "Fast bestilling" => ColumnTarget::Field(StandingOrder),
            "Department" | "Avdeling" => ColumnTarget::Field(Department),
            "Category" | "Kategori" => ColumnTarget::Field(Category),
            "Location" | "Plassering" => ColumnTarget::Field(Location),
            "Supplier" | "Leverandør" => ColumnTarget::Field(Supplier),
            "Supplier part no." | "Bestillingsnr." => ColumnTarget::Field(SupplierPartNumber),
            "Price" | "Pris" => ColumnTarget::Field(Price),
            "Discount" | "Rabatt %" => ColumnTarget::Field(DiscountPercent),
            "Agreement" | "Avtale" => ColumnTarget::Field(AgreementReference),
            "Package" | "Forpakning" => ColumnTarget::Field(PackageDescription),
            "Qty per package" | "Antall pr forpakning" => ColumnTarget::Field(QuantityPerPackage),
            "URL" | "Link" => ColumnTarget::Field(ProductUrl),
            "Verified" | "Sist kontrollert" => ColumnTarget::Field(LastVerified),
            "Role" | "Leverandørrolle" => ColumnTarget::Field(SupplierRole),

            // Ordering workflow columns: recognized, never imported
            "Order qty" | "Bestill antall" => ColumnTarget::Ignored,
            "Priority" | "Prioritet" => ColumnTarget::Ignored,
            "Ordered" | "Bestilt" => ColumnTarget::Ignored,
            "Received" | "Mottatt" => ColumnTarget::Ignored,
            "Order note" | "Bestillingsmerknad" => ColumnTarget::Ignored,

            _ => return None,
        };
        Some(target)
    }

    /// Turn the located header row into a positional index:
    /// column position → canonical field (or None for dropped and
    /// ignored columns).
    pub fn build_index(header_row: &[String]) -> Vec<Option<CanonicalField>> {
        header_row
            .iter()
            .map(|header| match Self::map_header(header) {
                Some(ColumnTarget::Field(field)) => Some(field),
                Some(ColumnTarget::Ignored) | None => None,
            })
            .collect()
    }

    /// Produce a field-named record for one data row. Empty cells are
    /// normalized to None.
    pub fn map_row(cells: &[String], index: &[Option<CanonicalField>], row_number: usize) -> RawItemRow {
        let mut row = RawItemRow {
            row_number,
            ..Default::default()
        };

        for (position, field) in index.iter().enumerate() {
            let Some(field) = field else { continue };
            let Some(raw) = cells.get(position) else {
                continue;
            };
            let value = raw.trim();
            if value.is_empty() {
                continue;
            }
            let value = Some(value.to_string());

            use CanonicalField::*;
            match field {
                Name => row.name = value,
                ExternalId => row.external_id = value,
                Manufacturer => row.manufacturer = value,
                Notes => row.notes = value,
                HazardCodes => row.hazard_codes = value,
                Certification => row.certification = value,
                InternalReference => row.internal_reference = value,
                StandingOrder => row.standing_order = value,
                Department => row.department = value,
                Category => row.category = value,
                Location => row.location = value,
                Supplier => row.supplier = value,
                SupplierPartNumber => row.supplier_part_number = value,
                Price => row.price = value,
                DiscountPercent => row.discount_percent = value,
                AgreementReference => row.agreement_reference = value,
                PackageDescription => row.package_description = value,
                QuantityPerPackage => row.quantity_per_package = value,
                ProductUrl => row.product_url = value,
                LastVerified => row.last_verified = value,
                SupplierRole => row.supplier_role = value,
            }
        }

        row
    }
}
