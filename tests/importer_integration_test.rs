// ==========================================
// Catalog import - end-to-end tests
// ==========================================
// Full pipeline over a temp SQLite database: CSV in, catalog
// entities out.
// ==========================================

mod test_helpers;

use labstock::api::ImportApi;
use labstock::importer::{CatalogImporter, ImportError};
use rusqlite::Connection;

const FULL_HEADER: &str = "Name;Item ID;Manufacturer;Department;Category;Location;Supplier;\
Supplier part no.;Price;Discount;Package;Qty per package;Verified;Role;Order qty;Priority;Notes";

fn full_catalog_csv() -> String {
    [
        "Bestillingsliste kjemilab;;;;;;;;;;;;;;;;",
        ";;;;;;;;;;;;;;;;",
        FULL_HEADER,
        "Natriumklorid;CHEM-001;Merck;Kjemi;Salter;Hylle B2;VWR;VWR-1001;1 234,50 kr;38,12 %;eske;10 stk;18.06.25 ILK;Hoved;5;1;Tørt og mørkt",
        "Etanol 96%;;Antibac;Kjemi;Løsemidler;Brannskap;VWR;VWR-2002;89,90;;flaske;6stk/eske;;Reserve;;;",
    ]
    .join("\n")
}

#[tokio::test]
async fn test_full_import_creates_catalog_and_references() {
    let (_db_file, db_path) = test_helpers::create_test_db().unwrap();
    test_helpers::seed_supplier(&db_path, "VWR").unwrap();

    let importer = test_helpers::build_importer(&db_path);
    let csv_file = test_helpers::write_csv_file(&full_catalog_csv());

    let outcome = importer.import_file(csv_file.path()).await.unwrap();

    assert_eq!(outcome.summary.items_created, 2);
    assert_eq!(outcome.summary.items_updated, 0);
    assert_eq!(outcome.summary.supplier_items_created, 2);
    assert!(outcome.errors.is_empty(), "errors: {:?}", outcome.errors);
    assert_eq!(outcome.header_row, 3);
    assert_eq!(outcome.total_rows, 2);

    // Both rows name the same department; the entity created for the
    // first row must be observed by the second.
    assert_eq!(test_helpers::count_rows(&db_path, "department"), 1);
    assert_eq!(test_helpers::count_rows(&db_path, "category"), 2);
    assert_eq!(test_helpers::count_rows(&db_path, "storage_location"), 2);
    // The engine never creates suppliers
    assert_eq!(test_helpers::count_rows(&db_path, "supplier"), 1);
}

#[tokio::test]
async fn test_full_import_normalizes_commercial_values() {
    let (_db_file, db_path) = test_helpers::create_test_db().unwrap();
    test_helpers::seed_supplier(&db_path, "VWR").unwrap();

    let importer = test_helpers::build_importer(&db_path);
    let csv_file = test_helpers::write_csv_file(&full_catalog_csv());
    importer.import_file(csv_file.path()).await.unwrap();

    let conn = Connection::open(&db_path).unwrap();
    let (price, discount, qty, verified_date, verified_by, role): (
        f64,
        f64,
        f64,
        String,
        String,
        String,
    ) = conn
        .query_row(
            "SELECT si.price, si.discount_percent, si.quantity_per_package, \
                    si.last_verified_date, si.last_verified_by, si.supplier_role \
             FROM supplier_item si JOIN item i ON i.item_id = si.item_id \
             WHERE i.external_id = 'CHEM-001'",
            [],
            |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            },
        )
        .unwrap();

    assert_eq!(price, 1234.50);
    assert_eq!(discount, 38.12);
    assert_eq!(qty, 10.0);
    assert_eq!(verified_date, "2025-06-18");
    assert_eq!(verified_by, "ILK");
    assert_eq!(role, "PRIMARY");

    // Second row: role vocabulary maps "Reserve" to SECONDARY
    let role: String = conn
        .query_row(
            "SELECT si.supplier_role FROM supplier_item si \
             JOIN item i ON i.item_id = si.item_id WHERE i.name = 'Etanol 96%'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(role, "SECONDARY");
}

#[tokio::test]
async fn test_reimport_is_idempotent() {
    let (_db_file, db_path) = test_helpers::create_test_db().unwrap();
    test_helpers::seed_supplier(&db_path, "VWR").unwrap();

    let importer = test_helpers::build_importer(&db_path);
    let csv_file = test_helpers::write_csv_file(&full_catalog_csv());

    let first = importer.import_file(csv_file.path()).await.unwrap();
    assert_eq!(first.summary.items_created, 2);
    assert_eq!(first.summary.items_updated, 0);

    // Second run: same document, stable identities (external id for
    // row one, (name, manufacturer) fallback for row two)
    let second = importer.import_file(csv_file.path()).await.unwrap();
    assert_eq!(second.summary.items_created, 0);
    assert_eq!(second.summary.items_updated, 2);
    assert_eq!(second.summary.supplier_items_created, 0);
    assert_eq!(second.summary.supplier_items_updated, 2);

    assert_eq!(test_helpers::count_rows(&db_path, "item"), 2);
    assert_eq!(test_helpers::count_rows(&db_path, "supplier_item"), 2);
    assert_eq!(test_helpers::count_rows(&db_path, "department"), 1);
}

#[tokio::test]
async fn test_one_bad_row_does_not_abort_the_batch() {
    let (_db_file, db_path) = test_helpers::create_test_db().unwrap();
    test_helpers::seed_supplier(&db_path, "VWR").unwrap();

    // Header on grid row 3; ten data rows on grid rows 4-13; the row
    // on grid row 8 has a blank name.
    let mut lines = vec![
        "Innkjøpsliste;;;".to_string(),
        ";;;".to_string(),
        "Name;Supplier;Supplier part no.;Price".to_string(),
    ];
    for i in 1..=10 {
        if i == 5 {
            lines.push(";VWR;P-X;99".to_string());
        } else {
            lines.push(format!("Reagens {i};VWR;P-{i};1{i}0"));
        }
    }
    let csv_file = test_helpers::write_csv_file(&lines.join("\n"));

    let importer = test_helpers::build_importer(&db_path);
    let outcome = importer.import_file(csv_file.path()).await.unwrap();

    assert_eq!(outcome.summary.items_created, 9);
    assert_eq!(outcome.errors.len(), 1);
    // Row number is the grid position, offset by the header location
    assert_eq!(outcome.errors[0], "Row 8: missing item name");
    assert_eq!(test_helpers::count_rows(&db_path, "item"), 9);
}

#[tokio::test]
async fn test_unknown_supplier_is_row_fatal_but_item_survives() {
    let (_db_file, db_path) = test_helpers::create_test_db().unwrap();
    test_helpers::seed_supplier(&db_path, "VWR").unwrap();

    let csv = "Name;Supplier;Supplier part no.;Price\n\
               Pipettespisser;Ukjent AS;UK-1;250";
    let csv_file = test_helpers::write_csv_file(csv);

    let importer = test_helpers::build_importer(&db_path);
    let outcome = importer.import_file(csv_file.path()).await.unwrap();

    // The item is persisted; the commercial side is not
    assert_eq!(outcome.summary.items_created, 1);
    assert_eq!(outcome.summary.supplier_items_created, 0);
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].starts_with("Row 2: unknown supplier"));

    assert_eq!(test_helpers::count_rows(&db_path, "item"), 1);
    assert_eq!(test_helpers::count_rows(&db_path, "supplier_item"), 0);
    // No supplier was created either
    assert_eq!(test_helpers::count_rows(&db_path, "supplier"), 1);
}

#[tokio::test]
async fn test_only_section_rows_is_request_fatal() {
    let (_db_file, db_path) = test_helpers::create_test_db().unwrap();

    let csv = "Name;Supplier;Price\n\
               Kjemikalier;;\n\
               Utstyr;;\n\
               --- se egen liste ---;;";
    let csv_file = test_helpers::write_csv_file(csv);

    let importer = test_helpers::build_importer(&db_path);
    let result = importer.import_file(csv_file.path()).await;

    match result {
        Err(ImportError::NoValidRows { reasons }) => {
            assert_eq!(reasons.len(), 3);
            assert!(reasons.iter().all(|r| r.starts_with("Row ")));
        }
        other => panic!("expected NoValidRows, got {:?}", other.map(|o| o.summary)),
    }
    assert_eq!(test_helpers::count_rows(&db_path, "item"), 0);
}

#[tokio::test]
async fn test_header_outside_scan_window_is_request_fatal() {
    let (_db_file, db_path) = test_helpers::create_test_db().unwrap();

    let mut lines: Vec<String> = (1..=10).map(|i| format!("notat {i};;")).collect();
    lines.push("Name;Supplier;Price".to_string());
    lines.push("Reagens;VWR;100".to_string());
    let csv_file = test_helpers::write_csv_file(&lines.join("\n"));

    let importer = test_helpers::build_importer(&db_path);
    let result = importer.import_file(csv_file.path()).await;

    assert!(matches!(
        result,
        Err(ImportError::HeaderNotFound { scanned: 10 })
    ));
    assert_eq!(test_helpers::count_rows(&db_path, "item"), 0);
}

#[tokio::test]
async fn test_missing_pricing_is_a_warning_not_an_error() {
    let (_db_file, db_path) = test_helpers::create_test_db().unwrap();

    let csv = "Name;Manufacturer;Department\n\
               Begerglass 250ml;Schott;Kjemi";
    let csv_file = test_helpers::write_csv_file(csv);

    let importer = test_helpers::build_importer(&db_path);
    let outcome = importer.import_file(csv_file.path()).await.unwrap();

    assert_eq!(outcome.summary.items_created, 1);
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].starts_with("Row 2:"));
}

#[tokio::test]
async fn test_blank_rows_are_skipped_silently() {
    let (_db_file, db_path) = test_helpers::create_test_db().unwrap();

    let csv = "Name;Manufacturer;Price\n\
               Vernebriller;Uvex;120\n\
               ;;\n\
               Hansker str M;Ansell;85";
    let csv_file = test_helpers::write_csv_file(csv);

    let importer = test_helpers::build_importer(&db_path);
    let outcome = importer.import_file(csv_file.path()).await.unwrap();

    assert_eq!(outcome.summary.items_created, 2);
    assert_eq!(outcome.total_rows, 2);
    assert!(outcome.errors.is_empty());
}

#[tokio::test]
async fn test_boundary_response_embeds_counters() {
    let (_db_file, db_path) = test_helpers::create_test_db().unwrap();
    test_helpers::seed_supplier(&db_path, "VWR").unwrap();

    labstock::i18n::set_locale("en");

    let importer = test_helpers::build_importer(&db_path);
    let api = ImportApi::new(importer);
    let csv_file = test_helpers::write_csv_file(&full_catalog_csv());

    let response = api.import_catalog_file(csv_file.path()).await;

    assert!(response.success);
    assert!(response.message.contains("2 items created"));
    assert_eq!(response.details.items_created, 2);
    assert!(response.details.errors.is_empty());
}
