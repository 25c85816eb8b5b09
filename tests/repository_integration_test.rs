// ==========================================
// Repository layer - integration tests
// ==========================================
// Identity rules and constraint behavior against a real SQLite
// database.
// ==========================================

mod test_helpers;

use chrono::Utc;
use labstock::domain::item::{Item, SupplierItem};
use labstock::domain::types::SupplierRole;
use labstock::repository::{
    ItemRepository, ItemRepositoryImpl, ReferenceRepository, ReferenceRepositoryImpl,
    RepositoryError, SupplierItemRepository, SupplierItemRepositoryImpl,
};
use uuid::Uuid;

fn sample_item(name: &str, manufacturer: Option<&str>, external_id: Option<&str>) -> Item {
    let now = Utc::now();
    Item {
        item_id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        manufacturer: manufacturer.map(|m| m.to_string()),
        notes: None,
        hazard_codes: None,
        certification: None,
        internal_reference: None,
        external_id: external_id.map(|e| e.to_string()),
        standing_order_details: None,
        department_id: None,
        category_id: None,
        location_id: None,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_item_find_by_external_id() {
    let (_db_file, db_path) = test_helpers::create_test_db().unwrap();
    let repo = ItemRepositoryImpl::new(&db_path).unwrap();

    let item = sample_item("Natriumklorid", Some("Merck"), Some("EXT-1"));
    repo.insert(&item).await.unwrap();

    let found = repo.find_by_external_id("EXT-1").await.unwrap().unwrap();
    assert_eq!(found.item_id, item.item_id);

    assert!(repo.find_by_external_id("EXT-2").await.unwrap().is_none());
}

#[tokio::test]
async fn test_item_fallback_lookup_is_case_insensitive() {
    let (_db_file, db_path) = test_helpers::create_test_db().unwrap();
    let repo = ItemRepositoryImpl::new(&db_path).unwrap();

    repo.insert(&sample_item("Etanol 96%", Some("Antibac"), None))
        .await
        .unwrap();

    let found = repo
        .find_by_name_and_manufacturer("ETANOL 96%", Some("antibac"))
        .await
        .unwrap();
    assert!(found.is_some());

    // Same name, different manufacturer: a different item
    let found = repo
        .find_by_name_and_manufacturer("Etanol 96%", Some("Kemetyl"))
        .await
        .unwrap();
    assert!(found.is_none());

    // Missing manufacturer only matches records without one
    let found = repo
        .find_by_name_and_manufacturer("Etanol 96%", None)
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_item_external_id_unique_constraint() {
    let (_db_file, db_path) = test_helpers::create_test_db().unwrap();
    let repo = ItemRepositoryImpl::new(&db_path).unwrap();

    repo.insert(&sample_item("Vare A", None, Some("EXT-DUP")))
        .await
        .unwrap();
    let result = repo
        .insert(&sample_item("Vare B", None, Some("EXT-DUP")))
        .await;

    assert!(matches!(
        result,
        Err(RepositoryError::UniqueConstraintViolation(_))
    ));

    // Items without an external id do not collide with each other
    repo.insert(&sample_item("Vare C", None, None)).await.unwrap();
    repo.insert(&sample_item("Vare D", None, None)).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_item_update_rewrites_fields() {
    let (_db_file, db_path) = test_helpers::create_test_db().unwrap();
    let repo = ItemRepositoryImpl::new(&db_path).unwrap();

    let mut item = sample_item("Hansker", Some("Ansell"), Some("EXT-9"));
    repo.insert(&item).await.unwrap();

    item.notes = Some("Nitril, pudderfri".to_string());
    item.updated_at = Utc::now();
    repo.update(&item).await.unwrap();

    let found = repo.find_by_external_id("EXT-9").await.unwrap().unwrap();
    assert_eq!(found.notes.as_deref(), Some("Nitril, pudderfri"));
}

#[tokio::test]
async fn test_supplier_item_composite_key() {
    let (_db_file, db_path) = test_helpers::create_test_db().unwrap();
    let item_repo = ItemRepositoryImpl::new(&db_path).unwrap();
    let repo = SupplierItemRepositoryImpl::new(&db_path).unwrap();

    let item = sample_item("Pipettespisser", None, None);
    item_repo.insert(&item).await.unwrap();
    let supplier_id = test_helpers::seed_supplier(&db_path, "VWR").unwrap();

    let now = Utc::now();
    let supplier_item = SupplierItem {
        supplier_item_id: Uuid::new_v4().to_string(),
        item_id: item.item_id.clone(),
        supplier_id: supplier_id.clone(),
        part_number: Some("VWR-1".to_string()),
        price: Some(120.5),
        discount_percent: None,
        agreement_reference: None,
        package_description: None,
        quantity_per_package: None,
        product_url: None,
        last_verified_date: None,
        last_verified_by: None,
        role: SupplierRole::Primary,
        created_at: now,
        updated_at: now,
    };
    repo.insert(&supplier_item).await.unwrap();

    let found = repo
        .find_by_item_and_supplier(&item.item_id, &supplier_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.part_number.as_deref(), Some("VWR-1"));
    assert_eq!(found.role, SupplierRole::Primary);

    // A second record on the same composite key is rejected
    let duplicate = SupplierItem {
        supplier_item_id: Uuid::new_v4().to_string(),
        ..supplier_item.clone()
    };
    let result = repo.insert(&duplicate).await;
    assert!(matches!(
        result,
        Err(RepositoryError::UniqueConstraintViolation(_))
    ));
}

#[tokio::test]
async fn test_reference_lookup_is_case_insensitive() {
    let (_db_file, db_path) = test_helpers::create_test_db().unwrap();
    let repo = ReferenceRepositoryImpl::new(&db_path).unwrap();
    test_helpers::seed_supplier(&db_path, "Sigma-Aldrich").unwrap();

    let found = repo.find_supplier_by_name("sigma-aldrich").await.unwrap();
    assert!(found.is_some());

    let found = repo.find_supplier_by_name("Sigma").await.unwrap();
    assert!(found.is_none(), "exact match only, no prefix matching");
}

#[tokio::test]
async fn test_reference_code_uniqueness_is_enforced() {
    let (_db_file, db_path) = test_helpers::create_test_db().unwrap();
    let repo = ReferenceRepositoryImpl::new(&db_path).unwrap();

    let now = Utc::now();
    let department = labstock::domain::reference::Department {
        department_id: Uuid::new_v4().to_string(),
        name: "Mikrobiologi".to_string(),
        code: "MIKROBIO".to_string(),
        description: None,
        created_at: now,
        updated_at: now,
    };
    repo.create_department(&department).await.unwrap();

    assert!(repo.department_code_exists("MIKROBIO").await.unwrap());
    assert!(!repo.department_code_exists("KJEMI").await.unwrap());

    let clash = labstock::domain::reference::Department {
        department_id: Uuid::new_v4().to_string(),
        name: "Mikroskopi".to_string(),
        ..department
    };
    let result = repo.create_department(&clash).await;
    assert!(matches!(
        result,
        Err(RepositoryError::UniqueConstraintViolation(_))
    ));
}
