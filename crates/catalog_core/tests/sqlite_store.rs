use catalog_core::db::migrations::latest_version;
use catalog_core::db::{open_db, open_db_in_memory};
use catalog_core::{Product, ProductStore, SqliteProductStore, StoreError};
use rusqlite::Connection;

#[test]
fn save_assigns_sequential_ids_and_lists_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteProductStore::try_new(&conn).unwrap();

    let first = store.save(&Product::new("Widget")).unwrap();
    let second = store.save(&Product::new("Gadget")).unwrap();
    assert_eq!(first.id, Some(1));
    assert_eq!(second.id, Some(2));

    let names: Vec<_> = store
        .find_all()
        .unwrap()
        .into_iter()
        .map(|product| product.name)
        .collect();
    assert_eq!(names, vec!["Widget", "Gadget"]);
}

#[test]
fn save_roundtrips_optional_fields() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteProductStore::try_new(&conn).unwrap();

    let mut product = Product::new("Widget");
    product.description = Some("blue".to_string());
    product.price_cents = 1_299;
    let saved = store.save(&product).unwrap();

    assert_eq!(saved.description.as_deref(), Some("blue"));
    assert_eq!(saved.price_cents, 1_299);
    assert_eq!(store.find_all().unwrap(), vec![saved]);
}

#[test]
fn save_with_existing_id_upserts_row() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteProductStore::try_new(&conn).unwrap();

    let mut saved = store.save(&Product::new("Widget")).unwrap();
    saved.name = "Widget Pro".to_string();
    let updated = store.save(&saved).unwrap();

    assert_eq!(updated.id, saved.id);
    let all = store.find_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Widget Pro");
}

#[test]
fn constraint_violation_is_write_failure_and_leaves_rows_untouched() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteProductStore::try_new(&conn).unwrap();
    store.save(&Product::new("Widget")).unwrap();

    let blank = store.save(&Product::new("  ")).unwrap_err();
    assert!(matches!(blank, StoreError::WriteFailed(_)));

    let mut negative = Product::new("Refund");
    negative.price_cents = -1;
    let negative = store.save(&negative).unwrap_err();
    assert!(matches!(negative, StoreError::WriteFailed(_)));

    assert_eq!(store.find_all().unwrap().len(), 1);
}

#[test]
fn products_persist_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteProductStore::try_new(&conn).unwrap();
        store.save(&Product::new("Widget")).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteProductStore::try_new(&conn).unwrap();
    assert_eq!(store.find_all().unwrap(), vec![Product::with_id(1, "Widget")]);
}

#[test]
fn undecodable_row_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "PRAGMA ignore_check_constraints = ON;
         INSERT INTO products (name, price_cents) VALUES ('Broken', -5);",
    )
    .unwrap();
    let store = SqliteProductStore::try_new(&conn).unwrap();

    let err = store.find_all().unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(_)));
}

#[test]
fn missing_table_after_drop_is_unavailable_on_read() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteProductStore::try_new(&conn).unwrap();
    conn.execute_batch("DROP TABLE products;").unwrap();

    let err = store.find_all().unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));
}

#[test]
fn store_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteProductStore::try_new(&conn) {
        Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn store_rejects_connection_without_products_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteProductStore::try_new(&conn);
    assert!(matches!(
        result,
        Err(StoreError::MissingRequiredTable("products"))
    ));
}
