use catalog_core::Product;

#[test]
fn product_serialization_uses_expected_wire_fields() {
    let mut product = Product::with_id(1, "Widget");
    product.description = Some("blue, 3cm".to_string());
    product.price_cents = 1_299;

    let json = serde_json::to_value(&product).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["name"], "Widget");
    assert_eq!(json["description"], "blue, 3cm");
    assert_eq!(json["price_cents"], 1_299);

    let decoded: Product = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, product);
}

#[test]
fn unsaved_product_decodes_with_defaults() {
    let decoded: Product =
        serde_json::from_str(r#"{"id": null, "name": "Widget"}"#).unwrap();

    assert_eq!(decoded, Product::new("Widget"));
    assert!(!decoded.is_persisted());
}
