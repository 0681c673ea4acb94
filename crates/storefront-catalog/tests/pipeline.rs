//! End-to-end browse scenarios over decoded product lists.

use serde_json::json;
use storefront_catalog::catalog::{normalize, ImageResolver, ProductRecord};
use storefront_catalog::prelude::*;
use storefront_catalog::search::{paginate, WIDE_PAGE_SIZE};
use storefront_store::Store;

fn records_with_prices(prices: &[f64]) -> Vec<ProductRecord> {
    prices
        .iter()
        .enumerate()
        .map(|(i, p)| ProductRecord::new(format!("item-{}", i), *p, "Honey"))
        .collect()
}

#[test]
fn test_first_page_keeps_fetch_order() {
    let records = records_with_prices(&[500.0, 1000.0, 1500.0]);
    let state = ViewState::new();
    assert_eq!(state.filter.price_range, PriceRange::new(0.0, 5000.0));

    let page = CatalogPipeline::default().run_with_page_size(&records, &state, 2);

    let names: Vec<_> = page.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["item-0", "item-1"]);
    assert_eq!(page.total_pages(), 2);
}

#[test]
fn test_percentage_discount_card() {
    let record = ProductRecord::new("A", 1000.0, "").with_discount(Discount::percentage(20.0));
    assert_eq!(normalize(&record, &ImageResolver::passthrough()).price, 800.0);
}

#[test]
fn test_flat_discount_card_never_negative() {
    let record = ProductRecord::new("A", 1000.0, "").with_discount(Discount::flat(1500.0));
    assert_eq!(normalize(&record, &ImageResolver::passthrough()).price, 0.0);
}

#[test]
fn test_plural_category_filters_together() {
    assert_eq!(normalize_category_key("T-Shirts"), "tshirt");
    assert_eq!(normalize_category_key("Tshirt"), "tshirt");

    let records = vec![
        ProductRecord::new("a", 10.0, "T-Shirts"),
        ProductRecord::new("b", 10.0, "Tshirt"),
        ProductRecord::new("c", 10.0, "Mugs"),
    ];
    let state = ViewState::new().with_category("T-Shirts");
    let matched = CatalogPipeline::default().matching(&records, &state);
    assert_eq!(matched.len(), 2);
}

#[test]
fn test_seventeen_products_two_pages() {
    let records = records_with_prices(&[100.0; 17]);
    let pipeline = CatalogPipeline::default();

    let first = pipeline.run_with_page_size(&records, &ViewState::new(), 16);
    assert_eq!(first.total_pages(), 2);
    assert_eq!(first.len(), 16);

    let state = ViewState::new().go_to_page(2, first.total_pages());
    let second = pipeline.run_with_page_size(&records, &state, 16);
    assert_eq!(second.len(), 1);
    assert_eq!(second.items[0].name, "item-16");
}

#[test]
fn test_malformed_listing_never_fails() {
    let body = json!({
        "ok": true,
        "data": [
            {"_id": "a", "title": "Honey", "price": "300", "category": "Honey",
             "reviews": [{"rating": 5}, {"rating": "bad"}]},
            {"id": "b", "name": "Ghee", "price": null, "discount": {"type": "flat", "value": "20"}},
            "garbage",
            {"_id": "c", "price": -10, "quantityOptions": "none"}
        ]
    });

    let records: Vec<ProductRecord> = serde_json::from_value(body["data"].clone()).unwrap();
    assert_eq!(records.len(), 4);

    let page = CatalogPipeline::default().run(&records, &ViewState::new(), Viewport::Wide);
    assert_eq!(page.len(), 4);
    assert_eq!(page.items[0].price, 300.0);
    assert_eq!(page.items[0].rating, 2.5);
    assert_eq!(page.items[1].price, 0.0);
    assert_eq!(page.items[3].base_price, 0.0);
}

#[test]
fn test_empty_fetch_renders_single_empty_page() {
    let page = CatalogPipeline::default().run(&[], &ViewState::new(), Viewport::Narrow);
    assert!(page.is_empty());
    assert_eq!(page.total_pages(), 1);
}

#[test]
fn test_quantity_filter_then_sort() {
    let body = json!([
        {"_id": "1", "title": "Forest Honey", "price": 900, "category": "Honey",
         "quantityOptions": [{"id": "o1", "displayLabel": "100g", "isActive": true}]},
        {"_id": "2", "title": "Clover Honey", "price": 400, "category": "Honey",
         "quantityOptions": [{"id": "o1", "displayLabel": "100g", "isActive": false}]},
        {"_id": "3", "title": "Acacia Honey", "price": 650, "category": "Honey",
         "quantityOptions": [{"id": "o1", "displayLabel": "300ml"}]}
    ]);
    let records: Vec<ProductRecord> = serde_json::from_value(body).unwrap();

    let state = ViewState::new()
        .with_quantity_label("100g")
        .with_sort(SortMode::PriceAsc);
    let names: Vec<_> = CatalogPipeline::default()
        .matching(&records, &state)
        .into_iter()
        .map(|c| c.name)
        .collect();

    // The label filter looks at raw options, active or not.
    assert_eq!(names, vec!["Clover Honey", "Forest Honey"]);
}

#[test]
fn test_newest_listing_before_pipeline() {
    let mut records: Vec<ProductRecord> = serde_json::from_value(json!([
        {"_id": "old", "title": "Old", "price": 1, "createdAt": "2023-01-01T00:00:00.000Z"},
        {"_id": "new", "title": "New", "price": 1, "createdAt": "2024-05-01T00:00:00.000Z"}
    ]))
    .unwrap();

    ListingOrder::Newest.apply(&mut records);
    let page = CatalogPipeline::default().run(&records, &ViewState::new(), Viewport::Wide);
    assert_eq!(page.items[0].name, "New");
}

#[test]
fn test_region_page_flow() {
    let store = Store::in_memory();
    let regions = RegionService::new(&store);
    let products = ProductService::new(&store);

    let region = regions.create(RegionPayload::named("Western Ghats")).unwrap();
    for i in 0..17 {
        let mut record = ProductRecord::new(format!("Spice {}", i), 100.0 + i as f64, "Spices");
        record.region = Some(region.slug.clone());
        products.create(record).unwrap();
    }
    products.create(ProductRecord::new("Elsewhere", 10.0, "Spices")).unwrap();

    let found = regions.find_by_slug("western-ghats").unwrap();
    let listed = products.list_for_region(&found.slug).unwrap();
    assert_eq!(listed.len(), 17);

    let page = CatalogPipeline::default().run_with_page_size(&listed, &ViewState::new(), WIDE_PAGE_SIZE);
    assert_eq!(page.total_pages(), 2);

    assert!(regions.find_by_slug("nowhere").is_err());
}

#[test]
fn test_detail_view_to_cart() {
    let store = Store::in_memory();
    let products = ProductService::new(&store);
    let created = products
        .create(ProductRecord::new("Apple Cider Vinegar", 450.0, "Vinegar"))
        .unwrap();
    let product = products
        .set_quantity_options(
            created.id.as_str(),
            vec![
                QuantityOption::new("opt2", "1L (2 X 500ml)", 1000.0, 3.0, 5)
                    .with_sort_order(1)
                    .with_pack_size(2)
                    .with_original_price(4.0),
                QuantityOption::new("opt1", "500ml", 500.0, 1.0, 10).with_original_price(2.0),
            ],
        )
        .unwrap();

    let shown = storefront_catalog::catalog::option_views(product.options());
    assert_eq!(shown[0].option.id.as_str(), "opt1");
    assert_eq!(shown[0].savings_percent, 50);
    assert_eq!(shown[1].pack_badge.as_deref(), Some("Pack of 2"));

    let mut cart = Cart::default();
    assert!(cart.add_product(&product, None, 1).is_err());
    cart.add_product(&product, Some("opt2"), 2).unwrap();
    assert_eq!(cart.subtotal().unwrap().to_decimal(), 6.0);
    assert!(cart.add_product(&product, Some("opt2"), 4).is_err());
}

#[test]
fn test_paginate_generic_items() {
    let page = paginate(vec!["a", "b", "c"], 2, 2);
    assert_eq!(page.items, vec!["c"]);
    assert!(page.pagination.has_prev);
}
