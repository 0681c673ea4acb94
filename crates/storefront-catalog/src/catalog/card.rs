//! Render-ready product cards.

use crate::catalog::image::{ImageResolver, PLACEHOLDER_IMAGE};
use crate::catalog::pricing::{applies, average_rating, effective_price, sanitize_price};
use crate::catalog::product::{DiscountKind, ProductRecord, QuantityOption};
use crate::ids::ProductId;
use serde::Serialize;

/// A product projected for listing views.
///
/// Rebuilt from the raw record on every fetch; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    /// Resolved primary image.
    pub image: String,
    /// Price before discount. Filtering and sorting use this.
    pub base_price: f64,
    /// Price after discount, within `[0, base_price]`.
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,
    pub category: String,
    pub slug: String,
    pub images: Vec<String>,
    pub rating: f64,
    pub is_best_seller: bool,
    /// Raw quantity options, unfiltered.
    pub quantity_options: Vec<QuantityOption>,
}

impl ProductCard {
    /// Whether the card shows a struck-through original price.
    pub fn is_discounted(&self) -> bool {
        self.original_price.is_some()
    }
}

/// Project a record into a card.
pub fn normalize(record: &ProductRecord, images: &ImageResolver) -> ProductCard {
    let base_price = sanitize_price(record.price);
    let price = effective_price(base_price, record.discount.as_ref());
    let discounted = record.discount.as_ref().is_some_and(applies);

    let discount_percentage = record
        .discount
        .filter(|d| d.kind == DiscountKind::Percentage)
        .map(|d| d.value);
    let discount_amount = record
        .discount
        .filter(|d| d.kind == DiscountKind::Flat)
        .map(|d| d.value);

    ProductCard {
        id: record.id.clone(),
        name: record.name.clone(),
        image: images.resolve(primary_image(record)),
        base_price,
        price,
        original_price: discounted.then_some(base_price),
        discounted_price: discounted.then_some(price),
        discount_percentage,
        discount_amount,
        category: record.category.clone(),
        slug: record.slug.clone(),
        images: record.images.clone(),
        rating: average_rating(&record.reviews),
        is_best_seller: record.is_best_seller,
        quantity_options: record.options().to_vec(),
    }
}

/// Normalize a whole fetched list, keeping order.
pub fn normalize_all(records: &[ProductRecord], images: &ImageResolver) -> Vec<ProductCard> {
    records.iter().map(|r| normalize(r, images)).collect()
}

/// First non-empty of `image_url`, `images[0]`, `image`.
fn primary_image(record: &ProductRecord) -> &str {
    [
        record.image_url.as_deref(),
        record.images.first().map(String::as_str),
        record.image.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find(|s| !s.is_empty())
    .unwrap_or(PLACEHOLDER_IMAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::product::Discount;
    use serde_json::json;

    #[test]
    fn test_normalize_percentage_discount() {
        let record = ProductRecord::new("Honey", 1000.0, "Honey")
            .with_discount(Discount::percentage(20.0))
            .with_reviews(&[5.0, 4.0]);

        let card = normalize(&record, &ImageResolver::passthrough());
        assert_eq!(card.price, 800.0);
        assert_eq!(card.base_price, 1000.0);
        assert_eq!(card.original_price, Some(1000.0));
        assert_eq!(card.discounted_price, Some(800.0));
        assert_eq!(card.discount_percentage, Some(20.0));
        assert_eq!(card.discount_amount, None);
        assert_eq!(card.rating, 4.5);
    }

    #[test]
    fn test_normalize_without_discount() {
        let card = normalize(&ProductRecord::new("Ghee", 500.0, "Ghee"), &ImageResolver::passthrough());
        assert_eq!(card.price, 500.0);
        assert!(!card.is_discounted());
        assert_eq!(card.rating, 0.0);
        assert_eq!(card.image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_image_source_order() {
        let resolver = ImageResolver::new("https://api.example.com", false);

        let record = ProductRecord::from_value(&json!({
            "image_url": "",
            "images": ["/uploads/first.jpg", "/uploads/second.jpg"],
            "image": "/uploads/legacy.jpg"
        }));
        assert_eq!(normalize(&record, &resolver).image, "https://api.example.com/uploads/first.jpg");

        let record = ProductRecord::from_value(&json!({"image": "https://cdn.example.com/x.png"}));
        assert_eq!(normalize(&record, &resolver).image, "https://cdn.example.com/x.png");
    }

    #[test]
    fn test_normalize_all_keeps_order() {
        let records = vec![
            ProductRecord::new("A", 3.0, ""),
            ProductRecord::new("B", 1.0, ""),
        ];
        let names: Vec<_> = normalize_all(&records, &ImageResolver::passthrough())
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
