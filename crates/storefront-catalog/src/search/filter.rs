//! Client-side catalog filters.

use crate::catalog::{is_all, normalize_category_key, ProductCard, ALL};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lower bound of the default price range.
pub const DEFAULT_MIN_PRICE: f64 = 0.0;
/// Upper bound of the default price range.
pub const DEFAULT_MAX_PRICE: f64 = 5000.0;

/// Quantity labels offered as filter chips.
pub const QUANTITY_LABELS: [&str; 7] = ["All", "80g", "100g", "25g", "300ml", "600ml", "1L"];

/// Inclusive base-price range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `price` lies within `[min, max]`.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PRICE, DEFAULT_MAX_PRICE)
    }
}

/// Category, quantity-label and price filters, combined with AND.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFilter {
    /// Category label, or "All".
    pub category: String,
    /// Exact quantity option label, or "All".
    pub quantity_label: String,
    pub price_range: PriceRange,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            category: ALL.to_string(),
            quantity_label: ALL.to_string(),
            price_range: PriceRange::default(),
        }
    }
}

impl CatalogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the quantity label.
    pub fn with_quantity_label(mut self, label: impl Into<String>) -> Self {
        self.quantity_label = label.into();
        self
    }

    /// Set the price range.
    pub fn with_price_range(mut self, min: f64, max: f64) -> Self {
        self.price_range = PriceRange::new(min, max);
        self
    }

    /// Normalized category key, or `None` when filtering by category is off.
    pub fn category_key(&self) -> Option<String> {
        (!is_all(&self.category)).then(|| normalize_category_key(&self.category))
    }

    /// Quantity label to require, or `None` for "All".
    pub fn required_quantity_label(&self) -> Option<&str> {
        (self.quantity_label != ALL).then_some(self.quantity_label.as_str())
    }

    /// Whether a card passes all three predicates.
    pub fn matches(&self, card: &ProductCard) -> bool {
        let category_ok = self
            .category_key()
            .map_or(true, |key| normalize_category_key(&card.category) == key);
        category_ok && self.matches_quantity(card) && self.price_range.contains(card.base_price)
    }

    fn matches_quantity(&self, card: &ProductCard) -> bool {
        match self.required_quantity_label() {
            None => true,
            Some(label) => card.quantity_options.iter().any(|o| o.display_label == label),
        }
    }
}

/// Keep the cards matching every filter, preserving order.
///
/// Applied category, then quantity, then price, logging the count after
/// each stage.
pub fn apply_filter(cards: Vec<ProductCard>, filter: &CatalogFilter) -> Vec<ProductCard> {
    debug!(count = cards.len(), "filtering products");
    let mut result = cards;

    if let Some(key) = filter.category_key() {
        result.retain(|c| normalize_category_key(&c.category) == key);
        debug!(count = result.len(), category = %filter.category, "after category filter");
    }

    if filter.required_quantity_label().is_some() {
        result.retain(|c| filter.matches_quantity(c));
        debug!(count = result.len(), quantity = %filter.quantity_label, "after quantity filter");
    }

    result.retain(|c| filter.price_range.contains(c.base_price));
    debug!(
        count = result.len(),
        min = filter.price_range.min,
        max = filter.price_range.max,
        "after price filter"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{normalize, ImageResolver, ProductRecord, QuantityOption};

    fn card(name: &str, price: f64, category: &str, labels: &[&str]) -> ProductCard {
        let options = labels
            .iter()
            .enumerate()
            .map(|(i, l)| QuantityOption::new(format!("o{}", i), *l, 1.0, price, 5))
            .collect();
        let record = ProductRecord::new(name, price, category).with_quantity_options(options);
        normalize(&record, &ImageResolver::passthrough())
    }

    fn names(cards: &[ProductCard]) -> Vec<&str> {
        cards.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_default_filter_keeps_everything_in_range() {
        let cards = vec![card("A", 500.0, "Honey", &[]), card("B", 6000.0, "Honey", &[])];
        let out = apply_filter(cards, &CatalogFilter::default());
        assert_eq!(names(&out), vec!["A"]);
    }

    #[test]
    fn test_category_plural_matches_singular() {
        let cards = vec![
            card("A", 10.0, "T-Shirts", &[]),
            card("B", 10.0, "Tshirt", &[]),
            card("C", 10.0, "Hoodies", &[]),
        ];
        let out = apply_filter(cards, &CatalogFilter::new().with_category("t shirt"));
        assert_eq!(names(&out), vec!["A", "B"]);
    }

    #[test]
    fn test_all_sentinel_case_insensitive() {
        let cards = vec![card("A", 10.0, "Honey", &[]), card("B", 10.0, "", &[])];
        let out = apply_filter(cards, &CatalogFilter::new().with_category("ALL"));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_quantity_label_exact_match() {
        let cards = vec![
            card("A", 10.0, "Honey", &["100g", "300ml"]),
            card("B", 10.0, "Honey", &["100G"]),
            card("C", 10.0, "Honey", &[]),
        ];
        let out = apply_filter(cards, &CatalogFilter::new().with_quantity_label("100g"));
        assert_eq!(names(&out), vec!["A"]);
    }

    #[test]
    fn test_price_filter_uses_base_price_inclusive() {
        let mut discounted = card("A", 1000.0, "", &[]);
        discounted.price = 100.0;
        let cards = vec![discounted, card("B", 200.0, "", &[]), card("C", 1001.0, "", &[])];

        let out = apply_filter(cards, &CatalogFilter::new().with_price_range(200.0, 1000.0));
        assert_eq!(names(&out), vec!["A", "B"]);
    }

    #[test]
    fn test_matches_agrees_with_apply() {
        let filter = CatalogFilter::new()
            .with_category("Honey")
            .with_quantity_label("100g")
            .with_price_range(0.0, 500.0);
        let cards = vec![
            card("A", 100.0, "honey", &["100g"]),
            card("B", 100.0, "ghee", &["100g"]),
            card("C", 900.0, "Honey", &["100g"]),
        ];
        let expected: Vec<_> = cards.iter().filter(|c| filter.matches(c)).cloned().collect();
        assert_eq!(apply_filter(cards, &filter), expected);
    }
}
