//! Product-listing query parameters.

use storefront_catalog::catalog::ALL;
use storefront_catalog::search::{PriceRange, ViewState};

/// Maximum records requested per listing.
pub const DEFAULT_LIMIT: usize = 200;

/// Server-side filters sent with a product listing request.
///
/// The browse pipeline re-applies every filter locally, so these only
/// narrow what the service sends back.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductQuery {
    pub search: Option<String>,
    /// Collection slug taken from the page URL.
    pub collection: Option<String>,
    pub category: Option<String>,
    pub quantity_label: Option<String>,
    pub price_range: Option<PriceRange>,
    pub region: Option<String>,
    pub limit: usize,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            ..Self::default()
        }
    }

    /// Query for a shop view: filters and price range come from the state.
    pub fn for_view(state: &ViewState) -> Self {
        let filter = &state.filter;
        let mut query = Self::new().with_price_range(filter.price_range);
        if filter.category != ALL {
            query.category = Some(filter.category.clone());
        }
        if filter.quantity_label != ALL {
            query.quantity_label = Some(filter.quantity_label.clone());
        }
        query
    }

    /// Query for every product of a region.
    pub fn for_region(slug: impl Into<String>) -> Self {
        Self {
            region: Some(slug.into()),
            ..Self::new()
        }
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn with_collection(mut self, slug: impl Into<String>) -> Self {
        self.collection = Some(slug.into());
        self
    }

    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    /// Query parameters in request order.
    ///
    /// A collection and a selected category are both sent as `category`.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        let mut push = |key: &str, value: String| params.push((key.to_string(), value));

        if let Some(region) = &self.region {
            push("region", region.clone());
        }
        if let Some(q) = self.search.as_ref().filter(|q| !q.is_empty()) {
            push("q", q.clone());
        }
        if let Some(collection) = self.collection.as_ref().filter(|c| !c.is_empty()) {
            push("category", collection.clone());
        }
        if let Some(category) = &self.category {
            push("category", category.clone());
        }
        if let Some(label) = &self.quantity_label {
            push("quantities", label.clone());
        }
        if let Some(range) = &self.price_range {
            push("minPrice", range.min.to_string());
            push("maxPrice", range.max.to_string());
        }
        push("active", "all".to_string());
        push("limit", self.limit.to_string());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(query: &ProductQuery) -> Vec<(String, String)> {
        query.to_params()
    }

    fn kv(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_default_view_params() {
        let query = ProductQuery::for_view(&ViewState::new());
        assert_eq!(
            pairs(&query),
            kv(&[("minPrice", "0"), ("maxPrice", "5000"), ("active", "all"), ("limit", "200")])
        );
    }

    #[test]
    fn test_filtered_view_params() {
        let state = ViewState::new()
            .with_category("Honey")
            .with_quantity_label("100g")
            .with_price_range(100.0, 2500.5);
        let query = ProductQuery::for_view(&state)
            .with_search("forest")
            .with_collection("gifting");
        assert_eq!(
            pairs(&query),
            kv(&[
                ("q", "forest"),
                ("category", "gifting"),
                ("category", "Honey"),
                ("quantities", "100g"),
                ("minPrice", "100"),
                ("maxPrice", "2500.5"),
                ("active", "all"),
                ("limit", "200"),
            ])
        );
    }

    #[test]
    fn test_region_params() {
        assert_eq!(
            pairs(&ProductQuery::for_region("western-ghats")),
            kv(&[("region", "western-ghats"), ("active", "all"), ("limit", "200")])
        );
    }

    #[test]
    fn test_empty_search_omitted() {
        let query = ProductQuery::new().with_search("");
        assert!(!pairs(&query).iter().any(|(k, _)| k == "q"));
    }
}
