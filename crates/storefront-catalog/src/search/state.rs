//! Browse view state and its transitions.
//!
//! State is a plain value: every transition consumes it and returns the
//! next one. Any change to what is shown sends the view back to page 1.

use crate::search::filter::{CatalogFilter, PriceRange};
use crate::search::query::SortMode;
use serde::{Deserialize, Serialize};

/// Filters, sort and page of a browse view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub filter: CatalogFilter,
    pub sort: SortMode,
    /// Current page, 1-indexed.
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            filter: CatalogFilter::default(),
            sort: SortMode::None,
            page: 1,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.filter.category = category.into();
        self.page = 1;
        self
    }

    /// Select a quantity label.
    pub fn with_quantity_label(mut self, label: impl Into<String>) -> Self {
        self.filter.quantity_label = label.into();
        self.page = 1;
        self
    }

    /// Set the price range.
    pub fn with_price_range(mut self, min: f64, max: f64) -> Self {
        self.filter.price_range = PriceRange::new(min, max);
        self.page = 1;
        self
    }

    /// Change the sort.
    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self.page = 1;
        self
    }

    /// Reset filters and sort to their defaults.
    pub fn cleared(self) -> Self {
        Self::default()
    }

    /// Move to a page, clamped to `1..=total_pages`.
    pub fn go_to_page(mut self, page: usize, total_pages: usize) -> Self {
        self.page = page.clamp(1, total_pages.max(1));
        self
    }

    /// Whether any filter or sort differs from the defaults.
    pub fn is_filtered(&self) -> bool {
        self.filter != CatalogFilter::default() || self.sort != SortMode::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changes_reset_page() {
        let state = ViewState::new().go_to_page(3, 5);
        assert_eq!(state.page, 3);

        assert_eq!(state.clone().with_category("Honey").page, 1);
        assert_eq!(state.clone().with_quantity_label("100g").page, 1);
        assert_eq!(state.clone().with_price_range(10.0, 20.0).page, 1);
        assert_eq!(state.with_sort(SortMode::PriceAsc).page, 1);
    }

    #[test]
    fn test_cleared() {
        let state = ViewState::new()
            .with_category("Honey")
            .with_quantity_label("100g")
            .with_price_range(100.0, 200.0)
            .with_sort(SortMode::PriceDesc)
            .go_to_page(2, 4);
        assert!(state.is_filtered());

        let cleared = state.cleared();
        assert_eq!(cleared, ViewState::default());
        assert_eq!(cleared.filter.price_range, PriceRange::new(0.0, 5000.0));
        assert!(!cleared.is_filtered());
    }

    #[test]
    fn test_go_to_page_clamped() {
        assert_eq!(ViewState::new().go_to_page(0, 4).page, 1);
        assert_eq!(ViewState::new().go_to_page(9, 4).page, 4);
        assert_eq!(ViewState::new().go_to_page(2, 0).page, 1);
    }
}
