//! The browse pipeline: normalize, filter, sort, paginate.

use crate::catalog::{normalize_all, ImageResolver, ProductCard, ProductRecord};
use crate::search::filter::apply_filter;
use crate::search::query::sort_cards;
use crate::search::results::{paginate, Page, PageSizes, Viewport};
use crate::search::state::ViewState;
use tracing::debug;

/// Turns a fetched product list and a view state into one page of cards.
///
/// Pure and total: any input list produces a page, an empty list produces
/// an empty first page with `total_pages == 1`.
#[derive(Debug, Clone, Default)]
pub struct CatalogPipeline {
    images: ImageResolver,
    page_sizes: PageSizes,
}

impl CatalogPipeline {
    pub fn new(images: ImageResolver, page_sizes: PageSizes) -> Self {
        Self { images, page_sizes }
    }

    pub fn page_sizes(&self) -> &PageSizes {
        &self.page_sizes
    }

    pub fn images(&self) -> &ImageResolver {
        &self.images
    }

    /// Run with the page size for a viewport class.
    pub fn run(&self, records: &[ProductRecord], state: &ViewState, viewport: Viewport) -> Page<ProductCard> {
        self.run_with_page_size(records, state, self.page_sizes.for_viewport(viewport))
    }

    /// Run with an explicit page size.
    pub fn run_with_page_size(
        &self,
        records: &[ProductRecord],
        state: &ViewState,
        page_size: usize,
    ) -> Page<ProductCard> {
        let cards = normalize_all(records, &self.images);
        let matched = self.filter_and_sort(cards, state);
        let page = paginate(matched, page_size, state.page);
        debug!(
            page = page.pagination.page,
            total_pages = page.pagination.total_pages,
            shown = page.len(),
            "paginated products"
        );
        page
    }

    /// Every card matching the state, sorted, before pagination.
    pub fn matching(&self, records: &[ProductRecord], state: &ViewState) -> Vec<ProductCard> {
        self.filter_and_sort(normalize_all(records, &self.images), state)
    }

    fn filter_and_sort(&self, cards: Vec<ProductCard>, state: &ViewState) -> Vec<ProductCard> {
        let filtered = apply_filter(cards, &state.filter);
        let sorted = sort_cards(filtered, state.sort);
        debug!(count = sorted.len(), sort = state.sort.as_str(), "final filtered products");
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::query::SortMode;

    fn records(prices: &[f64]) -> Vec<ProductRecord> {
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| ProductRecord::new(format!("p{}", i), *p, "Honey"))
            .collect()
    }

    #[test]
    fn test_run_first_page() {
        let pipeline = CatalogPipeline::default();
        let page = pipeline.run_with_page_size(&records(&[500.0, 1000.0, 1500.0]), &ViewState::new(), 2);
        let names: Vec<_> = page.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["p0", "p1"]);
        assert_eq!(page.total_pages(), 2);
    }

    #[test]
    fn test_run_uses_viewport_page_size() {
        let pipeline = CatalogPipeline::default();
        let input = records(&[1.0; 20]);
        assert_eq!(pipeline.run(&input, &ViewState::new(), Viewport::Narrow).len(), 8);
        assert_eq!(pipeline.run(&input, &ViewState::new(), Viewport::Wide).len(), 16);
    }

    #[test]
    fn test_run_empty() {
        let page = CatalogPipeline::default().run(&[], &ViewState::new(), Viewport::Wide);
        assert!(page.is_empty());
        assert_eq!(page.total_pages(), 1);
    }

    #[test]
    fn test_run_sorted_and_filtered() {
        let state = ViewState::new()
            .with_price_range(0.0, 1200.0)
            .with_sort(SortMode::PriceDesc);
        let matched = CatalogPipeline::default().matching(&records(&[500.0, 1500.0, 1000.0]), &state);
        let prices: Vec<_> = matched.iter().map(|c| c.base_price).collect();
        assert_eq!(prices, vec![1000.0, 500.0]);
    }
}
