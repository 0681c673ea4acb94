//! Client-side filtering, sorting and pagination of fetched products.

mod filter;
mod pipeline;
mod query;
mod results;
mod state;

pub use filter::{
    apply_filter, CatalogFilter, PriceRange, DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE, QUANTITY_LABELS,
};
pub use pipeline::CatalogPipeline;
pub use query::{order_newest, parse_timestamp, sort_cards, ListingOrder, SortMode};
pub use results::{
    paginate, Page, PageSizes, Pagination, Viewport, NARROW_PAGE_SIZE, VIEWPORT_BREAKPOINT,
    WIDE_PAGE_SIZE,
};
pub use state::ViewState;
