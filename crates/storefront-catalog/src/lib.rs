//! Catalog domain types and logic for the storefront.
//!
//! - **Catalog**: product records, cards, quantity options, categories, product admin
//! - **Search**: client-side filter, sort and pagination of a fetched product list
//! - **Region**: sourcing regions and their admin
//! - **Cart**: line items with option selection and stock checks
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_catalog::prelude::*;
//!
//! let records: Vec<ProductRecord> = serde_json::from_value(body["data"].clone())?;
//!
//! let pipeline = CatalogPipeline::new(ImageResolver::new(api_base, true), PageSizes::default());
//! let state = ViewState::new().with_category("Honey").with_sort(SortMode::PriceAsc);
//! let page = pipeline.run(&records, &state, Viewport::Wide);
//!
//! for card in &page.items {
//!     println!("{} {}", card.name, card.price);
//! }
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod region;
pub mod search;

pub use error::CatalogError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        available_categories, detail_options, display_options, normalize, normalize_category_key,
        Category, Discount, DiscountKind, ImageResolver, OptionView, ProductCard, ProductRecord,
        ProductService, QuantityOption, QuantityUnit, StockStatus,
    };

    // Search
    pub use crate::search::{
        CatalogFilter, CatalogPipeline, ListingOrder, Page, PageSizes, Pagination, PriceRange,
        SortMode, ViewState, Viewport,
    };

    // Region
    pub use crate::region::{Region, RegionPayload, RegionService};

    // Cart
    pub use crate::cart::{Cart, LineItem};
}
