//! Product records, their normalization into cards, and product admin.

pub mod decode;

mod card;
mod category;
mod image;
mod pricing;
mod product;
mod quantity;
mod service;

pub use card::{normalize, normalize_all, ProductCard};
pub use category::{available_categories, is_all, normalize_category_key, Category, ALL};
pub use image::{ImageResolver, PLACEHOLDER_IMAGE};
pub use pricing::{average_rating, effective_price, round_to_tenth};
pub use product::{
    Discount, DiscountKind, ProductRecord, QuantityOption, QuantityUnit, Review, SizeInventoryEntry,
};
pub use quantity::{
    detail_options, display_options, option_views, savings_percent, OptionView, StockStatus,
    LOW_STOCK_THRESHOLD, UNTRACKED_STOCK,
};
pub use service::{ProductService, PRODUCTS};
