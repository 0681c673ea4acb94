//! CLI command implementations.

pub mod browse;
pub mod categories;
pub mod config;
pub mod product;
pub mod region;

use clap::{Args, Subcommand};

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Search text sent to the listing service.
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// Collection slug.
    #[arg(long)]
    pub collection: Option<String>,

    /// Category to show.
    #[arg(long, default_value = "All")]
    pub category: String,

    /// Quantity option label (e.g. 100g).
    #[arg(long, default_value = "All")]
    pub quantity: String,

    /// Lowest base price (default from config).
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Highest base price (default from config).
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Sort: none, low-to-high or high-to-low.
    #[arg(short, long, default_value = "none")]
    pub sort: String,

    /// Show newest products first.
    #[arg(long)]
    pub newest: bool,

    /// Page to show.
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Viewport width used to pick the page size (default: terminal width).
    #[arg(long)]
    pub width: Option<u32>,

    /// Read products from the local store instead of the listing service.
    #[arg(long)]
    pub local: bool,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Also list product categories that have no matching subcategory.
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub command: ProductCommand,
}

#[derive(Subcommand)]
pub enum ProductCommand {
    /// Show a product with its quantity options.
    Show {
        /// Product id or slug.
        id: String,
        /// Look the product up in the local store.
        #[arg(long)]
        local: bool,
    },
    /// Add a product to the local store.
    Create {
        /// Product name.
        name: String,
        /// Base price.
        #[arg(long)]
        price: f64,
        /// Category label.
        #[arg(long, default_value = "")]
        category: String,
        /// Region slug.
        #[arg(long)]
        region: Option<String>,
        /// Stock for products without quantity options.
        #[arg(long)]
        stock: Option<i64>,
    },
    /// Replace a product's quantity options from a JSON file.
    Options {
        /// Product id.
        id: String,
        /// JSON array of quantity options.
        #[arg(short, long)]
        file: String,
    },
    /// Price a cart line for a product.
    Quote {
        /// Product id or slug.
        id: String,
        /// Quantity option id.
        #[arg(short, long)]
        option: Option<String>,
        /// Units to add.
        #[arg(short = 'n', long, default_value = "1")]
        quantity: i64,
        /// Look the product up in the local store.
        #[arg(long)]
        local: bool,
    },
    /// Delete a product from the local store.
    Delete {
        /// Product id.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the region command.
#[derive(Args)]
pub struct RegionArgs {
    #[command(subcommand)]
    pub command: RegionCommand,
}

#[derive(Subcommand)]
pub enum RegionCommand {
    /// List regions.
    List {
        /// Include inactive regions.
        #[arg(long)]
        all: bool,
    },
    /// Show a region and a page of its products.
    Show {
        /// Region slug.
        slug: String,
        /// Page of products to show.
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
    /// Create a region.
    Create {
        /// Region name.
        name: String,
        /// URL slug (derived from the name when omitted).
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        /// Create the region inactive.
        #[arg(long)]
        inactive: bool,
    },
    /// Update a region.
    Update {
        /// Region id.
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        /// Set active (true/false).
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a region.
    Delete {
        /// Region id.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
