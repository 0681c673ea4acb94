//! Typed JSON document store for the storefront.
//!
//! Provides a small collection/document API with automatic JSON
//! serialization. Inside Spin it is backed by the Key-Value Store; in
//! native builds documents are held in memory and can be snapshotted to a
//! JSON file.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_store::Store;
//!
//! let store = Store::open_default()?;
//!
//! store.put("regions", &region.id, &region)?;
//! let region: Option<Region> = store.get("regions", "r-1")?;
//! let all: Vec<Region> = store.list("regions")?;
//! store.delete("regions", "r-1")?;
//! ```

mod error;
mod store;

pub use error::StoreError;
pub use store::{doc_key, Store};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Store, StoreError};
}
