//! Catalog error types.

use thiserror::Error;

/// Errors that can occur in catalog, admin, and cart operations.
///
/// The browsing pipeline itself never fails; these cover the admin
/// services and the cart.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Region not found.
    #[error("Region not found: {0}")]
    RegionNotFound(String),

    /// A region with the same name or slug already exists.
    #[error("Region with this {field} already exists: {value}")]
    DuplicateRegion { field: &'static str, value: String },

    /// Required field missing or blank.
    #[error("Missing {0}")]
    MissingField(&'static str),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The product has options and none was selected.
    #[error("Select an option: please choose a quantity option before adding to cart")]
    SelectionRequired,

    /// The selected option does not exist on the product.
    #[error("Option not found: {0}")]
    OptionNotFound(String),

    /// The selection has no stock.
    #[error("Out of stock: {0}")]
    OutOfStock(String),

    /// More units requested than are in stock.
    #[error("Insufficient stock: only {available} available (requested {requested})")]
    InsufficientStock { requested: i64, available: i64 },

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Document store error.
    #[error("Store error: {0}")]
    StoreError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CatalogError {
    /// HTTP status an API layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::ProductNotFound(_)
            | CatalogError::RegionNotFound(_)
            | CatalogError::OptionNotFound(_) => 404,
            CatalogError::DuplicateRegion { .. } => 409,
            CatalogError::MissingField(_)
            | CatalogError::ValidationError(_)
            | CatalogError::SelectionRequired
            | CatalogError::OutOfStock(_)
            | CatalogError::InsufficientStock { .. }
            | CatalogError::InvalidQuantity(_)
            | CatalogError::QuantityExceedsLimit(..) => 400,
            CatalogError::Overflow
            | CatalogError::StoreError(_)
            | CatalogError::SerializationError(_) => 500,
        }
    }
}

impl From<storefront_store::StoreError> for CatalogError {
    fn from(e: storefront_store::StoreError) -> Self {
        CatalogError::StoreError(e.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(CatalogError::RegionNotFound("x".into()).status_code(), 404);
        assert_eq!(
            CatalogError::DuplicateRegion {
                field: "name",
                value: "North".into()
            }
            .status_code(),
            409
        );
        assert_eq!(CatalogError::MissingField("name").status_code(), 400);
        assert_eq!(CatalogError::StoreError("boom".into()).status_code(), 500);
    }

    #[test]
    fn test_insufficient_stock_message() {
        let err = CatalogError::InsufficientStock {
            requested: 5,
            available: 3,
        };
        assert!(err.to_string().contains("only 3 available"));
    }
}
