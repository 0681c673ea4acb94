//! Product administration over the document store.

use crate::catalog::product::{ProductRecord, QuantityOption};
use crate::error::CatalogError;
use crate::ids::ProductId;
use crate::region::slugify;
use chrono::{SecondsFormat, Utc};
use storefront_store::Store;
use tracing::info;

/// Store collection holding product documents.
pub const PRODUCTS: &str = "products";

/// Product CRUD.
pub struct ProductService<'a> {
    store: &'a Store,
}

impl<'a> ProductService<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Every stored product, in id order.
    pub fn list(&self) -> Result<Vec<ProductRecord>, CatalogError> {
        Ok(self.store.list(PRODUCTS)?)
    }

    /// Products assigned to a region, matched by slug.
    pub fn list_for_region(&self, region_slug: &str) -> Result<Vec<ProductRecord>, CatalogError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|p| {
                p.region
                    .as_deref()
                    .is_some_and(|r| r == region_slug || slugify(r) == region_slug)
            })
            .collect())
    }

    /// Look up a product by id.
    pub fn get(&self, id: &str) -> Result<ProductRecord, CatalogError> {
        self.store
            .get(PRODUCTS, id)?
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))
    }

    /// Look up a product by slug, falling back to id.
    pub fn find(&self, id_or_slug: &str) -> Result<ProductRecord, CatalogError> {
        if let Some(product) = self.store.get(PRODUCTS, id_or_slug)? {
            return Ok(product);
        }
        self.list()?
            .into_iter()
            .find(|p| p.slug == id_or_slug)
            .ok_or_else(|| CatalogError::ProductNotFound(id_or_slug.to_string()))
    }

    /// Store a new product.
    ///
    /// Generates an id when missing and derives the slug from the name.
    pub fn create(&self, mut product: ProductRecord) -> Result<ProductRecord, CatalogError> {
        validate(&product)?;
        product.name = product.name.trim().to_string();
        if product.id.is_empty() {
            product.id = ProductId::generate();
        }
        if product.slug.is_empty() {
            product.slug = slugify(&product.name);
        }
        let now = timestamp();
        product.created_at = Some(now.clone());
        product.updated_at = Some(now);

        self.store.put(PRODUCTS, product.id.as_str(), &product)?;
        info!(id = %product.id, name = %product.name, "product created");
        Ok(product)
    }

    /// Replace a product, keeping its id and creation time.
    pub fn update(&self, id: &str, mut product: ProductRecord) -> Result<ProductRecord, CatalogError> {
        let existing = self.get(id)?;
        validate(&product)?;

        product.id = existing.id;
        product.created_at = existing.created_at;
        product.updated_at = Some(timestamp());
        if product.slug.is_empty() {
            product.slug = existing.slug;
        }

        self.store.put(PRODUCTS, id, &product)?;
        info!(id = %product.id, "product updated");
        Ok(product)
    }

    /// Delete a product, returning the removed document.
    pub fn delete(&self, id: &str) -> Result<ProductRecord, CatalogError> {
        let product = self.get(id)?;
        self.store.delete(PRODUCTS, id)?;
        info!(id = %product.id, "product deleted");
        Ok(product)
    }

    /// Replace a product's quantity options.
    ///
    /// Switching to quantity options turns off legacy per-size inventory.
    pub fn set_quantity_options(
        &self,
        id: &str,
        options: Vec<QuantityOption>,
    ) -> Result<ProductRecord, CatalogError> {
        let mut product = self.get(id)?;
        if options.iter().any(|o| o.price < 0.0 || !o.price.is_finite()) {
            return Err(CatalogError::ValidationError(
                "option price must be a non-negative number".to_string(),
            ));
        }

        let count = options.len();
        product.quantity_options = Some(options);
        product.track_inventory_by_size = false;
        product.sizes.clear();
        product.size_inventory = Some(Vec::new());
        product.updated_at = Some(timestamp());

        self.store.put(PRODUCTS, id, &product)?;
        info!(id = %product.id, options = count, "quantity options replaced");
        Ok(product)
    }
}

fn validate(product: &ProductRecord) -> Result<(), CatalogError> {
    if product.name.trim().is_empty() {
        return Err(CatalogError::MissingField("name"));
    }
    if !product.price.is_finite() || product.price < 0.0 {
        return Err(CatalogError::ValidationError(
            "price must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
