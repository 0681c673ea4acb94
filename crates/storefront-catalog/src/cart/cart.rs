//! Cart and line item types.

use crate::catalog::ProductRecord;
use crate::error::CatalogError;
use crate::ids::{CartId, LineItemId, OptionId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Items in the cart.
    pub items: Vec<LineItem>,
    /// Cart currency.
    pub currency: Currency,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        let now = current_timestamp();
        Self {
            id: CartId::generate(),
            items: Vec::new(),
            currency,
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a product, validating the option selection and stock.
    ///
    /// Products sold through quantity options (or legacy size inventory)
    /// need a selection. The stock checked is the selected option's, or the
    /// product's own when it has no options. Adding the same product and
    /// option again increases the existing line.
    pub fn add_product(
        &mut self,
        product: &ProductRecord,
        selection: Option<&str>,
        quantity: i64,
    ) -> Result<LineItemId, CatalogError> {
        if quantity <= 0 {
            return Err(CatalogError::InvalidQuantity(quantity));
        }

        let selection = selection.map(str::trim).filter(|s| !s.is_empty());
        let resolved = resolve_selection(product, selection)?;

        let option_id = resolved.option_id.clone();
        let in_cart = self
            .find_line(&product.id, option_id.as_ref())
            .map(|i| i.quantity)
            .unwrap_or(0);

        if resolved.stock <= 0 {
            return Err(CatalogError::OutOfStock(resolved.out_of_stock_message()));
        }
        let wanted = in_cart.checked_add(quantity).ok_or(CatalogError::Overflow)?;
        if wanted > resolved.stock {
            return Err(CatalogError::InsufficientStock {
                requested: wanted,
                available: resolved.stock,
            });
        }
        if wanted > MAX_QUANTITY_PER_ITEM {
            return Err(CatalogError::QuantityExceedsLimit(wanted, MAX_QUANTITY_PER_ITEM));
        }

        let unit_price = Money::from_decimal(resolved.unit_price, self.currency);

        if let Some(existing) = self.find_line_mut(&product.id, option_id.as_ref()) {
            existing.quantity = wanted;
            existing.update_total()?;
            let id = existing.id.clone();
            self.updated_at = current_timestamp();
            debug!(product = %product.id, quantity = wanted, "cart line increased");
            return Ok(id);
        }

        let mut item = LineItem::new(product.id.clone(), product.name.clone(), quantity, unit_price)?;
        item.option_id = option_id;
        item.option_label = resolved.label;
        let id = item.id.clone();
        self.items.push(item);
        self.updated_at = current_timestamp();
        debug!(product = %product.id, quantity, "cart line added");
        Ok(id)
    }

    /// Update item quantity.
    ///
    /// If quantity is <= 0, removes the item.
    pub fn update_quantity(&mut self, line_item_id: &LineItemId, quantity: i64) -> Result<bool, CatalogError> {
        if quantity <= 0 {
            return Ok(self.remove_item(line_item_id));
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CatalogError::QuantityExceedsLimit(quantity, MAX_QUANTITY_PER_ITEM));
        }

        if let Some(item) = self.items.iter_mut().find(|i| &i.id == line_item_id) {
            item.quantity = quantity;
            item.update_total()?;
            self.updated_at = current_timestamp();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Remove an item from the cart.
    pub fn remove_item(&mut self, line_item_id: &LineItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != line_item_id);
        let removed = self.items.len() < len_before;
        if removed {
            self.updated_at = current_timestamp();
        }
        removed
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = current_timestamp();
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by ID.
    pub fn get_item(&self, line_item_id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == line_item_id)
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Result<Money, CatalogError> {
        Money::sum(self.items.iter().map(|i| &i.total_price), self.currency).ok_or(CatalogError::Overflow)
    }

    /// Merge another cart into this one (e.g. a cart built before login).
    ///
    /// Quantities are capped at MAX_QUANTITY_PER_ITEM.
    pub fn merge(&mut self, other: Cart) -> Result<(), CatalogError> {
        for item in other.items {
            if let Some(existing) = self.find_line_mut(&item.product_id, item.option_id.as_ref()) {
                existing.quantity = existing
                    .quantity
                    .saturating_add(item.quantity)
                    .min(MAX_QUANTITY_PER_ITEM);
                existing.update_total()?;
            } else {
                self.items.push(item);
            }
        }
        self.updated_at = current_timestamp();
        Ok(())
    }

    fn find_line(&self, product_id: &ProductId, option_id: Option<&OptionId>) -> Option<&LineItem> {
        self.items
            .iter()
            .find(|i| &i.product_id == product_id && i.option_id.as_ref() == option_id)
    }

    fn find_line_mut(&mut self, product_id: &ProductId, option_id: Option<&OptionId>) -> Option<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|i| &i.product_id == product_id && i.option_id.as_ref() == option_id)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

/// What a selection resolves to on a product.
struct ResolvedSelection {
    option_id: Option<OptionId>,
    label: Option<String>,
    stock: i64,
    unit_price: f64,
    /// "Option" or "Size", for messages.
    kind: Option<&'static str>,
}

impl ResolvedSelection {
    fn out_of_stock_message(&self) -> String {
        match (self.kind, &self.option_id) {
            (Some(kind), Some(id)) => format!("{} {} is out of stock", kind, id),
            _ => "Out of stock".to_string(),
        }
    }
}

fn resolve_selection(product: &ProductRecord, selection: Option<&str>) -> Result<ResolvedSelection, CatalogError> {
    let has_options = product.has_quantity_options();
    let uses_sizes = product.uses_size_inventory();

    if (has_options || uses_sizes) && selection.is_none() {
        return Err(CatalogError::SelectionRequired);
    }

    match selection {
        Some(id) if has_options => {
            let option = product
                .find_option(id)
                .ok_or_else(|| CatalogError::OptionNotFound(id.to_string()))?;
            let unit_price = if option.price != 0.0 { option.price } else { product.price };
            Ok(ResolvedSelection {
                option_id: Some(option.id.clone()),
                label: Some(option.display_label.clone()).filter(|l| !l.is_empty()),
                stock: option.stock,
                unit_price,
                kind: Some("Option"),
            })
        }
        Some(code) if uses_sizes => {
            let size = product
                .find_size(code)
                .ok_or_else(|| CatalogError::OptionNotFound(code.to_string()))?;
            Ok(ResolvedSelection {
                option_id: Some(OptionId::new(size.code.clone())),
                label: size.label.clone().or_else(|| Some(size.code.clone())),
                stock: size.qty.unwrap_or(0),
                unit_price: product.price,
                kind: Some("Size"),
            })
        }
        _ => Ok(ResolvedSelection {
            option_id: None,
            label: None,
            stock: product.stock.unwrap_or(0),
            unit_price: product.price,
            kind: None,
        }),
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Unique line item identifier.
    pub id: LineItemId,
    /// Product ID.
    pub product_id: ProductId,
    /// Selected quantity option or size code, if any.
    pub option_id: Option<OptionId>,
    /// Product name (denormalized for display).
    pub product_name: String,
    /// Option label (e.g., "500ml").
    pub option_label: Option<String>,
    /// Quantity.
    pub quantity: i64,
    /// Unit price.
    pub unit_price: Money,
    /// Total price (unit_price * quantity).
    pub total_price: Money,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Result<Self, CatalogError> {
        let total_price = unit_price
            .checked_multiply(quantity)
            .ok_or(CatalogError::Overflow)?;
        Ok(Self {
            id: LineItemId::generate(),
            product_id,
            option_id: None,
            product_name: product_name.into(),
            option_label: None,
            quantity,
            unit_price,
            total_price,
        })
    }

    /// Update the total price based on quantity.
    pub fn update_total(&mut self) -> Result<(), CatalogError> {
        self.total_price = self
            .unit_price
            .checked_multiply(self.quantity)
            .ok_or(CatalogError::Overflow)?;
        Ok(())
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
