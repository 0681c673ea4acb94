//! Quantity option presentation.
//!
//! Options are shown active-only, ordered by `(sort_order, quantity)`,
//! with savings, stock and pack-size badges derived per option.

use crate::catalog::product::{ProductRecord, QuantityOption, SizeInventoryEntry};
use crate::ids::OptionId;
use serde::Serialize;
use std::cmp::Ordering;

/// Stock level at or below which an option shows a "low stock" badge.
pub const LOW_STOCK_THRESHOLD: i64 = 3;

/// Stock assumed for derived options that carry no stock count.
pub const UNTRACKED_STOCK: i64 = 999;

/// Active options sorted by `(sort_order, quantity)`, ties kept in input
/// order.
pub fn display_options(options: &[QuantityOption]) -> Vec<QuantityOption> {
    let mut shown: Vec<QuantityOption> = options.iter().filter(|o| o.is_active).cloned().collect();
    shown.sort_by(|a, b| {
        a.sort_order
            .cmp(&b.sort_order)
            .then_with(|| a.quantity.partial_cmp(&b.quantity).unwrap_or(Ordering::Equal))
    });
    shown
}

/// Whole-percent saving of `price` against `original`; 0 unless
/// `original > price`.
pub fn savings_percent(original: f64, price: f64) -> u32 {
    if !original.is_finite() || !price.is_finite() || original <= 0.0 || original <= price {
        return 0;
    }
    ((original - price) / original * 100.0).round() as u32
}

/// Stock badge for an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "remaining", rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    LowStock(i64),
    InStock,
}

impl StockStatus {
    pub fn from_stock(stock: i64) -> Self {
        if stock <= 0 {
            StockStatus::OutOfStock
        } else if stock <= LOW_STOCK_THRESHOLD {
            StockStatus::LowStock(stock)
        } else {
            StockStatus::InStock
        }
    }

    /// Whether the option can be selected.
    pub fn is_selectable(&self) -> bool {
        !matches!(self, StockStatus::OutOfStock)
    }

    /// Badge text, if any.
    pub fn label(&self) -> Option<String> {
        match self {
            StockStatus::OutOfStock => Some("Out of stock".to_string()),
            StockStatus::LowStock(n) => Some(format!("Only {} left", n)),
            StockStatus::InStock => None,
        }
    }
}

/// An option with its derived badges.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionView {
    pub option: QuantityOption,
    pub savings_percent: u32,
    pub stock_status: StockStatus,
    /// "Pack of N" when the pack holds more than one unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pack_badge: Option<String>,
}

impl OptionView {
    pub fn new(option: QuantityOption) -> Self {
        let savings = option
            .original_price
            .map(|orig| savings_percent(orig, option.price))
            .unwrap_or(0);
        let pack_badge = (option.pack_size > 1).then(|| format!("Pack of {}", option.pack_size));
        Self {
            stock_status: StockStatus::from_stock(option.stock),
            savings_percent: savings,
            pack_badge,
            option,
        }
    }
}

/// Options as presented by a quantity selector.
pub fn option_views(options: &[QuantityOption]) -> Vec<OptionView> {
    display_options(options).into_iter().map(OptionView::new).collect()
}

/// Options offered on the product detail view.
///
/// Uses the product's quantity options when the field is present, the
/// legacy size inventory otherwise. Missing labels, prices and stock fall
/// back to derived values; an option is active when it has stock and its
/// sort order is its position.
pub fn detail_options(product: &ProductRecord) -> Vec<QuantityOption> {
    if let Some(options) = &product.quantity_options {
        return options
            .iter()
            .enumerate()
            .map(|(index, item)| from_quantity_option(product, index, item))
            .collect();
    }

    product
        .size_inventory
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .enumerate()
        .map(|(index, item)| from_size_entry(product, index, item))
        .collect()
}

fn from_quantity_option(product: &ProductRecord, index: usize, item: &QuantityOption) -> QuantityOption {
    let quantity = if item.quantity != 0.0 { item.quantity } else { 1.0 };
    let display_label = if item.display_label.is_empty() {
        let unit = item.unit.map(|u| u.as_str()).unwrap_or("g");
        format!("{}{}", format_quantity(quantity), unit)
    } else {
        item.display_label.clone()
    };
    let stock = if item.stock != 0 { item.stock } else { UNTRACKED_STOCK };

    QuantityOption {
        id: fallback_id(&item.id, index),
        quantity,
        unit: item.unit,
        pack_size: item.pack_size.max(1),
        display_label,
        price: fallback_price(item.price, product.price),
        original_price: item.original_price.or(product.original_price),
        stock,
        is_active: stock > 0,
        sort_order: index as i64,
    }
}

fn from_size_entry(product: &ProductRecord, index: usize, item: &SizeInventoryEntry) -> QuantityOption {
    let display_label = item
        .label
        .clone()
        .filter(|l| !l.is_empty())
        .or_else(|| (!item.code.is_empty()).then(|| item.code.clone()))
        .unwrap_or_else(|| "1g".to_string());
    // Codes such as "500" double as the quantity.
    let quantity = leading_integer(&item.code).filter(|n| *n != 0).unwrap_or(1) as f64;
    let stock = item.qty.filter(|q| *q != 0).unwrap_or(UNTRACKED_STOCK);

    QuantityOption {
        id: fallback_id(&OptionId::new(item.code.clone()), index),
        quantity,
        unit: None,
        pack_size: 1,
        display_label,
        price: fallback_price(0.0, product.price),
        original_price: product.original_price,
        stock,
        is_active: stock > 0,
        sort_order: index as i64,
    }
}

fn fallback_id(id: &OptionId, index: usize) -> OptionId {
    if id.is_empty() {
        OptionId::new(format!("option-{}", index))
    } else {
        id.clone()
    }
}

fn fallback_price(option_price: f64, product_price: f64) -> f64 {
    if option_price != 0.0 && option_price.is_finite() {
        option_price
    } else if product_price.is_finite() {
        product_price
    } else {
        0.0
    }
}

fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{}", quantity as i64)
    } else {
        format!("{}", quantity)
    }
}

/// Integer prefix of a string, like "500ml" -> 500.
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::product::QuantityUnit;
    use serde_json::json;

    fn opt(id: &str, quantity: f64, sort_order: i64, active: bool) -> QuantityOption {
        QuantityOption::new(id, format!("{}g", quantity), quantity, 100.0, 10)
            .with_sort_order(sort_order)
            .with_active(active)
    }

    #[test]
    fn test_display_options_filters_and_sorts() {
        let options = vec![
            opt("c", 300.0, 1, true),
            opt("a", 100.0, 0, true),
            opt("x", 50.0, 0, false),
            opt("b", 80.0, 1, true),
        ];
        let ids: Vec<_> = display_options(&options)
            .into_iter()
            .map(|o| o.id.into_inner())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_savings_percent() {
        assert_eq!(savings_percent(2.0, 1.0), 50);
        assert_eq!(savings_percent(4.0, 3.0), 25);
        assert_eq!(savings_percent(6.0, 5.0), 17);
        assert_eq!(savings_percent(100.0, 100.0), 0);
        assert_eq!(savings_percent(90.0, 100.0), 0);
        assert_eq!(savings_percent(0.0, 100.0), 0);
    }

    #[test]
    fn test_stock_status() {
        assert_eq!(StockStatus::from_stock(0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::from_stock(3), StockStatus::LowStock(3));
        assert_eq!(StockStatus::from_stock(4), StockStatus::InStock);
        assert_eq!(StockStatus::LowStock(2).label().as_deref(), Some("Only 2 left"));
        assert!(!StockStatus::OutOfStock.is_selectable());
    }

    #[test]
    fn test_option_view_badges() {
        let option = QuantityOption::new("opt2", "1L (2 X 500ml)", 1000.0, 3.0, 5)
            .with_unit(QuantityUnit::Millilitre)
            .with_pack_size(2)
            .with_original_price(4.0);
        let view = OptionView::new(option);
        assert_eq!(view.savings_percent, 25);
        assert_eq!(view.pack_badge.as_deref(), Some("Pack of 2"));
        assert_eq!(view.stock_status, StockStatus::InStock);
    }

    #[test]
    fn test_detail_options_fallbacks() {
        let product = ProductRecord::from_value(&json!({
            "price": 450,
            "quantityOptions": [
                {"id": "a", "quantity": 500, "unit": "ml", "displayLabel": "500ml", "price": 1, "stock": 0},
                {"quantity": 0}
            ]
        }));

        let options = detail_options(&product);
        assert_eq!(options.len(), 2);

        assert_eq!(options[0].display_label, "500ml");
        assert_eq!(options[0].price, 1.0);
        assert_eq!(options[0].stock, UNTRACKED_STOCK);
        assert!(options[0].is_active);

        assert_eq!(options[1].id.as_str(), "option-1");
        assert_eq!(options[1].display_label, "1g");
        assert_eq!(options[1].price, 450.0);
        assert_eq!(options[1].sort_order, 1);
    }

    #[test]
    fn test_detail_options_from_size_inventory() {
        let product = ProductRecord::from_value(&json!({
            "price": 200,
            "sizeInventory": [{"code": "250", "qty": 4}, {"code": "M", "label": "Medium"}]
        }));

        let options = detail_options(&product);
        assert_eq!(options[0].display_label, "250");
        assert_eq!(options[0].quantity, 250.0);
        assert_eq!(options[0].stock, 4);
        assert_eq!(options[1].display_label, "Medium");
        assert_eq!(options[1].quantity, 1.0);
        assert_eq!(options[1].price, 200.0);
    }

    #[test]
    fn test_detail_options_none() {
        assert!(detail_options(&ProductRecord::new("A", 1.0, "")).is_empty());
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("500ml"), Some(500));
        assert_eq!(leading_integer("M"), None);
    }
}
