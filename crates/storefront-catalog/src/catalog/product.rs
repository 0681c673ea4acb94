//! Product records as returned by the product-listing service.

use crate::catalog::decode::{truthy, Fields};
use crate::ids::{OptionId, ProductId};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// How a discount reduces the base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// Percentage of the base price.
    Percentage,
    /// Fixed amount off the base price.
    Flat,
}

impl DiscountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountKind::Percentage => "percentage",
            DiscountKind::Flat => "flat",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "percentage" | "percent" => Some(DiscountKind::Percentage),
            "flat" | "fixed" => Some(DiscountKind::Flat),
            _ => None,
        }
    }
}

/// A discount attached to a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    pub value: f64,
}

impl Discount {
    pub fn percentage(value: f64) -> Self {
        Self {
            kind: DiscountKind::Percentage,
            value,
        }
    }

    pub fn flat(value: f64) -> Self {
        Self {
            kind: DiscountKind::Flat,
            value,
        }
    }

    /// Decode a discount object. Unknown kinds decode to `None`.
    fn from_value(value: &Value) -> Option<Self> {
        let f = Fields::new(value);
        let kind = DiscountKind::from_str(&f.string(&["type", "kind"])?)?;
        Some(Self {
            kind,
            value: f.number_or_zero(&["value"]),
        })
    }
}

/// Unit a quantity option is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityUnit {
    #[serde(rename = "gm")]
    Gram,
    #[serde(rename = "ml")]
    Millilitre,
    #[serde(rename = "l")]
    Litre,
    #[serde(rename = "pcs")]
    Pieces,
}

impl QuantityUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuantityUnit::Gram => "gm",
            QuantityUnit::Millilitre => "ml",
            QuantityUnit::Litre => "l",
            QuantityUnit::Pieces => "pcs",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "g" | "gm" | "gram" | "grams" => Some(QuantityUnit::Gram),
            "ml" => Some(QuantityUnit::Millilitre),
            "l" | "litre" | "liter" => Some(QuantityUnit::Litre),
            "pc" | "pcs" | "piece" | "pieces" => Some(QuantityUnit::Pieces),
            _ => None,
        }
    }
}

/// A purchasable pack of a product (size, unit, price, stock).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityOption {
    pub id: OptionId,
    pub quantity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<QuantityUnit>,
    pub pack_size: u32,
    pub display_label: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub stock: i64,
    pub is_active: bool,
    pub sort_order: i64,
}

impl QuantityOption {
    /// Build an active option.
    pub fn new(id: impl Into<OptionId>, display_label: impl Into<String>, quantity: f64, price: f64, stock: i64) -> Self {
        Self {
            id: id.into(),
            quantity,
            unit: None,
            pack_size: 1,
            display_label: display_label.into(),
            price,
            original_price: None,
            stock,
            is_active: true,
            sort_order: 0,
        }
    }

    /// Builder-style unit setter.
    pub fn with_unit(mut self, unit: QuantityUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Builder-style sort order setter.
    pub fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Builder-style original (pre-savings) price setter.
    pub fn with_original_price(mut self, original_price: f64) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Builder-style pack size setter.
    pub fn with_pack_size(mut self, pack_size: u32) -> Self {
        self.pack_size = pack_size;
        self
    }

    /// Builder-style active flag setter.
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Decode leniently. An option without an explicit `isActive: true` is
    /// inactive.
    pub fn from_value(value: &Value) -> Self {
        let f = Fields::new(value);
        Self {
            id: OptionId::new(f.string_or_default(&["id", "_id", "code"])),
            quantity: f.number_or_zero(&["quantity"]),
            unit: f.string(&["unit"]).and_then(|u| QuantityUnit::from_str(&u)),
            pack_size: f
                .number(&["packSize", "pack_size"])
                .filter(|n| *n >= 1.0)
                .map(|n| n as u32)
                .unwrap_or(1),
            display_label: f.string_or_default(&["displayLabel", "display_label"]),
            price: f.number_or_zero(&["price"]),
            original_price: f
                .number(&["originalPrice", "original_price"])
                .filter(|n| *n != 0.0),
            stock: f.number_or_zero(&["stock"]).round() as i64,
            is_active: f.flag(&["isActive", "is_active"]).unwrap_or(false),
            sort_order: f.number_or_zero(&["sortOrder", "sort_order"]).round() as i64,
        }
    }
}

impl<'de> Deserialize<'de> for QuantityOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Legacy per-size stock entry, superseded by quantity options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeInventoryEntry {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<i64>,
}

impl SizeInventoryEntry {
    pub fn from_value(value: &Value) -> Self {
        let f = Fields::new(value);
        Self {
            code: f.string_or_default(&["code"]),
            label: f.string(&["label"]),
            qty: f.number(&["qty"]).map(|n| n.round() as i64),
        }
    }
}

impl<'de> Deserialize<'de> for SizeInventoryEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// A customer review. Only the rating feeds the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Review {
    pub fn with_rating(rating: f64) -> Self {
        Self {
            rating,
            ..Default::default()
        }
    }

    pub fn from_value(value: &Value) -> Self {
        let f = Fields::new(value);
        Self {
            rating: f.number_or_zero(&["rating"]),
            username: f.string(&["username"]),
            text: f.string(&["text"]),
            created_at: f.string(&["createdAt", "created_at"]),
        }
    }
}

impl<'de> Deserialize<'de> for Review {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// A catalog item as stored by the admin and returned by the listing
/// service.
///
/// Decoding is total: any JSON value produces a record, with missing or
/// malformed fields at their zero value.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(rename = "_id")]
    pub id: ProductId,
    #[serde(rename = "title")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub slug: String,
    #[serde(rename = "image_url", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// `None` when the record has no `quantityOptions` field at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_options: Option<Vec<QuantityOption>>,
    pub sizes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_inventory: Option<Vec<SizeInventoryEntry>>,
    pub track_inventory_by_size: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    pub reviews: Vec<Review>,
    pub is_best_seller: bool,
    /// Creation timestamp as sent by the service (RFC 3339 or epoch millis).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ProductRecord {
    /// Create a product with a generated id.
    pub fn new(name: impl Into<String>, price: f64, category: impl Into<String>) -> Self {
        Self {
            id: ProductId::generate(),
            name: name.into(),
            price,
            category: category.into(),
            ..Default::default()
        }
    }

    /// Builder-style discount setter.
    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discount = Some(discount);
        self
    }

    /// Builder-style quantity options setter.
    pub fn with_quantity_options(mut self, options: Vec<QuantityOption>) -> Self {
        self.quantity_options = Some(options);
        self
    }

    /// Builder-style reviews setter.
    pub fn with_reviews(mut self, ratings: &[f64]) -> Self {
        self.reviews = ratings.iter().copied().map(Review::with_rating).collect();
        self
    }

    /// Decode any JSON value into a record.
    pub fn from_value(value: &Value) -> Self {
        let f = Fields::new(value);

        let quantity_options = f.has_array(&["quantityOptions", "quantity_options"]).then(|| {
            f.array(&["quantityOptions", "quantity_options"])
                .iter()
                .map(QuantityOption::from_value)
                .collect()
        });
        let size_inventory = f.has_array(&["sizeInventory", "size_inventory"]).then(|| {
            f.array(&["sizeInventory", "size_inventory"])
                .iter()
                .map(SizeInventoryEntry::from_value)
                .collect()
        });

        Self {
            id: ProductId::new(f.string_or_default(&["_id", "id"])),
            name: f.string_or_default(&["title", "name"]),
            description: f.string(&["description"]),
            price: f.number_or_zero(&["price"]),
            original_price: f
                .number(&["originalPrice", "original_price"])
                .filter(|n| *n != 0.0),
            discount: f.get(&["discount"]).and_then(Discount::from_value),
            category: f.string_or_default(&["category"]),
            region: f.string(&["region"]),
            slug: f.string_or_default(&["slug"]),
            image_url: f.string(&["image_url", "imageUrl"]),
            images: f.strings(&["images"]),
            image: f.string(&["image"]),
            quantity_options,
            sizes: f.strings(&["sizes"]),
            size_inventory,
            track_inventory_by_size: f
                .get(&["trackInventoryBySize", "track_inventory_by_size"])
                .is_some_and(truthy),
            stock: f.number(&["stock"]).map(|n| n.round() as i64),
            reviews: f.array(&["reviews"]).iter().map(Review::from_value).collect(),
            is_best_seller: f.get(&["isBestSeller", "is_best_seller"]).is_some_and(truthy),
            created_at: f.string(&["createdAt", "created_at"]),
            updated_at: f.string(&["updatedAt", "updated_at"]),
        }
    }

    /// Quantity options, empty when the field is absent.
    pub fn options(&self) -> &[QuantityOption] {
        self.quantity_options.as_deref().unwrap_or(&[])
    }

    /// Whether the product is sold through quantity options.
    pub fn has_quantity_options(&self) -> bool {
        !self.options().is_empty()
    }

    /// Whether stock is tracked through the legacy per-size inventory.
    pub fn uses_size_inventory(&self) -> bool {
        self.track_inventory_by_size && self.size_inventory.is_some()
    }

    /// Find a quantity option by id.
    pub fn find_option(&self, id: &str) -> Option<&QuantityOption> {
        self.options().iter().find(|o| o.id.as_str() == id)
    }

    /// Find a legacy size entry by code.
    pub fn find_size(&self, code: &str) -> Option<&SizeInventoryEntry> {
        self.size_inventory
            .as_deref()
            .and_then(|entries| entries.iter().find(|s| s.code == code))
    }
}

impl<'de> Deserialize<'de> for ProductRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}
