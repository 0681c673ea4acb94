//! Category keys and the browsable category list.

use crate::catalog::decode::Fields;
use crate::catalog::product::ProductRecord;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Label that disables category and quantity filtering.
pub const ALL: &str = "All";

/// Comparison key for a category label.
///
/// Trims, lower-cases, drops every character outside `[a-z0-9]`, then drops
/// one trailing `s` so plural and singular labels collapse ("T-Shirts" and
/// "Tshirt" both give "tshirt"). Singular words ending in `s` lose it too
/// ("Glass" gives "glas"); existing category data relies on that.
pub fn normalize_category_key(label: &str) -> String {
    let mut key: String = label
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();
    if key.ends_with('s') {
        key.pop();
    }
    key
}

/// Whether a selection is the "All" sentinel (compared by key).
pub fn is_all(label: &str) -> bool {
    normalize_category_key(label) == "all"
}

/// A category as returned by the category service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Category {
    pub name: String,
    pub slug: String,
    /// Parent category id; top-level categories have none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl Category {
    pub fn from_value(value: &Value) -> Self {
        let f = Fields::new(value);
        Self {
            name: f.string_or_default(&["name"]),
            slug: f.string_or_default(&["slug"]),
            parent: f.get(&["parent"]).map(|p| match p {
                Value::String(s) => s.clone(),
                Value::Object(_) => Fields::new(p).string_or_default(&["_id", "id", "name"]),
                other => other.to_string(),
            }),
        }
    }

    /// Whether this is a subcategory.
    pub fn is_subcategory(&self) -> bool {
        self.parent.is_some()
    }

    /// Display name, falling back to the slug.
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() {
            self.slug.trim()
        } else {
            name
        }
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Category chips offered for filtering.
///
/// "All" first, then subcategory names from the category service, then
/// product categories that match one of those names exactly (after
/// trimming). Duplicates are dropped, keeping first-seen order.
pub fn available_categories(categories: &[Category], products: &[ProductRecord]) -> Vec<String> {
    let sub_names: Vec<String> = categories
        .iter()
        .filter(|c| c.is_subcategory())
        .map(|c| c.display_name().to_string())
        .filter(|n| !n.is_empty())
        .collect();

    let mut out = vec![ALL.to_string()];
    let mut push = |name: &str| {
        if !out.iter().any(|existing| existing == name) {
            out.push(name.to_string());
        }
    };

    for name in &sub_names {
        push(name);
    }
    for product in products {
        let name = product.category.trim();
        if !name.is_empty() && sub_names.iter().any(|n| n == name) {
            push(name);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plural_and_singular_collapse() {
        assert_eq!(normalize_category_key("T-Shirts"), "tshirt");
        assert_eq!(normalize_category_key("Tshirt"), "tshirt");
        assert_eq!(normalize_category_key("  Hoodies "), "hoodie");
    }

    #[test]
    fn test_only_one_trailing_s_removed() {
        assert_eq!(normalize_category_key("Glass"), "glas");
        assert_eq!(normalize_category_key("Dress"), "dres");
    }

    #[test]
    fn test_non_alphanumeric_stripped() {
        assert_eq!(normalize_category_key("Ghee & Oils!"), "gheeoil");
        assert_eq!(normalize_category_key("Café"), "caf");
        assert_eq!(normalize_category_key(""), "");
    }

    #[test]
    fn test_all_sentinel() {
        assert!(is_all("All"));
        assert!(is_all("ALL"));
        assert!(is_all(" all "));
        assert!(!is_all("Honey"));
    }

    #[test]
    fn test_category_decoding() {
        let top = Category::from_value(&json!({"name": "Food", "slug": "food", "parent": null}));
        let sub = Category::from_value(&json!({"name": "", "slug": "honey", "parent": "abc"}));
        assert!(!top.is_subcategory());
        assert!(sub.is_subcategory());
        assert_eq!(sub.display_name(), "honey");
    }

    #[test]
    fn test_available_categories() {
        let categories = vec![
            Category::from_value(&json!({"name": "Food", "parent": null})),
            Category::from_value(&json!({"name": "Honey", "parent": "food"})),
            Category::from_value(&json!({"name": "Ghee", "parent": "food"})),
            Category::from_value(&json!({"name": "Honey", "parent": "food"})),
        ];
        let products = vec![
            ProductRecord::new("A", 1.0, " Ghee "),
            ProductRecord::new("B", 1.0, "Spices"),
        ];

        assert_eq!(
            available_categories(&categories, &products),
            vec!["All", "Honey", "Ghee"]
        );
    }

    #[test]
    fn test_available_categories_empty_service() {
        let products = vec![ProductRecord::new("A", 1.0, "Honey")];
        assert_eq!(available_categories(&[], &products), vec!["All"]);
    }
}
