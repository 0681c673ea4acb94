//! Sorting and listing order.

use crate::catalog::{ProductCard, ProductRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Price sort applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortMode {
    /// Keep fetch order.
    #[default]
    #[serde(rename = "none")]
    None,
    /// Base price, low to high.
    #[serde(rename = "low-to-high")]
    PriceAsc,
    /// Base price, high to low.
    #[serde(rename = "high-to-low")]
    PriceDesc,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::None => "none",
            SortMode::PriceAsc => "low-to-high",
            SortMode::PriceDesc => "high-to-low",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Some(SortMode::None),
            "low-to-high" | "asc" | "ascending" | "price-asc" => Some(SortMode::PriceAsc),
            "high-to-low" | "desc" | "descending" | "price-desc" => Some(SortMode::PriceDesc),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortMode::None => "Featured",
            SortMode::PriceAsc => "Price: Low to High",
            SortMode::PriceDesc => "Price: High to Low",
        }
    }
}

/// Stable sort by base price. Equal prices keep their relative order.
pub fn sort_cards(mut cards: Vec<ProductCard>, mode: SortMode) -> Vec<ProductCard> {
    match mode {
        SortMode::None => {}
        SortMode::PriceAsc => cards.sort_by(|a, b| a.base_price.total_cmp(&b.base_price)),
        SortMode::PriceDesc => cards.sort_by(|a, b| b.base_price.total_cmp(&a.base_price)),
    }
    cards
}

/// Which listing a browse view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListingOrder {
    /// Everything, in fetch order ("Shop All").
    #[default]
    All,
    /// Newest first ("New Arrivals").
    Newest,
}

impl ListingOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingOrder::All => "all",
            ListingOrder::Newest => "newest",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(ListingOrder::All),
            "newest" | "new" => Some(ListingOrder::Newest),
            _ => None,
        }
    }

    /// Page heading for the listing.
    pub fn title(&self) -> &'static str {
        match self {
            ListingOrder::All => "Shop All",
            ListingOrder::Newest => "New Arrivals",
        }
    }

    /// Reorder a fetched list for this listing.
    pub fn apply(&self, records: &mut [ProductRecord]) {
        if *self == ListingOrder::Newest {
            order_newest(records);
        }
    }
}

/// Sort by creation time, newest first. Records without a readable
/// timestamp go last, in their original order.
pub fn order_newest(records: &mut [ProductRecord]) {
    records.sort_by(|a, b| {
        let ta = a.created_at.as_deref().and_then(parse_timestamp);
        let tb = b.created_at.as_deref().and_then(parse_timestamp);
        match (ta, tb) {
            (Some(ta), Some(tb)) => tb.cmp(&ta),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

/// Parse an RFC 3339 timestamp, a bare date, or epoch milliseconds.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|d| d.and_utc());
    }
    raw.parse::<i64>()
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
}
