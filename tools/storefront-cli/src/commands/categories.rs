//! List category filter chips.

use anyhow::Result;
use serde::Serialize;
use storefront_catalog::catalog::{available_categories, normalize_category_key};
use storefront_data::{ProductFeed, ProductQuery};
use tracing::info;

use super::CategoriesArgs;
use crate::context::Context;

#[derive(Serialize)]
struct CategoryReport {
    filters: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unmatched: Vec<String>,
}

/// Run the categories command.
pub async fn run(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let client = ctx.catalog_client();

    let spinner = ctx.output.spinner("Fetching categories...");
    let categories = client.list_categories().await;
    let mut feed = ProductFeed::new();
    let ticket = feed.begin();
    let result = client.list_products(&ProductQuery::new()).await;
    feed.complete(ticket, result);
    spinner.finish_and_clear();

    if let Some(notice) = feed.notice() {
        ctx.output.warn(notice);
    }

    let filters = available_categories(&categories, feed.records());
    let unmatched = if args.all {
        unmatched_categories(&filters, feed.records().iter().map(|r| r.category.as_str()))
    } else {
        Vec::new()
    };

    info!(
        subcategories = categories.iter().filter(|c| c.is_subcategory()).count(),
        filters = filters.len(),
        unmatched = unmatched.len(),
        "categories listed"
    );

    if ctx.output.is_json() {
        ctx.output.json(&CategoryReport { filters, unmatched });
        return Ok(());
    }

    ctx.output.header("Categories");
    for name in &filters {
        ctx.output.list_item(name);
    }
    if !unmatched.is_empty() {
        ctx.output.header("Product categories without a filter");
        for name in &unmatched {
            ctx.output.list_item(name);
        }
    }

    Ok(())
}

/// Product categories whose key matches none of the filters, first-seen order.
fn unmatched_categories<'a>(filters: &[String], categories: impl Iterator<Item = &'a str>) -> Vec<String> {
    let keys: Vec<String> = filters.iter().map(|f| normalize_category_key(f)).collect();
    let mut out: Vec<String> = Vec::new();
    for category in categories.map(str::trim).filter(|c| !c.is_empty()) {
        let key = normalize_category_key(category);
        if !keys.contains(&key) && !out.iter().any(|o| normalize_category_key(o) == key) {
            out.push(category.to_string());
        }
    }
    out
}
