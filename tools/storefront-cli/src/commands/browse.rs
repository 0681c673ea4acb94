//! Browse the product listing.

use anyhow::{anyhow, Result};
use serde::Serialize;
use storefront_catalog::catalog::{ProductCard, ProductRecord, ProductService};
use storefront_catalog::search::{ListingOrder, Page, SortMode, ViewState};
use storefront_data::{ProductFeed, ProductQuery};
use tracing::{info, warn};

use super::BrowseArgs;
use crate::context::Context;
use crate::output::{format_price, format_rating};

const COLUMNS: [usize; 4] = [32, 22, 18, 8];

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let state = view_state(&args, ctx)?;
    let (records, notice) = fetch(&args, &state, ctx).await?;

    let mut records = records;
    let order = if args.newest { ListingOrder::Newest } else { ListingOrder::All };
    order.apply(&mut records);

    let pipeline = ctx.pipeline();
    let width = args.width.unwrap_or_else(|| ctx.output.term_width() as u32);
    let page_size = pipeline.page_sizes().for_width(width);
    let page = pipeline.run_with_page_size(&records, &state, page_size);

    info!(
        fetched = records.len(),
        matched = page.pagination.total,
        page = page.pagination.page,
        page_size,
        sort = state.sort.as_str(),
        "browse rendered"
    );

    if ctx.output.is_json() {
        ctx.output.json(&BrowseReport {
            title: order.title(),
            state: &state,
            page: &page,
            notice: notice.as_deref(),
        });
        return Ok(());
    }

    print_page(&page, &state, order, notice.as_deref(), ctx);
    Ok(())
}

fn view_state(args: &BrowseArgs, ctx: &Context) -> Result<ViewState> {
    let sort = SortMode::from_str(&args.sort).ok_or_else(|| {
        anyhow!("Unknown sort '{}'. Use none, low-to-high or high-to-low.", args.sort)
    })?;

    let defaults = ctx.config.catalog.price_range();
    let min = args.min_price.unwrap_or(defaults.min);
    let max = args.max_price.unwrap_or(defaults.max);

    let mut state = ViewState::new()
        .with_category(args.category.clone())
        .with_quantity_label(args.quantity.clone())
        .with_price_range(min, max)
        .with_sort(sort);
    state.page = args.page.max(1);
    Ok(state)
}

/// Fetch records, substituting an empty list and a notice on failure.
async fn fetch(args: &BrowseArgs, state: &ViewState, ctx: &Context) -> Result<(Vec<ProductRecord>, Option<String>)> {
    if args.local {
        let store = ctx.open_store()?;
        let records = ProductService::new(&store).list()?;
        return Ok((records, None));
    }

    let mut query = ProductQuery::for_view(state);
    if let Some(search) = &args.search {
        query = query.with_search(search.clone());
    }
    if let Some(collection) = &args.collection {
        query = query.with_collection(collection.clone());
    }

    let client = ctx.catalog_client();
    let mut feed = ProductFeed::new();
    let ticket = feed.begin();

    let spinner = ctx.output.spinner("Fetching products...");
    let result = client.list_products(&query).await;
    spinner.finish_and_clear();

    feed.complete(ticket, result);
    if let Some(notice) = feed.notice() {
        warn!(notice, "product fetch failed");
    }
    let notice = feed.notice().map(str::to_string);
    Ok((feed.records().to_vec(), notice))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrowseReport<'a> {
    title: &'a str,
    state: &'a ViewState,
    page: &'a Page<ProductCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<&'a str>,
}

fn price_cell(card: &ProductCard) -> String {
    match card.original_price {
        Some(original) if card.is_discounted() => {
            format!("{} ({})", format_price(card.price), format_price(original))
        }
        _ => format_price(card.price),
    }
}

fn print_page(page: &Page<ProductCard>, state: &ViewState, order: ListingOrder, notice: Option<&str>, ctx: &Context) {
    let out = &ctx.output;
    out.header(order.title());

    if let Some(notice) = notice {
        out.warn(notice);
    }

    if state.is_filtered() {
        let range = state.filter.price_range;
        out.kv("Category", &state.filter.category);
        out.kv("Quantity", &state.filter.quantity_label);
        out.kv("Price", &format!("{} - {}", format_price(range.min), format_price(range.max)));
        out.kv("Sort", state.sort.display_name());
    }

    let p = &page.pagination;
    if page.is_empty() {
        if p.is_past_end() && p.total > 0 {
            out.warn(&format!("Page {} is past the last page ({}).", p.page, p.total_pages));
        } else {
            out.info("No products found.");
        }
        return;
    }

    out.table_row(&["NAME", "PRICE", "CATEGORY", "RATING"], &COLUMNS);
    for card in &page.items {
        let name = if card.is_best_seller {
            format!("{} *", card.name)
        } else {
            card.name.clone()
        };
        out.table_row(
            &[&name, &price_cell(card), &card.category, &format_rating(card.rating)],
            &COLUMNS,
        );
    }

    out.info("");
    out.info(&format!(
        "Showing {}-{} of {} | Page {} of {}",
        p.start_item(),
        p.end_item(),
        p.total,
        p.page,
        p.total_pages
    ));
    if p.total_pages > 1 {
        let pages: Vec<String> = p
            .page_numbers(5)
            .into_iter()
            .map(|n| if n == p.page { format!("[{}]", n) } else { n.to_string() })
            .collect();
        out.info(&format!("Pages: {}", pages.join(" ")));
    }
}
