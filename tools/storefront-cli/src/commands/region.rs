//! Region admin commands.

use anyhow::Result;
use dialoguer::Confirm;
use serde::Serialize;
use storefront_catalog::catalog::{normalize_all, ProductCard, ProductService};
use storefront_catalog::region::{Region, RegionPayload, RegionService};
use storefront_catalog::search::{paginate, Page};
use tracing::info;

use super::{RegionArgs, RegionCommand};
use crate::context::Context;
use crate::output::{format_price, status_badge};

const COLUMNS: [usize; 4] = [24, 24, 10, 24];

/// Run the region command.
pub async fn run(args: RegionArgs, ctx: &Context) -> Result<()> {
    match args.command {
        RegionCommand::List { all } => list_regions(all, ctx),
        RegionCommand::Show { slug, page } => show_region(&slug, page, ctx),
        RegionCommand::Create {
            name,
            slug,
            description,
            image_url,
            inactive,
        } => {
            let payload = RegionPayload {
                name: Some(name),
                slug,
                description,
                active: Some(!inactive),
                image_url,
            };
            create_region(payload, ctx)
        }
        RegionCommand::Update {
            id,
            name,
            slug,
            description,
            image_url,
            active,
        } => {
            let payload = RegionPayload {
                name,
                slug,
                description,
                active,
                image_url,
            };
            update_region(&id, payload, ctx)
        }
        RegionCommand::Delete { id, yes } => delete_region(&id, yes, ctx),
    }
}

fn list_regions(all: bool, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let service = RegionService::new(&store);
    let regions = if all { service.list_all()? } else { service.list_active()? };

    if ctx.output.is_json() {
        ctx.output.json(&regions);
        return Ok(());
    }

    ctx.output.header("Regions");
    if regions.is_empty() {
        ctx.output.info("No regions found.");
        ctx.output.info("Run `storefront region create <name>` to add one.");
        return Ok(());
    }

    ctx.output.table_row(&["NAME", "SLUG", "STATUS", "ID"], &COLUMNS);
    for region in &regions {
        ctx.output.table_row(
            &[&region.name, &region.slug, &status_badge(region.active), region.id.as_str()],
            &COLUMNS,
        );
    }
    ctx.output.info("");
    ctx.output.info(&format!("Total: {} region(s)", regions.len()));
    Ok(())
}

#[derive(Serialize)]
struct RegionPage<'a> {
    region: &'a Region,
    products: &'a Page<ProductCard>,
}

fn show_region(slug: &str, page: usize, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let region = RegionService::new(&store).find_by_slug(slug)?;
    let records = ProductService::new(&store).list_for_region(&region.slug)?;

    let cards = normalize_all(&records, ctx.pipeline().images());
    let products = paginate(cards, ctx.config.catalog.wide_page_size, page);
    info!(
        slug = %region.slug,
        products = products.pagination.total,
        page = products.pagination.page,
        "region page rendered"
    );

    if ctx.output.is_json() {
        ctx.output.json(&RegionPage {
            region: &region,
            products: &products,
        });
        return Ok(());
    }

    let out = &ctx.output;
    out.header(&region.name);
    if let Some(description) = &region.description {
        out.info(description);
    }
    out.kv("Slug", &region.slug);
    if let Some(image) = &region.image_url {
        out.kv("Image", image);
    }

    let p = &products.pagination;
    if products.is_empty() {
        if p.is_past_end() && p.total > 0 {
            out.warn(&format!("Page {} is past the last page ({}).", p.page, p.total_pages));
        } else {
            out.info("No products in this region yet.");
        }
        return Ok(());
    }

    for card in &products.items {
        out.list_item(&format!("{}  {}", card.name, format_price(card.price)));
    }
    out.info(&format!("Page {} of {} ({} products)", p.page, p.total_pages, p.total));
    Ok(())
}

fn create_region(payload: RegionPayload, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let region = RegionService::new(&store).create(payload)?;
    ctx.save_store(&store)?;

    info!(id = %region.id, slug = %region.slug, "region created");

    if ctx.output.is_json() {
        ctx.output.json(&region);
    } else {
        ctx.output
            .success(&format!("Created region {} ({})", region.name, region.slug));
        ctx.output.kv("ID", region.id.as_str());
    }
    Ok(())
}

fn update_region(id: &str, payload: RegionPayload, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let region = RegionService::new(&store).update(id, payload)?;
    ctx.save_store(&store)?;
    info!(id, slug = %region.slug, active = region.active, "region updated");

    if ctx.output.is_json() {
        ctx.output.json(&region);
    } else {
        ctx.output.success(&format!("Updated region {}", region.name));
        ctx.output.kv("Slug", &region.slug);
        ctx.output.kv("Status", &status_badge(region.active));
    }
    Ok(())
}

fn delete_region(id: &str, yes: bool, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let service = RegionService::new(&store);
    let region = service.get(id)?;

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete region '{}'?", region.name))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Deletion cancelled");
            return Ok(());
        }
    }

    let deleted = service.delete(id)?;
    ctx.save_store(&store)?;
    info!(id, slug = %deleted.slug, "region deleted");

    if ctx.output.is_json() {
        ctx.output.json(&deleted);
    } else {
        ctx.output.success(&format!("Deleted region {}", deleted.name));
    }
    Ok(())
}
