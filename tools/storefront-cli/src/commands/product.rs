//! Product commands.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use serde::Serialize;
use storefront_catalog::cart::Cart;
use storefront_catalog::catalog::{
    detail_options, normalize, OptionView, ProductCard, ProductRecord, ProductService, QuantityOption,
};
use storefront_data::ProductQuery;
use tracing::{debug, info};

use super::{ProductArgs, ProductCommand};
use crate::context::Context;
use crate::output::{format_price, format_rating, stock_badge};

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ProductCommand::Show { id, local } => show_product(&id, local, ctx).await,
        ProductCommand::Create {
            name,
            price,
            category,
            region,
            stock,
        } => create_product(name, price, category, region, stock, ctx),
        ProductCommand::Options { id, file } => set_options(&id, &file, ctx),
        ProductCommand::Quote {
            id,
            option,
            quantity,
            local,
        } => quote(&id, option.as_deref(), quantity, local, ctx).await,
        ProductCommand::Delete { id, yes } => delete_product(&id, yes, ctx),
    }
}

/// Find a product by id or slug, locally or through the listing service.
async fn lookup(id: &str, local: bool, ctx: &Context) -> Result<ProductRecord> {
    if local {
        let store = ctx.open_store()?;
        return Ok(ProductService::new(&store).find(id)?);
    }

    let spinner = ctx.output.spinner("Fetching products...");
    let records = ctx.catalog_client().list_products(&ProductQuery::new()).await;
    spinner.finish_and_clear();
    debug!(id, ok = records.is_ok(), "product lookup fetched");

    records
        .context("Failed to load products")?
        .into_iter()
        .find(|r| r.id.as_str() == id || r.slug == id)
        .with_context(|| format!("Product not found: {}", id))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductReport {
    card: ProductCard,
    options: Vec<OptionView>,
}

async fn show_product(id: &str, local: bool, ctx: &Context) -> Result<()> {
    let record = lookup(id, local, ctx).await?;
    let card = normalize(&record, ctx.pipeline().images());
    let options: Vec<OptionView> = detail_options(&record).into_iter().map(OptionView::new).collect();

    if ctx.output.is_json() {
        ctx.output.json(&ProductReport { card, options });
        return Ok(());
    }

    let out = &ctx.output;
    out.header(&card.name);
    out.kv("ID", card.id.as_str());
    out.kv("Category", if card.category.is_empty() { "-" } else { card.category.as_str() });
    match card.original_price {
        Some(original) => out.kv(
            "Price",
            &format!("{} (was {})", format_price(card.price), format_price(original)),
        ),
        None => out.kv("Price", &format_price(card.price)),
    }
    out.kv("Rating", &format_rating(card.rating));
    out.kv("Image", &card.image);
    if card.is_best_seller {
        out.kv("Badge", "Best seller");
    }

    if options.is_empty() {
        return Ok(());
    }

    out.header("Options");
    for view in &options {
        let opt = &view.option;
        let mut line = format!("{}  {}  {}", opt.id, opt.display_label, format_price(opt.price));
        if view.savings_percent > 0 {
            line.push_str(&format!("  -{}%", view.savings_percent));
        }
        if let Some(badge) = &view.pack_badge {
            line.push_str(&format!("  [{}]", badge));
        }
        line.push_str(&format!("  {}", stock_badge(&view.stock_status)));
        out.list_item(&line);
    }

    Ok(())
}

fn create_product(
    name: String,
    price: f64,
    category: String,
    region: Option<String>,
    stock: Option<i64>,
    ctx: &Context,
) -> Result<()> {
    let store = ctx.open_store()?;
    let mut record = ProductRecord::new(name, price, category);
    record.region = region;
    record.stock = stock;

    let created = ProductService::new(&store).create(record)?;
    ctx.save_store(&store)?;

    info!(id = %created.id, slug = %created.slug, "product created");

    if ctx.output.is_json() {
        ctx.output.json(&created);
    } else {
        ctx.output
            .success(&format!("Created {} ({})", created.name, created.id));
        ctx.output.kv("Slug", &created.slug);
    }
    Ok(())
}

fn set_options(id: &str, file: &str, ctx: &Context) -> Result<()> {
    let content = std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file))?;
    let options: Vec<QuantityOption> =
        serde_json::from_str(&content).with_context(|| format!("Failed to parse options in {}", file))?;

    let store = ctx.open_store()?;
    let updated = ProductService::new(&store).set_quantity_options(id, options)?;
    ctx.save_store(&store)?;
    info!(id, options = updated.options().len(), "quantity options replaced");

    if ctx.output.is_json() {
        ctx.output.json(&updated);
    } else {
        ctx.output.success(&format!(
            "{} now has {} quantity option(s)",
            updated.name,
            updated.options().len()
        ));
    }
    Ok(())
}

async fn quote(id: &str, option: Option<&str>, quantity: i64, local: bool, ctx: &Context) -> Result<()> {
    let record = lookup(id, local, ctx).await?;

    let mut cart = Cart::default();
    cart.add_product(&record, option, quantity)?;
    let subtotal = cart.subtotal()?;
    info!(id, option, quantity, subtotal = %subtotal.display(), "quote priced");

    if ctx.output.is_json() {
        ctx.output.json(&cart);
        return Ok(());
    }

    ctx.output.header("Quote");
    for item in &cart.items {
        let label = item.option_label.as_deref().unwrap_or("-");
        ctx.output.list_item(&format!(
            "{} ({}) x {} @ {} = {}",
            item.product_name,
            label,
            item.quantity,
            item.unit_price.display(),
            item.total_price.display()
        ));
    }
    ctx.output.kv("Subtotal", &subtotal.display());
    Ok(())
}

fn delete_product(id: &str, yes: bool, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let service = ProductService::new(&store);
    let product = service.get(id)?;

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete product '{}'?", product.name))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Deletion cancelled");
            return Ok(());
        }
    }

    let deleted = service.delete(id)?;
    ctx.save_store(&store)?;
    info!(id, "product deleted");

    if ctx.output.is_json() {
        ctx.output.json(&deleted);
    } else {
        ctx.output.success(&format!("Deleted {}", deleted.name));
    }
    Ok(())
}
