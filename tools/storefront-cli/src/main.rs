//! Storefront CLI - browse and administer the storefront catalog.
//!
//! Commands:
//! - `storefront browse` - Filter, sort and page the product listing
//! - `storefront categories` - List category filter chips
//! - `storefront product` - Show, create and price products
//! - `storefront region` - Manage sourcing regions
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, warn, Instrument};

use commands::{BrowseArgs, CategoriesArgs, ConfigArgs, ProductArgs, RegionArgs};

/// Storefront CLI - browse and administer the storefront catalog
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Environment whose overrides to apply
    #[arg(short, long, global = true)]
    env: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product listing
    Browse(BrowseArgs),

    /// List category filters
    Categories(CategoriesArgs),

    /// Manage products
    Product(ProductArgs),

    /// Manage regions
    Region(RegionArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Browse(_) => "browse",
            Commands::Categories(_) => "categories",
            Commands::Product(_) => "product",
            Commands::Region(_) => "region",
            Commands::Config(_) => "config",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);
    let ctx = match context::Context::load(cli.config.as_deref(), cli.env.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };
    storefront_observability::init(ctx.log_format(), cli.verbose);

    let span = ctx.command_span(cli.command.name());
    let result = dispatch(cli.command, &ctx).instrument(span.clone()).await;

    if let Err(e) = result {
        span.in_scope(|| warn!(error = %format!("{:#}", e), "command failed"));
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

async fn dispatch(command: Commands, ctx: &context::Context) -> Result<()> {
    debug!("command started");

    let result = match command {
        Commands::Browse(args) => commands::browse::run(args, ctx).await,
        Commands::Categories(args) => commands::categories::run(args, ctx).await,
        Commands::Product(args) => commands::product::run(args, ctx).await,
        Commands::Region(args) => commands::region::run(args, ctx).await,
        Commands::Config(args) => commands::config::run(args, ctx).await,
    };

    debug!(ok = result.is_ok(), "command finished");
    result
}
