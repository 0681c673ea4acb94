//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    let out = &ctx.output;
    let config = &ctx.config;
    out.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => out.kv("file", &path.display().to_string()),
        None => out.kv("file", "(defaults)"),
    }

    out.info("");
    out.info("[api]");
    out.kv("base_url", &config.api.base_url);
    out.kv("timeout_secs", &config.api.timeout_secs.to_string());
    out.kv("https_page", &config.api.https_page.to_string());
    if config.api.token.is_some() {
        out.kv("token", "********");
    }

    out.info("");
    out.info("[store]");
    out.kv("path", &ctx.store_path().display().to_string());

    out.info("");
    out.info("[catalog]");
    out.kv("narrow_page_size", &config.catalog.narrow_page_size.to_string());
    out.kv("wide_page_size", &config.catalog.wide_page_size.to_string());
    out.kv("viewport_breakpoint", &config.catalog.viewport_breakpoint.to_string());
    let range = config.catalog.price_range();
    out.kv("default_price_range", &format!("{} - {}", range.min, range.max));
    out.kv("quantity_labels", &config.catalog.quantity_labels.join(", "));

    out.info("");
    out.info("[log]");
    out.kv("format", &config.log.format);

    if !config.environments.is_empty() {
        out.info("");
        out.info("Environments:");
        let mut names: Vec<&String> = config.environments.keys().collect();
        names.sort();
        for name in names {
            out.list_item(name);
        }
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = ctx.config.validate();

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");
    Ok(())
}
