//! CLI execution context.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use storefront_catalog::catalog::ImageResolver;
use storefront_catalog::search::CatalogPipeline;
use storefront_data::CatalogClient;
use storefront_observability::{LogFormat, RequestId};
use storefront_store::Store;
use tracing::{debug, Span};

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration (environment overrides applied).
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Correlation id for this run.
    pub request_id: RequestId,
    /// Environment whose overrides were applied.
    pub environment: Option<String>,
    /// Working directory.
    pub cwd: PathBuf,
    /// Config file in use, if any was found.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from a config file.
    pub fn load(config_path: Option<&str>, env: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve_against(&cwd, path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config_file(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        let config = match env {
            Some(env) => config.for_environment(env),
            None => config,
        };

        Ok(Self {
            config,
            output,
            request_id: RequestId::generate(),
            environment: env.map(str::to_string),
            cwd,
            config_path,
        })
    }

    /// Log format for this run; `--json` forces JSON logs.
    pub fn log_format(&self) -> LogFormat {
        log_format(&self.config, self.output.is_json())
    }

    /// Root tracing span for `command`.
    pub fn command_span(&self, command: &str) -> Span {
        storefront_observability::command_span(command, &self.request_id, self.environment.as_deref())
    }

    /// Directory relative paths in the config are resolved against.
    pub fn config_dir(&self) -> PathBuf {
        self.config_path
            .as_ref()
            .and_then(|p| p.parent())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Path of the admin store snapshot.
    pub fn store_path(&self) -> PathBuf {
        resolve_against(&self.config_dir(), &self.config.store.path)
    }

    /// Open the admin store from its snapshot (empty when absent).
    pub fn open_store(&self) -> Result<Store> {
        let path = self.store_path();
        self.output.debug(&format!("Loading store from {}", path.display()));
        let store =
            Store::load_snapshot(&path).with_context(|| format!("Failed to load store: {}", path.display()))?;
        debug!(path = %path.display(), "store opened");
        Ok(store)
    }

    /// Persist the admin store.
    pub fn save_store(&self, store: &Store) -> Result<()> {
        let path = self.store_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        store
            .save_snapshot(&path)
            .with_context(|| format!("Failed to save store: {}", path.display()))?;
        debug!(path = %path.display(), "store saved");
        Ok(())
    }

    /// Client for the product-listing service.
    pub fn catalog_client(&self) -> CatalogClient {
        let api = &self.config.api;
        let client = CatalogClient::new(api.base_url.clone())
            .with_timeout(Duration::from_secs(api.timeout_secs));
        match &api.token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        }
    }

    /// Browse pipeline configured for this environment.
    pub fn pipeline(&self) -> CatalogPipeline {
        let images = ImageResolver::new(self.config.api.base_url.clone(), self.config.api.https_page);
        CatalogPipeline::new(images, self.config.catalog.page_sizes())
    }
}

fn log_format(config: &CliConfig, json_output: bool) -> LogFormat {
    if json_output {
        LogFormat::Json
    } else {
        config.log.log_format()
    }
}

/// Find a config file in the directory tree above `start`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

fn resolve_against(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
