//! CLI configuration.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_observability::LogFormat;
use storefront_catalog::search::{
    PageSizes, PriceRange, DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE, NARROW_PAGE_SIZE, QUANTITY_LABELS,
    VIEWPORT_BREAKPOINT, WIDE_PAGE_SIZE,
};

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Product-listing service.
    #[serde(default)]
    pub api: ApiConfig,

    /// Local admin document store.
    #[serde(default)]
    pub store: StoreConfig,

    /// Browse view settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub log: LogConfig,

    /// Environment-specific overrides.
    #[serde(default)]
    pub environments: HashMap<String, EnvironmentConfig>,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Config with an environment's overrides applied.
    pub fn for_environment(&self, env: &str) -> CliConfig {
        let mut config = self.clone();

        if let Some(env_config) = self.environments.get(env) {
            if let Some(ref api) = env_config.api {
                config.api = api.clone();
            }
            if let Some(ref store) = env_config.store {
                config.store = store.clone();
            }
        }

        config
    }

    /// Problems that make the config unusable, then suspicious settings.
    pub fn validate(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let base = self.api.base_url.trim();
        if base.is_empty() {
            errors.push("api.base_url is required".to_string());
        } else if !(base.starts_with("http://") || base.starts_with("https://")) {
            errors.push(format!("api.base_url '{}' must start with http:// or https://", base));
        }
        if self.api.timeout_secs == 0 {
            errors.push("api.timeout_secs must be greater than 0".to_string());
        }

        if self.catalog.narrow_page_size == 0 || self.catalog.wide_page_size == 0 {
            errors.push("catalog page sizes must be greater than 0".to_string());
        }
        let [min, max] = self.catalog.default_price_range;
        if min < 0.0 || max < min {
            errors.push("catalog.default_price_range must be [min, max] with 0 <= min <= max".to_string());
        }
        if !self.catalog.quantity_labels.iter().any(|l| l == "All") {
            warnings.push("catalog.quantity_labels should include \"All\"".to_string());
        }

        if LogFormat::from_str(&self.log.format).is_none() {
            errors.push(format!("log.format '{}' must be \"human\" or \"json\"", self.log.format));
        }

        if self.store.path.trim().is_empty() {
            errors.push("store.path is required".to_string());
        }

        for (name, env) in &self.environments {
            if env.api.is_none() && env.store.is_none() {
                warnings.push(format!("environments.{} overrides nothing", name));
            }
        }

        (errors, warnings)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

/// Product-listing service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the service; also used to resolve `/uploads` images.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Bearer token sent with every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Whether the storefront page is served over https.
    #[serde(default)]
    pub https_page: bool,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            token: None,
            https_page: false,
        }
    }
}

/// Admin document store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON snapshot file, relative to the config file's directory.
    #[serde(default = "default_store_path")]
    pub path: String,
}

fn default_store_path() -> String {
    ".storefront/store.json".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Browse view settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_narrow_page_size")]
    pub narrow_page_size: usize,

    #[serde(default = "default_wide_page_size")]
    pub wide_page_size: usize,

    /// Viewport widths below this use the narrow page size.
    #[serde(default = "default_viewport_breakpoint")]
    pub viewport_breakpoint: u32,

    #[serde(default = "default_price_range")]
    pub default_price_range: [f64; 2],

    /// Quantity filter chips.
    #[serde(default = "default_quantity_labels")]
    pub quantity_labels: Vec<String>,
}

fn default_narrow_page_size() -> usize {
    NARROW_PAGE_SIZE
}

fn default_wide_page_size() -> usize {
    WIDE_PAGE_SIZE
}

fn default_viewport_breakpoint() -> u32 {
    VIEWPORT_BREAKPOINT
}

fn default_price_range() -> [f64; 2] {
    [DEFAULT_MIN_PRICE, DEFAULT_MAX_PRICE]
}

fn default_quantity_labels() -> Vec<String> {
    QUANTITY_LABELS.iter().map(|s| s.to_string()).collect()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            narrow_page_size: default_narrow_page_size(),
            wide_page_size: default_wide_page_size(),
            viewport_breakpoint: default_viewport_breakpoint(),
            default_price_range: default_price_range(),
            quantity_labels: default_quantity_labels(),
        }
    }
}

impl CatalogConfig {
    pub fn page_sizes(&self) -> PageSizes {
        PageSizes {
            narrow: self.narrow_page_size,
            wide: self.wide_page_size,
            breakpoint: self.viewport_breakpoint,
        }
    }

    pub fn price_range(&self) -> PriceRange {
        let [min, max] = self.default_price_range;
        PriceRange::new(min, max)
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// "human" or "json".
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_format() -> String {
    "human".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
        }
    }
}

impl LogConfig {
    /// Configured format; unknown names fall back to human output.
    pub fn log_format(&self) -> LogFormat {
        LogFormat::from_str(&self.format).unwrap_or_default()
    }
}

/// Environment-specific configuration overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreConfig>,
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    r#"# Storefront catalog configuration

[api]
base_url = "http://localhost:5000"
timeout_secs = 10
https_page = false

[store]
path = ".storefront/store.json"

[catalog]
narrow_page_size = 8
wide_page_size = 16
viewport_breakpoint = 768
default_price_range = [0.0, 5000.0]
quantity_labels = ["All", "80g", "100g", "25g", "300ml", "600ml", "1L"]

[log]
format = "human"

[environments.staging.api]
base_url = "https://staging.example.com"
https_page = true

[environments.production.api]
base_url = "https://shop.example.com"
https_page = true
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.catalog, CatalogConfig::default());
        assert_eq!(config.environments.len(), 2);

        let (errors, warnings) = config.validate();
        assert!(errors.is_empty(), "{:?}", errors);
        assert!(warnings.is_empty(), "{:?}", warnings);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.catalog.page_sizes(), PageSizes::default());
        assert_eq!(config.catalog.price_range(), PriceRange::new(0.0, 5000.0));
    }

    #[test]
    fn test_for_environment() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        let staging = config.for_environment("staging");
        assert_eq!(staging.api.base_url, "https://staging.example.com");
        assert!(staging.api.https_page);
        assert_eq!(staging.store, config.store);

        let unknown = config.for_environment("qa");
        assert_eq!(unknown.api, config.api);
    }

    #[test]
    fn test_validate_errors() {
        let mut config = CliConfig::default();
        config.api.base_url = "localhost".to_string();
        config.catalog.wide_page_size = 0;
        config.catalog.default_price_range = [100.0, 50.0];
        config.log.format = "xml".to_string();

        let (errors, _) = config.validate();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_validate_warnings() {
        let mut config = CliConfig::default();
        config.catalog.quantity_labels = vec!["100g".to_string()];
        config
            .environments
            .insert("empty".to_string(), EnvironmentConfig::default());

        let (errors, warnings) = config.validate();
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_save_and_load_roundtrip_json() {
        let dir = std::env::temp_dir().join(format!("storefront-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("storefront.json");

        let mut config = CliConfig::default();
        config.api.token = Some("secret".to_string());
        config.save(&path).unwrap();

        assert_eq!(CliConfig::load(&path).unwrap(), config);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
