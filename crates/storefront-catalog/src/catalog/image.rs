//! Image reference resolution.

/// Served when a product has no usable image.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Resolves stored image references into URLs a browser can load.
///
/// Uploads are stored as relative `/uploads/...` paths and served by the
/// API host, so they get the API base prepended. A local API base is left
/// off when the page itself is served over https, since the browser would
/// block the mixed-content request anyway.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageResolver {
    api_base: String,
    https_page: bool,
}

impl ImageResolver {
    pub fn new(api_base: impl Into<String>, https_page: bool) -> Self {
        Self {
            api_base: api_base.into(),
            https_page,
        }
    }

    /// Resolver that leaves every reference unchanged except empty ones.
    pub fn passthrough() -> Self {
        Self::default()
    }

    fn is_local_base(&self) -> bool {
        self.api_base.contains("localhost") || self.api_base.contains("127.0.0.1")
    }

    /// Resolve one reference.
    pub fn resolve(&self, src: &str) -> String {
        if src.is_empty() {
            return PLACEHOLDER_IMAGE.to_string();
        }
        if src.starts_with("http") {
            return src.to_string();
        }

        let is_upload = src.starts_with("/uploads") || src.starts_with("uploads");
        if is_upload && !self.api_base.is_empty() && !(self.is_local_base() && self.https_page) {
            let base = self.api_base.strip_suffix('/').unwrap_or(&self.api_base);
            return if src.starts_with('/') {
                format!("{}{}", base, src)
            } else {
                format!("{}/{}", base, src)
            };
        }

        src.to_string()
    }
}
