//! Region documents and admin payloads.

use crate::catalog::decode::{truthy, Fields};
use crate::ids::RegionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A sourcing region products can be browsed by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    #[serde(rename = "_id", alias = "id")]
    pub id: RegionId,
    /// Display name, unique case-insensitively.
    pub name: String,
    /// URL slug, unique.
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl Region {
    /// Create an active region with a slug derived from the name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let now = Utc::now();
        Self {
            id: RegionId::generate(),
            slug: slugify(&name),
            name,
            description: None,
            active: true,
            image_url: None,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Apply a payload's present fields.
    ///
    /// An empty slug is re-derived from the (possibly new) name.
    pub fn apply(&mut self, payload: &RegionPayload) {
        if let Some(name) = &payload.name {
            self.name = name.clone();
        }
        if let Some(description) = &payload.description {
            self.description = Some(description.clone()).filter(|d| !d.is_empty());
        }
        if let Some(active) = payload.active {
            self.active = active;
        }
        if let Some(image_url) = &payload.image_url {
            self.image_url = Some(image_url.clone()).filter(|u| !u.is_empty());
        }
        match &payload.slug {
            Some(slug) if !slug.is_empty() => self.slug = slug.clone(),
            _ if self.slug.is_empty() => self.slug = slugify(&self.name),
            Some(_) => self.slug = slugify(&self.name),
            None => {}
        }
    }
}

/// URL slug: lower-case, runs of anything outside `[a-z0-9]` become one
/// `-`, no leading or trailing `-`.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }

    out
}

/// Fields an admin create or update may set.
///
/// Absent fields are left untouched. Strings are trimmed; `active` is
/// coerced to a boolean.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl RegionPayload {
    /// Payload setting only the name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Normalize a request body.
    pub fn from_value(body: &Value) -> Self {
        let f = Fields::new(body);
        let text = |key: &str| -> Option<String> {
            let map = body.as_object()?;
            let value = map.get(key)?;
            Some(match value {
                Value::String(s) => s.trim().to_string(),
                Value::Null | Value::Bool(false) => String::new(),
                other => other.to_string().trim().to_string(),
            })
        };

        Self {
            name: f.get(&["name"]).and_then(|_| text("name")),
            slug: text("slug"),
            description: text("description"),
            active: body
                .as_object()
                .and_then(|m| m.get("active"))
                .map(truthy),
            image_url: text("imageUrl").or_else(|| text("image_url")),
        }
    }

    /// Trim every string field.
    pub fn trimmed(mut self) -> Self {
        for field in [
            &mut self.name,
            &mut self.slug,
            &mut self.description,
            &mut self.image_url,
        ] {
            if let Some(s) = field {
                *s = s.trim().to_string();
            }
        }
        self
    }
}

impl<'de> Deserialize<'de> for RegionPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("North East"), "north-east");
        assert_eq!(slugify("  --Kerala & Tamil Nadu!  "), "kerala-tamil-nadu");
        assert_eq!(slugify("Himachal"), "himachal");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_new_region_defaults() {
        let region = Region::new("North East");
        assert_eq!(region.slug, "north-east");
        assert!(region.active);
        assert!(region.created_at.is_some());
    }

    #[test]
    fn test_payload_from_body() {
        let payload = RegionPayload::from_value(&json!({
            "name": "  Kashmir ",
            "description": null,
            "active": 0,
            "imageUrl": " /uploads/k.jpg "
        }));
        assert_eq!(payload.name.as_deref(), Some("Kashmir"));
        assert_eq!(payload.description.as_deref(), Some(""));
        assert_eq!(payload.active, Some(false));
        assert_eq!(payload.image_url.as_deref(), Some("/uploads/k.jpg"));
        assert_eq!(payload.slug, None);
    }

    #[test]
    fn test_apply_empty_slug_rederives() {
        let mut region = Region::new("North");
        region.apply(&RegionPayload {
            name: Some("Far North".into()),
            slug: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(region.slug, "far-north");
    }

    #[test]
    fn test_apply_keeps_absent_fields() {
        let mut region = Region::new("North");
        region.description = Some("Hills".into());
        region.apply(&RegionPayload {
            active: Some(false),
            ..Default::default()
        });
        assert_eq!(region.description.as_deref(), Some("Hills"));
        assert_eq!(region.slug, "north");
        assert!(!region.active);
    }

    #[test]
    fn test_region_decodes_server_document() {
        let region: Region = serde_json::from_value(json!({
            "_id": "65f0",
            "name": "Kutch",
            "slug": "kutch",
            "createdAt": "2024-01-02T03:04:05.000Z",
            "__v": 0
        }))
        .unwrap();
        assert!(region.active);
        assert_eq!(region.id.as_str(), "65f0");
        assert!(region.created_at.is_some());
    }
}
