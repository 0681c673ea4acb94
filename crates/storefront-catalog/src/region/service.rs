//! Region administration over the document store.

use crate::error::CatalogError;
use crate::region::model::{Region, RegionPayload};
use chrono::Utc;
use storefront_store::Store;
use tracing::{debug, info};

/// Store collection holding region documents.
pub const REGIONS: &str = "regions";

/// Region CRUD with name and slug uniqueness.
pub struct RegionService<'a> {
    store: &'a Store,
}

impl<'a> RegionService<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Every region, active or not, sorted by name.
    pub fn list_all(&self) -> Result<Vec<Region>, CatalogError> {
        let mut regions: Vec<Region> = self.store.list(REGIONS)?;
        regions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(regions)
    }

    /// Active regions sorted by name.
    pub fn list_active(&self) -> Result<Vec<Region>, CatalogError> {
        let regions: Vec<Region> = self.list_all()?.into_iter().filter(|r| r.active).collect();
        debug!(count = regions.len(), "listed active regions");
        Ok(regions)
    }

    /// Look up a region by id.
    pub fn get(&self, id: &str) -> Result<Region, CatalogError> {
        self.store
            .get(REGIONS, id)?
            .ok_or_else(|| CatalogError::RegionNotFound(id.to_string()))
    }

    /// Look up an active region by slug.
    pub fn find_by_slug(&self, slug: &str) -> Result<Region, CatalogError> {
        self.list_active()?
            .into_iter()
            .find(|r| r.slug == slug)
            .ok_or_else(|| CatalogError::RegionNotFound(slug.to_string()))
    }

    /// Create a region.
    ///
    /// The name is required and must not collide case-insensitively with an
    /// existing region; the slug (given or derived) must be unused.
    pub fn create(&self, payload: RegionPayload) -> Result<Region, CatalogError> {
        match payload.name.as_deref() {
            None | Some("") => return Err(CatalogError::MissingField("name")),
            Some(name) if name.trim().is_empty() => {
                return Err(CatalogError::ValidationError("Name cannot be empty".to_string()))
            }
            Some(_) => {}
        }
        let payload = payload.trimmed();
        let name = payload.name.clone().unwrap_or_default();

        let existing = self.list_all()?;
        if existing.iter().any(|r| r.name.to_lowercase() == name.to_lowercase()) {
            return Err(CatalogError::DuplicateRegion {
                field: "name",
                value: name,
            });
        }

        let mut region = Region::new(&name);
        region.apply(&payload);
        self.ensure_slug_free(&existing, &region)?;

        self.store.put(REGIONS, region.id.as_str(), &region)?;
        info!(id = %region.id, name = %region.name, slug = %region.slug, "region created");
        Ok(region)
    }

    /// Apply an update. PUT and PATCH share these semantics.
    pub fn update(&self, id: &str, payload: RegionPayload) -> Result<Region, CatalogError> {
        let payload = payload.trimmed();
        let mut region = self.get(id)?;

        if payload.name.as_deref() == Some("") {
            return Err(CatalogError::ValidationError("Name cannot be empty".to_string()));
        }

        region.apply(&payload);
        region.updated_at = Some(Utc::now());

        let others: Vec<Region> = self
            .list_all()?
            .into_iter()
            .filter(|r| r.id != region.id)
            .collect();
        if others
            .iter()
            .any(|r| r.name.to_lowercase() == region.name.to_lowercase())
        {
            return Err(CatalogError::DuplicateRegion {
                field: "name",
                value: region.name,
            });
        }
        self.ensure_slug_free(&others, &region)?;

        self.store.put(REGIONS, region.id.as_str(), &region)?;
        info!(id = %region.id, "region updated");
        Ok(region)
    }

    /// Delete a region, returning the removed document.
    pub fn delete(&self, id: &str) -> Result<Region, CatalogError> {
        let region = self.get(id)?;
        self.store.delete(REGIONS, id)?;
        info!(id = %region.id, name = %region.name, "region deleted");
        Ok(region)
    }

    fn ensure_slug_free(&self, others: &[Region], region: &Region) -> Result<(), CatalogError> {
        if others.iter().any(|r| r.id != region.id && r.slug == region.slug) {
            return Err(CatalogError::DuplicateRegion {
                field: "slug",
                value: region.slug.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(store: &Store) -> RegionService<'_> {
        RegionService::new(store)
    }

    #[test]
    fn test_create_and_list_sorted() {
        let store = Store::in_memory();
        let regions = service(&store);
        regions.create(RegionPayload::named("Nilgiris")).unwrap();
        regions.create(RegionPayload::named("Kutch")).unwrap();

        let names: Vec<_> = regions.list_active().unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Kutch", "Nilgiris"]);
    }

    #[test]
    fn test_create_requires_name() {
        let store = Store::in_memory();
        let err = service(&store).create(RegionPayload::default()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingField("name")));

        let err = service(&store).create(RegionPayload::named("   ")).unwrap_err();
        assert!(matches!(err, CatalogError::ValidationError(_)));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_duplicate_name_case_insensitive() {
        let store = Store::in_memory();
        let regions = service(&store);
        regions.create(RegionPayload::named("Kutch")).unwrap();

        let err = regions.create(RegionPayload::named(" kUTCH ")).unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    #[test]
    fn test_duplicate_slug() {
        let store = Store::in_memory();
        let regions = service(&store);
        regions.create(RegionPayload::named("North East")).unwrap();

        let err = regions.create(RegionPayload::named("North-East")).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateRegion { field: "slug", .. }));
    }

    #[test]
    fn test_inactive_hidden_from_listing() {
        let store = Store::in_memory();
        let regions = service(&store);
        let region = regions.create(RegionPayload::named("Ladakh")).unwrap();
        regions
            .update(
                region.id.as_str(),
                RegionPayload {
                    active: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(regions.list_active().unwrap().is_empty());
        assert_eq!(regions.list_all().unwrap().len(), 1);
        assert!(regions.find_by_slug("ladakh").is_err());
    }

    #[test]
    fn test_update_unknown_is_not_found() {
        let store = Store::in_memory();
        let err = service(&store)
            .update("missing", RegionPayload::named("X"))
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_update_trims_fields() {
        let store = Store::in_memory();
        let regions = service(&store);
        let region = regions.create(RegionPayload::named("Coorg")).unwrap();

        let updated = regions
            .update(
                region.id.as_str(),
                RegionPayload {
                    description: Some("  Coffee country ".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.description.as_deref(), Some("Coffee country"));
        assert_eq!(regions.get(region.id.as_str()).unwrap(), updated);
    }

    #[test]
    fn test_delete_returns_document() {
        let store = Store::in_memory();
        let regions = service(&store);
        let region = regions.create(RegionPayload::named("Assam")).unwrap();

        let deleted = regions.delete(region.id.as_str()).unwrap();
        assert_eq!(deleted.name, "Assam");
        assert_eq!(regions.delete(region.id.as_str()).unwrap_err().status_code(), 404);
    }

    #[test]
    fn test_find_by_slug() {
        let store = Store::in_memory();
        let regions = service(&store);
        regions.create(RegionPayload::named("Western Ghats")).unwrap();
        assert_eq!(regions.find_by_slug("western-ghats").unwrap().name, "Western Ghats");
    }
}
