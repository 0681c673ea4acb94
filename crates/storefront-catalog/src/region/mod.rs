//! Regions products are sourced from, and their administration.

mod model;
mod service;

pub use model::{slugify, Region, RegionPayload};
pub use service::{RegionService, REGIONS};
