//! Fetch generations for the product list.
//!
//! Every fetch takes a ticket. Only the ticket of the latest generation may
//! publish its result; a slower, older fetch finishing later is dropped.

use crate::FetchError;
use storefront_catalog::catalog::ProductRecord;
use tracing::{debug, info, warn};

/// Proof of which generation a fetch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The product list shown to the browse view.
#[derive(Debug, Clone, Default)]
pub struct ProductFeed {
    generation: u64,
    records: Vec<ProductRecord>,
    loading: bool,
    notice: Option<String>,
}

impl ProductFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch, superseding any fetch in flight.
    pub fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        debug!(generation = self.generation, "fetch started");
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Start a fetch because the catalog changed (e.g. a product was created).
    pub fn refetch(&mut self) -> FetchTicket {
        info!(generation = self.generation + 1, "catalog changed, refetching");
        self.begin()
    }

    /// Whether `ticket` belongs to the latest generation.
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Publish a fetch result. Returns `false` when the ticket is stale.
    ///
    /// A failed fetch publishes an empty list and records a notice for the
    /// user.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<Vec<ProductRecord>, FetchError>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "dropping superseded fetch"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(records) => {
                self.records = records;
                self.notice = None;
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch products");
                self.records = Vec::new();
                self.notice = Some(e.notice());
            }
        }
        true
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// User-visible message from the last failed fetch.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Clear the notice once shown.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
