//! Service Module
//!
//! The request layer between the transport and the store.
//!
//! ## Responsibilities
//! - Assign a fresh UUID to laptops created without one
//! - Reject ids and filters that are malformed before they reach the store
//! - Log every request
//!
//! The store accepts any string as an id; only this layer cares that ids
//! are UUIDs.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::filter::Filter;
use crate::model::Laptop;
use crate::store::{LaptopSink, LaptopStore, SearchStream};

/// Laptop catalog operations, as exposed to clients
pub struct LaptopService {
    store: Arc<dyn LaptopStore>,
    search_buffer: usize,
}

impl LaptopService {
    pub fn new(store: Arc<dyn LaptopStore>) -> Self {
        Self::with_config(store, &Config::default())
    }

    pub fn with_config(store: Arc<dyn LaptopStore>, config: &Config) -> Self {
        Self {
            store,
            search_buffer: config.search_buffer,
        }
    }

    /// Store a new laptop and return its id
    ///
    /// An empty id is replaced by a random UUID; any other id must parse as
    /// a UUID and is stored in canonical form.
    pub fn create_laptop(&self, mut laptop: Laptop) -> Result<String> {
        tracing::info!(id = %laptop.id, "create-laptop request");

        laptop.id = if laptop.id.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            parse_id(&laptop.id)?
        };

        self.store.save(&laptop)?;

        tracing::info!(id = %laptop.id, "saved laptop");
        Ok(laptop.id)
    }

    pub fn find_laptop(&self, id: &str) -> Result<Option<Laptop>> {
        tracing::debug!(id, "find-laptop request");

        let id = parse_id(id)?;
        Ok(self.store.find(&id))
    }

    /// Stream every laptop matching `filter` into `sink`
    pub fn search_laptop(&self, filter: &Filter, sink: &mut dyn LaptopSink) -> Result<usize> {
        tracing::info!(?filter, "search-laptop request");

        filter.validate()?;
        let found = self.store.search(filter, sink)?;

        tracing::info!(found, "search-laptop completed");
        Ok(found)
    }

    /// Same as `search_laptop`, consumed as an iterator on the caller's thread
    pub fn search_stream(&self, filter: Filter) -> Result<SearchStream> {
        filter.validate()?;
        SearchStream::spawn(Arc::clone(&self.store), filter, self.search_buffer)
    }

    /// Replace the laptop carrying the same id
    pub fn update_laptop(&self, mut laptop: Laptop) -> Result<String> {
        tracing::info!(id = %laptop.id, "update-laptop request");

        laptop.id = parse_id(&laptop.id)?;
        self.store.update(&laptop)?;

        tracing::info!(id = %laptop.id, "updated laptop");
        Ok(laptop.id)
    }

    pub fn delete_laptop(&self, id: &str) -> Result<()> {
        tracing::info!(id, "delete-laptop request");

        let id = parse_id(id)?;
        self.store.delete(&id)?;

        tracing::info!(id = %id, "deleted laptop");
        Ok(())
    }

    pub fn delete_by_filter(&self, filter: &Filter) -> Result<usize> {
        tracing::info!(?filter, "delete-by-filter request");

        filter.validate()?;
        let deleted = self.store.delete_by_filter(filter);

        tracing::info!(deleted, "delete-by-filter completed");
        Ok(deleted)
    }

    /// Delete a batch of ids
    ///
    /// All ids are checked first; one malformed id rejects the batch
    /// before anything is removed. Unknown ids are skipped.
    pub fn delete_by_ids(&self, ids: &[String]) -> Result<usize> {
        tracing::info!(count = ids.len(), "delete-by-ids request");

        let ids = ids
            .iter()
            .map(|id| parse_id(id))
            .collect::<Result<Vec<_>>>()?;
        let deleted = self.store.delete_by_ids(&ids);

        tracing::info!(deleted, "delete-by-ids completed");
        Ok(deleted)
    }

    /// Number of laptops currently stored
    pub fn laptop_count(&self) -> usize {
        self.store.len()
    }
}

/// Canonical (lowercase, hyphenated) form of a UUID id
fn parse_id(id: &str) -> Result<String> {
    Uuid::parse_str(id)
        .map(|uuid| uuid.to_string())
        .map_err(|e| CatalogError::Invalid(format!("invalid laptop ID {:?}: {}", id, e)))
}
