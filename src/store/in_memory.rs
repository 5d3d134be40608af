//! In-memory store implementation
//!
//! HashMap-based table with a parking_lot RwLock for concurrency.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{CatalogError, Result};
use crate::filter::{self, Filter};
use crate::model::Laptop;

use super::{LaptopSink, LaptopStore};

/// Thread-safe laptop table
///
/// ## Concurrency:
/// - `data`: RwLock (many concurrent readers, exclusive writer)
/// - Values are `Arc<Laptop>` and never mutated in place
/// - All methods use `&self`; share it behind an `Arc`
#[derive(Default)]
pub struct InMemoryLaptopStore {
    data: RwLock<HashMap<String, Arc<Laptop>>>,
}

impl InMemoryLaptopStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles to every stored laptop at this instant
    fn snapshot(&self) -> Vec<Arc<Laptop>> {
        self.data.read().values().cloned().collect()
    }
}

impl LaptopStore for InMemoryLaptopStore {
    fn save(&self, laptop: &Laptop) -> Result<()> {
        let mut data = self.data.write();

        if data.contains_key(&laptop.id) {
            return Err(CatalogError::AlreadyExists(laptop.id.clone()));
        }

        data.insert(laptop.id.clone(), Arc::new(laptop.clone()));
        Ok(())
    }

    fn find(&self, id: &str) -> Option<Laptop> {
        self.data.read().get(id).map(|stored| Laptop::clone(stored))
    }

    fn update(&self, laptop: &Laptop) -> Result<()> {
        let mut data = self.data.write();

        match data.get_mut(&laptop.id) {
            Some(stored) => {
                *stored = Arc::new(laptop.clone());
                Ok(())
            }
            None => Err(CatalogError::NotFound(laptop.id.clone())),
        }
    }

    fn delete(&self, id: &str) -> Result<()> {
        match self.data.write().remove(id) {
            Some(_) => Ok(()),
            None => Err(CatalogError::NotFound(id.to_string())),
        }
    }

    fn delete_by_filter(&self, filter: &Filter) -> usize {
        let mut data = self.data.write();

        let before = data.len();
        data.retain(|_, laptop| !filter::matches(filter, laptop));
        before - data.len()
    }

    fn delete_by_ids(&self, ids: &[String]) -> usize {
        let mut data = self.data.write();

        ids.iter()
            .filter(|id| data.remove(id.as_str()).is_some())
            .count()
    }

    fn search(&self, filter: &Filter, sink: &mut dyn LaptopSink) -> Result<usize> {
        // Lock is released before the first delivery; the scan is paced by
        // the sink, not by writers.
        let candidates = self.snapshot();
        let mut delivered = 0;

        for laptop in candidates {
            if sink.is_cancelled() {
                tracing::trace!(delivered, "search cancelled by consumer");
                break;
            }

            if filter::matches(filter, &laptop) {
                sink.send(Laptop::clone(&laptop))?;
                delivered += 1;
            }
        }

        Ok(delivered)
    }

    fn len(&self) -> usize {
        self.data.read().len()
    }
}
