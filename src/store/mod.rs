//! Store Module
//!
//! In-memory laptop table and the streaming search contract.
//!
//! ## Responsibilities
//! - Enforce id uniqueness under concurrent saves
//! - Copy records on the way in and on the way out
//! - Stream filtered results through a sink, one at a time
//!
//! ## Data Structure Choice
//! A single `RwLock<HashMap<String, Arc<Laptop>>>`:
//! - Per-id operations take the write lock, so check-then-act is atomic
//! - Stored records are immutable `Arc`s; update swaps the handle, so a
//!   reader never sees a half-written record
//! - Search snapshots the handles under the read lock and evaluates
//!   outside it, so a slow consumer never blocks writers

mod in_memory;
mod sink;

pub use in_memory::InMemoryLaptopStore;
pub use sink::{CancelToken, LaptopSink, SearchStream};

use crate::error::Result;
use crate::filter::Filter;
use crate::model::Laptop;

/// Storage contract used by the service layer
///
/// Absence is an error for `update`/`delete` but a plain `None` for `find`.
pub trait LaptopStore: Send + Sync {
    /// Insert a copy of `laptop`; `AlreadyExists` if the id is taken
    fn save(&self, laptop: &Laptop) -> Result<()>;

    /// Copy of the laptop with `id`, if any
    fn find(&self, id: &str) -> Option<Laptop>;

    /// Replace the laptop with the same id; `NotFound` if absent
    fn update(&self, laptop: &Laptop) -> Result<()>;

    /// Remove the laptop with `id`; `NotFound` if absent
    fn delete(&self, id: &str) -> Result<()>;

    /// Remove every laptop matching `filter`, returning how many went
    fn delete_by_filter(&self, filter: &Filter) -> usize;

    /// Remove the listed ids that exist, returning how many went
    fn delete_by_ids(&self, ids: &[String]) -> usize;

    /// Push a copy of every matching laptop into `sink`
    ///
    /// Returns the number delivered. Stops early once the sink reports
    /// cancellation; a sink error ends the scan and is returned as is.
    fn search(&self, filter: &Filter, sink: &mut dyn LaptopSink) -> Result<usize>;

    /// Number of live laptops
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
