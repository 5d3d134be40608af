//! Search sinks
//!
//! Where a search pushes its matches, and how a consumer tells it to stop.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender};

use crate::error::{CatalogError, Result};
use crate::filter::Filter;
use crate::model::Laptop;

use super::LaptopStore;

/// Receives search results one at a time
///
/// `send` is synchronous: the store does not evaluate the next record until
/// it returns, so a slow sink slows the scan instead of growing a buffer.
pub trait LaptopSink {
    /// Accept one matching laptop
    fn send(&mut self, laptop: Laptop) -> Result<()>;

    /// Checked by the store before every delivery
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> LaptopSink for F
where
    F: FnMut(Laptop) -> Result<()>,
{
    fn send(&mut self, laptop: Laptop) -> Result<()> {
        self(laptop)
    }
}

/// Shared stop flag
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Forwards matches into a bounded channel
struct ChannelSink {
    tx: Sender<Laptop>,
    cancel: CancelToken,
}

impl LaptopSink for ChannelSink {
    fn send(&mut self, laptop: Laptop) -> Result<()> {
        // Receiver gone means the consumer walked away: stop, don't fail.
        if self.tx.send(laptop).is_err() {
            self.cancel.cancel();
        }
        Ok(())
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Search results as a blocking iterator
///
/// The scan runs on a producer thread feeding a bounded channel, so at most
/// `capacity` matches are ever waiting. Dropping the stream cancels the scan.
pub struct SearchStream {
    rx: Option<Receiver<Laptop>>,
    cancel: CancelToken,
    producer: Option<JoinHandle<Result<usize>>>,
}

impl SearchStream {
    /// Start searching `store` on a background thread
    pub fn spawn(store: Arc<dyn LaptopStore>, filter: Filter, capacity: usize) -> Result<Self> {
        let (tx, rx) = channel::bounded(capacity.max(1));
        let cancel = CancelToken::new();

        let mut sink = ChannelSink {
            tx,
            cancel: cancel.clone(),
        };
        let producer = thread::Builder::new()
            .name("pcbook-search".to_string())
            .spawn(move || store.search(&filter, &mut sink))?;

        Ok(Self {
            rx: Some(rx),
            cancel,
            producer: Some(producer),
        })
    }

    /// Stop the scan; matches already received stay received
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Drain nothing further and wait for the producer
    ///
    /// Returns the number of matches the producer delivered.
    pub fn finish(mut self) -> Result<usize> {
        self.join()
    }

    fn join(&mut self) -> Result<usize> {
        // Dropping the receiver unblocks a producer waiting on a full channel.
        self.rx = None;
        match self.producer.take() {
            Some(handle) => handle.join().map_err(|_| {
                CatalogError::Io(io::Error::new(
                    io::ErrorKind::Other,
                    "search producer panicked",
                ))
            })?,
            None => Ok(0),
        }
    }
}

impl Iterator for SearchStream {
    type Item = Laptop;

    fn next(&mut self) -> Option<Self::Item> {
        self.rx.as_ref()?.recv().ok()
    }
}

impl Drop for SearchStream {
    fn drop(&mut self) {
        self.cancel.cancel();
        let _ = self.join();
    }
}
