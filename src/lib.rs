//! # PCBook
//!
//! An in-memory laptop catalog service with:
//! - Unique-id record store safe under concurrent access
//! - Copy-in/copy-out isolation of every record
//! - Filtered search streamed to the caller one record at a time
//! - TCP-based client protocol
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │              (One thread per connection)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   LaptopService                              │
//! │          (id assignment/validation, logging)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Store    │─────────▶│   Filter    │
//!   │  (RwLock)   │ per rec  │  (matches)  │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod model;
pub mod filter;
pub mod store;
pub mod service;
pub mod protocol;
pub mod network;
pub mod client;
pub mod sample;
pub mod serializer;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CatalogError, Result};
pub use config::Config;
pub use filter::Filter;
pub use model::{Laptop, Memory, MemoryUnit};
pub use service::LaptopService;
pub use store::{InMemoryLaptopStore, LaptopStore};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of PCBook
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
