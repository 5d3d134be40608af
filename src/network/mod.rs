//! Network Module
//!
//! TCP server and client handling.
//!
//! ## Architecture
//! - Single acceptor thread
//! - One thread per connection, capped by `max_connections`
//! - Commands routed through LaptopService

mod server;
mod connection;

pub use server::Server;
pub use connection::{peer_connected, Connection};
