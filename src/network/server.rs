//! TCP Server
//!
//! Accepts connections and serves each on its own thread.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::protocol::{write_response, Response};
use crate::service::LaptopService;
use crate::store::CancelToken;

use super::Connection;

/// How long the acceptor sleeps when no connection is pending
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Handles to every accepted socket, so shutdown can unblock their readers
type LiveConnections = Arc<Mutex<HashMap<u64, TcpStream>>>;

/// TCP server for the laptop catalog
///
/// ## Threads:
/// - The thread calling `run()` accepts connections
/// - Every accepted connection gets its own thread, up to
///   `max_connections`; clients beyond that are told "server busy"
pub struct Server {
    config: Config,
    service: Arc<LaptopService>,
    listener: Option<TcpListener>,
    shutdown: CancelToken,
    live: LiveConnections,
}

impl Server {
    /// Create a new server with the given config and service
    pub fn new(config: Config, service: Arc<LaptopService>) -> Self {
        Self {
            config,
            service,
            listener: None,
            shutdown: CancelToken::new(),
            live: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Bind the listen address without serving yet
    ///
    /// Returns the bound address; useful with port 0.
    pub fn bind(&mut self) -> Result<SocketAddr> {
        let listener = TcpListener::bind(&self.config.listen_addr).map_err(|e| {
            CatalogError::Network(format!("failed to bind {}: {}", self.config.listen_addr, e))
        })?;
        let addr = listener.local_addr()?;
        self.listener = Some(listener);
        Ok(addr)
    }

    /// Address the server is bound to, once bound
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    /// Start the server (blocking until shutdown)
    pub fn run(&mut self) -> Result<()> {
        self.config.validate()?;

        if self.listener.is_none() {
            self.bind()?;
        }
        let listener = match self.listener.take() {
            Some(listener) => listener,
            None => return Err(CatalogError::Network("listener not bound".to_string())),
        };
        listener.set_nonblocking(true)?;

        tracing::info!("Listening on {}", listener.local_addr()?);

        let mut handlers: Vec<JoinHandle<()>> = Vec::new();
        let mut next_conn_id: u64 = 0;
        while !self.shutdown.is_cancelled() {
            match listener.accept() {
                Ok((stream, peer)) => {
                    // Accepted sockets may inherit the listener's non-blocking mode.
                    stream.set_nonblocking(false)?;
                    handlers.retain(|handle| !handle.is_finished());

                    let conn_id = next_conn_id;
                    {
                        let mut live = self.live.lock();
                        if live.len() >= self.config.max_connections {
                            drop(live);
                            tracing::warn!("Rejecting {}: connection limit reached", peer);
                            reject(stream);
                            continue;
                        }
                        live.insert(conn_id, stream.try_clone()?);
                    }
                    next_conn_id += 1;

                    tracing::debug!("Accepted {} as connection {}", peer, conn_id);
                    match self.spawn_handler(conn_id, stream) {
                        Ok(handle) => handlers.push(handle),
                        Err(e) => {
                            tracing::error!("Failed to start connection {}: {}", conn_id, e);
                            self.live.lock().remove(&conn_id);
                        }
                    }
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                }
                Err(e) => {
                    tracing::warn!("Accept failed: {}", e);
                }
            }
        }

        tracing::info!("Shutting down, closing {} connections", self.live.lock().len());

        for stream in self.live.lock().values() {
            let _ = stream.shutdown(Shutdown::Both);
        }
        for handle in handlers {
            if handle.join().is_err() {
                tracing::error!("Connection thread panicked");
            }
        }

        tracing::info!("Catalog holds {} laptops", self.service.laptop_count());
        Ok(())
    }

    /// Signal the server to shutdown gracefully
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Token that shuts the server down from another thread
    pub fn shutdown_handle(&self) -> CancelToken {
        self.shutdown.clone()
    }

    fn spawn_handler(&self, conn_id: u64, stream: TcpStream) -> Result<JoinHandle<()>> {
        let handler = Handler {
            conn_id,
            service: Arc::clone(&self.service),
            shutdown: self.shutdown.clone(),
            live: Arc::clone(&self.live),
            read_timeout_ms: self.config.read_timeout_ms,
            write_timeout_ms: self.config.write_timeout_ms,
        };
        thread::Builder::new()
            .name(format!("pcbook-conn-{}", conn_id))
            .spawn(move || handler.run(stream))
            .map_err(CatalogError::from)
    }
}

/// Serves one connection on its own thread
struct Handler {
    conn_id: u64,
    service: Arc<LaptopService>,
    shutdown: CancelToken,
    live: LiveConnections,
    read_timeout_ms: u64,
    write_timeout_ms: u64,
}

impl Handler {
    fn run(self, stream: TcpStream) {
        if let Err(e) = self.serve(stream) {
            tracing::debug!("Connection {} ended with error: {}", self.conn_id, e);
        }
        // Frees the slot for the next client.
        self.live.lock().remove(&self.conn_id);
    }

    fn serve(&self, stream: TcpStream) -> Result<()> {
        let mut connection =
            Connection::new(stream, Arc::clone(&self.service), self.shutdown.clone())?;
        connection.set_timeouts(self.read_timeout_ms, self.write_timeout_ms)?;
        let result = connection.handle();
        tracing::debug!("Connection {} from {} closed", self.conn_id, connection.peer_addr());
        result
    }
}

/// Tell an over-limit client why it is being dropped
fn reject(mut stream: TcpStream) {
    let _ = write_response(&mut stream, &Response::error("server busy"));
    let _ = stream.shutdown(Shutdown::Both);
}
