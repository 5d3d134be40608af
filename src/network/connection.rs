//! Connection Handler
//!
//! Handles individual client connections.

use std::cell::Cell;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{CatalogError, Result};
use crate::filter::Filter;
use crate::model::Laptop;
use crate::protocol::{read_command, write_response, Command, Response};
use crate::service::LaptopService;
use crate::store::{CancelToken, LaptopSink};

/// Handles a single client connection
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Request handlers
    service: Arc<LaptopService>,

    /// Set when the server is shutting down
    shutdown: CancelToken,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    pub fn new(
        stream: TcpStream,
        service: Arc<LaptopService>,
        shutdown: CancelToken,
    ) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            service,
            shutdown,
            peer_addr,
        })
    }

    /// Configure connection timeouts
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        let read_stream = self.reader.get_ref();
        let write_stream = self.writer.get_ref();

        if read_ms > 0 {
            read_stream.set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            write_stream.set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }

        Ok(())
    }

    /// Handle the connection (blocking until closed)
    ///
    /// Reads commands in a loop and sends responses.
    /// Returns when the client disconnects, the server shuts down, or an
    /// error occurs.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        loop {
            if self.shutdown.is_cancelled() {
                tracing::debug!("Closing {} for shutdown", self.peer_addr);
                return Ok(());
            }

            // Read next command
            let command = match read_command(&mut self.reader) {
                Ok(cmd) => cmd,
                Err(CatalogError::Io(ref e)) if is_disconnect(e.kind()) => {
                    tracing::debug!("Client {} disconnected ({:?})", self.peer_addr, e.kind());
                    return Ok(());
                }
                Err(CatalogError::Io(ref e))
                    if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) =>
                {
                    // Windows reports TimedOut instead of WouldBlock
                    tracing::debug!("Read timeout for client {}", self.peer_addr);
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                    // Send error response if possible
                    let _ = self.send_response(Response::error(&e.to_string()));
                    return Err(e);
                }
            };

            tracing::trace!("Received {:?} from {}", command.command_type(), self.peer_addr);

            let result = match command {
                Command::Search { filter } => self.stream_search(&filter),
                other => {
                    let response = self.execute_command(other);
                    self.send_response(response)
                }
            };

            if let Err(e) = result {
                // If the client disconnected before we could send the response
                // (e.g. connection abort/reset/broken pipe), log and exit gracefully
                // rather than treating it as a server error.
                if let CatalogError::Io(ref io_err) = e {
                    if is_disconnect(io_err.kind()) {
                        tracing::debug!(
                            "Client {} disconnected before response could be sent: {}",
                            self.peer_addr,
                            e
                        );
                        return Ok(());
                    }
                }
                tracing::warn!("Error writing to {}: {}", self.peer_addr, e);
                return Err(e);
            }
        }
    }

    /// Execute a non-streaming command and return a response
    fn execute_command(&self, command: Command) -> Response {
        let outcome = match command {
            Command::Create { laptop } => {
                self.service.create_laptop(laptop).map(|id| Response::id(&id))
            }
            Command::Find { id } => match self.service.find_laptop(&id) {
                Ok(Some(laptop)) => Response::laptop(&laptop),
                Ok(None) => Ok(Response::not_found()),
                Err(e) => Err(e),
            },
            Command::Update { laptop } => {
                self.service.update_laptop(laptop).map(|id| Response::id(&id))
            }
            Command::Delete { id } => {
                self.service.delete_laptop(&id).map(|()| Response::ok(None))
            }
            Command::DeleteByFilter { filter } => self
                .service
                .delete_by_filter(&filter)
                .map(|deleted| Response::count(deleted as u64)),
            Command::DeleteByIds { ids } => self
                .service
                .delete_by_ids(&ids)
                .map(|deleted| Response::count(deleted as u64)),
            Command::Ping => Ok(Response::ok(Some(b"PONG".to_vec()))),
            Command::Search { .. } => Err(CatalogError::Protocol(
                "SEARCH must be streamed".to_string(),
            )),
        };

        outcome.unwrap_or_else(|e| Response::from_error(&e))
    }

    /// Run a search, writing each match as its own ITEM frame
    ///
    /// A failed write aborts the scan; the error comes back from here.
    /// A client found gone mid-scan gets nothing more. Service-level
    /// failures (bad filter, shutdown) are reported to the client instead.
    fn stream_search(&mut self, filter: &Filter) -> Result<()> {
        let mut sink = FrameSink::new(&mut self.writer, self.reader.get_ref(), &self.shutdown);

        let outcome = self.service.search_laptop(filter, &mut sink);
        if sink.peer_gone() {
            tracing::debug!("Client {} left during search", self.peer_addr);
            return Ok(());
        }

        let response = match outcome {
            Ok(found) if !self.shutdown.is_cancelled() => Response::count(found as u64),
            Ok(_) => Response::from_error(&CatalogError::Cancelled),
            Err(CatalogError::Io(e)) => return Err(CatalogError::Io(e)),
            Err(e) => Response::from_error(&e),
        };

        self.send_response(response)
    }

    /// Send a response to the client
    fn send_response(&mut self, response: Response) -> Result<()> {
        write_response(&mut self.writer, &response)?;
        Ok(())
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

/// Records scanned between two checks that the client is still there
const LIVENESS_CHECK_INTERVAL: u32 = 256;

/// Search sink writing straight onto the socket
///
/// Each frame is flushed before the next record is evaluated, so TCP flow
/// control paces the scan. A selective search may write nothing for a long
/// stretch, so the peer is also polled every `LIVENESS_CHECK_INTERVAL`
/// records.
struct FrameSink<'a> {
    writer: &'a mut BufWriter<TcpStream>,
    peer: &'a TcpStream,
    shutdown: &'a CancelToken,
    polls: Cell<u32>,
    gone: Cell<bool>,
}

impl<'a> FrameSink<'a> {
    fn new(
        writer: &'a mut BufWriter<TcpStream>,
        peer: &'a TcpStream,
        shutdown: &'a CancelToken,
    ) -> Self {
        Self {
            writer,
            peer,
            shutdown,
            polls: Cell::new(0),
            gone: Cell::new(false),
        }
    }

    fn peer_gone(&self) -> bool {
        self.gone.get()
    }
}

impl LaptopSink for FrameSink<'_> {
    fn send(&mut self, laptop: Laptop) -> Result<()> {
        tracing::trace!(id = %laptop.id, "found laptop");
        write_response(&mut *self.writer, &Response::item(&laptop)?)
    }

    fn is_cancelled(&self) -> bool {
        if self.shutdown.is_cancelled() || self.gone.get() {
            return true;
        }

        let polls = self.polls.get().wrapping_add(1);
        self.polls.set(polls);
        if polls % LIVENESS_CHECK_INTERVAL == 0 && !peer_connected(self.peer) {
            self.gone.set(true);
        }
        self.gone.get()
    }
}

/// Whether the other end of `stream` is still connected
///
/// Peeks without blocking: pending bytes or nothing to read mean the peer
/// is there, end-of-stream or a reset means it left. Only call this while
/// no read or write is in flight on another handle of the same socket,
/// since the non-blocking flag is shared between them.
pub fn peer_connected(stream: &TcpStream) -> bool {
    if stream.set_nonblocking(true).is_err() {
        return true;
    }

    let mut byte = [0u8; 1];
    let connected = match stream.peek(&mut byte) {
        Ok(0) => false,
        Ok(_) => true,
        Err(e) => matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::Interrupted),
    };

    // A socket stuck in non-blocking mode would break the blocking reader.
    if stream.set_nonblocking(false).is_err() {
        return false;
    }
    connected
}

fn is_disconnect(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::UnexpectedEof
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::BrokenPipe
    )
}
