//! Connection Handler
//!
//! Handles individual client connections.

use std::io::{BufReader, BufWriter};
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use crate::engine::Engine;
use crate::error::{Result, VarError};
use crate::protocol::{read_request, write_reply, Reply, Request};

/// Handles a single client connection
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Reference to the store engine
    engine: Arc<Engine>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    ///
    /// Sets up buffered I/O and configures the stream
    pub fn new(stream: TcpStream, engine: Arc<Engine>) -> Result<Self> {
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
            engine,
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
    /// Reads requests in a loop and sends replies.
    /// Returns when the client disconnects or an error occurs.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("connection established from {}", self.peer_addr);

        loop {
            // Read next request
            let request = match read_request(&mut self.reader) {
                Ok(request) => request,
                Err(VarError::Io(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    tracing::debug!("client {} disconnected", self.peer_addr);
                    return Ok(());
                }
                Err(VarError::Io(ref e)) if e.kind() == std::io::ErrorKind::ConnectionReset => {
                    tracing::debug!("connection reset by client {}", self.peer_addr);
                    return Ok(());
                }
                Err(VarError::Io(ref e)) if e.kind() == std::io::ErrorKind::ConnectionAborted => {
                    tracing::debug!("connection aborted by client {}", self.peer_addr);
                    return Ok(());
                }
                Err(VarError::Io(ref e)) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    tracing::debug!("read timeout for client {}", self.peer_addr);
                    return Ok(());
                }
                Err(VarError::Io(ref e)) if e.kind() == std::io::ErrorKind::TimedOut => {
                    // Windows reports TimedOut instead of WouldBlock
                    tracing::debug!("read timeout for client {}", self.peer_addr);
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!("error reading from {}: {}", self.peer_addr, e);
                    let _ = self.send_reply(Reply::error(&e.to_string()));
                    return Err(e);
                }
            };

            tracing::trace!("received request from {}: {:?}", self.peer_addr, request);

            // Execute request
            let reply = self.execute_request(request);

            // Send reply
            if let Err(e) = self.send_reply(reply) {
                // If the client disconnected before the reply could be sent,
                // log and exit gracefully rather than treating it as a
                // server error.
                if let VarError::Io(ref io_err) = e {
                    match io_err.kind() {
                        std::io::ErrorKind::ConnectionAborted
                        | std::io::ErrorKind::ConnectionReset
                        | std::io::ErrorKind::BrokenPipe => {
                            tracing::debug!(
                                "client {} disconnected before reply could be sent: {}",
                                self.peer_addr,
                                e
                            );
                            return Ok(());
                        }
                        _ => {}
                    }
                }
                tracing::warn!("error writing to {}: {}", self.peer_addr, e);
                return Err(e);
            }
        }
    }

    /// Execute a request and build the reply
    ///
    /// Every engine error (invalid argument, transaction conflict, journal
    /// failure) becomes an ERROR reply; "NO COMMANDS" is an OK reply.
    fn execute_request(&self, request: Request) -> Reply {
        match self.engine.execute(request) {
            Ok(text) => Reply::ok(text),
            Err(e) => Reply::error(&e.to_string()),
        }
    }

    /// Send a reply to the client
    fn send_reply(&mut self, reply: Reply) -> Result<()> {
        write_reply(&mut self.writer, &reply)?;
        Ok(())
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
