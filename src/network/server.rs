//! TCP Server
//!
//! Accepts connections and dispatches each to a handler thread.

use std::net::TcpListener;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::engine::Engine;
use crate::error::{Result, VarError};
use super::Connection;

/// How long the acceptor sleeps between polls when idle
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// TCP server for varstore
pub struct Server {
    config: Config,
    engine: Arc<Engine>,
    shutdown: Arc<AtomicBool>,
    active: Arc<AtomicUsize>,
}

impl Server {
    /// Create a new server with the given config and engine
    pub fn new(config: Config, engine: Arc<Engine>) -> Self {
        Self {
            config,
            engine,
            shutdown: Arc::new(AtomicBool::new(false)),
            active: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle that flips the server into shutdown when stored `true`
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Number of currently active connections
    pub fn active_connections(&self) -> usize {
        self.active.load(Ordering::Relaxed)
    }

    /// Start the server (blocking)
    ///
    /// Accepts connections until the shutdown flag is set. Each connection
    /// is served on its own thread; new connections past the configured
    /// limit are rejected.
    pub fn run(&mut self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.listen_addr).map_err(|e| {
            VarError::Network(format!("bind {}: {}", self.config.listen_addr, e))
        })?;

        // Non-blocking accept so the loop can observe the shutdown flag
        listener.set_nonblocking(true)?;

        tracing::info!("listening on {}", self.config.listen_addr);

        loop {
            if self.shutdown.load(Ordering::Relaxed) {
                break;
            }

            match listener.accept() {
                Ok((stream, peer)) => {
                    if self.active.load(Ordering::Relaxed) >= self.config.max_connections {
                        tracing::warn!("connection limit reached, rejecting {}", peer);
                        drop(stream);
                        continue;
                    }

                    // Accepted sockets inherit non-blocking mode on some
                    // platforms; the handler needs blocking reads.
                    stream.set_nonblocking(false)?;

                    self.active.fetch_add(1, Ordering::SeqCst);
                    let engine = Arc::clone(&self.engine);
                    let active = Arc::clone(&self.active);
                    let read_ms = self.config.read_timeout_ms;
                    let write_ms = self.config.write_timeout_ms;

                    thread::spawn(move || {
                        match Connection::new(stream, engine) {
                            Ok(mut connection) => {
                                if let Err(e) = connection.set_timeouts(read_ms, write_ms) {
                                    tracing::warn!("failed to set timeouts: {}", e);
                                }
                                if let Err(e) = connection.handle() {
                                    tracing::warn!(
                                        "connection {} ended with error: {}",
                                        connection.peer_addr(),
                                        e
                                    );
                                }
                            }
                            Err(e) => {
                                tracing::warn!("failed to set up connection: {}", e);
                            }
                        }
                        active.fetch_sub(1, Ordering::SeqCst);
                    });
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                }
                Err(e) => return Err(VarError::Io(e)),
            }
        }

        tracing::info!("server shut down");
        Ok(())
    }
}
