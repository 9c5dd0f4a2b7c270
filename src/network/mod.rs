//! Network Module
//!
//! TCP server and client connection handling.
//!
//! ## Architecture
//! - Single acceptor loop with a shutdown flag
//! - One handler thread per connection, bounded by the connection limit
//! - Requests routed through the Engine

mod server;
mod connection;

pub use server::Server;
pub use connection::Connection;
