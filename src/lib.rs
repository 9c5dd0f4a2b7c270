//! # varstore
//!
//! A transactional variable store with:
//! - Named string variables (set/get/unset)
//! - Linear undo/redo over every mutation
//! - O(1) "how many variables hold value V" via a reference-counting index
//! - Optional append-only journal for durability across restarts
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │                  (Multiple Clients)                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │              Transaction Coordinator (Engine)                │
//! │         (write gate: one mutation at a time)                 │
//! └───────┬──────────────────┬──────────────────┬───────────────┘
//!         │                  │                  │
//!         ▼                  ▼                  ▼
//!  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//!  │  Variable   │    │    Value    │    │   Command   │
//!  │   Table     │    │    Index    │    │     Log     │
//!  └─────────────┘    └─────────────┘    └──────┬──────┘
//!                                               │
//!                                               ▼
//!                                        ┌─────────────┐
//!                                        │   Journal   │
//!                                        │  (Append)   │
//!                                        └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod table;
pub mod index;
pub mod history;
pub mod journal;
pub mod network;
pub mod protocol;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, VarError};
pub use config::Config;
pub use engine::{Binding, Engine};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of varstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
