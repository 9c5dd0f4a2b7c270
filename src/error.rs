//! Error types for varstore
//!
//! Provides a unified error type for all operations.
//!
//! Note: an undo/redo with nothing to undo/redo is NOT an error; the engine
//! models empty history as `Ok(None)`.

use thiserror::Error;

/// Result type alias using VarError
pub type Result<T> = std::result::Result<T, VarError>;

/// Unified error type for varstore operations
#[derive(Debug, Error)]
pub enum VarError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Request Validation Errors
    // -------------------------------------------------------------------------
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // -------------------------------------------------------------------------
    // Transaction Errors
    // -------------------------------------------------------------------------
    #[error("transaction conflict: {0}")]
    TransactionConflict(String),

    // -------------------------------------------------------------------------
    // History Errors
    // -------------------------------------------------------------------------
    #[error("history cursor out of range")]
    CursorOutOfRange,

    // -------------------------------------------------------------------------
    // Journal Errors
    // -------------------------------------------------------------------------
    #[error("journal corruption detected: {0}")]
    JournalCorruption(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("network error: {0}")]
    Network(String),

    #[error("protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("configuration error: {0}")]
    Config(String),
}
