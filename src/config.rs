//! Configuration for varstore
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a varstore instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for the journal file. `None` runs the store
    /// memory-only with no durability.
    /// Internal structure:
    ///   {data_dir}/
    ///     └── journal.log      (append-only operation journal)
    pub data_dir: Option<PathBuf>,

    // -------------------------------------------------------------------------
    // Journal Configuration
    // -------------------------------------------------------------------------
    /// Sync strategy: how often to fsync the journal
    pub journal_sync_strategy: JournalSyncStrategy,

    // -------------------------------------------------------------------------
    // Transaction Configuration
    // -------------------------------------------------------------------------
    /// How long a single write-gate acquisition attempt may wait (milliseconds)
    pub txn_lock_timeout_ms: u64,

    /// How many acquisition attempts before surfacing a transaction conflict
    pub txn_retry_limit: u32,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address
    pub listen_addr: String,

    /// Max concurrent client connections
    pub max_connections: usize,

    /// Connection read timeout (milliseconds)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds)
    pub write_timeout_ms: u64,
}

/// Journal sync strategy
#[derive(Debug, Clone, Copy)]
pub enum JournalSyncStrategy {
    /// fsync after every write (safest; entries are tiny, so the default)
    EveryWrite,

    /// fsync after N unsynced entries (balanced durability/performance)
    EveryNEntries { count: usize },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            journal_sync_strategy: JournalSyncStrategy::EveryWrite,
            txn_lock_timeout_ms: 50,
            txn_retry_limit: 3,
            listen_addr: "127.0.0.1:4117".to_string(),
            max_connections: 1024,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (enables the durable journal)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = Some(path.into());
        self
    }

    /// Set the journal sync strategy
    pub fn journal_sync_strategy(mut self, strategy: JournalSyncStrategy) -> Self {
        self.config.journal_sync_strategy = strategy;
        self
    }

    /// Set the per-attempt write-gate wait (in milliseconds)
    pub fn txn_lock_timeout_ms(mut self, ms: u64) -> Self {
        self.config.txn_lock_timeout_ms = ms;
        self
    }

    /// Set the number of write-gate acquisition attempts
    pub fn txn_retry_limit(mut self, attempts: u32) -> Self {
        self.config.txn_retry_limit = attempts;
        self
    }

    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the maximum number of concurrent connections
    pub fn max_connections(mut self, count: usize) -> Self {
        self.config.max_connections = count;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
