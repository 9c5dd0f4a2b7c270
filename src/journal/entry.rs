//! Journal entry definitions
//!
//! Defines the structure and framing of individual journal entries.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VarError};

/// Header size: 4 bytes CRC32 + 4 bytes payload length
pub const HEADER_SIZE: usize = 8;

/// Maximum serialized entry payload (1 MB — names and values are short)
pub const MAX_ENTRY_SIZE: u32 = 1024 * 1024;

/// A committed logical operation
///
/// Reset is not journaled; it truncates the file instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    /// Set a variable to a value
    Set { name: String, value: String },

    /// Remove a variable
    Unset { name: String },

    /// Reverse the command at the cursor
    Undo,

    /// Re-apply the command past the cursor
    Redo,
}

/// A single entry in the journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Log Sequence Number - monotonically increasing within the file
    pub lsn: u64,

    /// Timestamp (unix millis) when the entry was created
    pub timestamp: u64,

    /// The operation that committed
    pub op: Op,
}

impl JournalEntry {
    /// Create an entry stamped with the current time
    pub fn new(lsn: u64, op: Op) -> Self {
        Self {
            lsn,
            timestamp: unix_millis(),
            op,
        }
    }

    /// Serialize to the on-disk frame: CRC (4) + Len (4) + bincode payload
    pub fn encode(&self) -> Result<Vec<u8>> {
        let payload =
            bincode::serialize(self).map_err(|e| VarError::Serialization(e.to_string()))?;

        let crc = crc32fast::hash(&payload);

        let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());
        frame.extend_from_slice(&crc.to_be_bytes());
        frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        frame.extend_from_slice(&payload);

        Ok(frame)
    }

    /// Deserialize from a CRC-validated payload
    pub fn decode(payload: &[u8]) -> Result<Self> {
        bincode::deserialize(payload).map_err(|e| VarError::Serialization(e.to_string()))
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
