//! Journal Recovery
//!
//! Restores the valid prefix of a journal after a crash.

use std::fs::OpenOptions;
use std::path::Path;

use crate::error::{Result, VarError};
use super::{JournalEntry, JournalReader};

/// Handles journal recovery after a crash
pub struct JournalRecovery;

/// Result of a recovery operation
#[derive(Debug)]
pub struct RecoveryResult {
    /// Number of entries successfully recovered
    pub entries_recovered: u64,

    /// LSN of the last valid entry (0 when nothing was recovered)
    pub last_lsn: u64,

    /// Whether a torn or corrupt tail was truncated away
    pub was_truncated: bool,
}

impl JournalRecovery {
    /// Recover entries from a journal file
    ///
    /// Reads the valid prefix, stops at the first torn or corrupt frame,
    /// truncates the file to the valid prefix, and returns the entries in
    /// order.
    pub fn recover(path: &Path) -> Result<(Vec<JournalEntry>, RecoveryResult)> {
        let (entries, valid_len, was_truncated) = Self::scan(path)?;

        if was_truncated {
            let file = OpenOptions::new().write(true).open(path)?;
            file.set_len(valid_len)?;
            file.sync_all()?;
        }

        let result = RecoveryResult {
            entries_recovered: entries.len() as u64,
            last_lsn: entries.last().map(|e| e.lsn).unwrap_or(0),
            was_truncated,
        };

        Ok((entries, result))
    }

    /// Verify integrity of a journal file without modifying it
    pub fn verify(path: &Path) -> Result<RecoveryResult> {
        let (entries, _, was_truncated) = Self::scan(path)?;

        Ok(RecoveryResult {
            entries_recovered: entries.len() as u64,
            last_lsn: entries.last().map(|e| e.lsn).unwrap_or(0),
            was_truncated,
        })
    }

    /// Read the valid prefix; returns (entries, valid byte length, tail bad)
    fn scan(path: &Path) -> Result<(Vec<JournalEntry>, u64, bool)> {
        let mut reader = JournalReader::open(path)?;
        let mut entries = Vec::new();
        let mut tail_bad = false;

        loop {
            match reader.next_entry() {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => break,
                Err(VarError::JournalCorruption(reason)) => {
                    tracing::warn!(
                        "journal tail invalid at byte {}: {}",
                        reader.position(),
                        reason
                    );
                    tail_bad = true;
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        Ok((entries, reader.position(), tail_bad))
    }
}
