//! Journal Writer
//!
//! Handles appending entries to the journal file.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::JournalSyncStrategy;
use crate::error::Result;
use super::{JournalEntry, Op};

/// Appends entries to the journal file
pub struct JournalWriter {
    writer: BufWriter<File>,
    next_lsn: u64,
    sync_strategy: JournalSyncStrategy,
    unsynced: usize,
}

impl JournalWriter {
    /// Open or create a journal file for appending
    ///
    /// `next_lsn` continues the sequence found by recovery (0 for a fresh
    /// file).
    pub fn open(path: &Path, sync_strategy: JournalSyncStrategy, next_lsn: u64) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: BufWriter::new(file),
            next_lsn,
            sync_strategy,
            unsynced: 0,
        })
    }

    /// Append a committed operation; returns its LSN
    pub fn append(&mut self, op: Op) -> Result<u64> {
        let entry = JournalEntry::new(self.next_lsn, op);
        let frame = entry.encode()?;

        self.writer.write_all(&frame)?;
        self.next_lsn += 1;
        self.unsynced += 1;

        match self.sync_strategy {
            JournalSyncStrategy::EveryWrite => self.sync()?,
            JournalSyncStrategy::EveryNEntries { count } => {
                self.writer.flush()?;
                if self.unsynced >= count {
                    self.sync()?;
                }
            }
        }

        Ok(entry.lsn)
    }

    /// Force sync to disk
    pub fn sync(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.writer.get_ref().sync_all()?;
        self.unsynced = 0;
        Ok(())
    }

    /// Discard all entries (after a store reset)
    pub fn truncate(&mut self) -> Result<()> {
        self.writer.flush()?;
        let file = self.writer.get_ref();
        file.set_len(0)?;
        file.sync_all()?;
        self.next_lsn = 0;
        self.unsynced = 0;
        Ok(())
    }

    /// The LSN the next appended entry will receive
    pub fn next_lsn(&self) -> u64 {
        self.next_lsn
    }
}
