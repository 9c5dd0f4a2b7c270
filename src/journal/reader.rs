//! Journal Reader
//!
//! Handles reading entries back from the journal file.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Result, VarError};
use super::{JournalEntry, HEADER_SIZE, MAX_ENTRY_SIZE};

/// Reads entries sequentially from the journal file
pub struct JournalReader {
    reader: BufReader<File>,
    position: u64,
}

impl JournalReader {
    /// Open a journal file for reading
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            reader: BufReader::new(file),
            position: 0,
        })
    }

    /// Read the next entry
    ///
    /// Returns `Ok(None)` at a clean end of file. A torn header, torn
    /// payload, checksum mismatch, or undecodable payload surfaces as
    /// `JournalCorruption`; `position()` still marks the end of the last
    /// valid entry so recovery can truncate there.
    pub fn next_entry(&mut self) -> Result<Option<JournalEntry>> {
        let mut header = [0u8; HEADER_SIZE];
        let mut filled = 0;
        while filled < HEADER_SIZE {
            let n = self.reader.read(&mut header[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }

        if filled == 0 {
            return Ok(None); // clean EOF
        }
        if filled < HEADER_SIZE {
            return Err(VarError::JournalCorruption(format!(
                "torn frame header: expected {} bytes, got {}",
                HEADER_SIZE, filled
            )));
        }

        let crc = u32::from_be_bytes([header[0], header[1], header[2], header[3]]);
        let len = u32::from_be_bytes([header[4], header[5], header[6], header[7]]);

        if len > MAX_ENTRY_SIZE {
            return Err(VarError::JournalCorruption(format!(
                "frame length {} exceeds maximum {}",
                len, MAX_ENTRY_SIZE
            )));
        }

        let mut payload = vec![0u8; len as usize];
        self.reader.read_exact(&mut payload).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                VarError::JournalCorruption("torn frame payload".to_string())
            } else {
                VarError::Io(e)
            }
        })?;

        if crc32fast::hash(&payload) != crc {
            return Err(VarError::JournalCorruption(
                "checksum mismatch".to_string(),
            ));
        }

        let entry = JournalEntry::decode(&payload)
            .map_err(|e| VarError::JournalCorruption(format!("undecodable payload: {}", e)))?;

        self.position += (HEADER_SIZE + len as usize) as u64;
        Ok(Some(entry))
    }

    /// Byte offset just past the last successfully read entry
    pub fn position(&self) -> u64 {
        self.position
    }
}
