//! Journal Module
//!
//! Optional durability through append-only logging of committed operations.
//!
//! ## Responsibilities
//! - Append one entry per committed logical operation (set/unset/undo/redo)
//! - CRC32 checksums for corruption detection
//! - Log Sequence Numbers (LSN) for ordering
//! - Crash recovery: replay the valid prefix, truncate a torn tail
//!
//! Only committed operations are journaled; an undo/redo that resolves to
//! "NO COMMANDS" writes nothing, and a reset truncates the file.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Entry 1                                 │
//! │ ┌─────────┬─────────┬────────────────┐  │
//! │ │ CRC (4) │ Len (4) │ Data (bincode) │  │
//! │ └─────────┴─────────┴────────────────┘  │
//! ├─────────────────────────────────────────┤
//! │ Entry 2                                 │
//! │ ┌─────────┬─────────┬────────────────┐  │
//! │ │ CRC (4) │ Len (4) │ Data (bincode) │  │
//! │ └─────────┴─────────┴────────────────┘  │
//! └─────────────────────────────────────────┘
//! ```

mod entry;
mod writer;
mod reader;
mod recovery;

pub use entry::{JournalEntry, Op, HEADER_SIZE, MAX_ENTRY_SIZE};
pub use writer::JournalWriter;
pub use reader::JournalReader;
pub use recovery::{JournalRecovery, RecoveryResult};
