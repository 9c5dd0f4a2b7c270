//! CommandLog implementation
//!
//! A growable vector of commands plus the cursor, both behind one RwLock so
//! they can never disagree.

use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::RwLock;

use crate::error::{Result, VarError};
use super::{Command, CommandKind, HistoryCursor};

struct LogInner {
    commands: Vec<Command>,
    cursor: HistoryCursor,
}

/// The linear undo/redo timeline
pub struct CommandLog {
    inner: RwLock<LogInner>,
}

impl CommandLog {
    /// Create a new empty log
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(LogInner {
                commands: Vec::new(),
                cursor: HistoryCursor::empty(),
            }),
        }
    }

    /// Record a new command at `current + 1`
    ///
    /// If the cursor was rewound (`current < max`), every command past
    /// `current` is deleted first — the redo branch is permanently
    /// discarded. Afterwards `current == max == new index`.
    pub fn append(
        &self,
        kind: CommandKind,
        name: &str,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Command {
        let mut inner = self.inner.write();

        if inner.cursor.current < inner.cursor.max {
            let keep = (inner.cursor.current + 1) as usize;
            inner.commands.truncate(keep);
        }

        let index = inner.cursor.current + 1;
        let command = Command {
            index,
            kind,
            name: name.to_string(),
            old_value,
            new_value,
            timestamp: unix_millis(),
        };

        inner.commands.push(command.clone());
        inner.cursor.current = index;
        inner.cursor.max = index;

        command
    }

    /// Point lookup by timeline index
    pub fn at(&self, index: i64) -> Option<Command> {
        if index < 0 {
            return None;
        }
        self.inner.read().commands.get(index as usize).cloned()
    }

    /// Current read of the cursor state
    pub fn cursor(&self) -> HistoryCursor {
        self.inner.read().cursor
    }

    /// Step the cursor back by one (after a successful undo)
    pub fn rewind(&self) {
        let mut inner = self.inner.write();
        if inner.cursor.current >= 0 {
            inner.cursor.current -= 1;
        }
    }

    /// Step the cursor forward by one (after a successful redo)
    ///
    /// Fails with `CursorOutOfRange` when there is nothing recorded past
    /// `current`; callers check `cursor().has_redo()` first.
    pub fn advance(&self) -> Result<()> {
        let mut inner = self.inner.write();
        if inner.cursor.current >= inner.cursor.max {
            return Err(VarError::CursorOutOfRange);
        }
        inner.cursor.current += 1;
        Ok(())
    }

    /// Delete all commands and reset the cursor to `(-1, -1)`
    pub fn reset(&self) {
        let mut inner = self.inner.write();
        inner.commands.clear();
        inner.cursor = HistoryCursor::empty();
    }

    /// Number of recorded commands (applied or redo-able)
    pub fn len(&self) -> usize {
        self.inner.read().commands.len()
    }

    /// Whether the timeline holds no commands
    pub fn is_empty(&self) -> bool {
        self.inner.read().commands.is_empty()
    }
}

impl Default for CommandLog {
    fn default() -> Self {
        Self::new()
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
