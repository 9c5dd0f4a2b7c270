//! Command History Module
//!
//! Append-only, truncatable sequence of recorded mutations with a movable
//! cursor — the linear undo/redo timeline.
//!
//! ## Responsibilities
//! - Record every committed SET/UNSET with enough context to reverse it
//! - Track the cursor pair `(current, max)`: `current` is the last applied
//!   command, `max` the last recorded one; both start at −1
//! - Discard the redo branch when a new command is recorded after a rewind
//!   (one linear timeline, no branching)

mod log;

pub use log::CommandLog;

/// Kind of a recorded mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Set,
    Unset,
}

/// An immutable record of one past mutation
///
/// Created only by [`CommandLog::append`], deleted only by truncation or a
/// full reset.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    /// Position in the timeline, 0-based
    pub index: i64,

    /// SET or UNSET
    pub kind: CommandKind,

    /// The variable the mutation touched
    pub name: String,

    /// Value before the mutation; `None` if the variable did not exist
    pub old_value: Option<String>,

    /// Value after the mutation; `None` for UNSET
    pub new_value: Option<String>,

    /// Unix millis when the command was recorded
    pub timestamp: u64,
}

/// The `(current, max)` pointer pair over the timeline
///
/// Invariant: `-1 <= current <= max`, and commands exist for exactly the
/// indices `0..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryCursor {
    /// Index of the last applied command, −1 if none
    pub current: i64,

    /// Index of the last recorded command, −1 if none
    pub max: i64,
}

impl HistoryCursor {
    /// Cursor of an empty timeline
    pub fn empty() -> Self {
        Self {
            current: -1,
            max: -1,
        }
    }

    /// Whether there is a command to undo
    pub fn has_undo(&self) -> bool {
        self.current >= 0
    }

    /// Whether there is a command to redo
    pub fn has_redo(&self) -> bool {
        self.current < self.max
    }
}
