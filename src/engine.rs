//! Engine Module
//!
//! The transaction coordinator: every public operation executes as one
//! atomic unit across the variable table, the value index, and the command
//! log.
//!
//! ## Responsibilities
//! - Validate arguments before any state change
//! - Serialize mutations so no partial application is ever observable
//! - Keep the value index an exact derived view of the variable table
//! - Drive the undo/redo state machine over the command log
//! - Journal committed operations and replay them on startup
//!
//! ## Concurrency Model
//!
//! - **Mutations** (set/unset/undo/redo/reset): serialized by a single
//!   write gate acquired with a bounded timed wait. Exhausting the retry
//!   budget surfaces `TransactionConflict`; the store is untouched.
//! - Under the gate the journal append runs first (the only fallible step);
//!   the in-memory mutations that follow cannot fail, so a mid-sequence
//!   failure leaves all three components exactly as they were.
//! - **Reads** (get/num_equal_to): single point reads through the
//!   component's own read lock, no gate.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};

use crate::config::Config;
use crate::error::{Result, VarError};
use crate::history::{Command, CommandKind, CommandLog, HistoryCursor};
use crate::index::ValueIndex;
use crate::journal::{JournalRecovery, JournalWriter, Op};
use crate::protocol::Request;
use crate::table::VariableTable;

/// The post-operation state of the variable an undo/redo touched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// The variable's name
    pub name: String,

    /// Its value after the operation, `None` if it no longer exists
    pub value: Option<String>,
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} = {}", self.name, value),
            None => write!(f, "{} = None", self.name),
        }
    }
}

/// The transactional variable store
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Name → value (internal RwLock)
    vars: VariableTable,

    /// Value → holder count, derived view of `vars` (internal RwLock)
    index: ValueIndex,

    /// Linear undo/redo timeline (internal RwLock)
    history: CommandLog,

    /// Durable operation journal, present when a data dir is configured
    journal: Option<Mutex<JournalWriter>>,

    /// Serializes mutations (set/unset/undo/redo/reset)
    write_gate: Mutex<()>,
}

impl Engine {
    const JOURNAL_FILENAME: &'static str = "journal.log";

    /// Open an engine with the given config
    ///
    /// With a data directory configured:
    /// 1. Create the directory if needed
    /// 2. Recover the journal (truncating a torn tail)
    /// 3. Replay recovered operations to rebuild table, index, and history
    /// 4. Continue appending where the journal left off
    pub fn open(config: Config) -> Result<Self> {
        let mut engine = Self {
            config,
            vars: VariableTable::new(),
            index: ValueIndex::new(),
            history: CommandLog::new(),
            journal: None,
            write_gate: Mutex::new(()),
        };

        if let Some(data_dir) = engine.config.data_dir.clone() {
            fs::create_dir_all(&data_dir)?;
            let journal_path = data_dir.join(Self::JOURNAL_FILENAME);

            let mut next_lsn = 0;
            if journal_path.exists() {
                let (entries, recovery) = JournalRecovery::recover(&journal_path)?;

                if recovery.entries_recovered > 0 || recovery.was_truncated {
                    tracing::info!(
                        "journal recovery: {} entries replayed, last_lsn={}, truncated={}",
                        recovery.entries_recovered,
                        recovery.last_lsn,
                        recovery.was_truncated
                    );
                }

                if recovery.entries_recovered > 0 {
                    next_lsn = recovery.last_lsn + 1;
                }

                for entry in entries {
                    engine.replay(&entry.op);
                }
            }

            let writer = JournalWriter::open(
                &journal_path,
                engine.config.journal_sync_strategy,
                next_lsn,
            )?;
            engine.journal = Some(Mutex::new(writer));
        }

        Ok(engine)
    }

    /// Open with a data directory (convenience method)
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_dir(path).build())
    }

    // =========================================================================
    // Public Operations
    // =========================================================================

    /// Set a variable to a value
    ///
    /// Steps (one atomic unit):
    /// 1. Read the old value (absent if new)
    /// 2. Decrement the index for the old value, increment for the new
    /// 3. Upsert the variable
    /// 4. Record a SET command
    pub fn set(&self, name: &str, value: &str) -> Result<()> {
        Self::require_non_empty("name", name)?;
        Self::require_non_empty("value", value)?;

        let _gate = self.lock_write()?;
        self.journal_append(Op::Set {
            name: name.to_string(),
            value: value.to_string(),
        })?;
        self.apply_set(name, value);
        Ok(())
    }

    /// Get a variable's current value
    ///
    /// Point read, no transaction.
    pub fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name)
    }

    /// Remove a variable
    ///
    /// An unset of an absent variable still records an UNSET command with
    /// no old value; undoing it is a no-op. This mirrors the idempotent
    /// unset policy of the reference behavior (see DESIGN.md).
    pub fn unset(&self, name: &str) -> Result<()> {
        Self::require_non_empty("name", name)?;

        let _gate = self.lock_write()?;
        self.journal_append(Op::Unset {
            name: name.to_string(),
        })?;
        self.apply_unset(name);
        Ok(())
    }

    /// How many variables currently hold `value`
    ///
    /// O(1) point read of the index, no transaction.
    pub fn num_equal_to(&self, value: &str) -> Result<u64> {
        Self::require_non_empty("value", value)?;
        Ok(self.index.query(value))
    }

    /// Reverse the last applied command
    ///
    /// Returns `Ok(None)` when there is nothing to undo — a defined result,
    /// not an error.
    pub fn undo(&self) -> Result<Option<Binding>> {
        let _gate = self.lock_write()?;

        if !self.history.cursor().has_undo() {
            return Ok(None);
        }

        self.journal_append(Op::Undo)?;
        Ok(self.apply_undo())
    }

    /// Re-apply the command past the cursor
    ///
    /// Returns `Ok(None)` when there is nothing to redo.
    pub fn redo(&self) -> Result<Option<Binding>> {
        let _gate = self.lock_write()?;

        if !self.history.cursor().has_redo() {
            return Ok(None);
        }

        self.journal_append(Op::Redo)?;
        self.apply_redo()
    }

    /// Clear all variables, counts, and history
    ///
    /// The journal is truncated first; if that fails the store is untouched.
    pub fn reset(&self) -> Result<()> {
        let _gate = self.lock_write()?;

        if let Some(journal) = &self.journal {
            journal.lock().truncate()?;
        }
        self.apply_reset();
        Ok(())
    }

    /// Execute a protocol request and render the reply text
    ///
    /// Response grammar: `"{name} = {value}"`, `"{name} = None"`,
    /// `"NO COMMANDS"`, a decimal count, `"CLEANED"`, or `"PONG"`;
    /// `get` renders the raw value or `"None"`.
    pub fn execute(&self, request: Request) -> Result<String> {
        match request {
            Request::Set { name, value } => {
                self.set(&name, &value)?;
                Ok(format!("{} = {}", name, value))
            }
            Request::Get { name } => {
                Ok(self.get(&name).unwrap_or_else(|| "None".to_string()))
            }
            Request::Unset { name } => {
                self.unset(&name)?;
                Ok(format!("{} = None", name))
            }
            Request::NumEqualTo { value } => Ok(self.num_equal_to(&value)?.to_string()),
            Request::Undo => Ok(Self::render_history(self.undo()?)),
            Request::Redo => Ok(Self::render_history(self.redo()?)),
            Request::Reset => {
                self.reset()?;
                Ok("CLEANED".to_string())
            }
            Request::Ping => Ok("PONG".to_string()),
        }
    }

    /// Close the engine gracefully, syncing the journal
    pub fn close(self) -> Result<()> {
        if let Some(journal) = &self.journal {
            journal.lock().sync()?;
        }
        Ok(())
    }

    // =========================================================================
    // Transaction Plumbing
    // =========================================================================

    /// Acquire the write gate with a bounded wait
    ///
    /// `txn_retry_limit` attempts of `txn_lock_timeout_ms` each; exhaustion
    /// surfaces `TransactionConflict` with the store untouched.
    fn lock_write(&self) -> Result<MutexGuard<'_, ()>> {
        let wait = Duration::from_millis(self.config.txn_lock_timeout_ms);

        for attempt in 0..self.config.txn_retry_limit {
            if let Some(guard) = self.write_gate.try_lock_for(wait) {
                return Ok(guard);
            }
            tracing::debug!("write gate contended, attempt {} timed out", attempt + 1);
        }

        Err(VarError::TransactionConflict(format!(
            "write gate not acquired after {} attempts",
            self.config.txn_retry_limit
        )))
    }

    /// Journal a committed operation, if durability is enabled
    ///
    /// Called under the write gate, before any in-memory mutation.
    fn journal_append(&self, op: Op) -> Result<()> {
        if let Some(journal) = &self.journal {
            journal.lock().append(op)?;
        }
        Ok(())
    }

    fn require_non_empty(what: &str, s: &str) -> Result<()> {
        if s.is_empty() {
            return Err(VarError::InvalidArgument(format!(
                "{} must not be empty",
                what
            )));
        }
        Ok(())
    }

    fn render_history(binding: Option<Binding>) -> String {
        match binding {
            Some(binding) => binding.to_string(),
            None => "NO COMMANDS".to_string(),
        }
    }

    // =========================================================================
    // Apply Paths (in-memory, infallible; shared by commits and replay)
    // =========================================================================

    /// Re-apply a journaled operation during recovery (no re-journaling)
    fn replay(&self, op: &Op) {
        match op {
            Op::Set { name, value } => self.apply_set(name, value),
            Op::Unset { name } => {
                self.apply_unset(name);
            }
            Op::Undo => {
                self.apply_undo();
            }
            Op::Redo => {
                // Advance cannot fail here: a journaled redo implies the
                // cursor had room when it committed.
                if let Err(e) = self.apply_redo() {
                    tracing::warn!("replayed redo failed: {}", e);
                }
            }
        }
    }

    fn apply_set(&self, name: &str, value: &str) {
        let old_value = self.vars.get(name);

        if let Some(old) = &old_value {
            self.index.decrement(old);
        }
        self.index.increment(value);
        self.vars.put(name.to_string(), value.to_string());
        self.history
            .append(CommandKind::Set, name, old_value, Some(value.to_string()));
    }

    fn apply_unset(&self, name: &str) -> Option<String> {
        let old_value = self.vars.get(name);

        if let Some(old) = &old_value {
            self.index.decrement(old);
            self.vars.remove(name);
        }
        self.history
            .append(CommandKind::Unset, name, old_value.clone(), None);
        old_value
    }

    fn apply_undo(&self) -> Option<Binding> {
        let cursor = self.history.cursor();
        if !cursor.has_undo() {
            return None;
        }
        let command = self.history.at(cursor.current)?;

        match command.kind {
            CommandKind::Set => {
                if let Some(new_value) = &command.new_value {
                    self.index.decrement(new_value);
                }
                match &command.old_value {
                    // The SET created the variable; reversing it deletes it
                    None => {
                        self.vars.remove(&command.name);
                    }
                    Some(old) => {
                        self.vars.put(command.name.clone(), old.clone());
                        self.index.increment(old);
                    }
                }
            }
            CommandKind::Unset => {
                // An UNSET recorded with no old value was a no-op; its
                // reversal is one too
                if let Some(old) = &command.old_value {
                    self.vars.put(command.name.clone(), old.clone());
                    self.index.increment(old);
                }
            }
        }

        self.history.rewind();
        Some(Binding {
            name: command.name,
            value: command.old_value,
        })
    }

    fn apply_redo(&self) -> Result<Option<Binding>> {
        let cursor = self.history.cursor();
        if !cursor.has_redo() {
            return Ok(None);
        }
        let command = match self.history.at(cursor.current + 1) {
            Some(command) => command,
            None => return Ok(None),
        };

        // Re-apply forward, reading the variable's value at redo time
        // rather than trusting the command's recorded old value, so index
        // bookkeeping stays exact.
        let value_after = match (command.kind, command.new_value.clone()) {
            (CommandKind::Set, Some(new_value)) => {
                if let Some(existing) = self.vars.get(&command.name) {
                    self.index.decrement(&existing);
                }
                self.index.increment(&new_value);
                self.vars.put(command.name.clone(), new_value.clone());
                Some(new_value)
            }
            // SET commands always carry a new value; tolerate a malformed
            // record as a forward no-op
            (CommandKind::Set, None) => self.vars.get(&command.name),
            (CommandKind::Unset, _) => {
                if let Some(existing) = self.vars.get(&command.name) {
                    self.index.decrement(&existing);
                    self.vars.remove(&command.name);
                }
                None
            }
        };

        self.history.advance()?;
        Ok(Some(Binding {
            name: command.name,
            value: value_after,
        }))
    }

    fn apply_reset(&self) {
        self.vars.clear();
        self.index.clear();
        self.history.reset();
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of live variables
    pub fn variable_count(&self) -> usize {
        self.vars.len()
    }

    /// Number of distinct values held by at least one variable
    pub fn distinct_value_count(&self) -> usize {
        self.index.distinct_values()
    }

    /// Number of recorded commands (applied or redo-able)
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Current read of the history cursor
    pub fn cursor(&self) -> HistoryCursor {
        self.history.cursor()
    }

    /// The command at a timeline index, if recorded
    pub fn command_at(&self, index: i64) -> Option<Command> {
        self.history.at(index)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
