//! Tests for CommandLog
//!
//! These tests verify:
//! - Append assigning indices and moving the cursor
//! - Truncation of the redo branch on append after rewind
//! - Rewind/advance cursor stepping and bounds
//! - Full reset

use varstore::history::{CommandKind, CommandLog, HistoryCursor};
use varstore::VarError;

// =============================================================================
// Append Tests
// =============================================================================

#[test]
fn test_empty_log_cursor() {
    let log = CommandLog::new();

    assert_eq!(log.cursor(), HistoryCursor::empty());
    assert_eq!(log.len(), 0);
    assert!(log.is_empty());
    assert!(!log.cursor().has_undo());
    assert!(!log.cursor().has_redo());
}

#[test]
fn test_append_assigns_sequential_indices() {
    let log = CommandLog::new();

    let first = log.append(CommandKind::Set, "a", None, Some("1".into()));
    let second = log.append(CommandKind::Set, "a", Some("1".into()), Some("2".into()));

    assert_eq!(first.index, 0);
    assert_eq!(second.index, 1);
    assert_eq!(log.cursor().current, 1);
    assert_eq!(log.cursor().max, 1);
    assert_eq!(log.len(), 2);
}

#[test]
fn test_append_records_old_and_new_values() {
    let log = CommandLog::new();

    log.append(CommandKind::Unset, "a", Some("1".into()), None);

    let command = log.at(0).unwrap();
    assert_eq!(command.kind, CommandKind::Unset);
    assert_eq!(command.name, "a");
    assert_eq!(command.old_value, Some("1".to_string()));
    assert_eq!(command.new_value, None);
}

#[test]
fn test_at_out_of_bounds() {
    let log = CommandLog::new();
    log.append(CommandKind::Set, "a", None, Some("1".into()));

    assert!(log.at(-1).is_none());
    assert!(log.at(1).is_none());
}

// =============================================================================
// Cursor Stepping Tests
// =============================================================================

#[test]
fn test_rewind_and_advance() {
    let log = CommandLog::new();
    log.append(CommandKind::Set, "a", None, Some("1".into()));
    log.append(CommandKind::Set, "b", None, Some("2".into()));

    log.rewind();
    assert_eq!(log.cursor().current, 0);
    assert!(log.cursor().has_redo());

    log.advance().unwrap();
    assert_eq!(log.cursor().current, 1);
    assert!(!log.cursor().has_redo());
}

#[test]
fn test_advance_at_max_is_out_of_range() {
    let log = CommandLog::new();
    log.append(CommandKind::Set, "a", None, Some("1".into()));

    assert!(matches!(log.advance(), Err(VarError::CursorOutOfRange)));
}

#[test]
fn test_rewind_stops_at_minus_one() {
    let log = CommandLog::new();
    log.append(CommandKind::Set, "a", None, Some("1".into()));

    log.rewind();
    log.rewind();
    log.rewind();

    assert_eq!(log.cursor().current, -1);
    assert_eq!(log.cursor().max, 0);
}

// =============================================================================
// Truncation Tests
// =============================================================================

#[test]
fn test_append_after_rewind_truncates_redo_branch() {
    let log = CommandLog::new();
    log.append(CommandKind::Set, "a", None, Some("1".into()));
    log.append(CommandKind::Set, "b", None, Some("2".into()));
    log.append(CommandKind::Set, "c", None, Some("3".into()));

    log.rewind();
    log.rewind();
    assert_eq!(log.cursor(), HistoryCursor { current: 0, max: 2 });

    let command = log.append(CommandKind::Set, "d", None, Some("4".into()));

    assert_eq!(command.index, 1);
    assert_eq!(log.len(), 2);
    assert_eq!(log.cursor(), HistoryCursor { current: 1, max: 1 });
    assert_eq!(log.at(1).unwrap().name, "d");
    assert!(log.at(2).is_none());
}

#[test]
fn test_append_after_full_rewind_truncates_everything() {
    let log = CommandLog::new();
    log.append(CommandKind::Set, "a", None, Some("1".into()));
    log.append(CommandKind::Set, "b", None, Some("2".into()));

    log.rewind();
    log.rewind();

    let command = log.append(CommandKind::Set, "c", None, Some("3".into()));

    assert_eq!(command.index, 0);
    assert_eq!(log.len(), 1);
    assert_eq!(log.at(0).unwrap().name, "c");
}

// =============================================================================
// Reset Tests
// =============================================================================

#[test]
fn test_reset_clears_commands_and_cursor() {
    let log = CommandLog::new();
    log.append(CommandKind::Set, "a", None, Some("1".into()));
    log.append(CommandKind::Unset, "a", Some("1".into()), None);

    log.reset();

    assert!(log.is_empty());
    assert_eq!(log.cursor(), HistoryCursor::empty());
    assert!(log.at(0).is_none());
}
