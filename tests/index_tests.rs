//! Tests for ValueIndex
//!
//! These tests verify:
//! - Increment/decrement/query reference counting
//! - Entries deleted at zero, never stored
//! - Decrement of an untracked value tolerated as a no-op

use varstore::index::ValueIndex;

#[test]
fn test_query_absent_value_is_zero() {
    let index = ValueIndex::new();

    assert_eq!(index.query("10"), 0);
}

#[test]
fn test_increment_creates_and_counts() {
    let index = ValueIndex::new();

    index.increment("10");
    index.increment("10");
    index.increment("20");

    assert_eq!(index.query("10"), 2);
    assert_eq!(index.query("20"), 1);
    assert_eq!(index.distinct_values(), 2);
}

#[test]
fn test_decrement_deletes_entry_at_zero() {
    let index = ValueIndex::new();

    index.increment("10");
    index.increment("10");

    index.decrement("10");
    assert_eq!(index.query("10"), 1);

    index.decrement("10");
    assert_eq!(index.query("10"), 0);
    // Entry is gone, not stored at count 0
    assert_eq!(index.distinct_values(), 0);
}

#[test]
fn test_decrement_of_untracked_value_is_a_noop() {
    let index = ValueIndex::new();

    index.decrement("never_seen");

    assert_eq!(index.query("never_seen"), 0);
    assert_eq!(index.distinct_values(), 0);
}

#[test]
fn test_clear() {
    let index = ValueIndex::new();

    index.increment("a");
    index.increment("b");
    index.clear();

    assert_eq!(index.query("a"), 0);
    assert_eq!(index.query("b"), 0);
    assert_eq!(index.distinct_values(), 0);
}
