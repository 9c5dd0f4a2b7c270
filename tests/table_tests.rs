//! Tests for VariableTable
//!
//! These tests verify:
//! - Point lookups, upserts, and deletes
//! - Prior values returned by put/remove
//! - Clear and size accessors

use varstore::table::VariableTable;

#[test]
fn test_get_absent_name() {
    let table = VariableTable::new();

    assert_eq!(table.get("a"), None);
    assert!(table.is_empty());
}

#[test]
fn test_put_and_get() {
    let table = VariableTable::new();

    assert_eq!(table.put("a".into(), "10".into()), None);
    assert_eq!(table.get("a"), Some("10".to_string()));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_put_returns_prior_value() {
    let table = VariableTable::new();

    table.put("a".into(), "10".into());
    let prior = table.put("a".into(), "20".into());

    assert_eq!(prior, Some("10".to_string()));
    assert_eq!(table.get("a"), Some("20".to_string()));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_remove() {
    let table = VariableTable::new();

    table.put("a".into(), "10".into());
    assert_eq!(table.remove("a"), Some("10".to_string()));
    assert_eq!(table.get("a"), None);

    // Removing an absent name is a no-op
    assert_eq!(table.remove("a"), None);
}

#[test]
fn test_clear() {
    let table = VariableTable::new();

    table.put("a".into(), "1".into());
    table.put("b".into(), "2".into());
    table.clear();

    assert!(table.is_empty());
    assert_eq!(table.get("a"), None);
}
