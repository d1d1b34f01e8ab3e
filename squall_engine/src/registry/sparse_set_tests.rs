//! Tests for SparseSet
//!
//! Exercises dense packing, swap-remove bookkeeping, and generation
//! validation in isolation from the Registry.

use super::*;
use crate::registry::Entity;

fn entity(index: u32) -> Entity {
    Entity::new(index, 0)
}

// ============================================================================
// Tests: Insert / Get
// ============================================================================

#[test]
fn test_new_set_is_empty() {
    let set: SparseSet<i32> = SparseSet::new();
    assert_eq!(set.entities().len(), 0);
    assert!(set.entities().is_empty());
}

#[test]
fn test_insert_and_get() {
    let mut set = SparseSet::new();
    assert!(set.insert(entity(3), 42));
    assert_eq!(set.get(entity(3)), Some(&42));
    assert_eq!(set.entities().len(), 1);
}

#[test]
fn test_insert_duplicate_returns_false() {
    let mut set = SparseSet::new();
    assert!(set.insert(entity(0), 1));
    assert!(!set.insert(entity(0), 2));
    // Original value untouched
    assert_eq!(set.get(entity(0)), Some(&1));
}

#[test]
fn test_get_absent_returns_none() {
    let set: SparseSet<i32> = SparseSet::new();
    assert_eq!(set.get(entity(7)), None);
}

#[test]
fn test_get_mut_mutates_in_place() {
    let mut set = SparseSet::new();
    set.insert(entity(1), 10);
    *set.get_mut(entity(1)).unwrap() += 5;
    assert_eq!(set.get(entity(1)), Some(&15));
}

#[test]
fn test_generation_mismatch_is_absent() {
    let mut set = SparseSet::new();
    set.insert(Entity::new(2, 0), 9);

    // Same slot index, newer generation: must not alias the old value.
    let recycled = Entity::new(2, 1);
    assert!(!set.contains(recycled));
    assert_eq!(set.get(recycled), None);
    assert_eq!(set.remove(recycled), None);
}

// ============================================================================
// Tests: Remove / swap bookkeeping
// ============================================================================

#[test]
fn test_remove_returns_value() {
    let mut set = SparseSet::new();
    set.insert(entity(0), 5);
    assert_eq!(set.remove(entity(0)), Some(5));
    assert_eq!(set.entities().len(), 0);
    assert!(!set.contains(entity(0)));
}

#[test]
fn test_remove_absent_returns_none() {
    let mut set: SparseSet<i32> = SparseSet::new();
    assert_eq!(set.remove(entity(0)), None);
}

#[test]
fn test_swap_remove_keeps_remaining_reachable() {
    let mut set = SparseSet::new();
    set.insert(entity(0), 100);
    set.insert(entity(1), 200);
    set.insert(entity(2), 300);

    // Removing the first dense slot swaps the last element into it.
    set.remove(entity(0));

    assert_eq!(set.get(entity(1)), Some(&200));
    assert_eq!(set.get(entity(2)), Some(&300));
    assert_eq!(set.entities().len(), 2);
}

#[test]
fn test_dense_order_is_insertion_order() {
    let mut set = SparseSet::new();
    set.insert(entity(5), 'a');
    set.insert(entity(1), 'b');
    set.insert(entity(9), 'c');

    let order: Vec<u32> = set.entities().iter().map(|e| e.index()).collect();
    assert_eq!(order, vec![5, 1, 9]);
}

#[test]
fn test_reinsert_after_remove() {
    let mut set = SparseSet::new();
    set.insert(entity(4), 1);
    set.remove(entity(4));
    assert!(set.insert(entity(4), 2));
    assert_eq!(set.get(entity(4)), Some(&2));
}
