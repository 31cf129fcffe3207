//! Tests for the keyed leaf node
//!
//! These tests verify:
//! - Slot accessors and their bounds checks
//! - Insert position and fill scans
//! - Sorted insert (prefix invariant, duplicates, full node)
//! - Lookup and bulk iteration
//! - The on-page byte layout

use leafdb::btree::{Geometry, Insertion, LeafNode, LeafNodeMut, KEY_SIZE, PAGE_HEADER_SIZE};
use leafdb::pager::PAGE_SIZE;
use leafdb::LeafError;

// =============================================================================
// Helper Functions
// =============================================================================

const VLEN: usize = 8;

fn empty_page() -> Vec<u8> {
    vec![0u8; PAGE_SIZE]
}

fn geometry() -> Geometry {
    Geometry::new(VLEN).unwrap()
}

/// Geometry with only 4 slots per page
fn small_geometry() -> Geometry {
    let geo = Geometry::new(1000).unwrap();
    assert_eq!(geo.no_pairs(), 4);
    geo
}

fn value_for(key: u32) -> Vec<u8> {
    value_for_len(key, VLEN)
}

fn insert_all(page: &mut [u8], geo: Geometry, keys: &[u32]) {
    let mut node = LeafNodeMut::new(page, geo).unwrap();
    for &key in keys {
        let outcome = node.insert(key, &value_for_len(key, geo.value_length())).unwrap();
        assert!(matches!(outcome, Insertion::Inserted { .. }));
    }
}

/// Key bytes followed by filler, so values differ per key
fn value_for_len(key: u32, len: usize) -> Vec<u8> {
    let mut value = vec![b'x'; len];
    value[..4].copy_from_slice(&key.to_le_bytes());
    value
}

// =============================================================================
// Construction / Accessor Tests
// =============================================================================

#[test]
fn test_new_rejects_wrong_buffer_size() {
    let short = vec![0u8; PAGE_SIZE - 1];

    let result = LeafNode::new(&short, geometry());

    assert!(matches!(
        result,
        Err(LeafError::ValueLength { expected: PAGE_SIZE, actual }) if actual == PAGE_SIZE - 1
    ));
}

#[test]
fn test_empty_node() {
    let page = empty_page();
    let node = LeafNode::new(&page, geometry()).unwrap();

    assert_eq!(node.page_number(), 0);
    assert_eq!(node.fill_count(0).unwrap(), 0);
    assert_eq!(node.find_insert_position(7).unwrap(), 0);
    assert_eq!(node.lookup(7).unwrap(), None);
    assert!(node.iterate().unwrap().is_empty());
    assert!(node.keys().unwrap().is_empty());
}

#[test]
fn test_page_number_round_trip() {
    let mut page = empty_page();
    let mut node = LeafNodeMut::new(&mut page, geometry()).unwrap();

    node.set_page_number(17);

    assert_eq!(node.page_number(), 17);
    assert_eq!(&page[..4], &17u32.to_le_bytes());
}

#[test]
fn test_set_and_read_slot() {
    let mut page = empty_page();
    let geo = geometry();
    let mut node = LeafNodeMut::new(&mut page, geo).unwrap();

    node.set_key(3, 99).unwrap();
    node.set_value(3, b"abcdefgh").unwrap();

    let view = node.as_node();
    assert_eq!(view.key_at(3).unwrap(), 99);
    assert_eq!(view.value_at(3).unwrap(), b"abcdefgh");
}

#[test]
fn test_slot_accessors_bounds_checked() {
    let mut page = empty_page();
    let geo = geometry();
    let last = geo.no_pairs() - 1;
    let mut node = LeafNodeMut::new(&mut page, geo).unwrap();

    assert!(node.set_key(last, 1).is_ok());
    assert!(matches!(
        node.set_key(last + 1, 1),
        Err(LeafError::SlotOutOfBounds { .. })
    ));
    assert!(matches!(
        node.set_value(last + 1, &[0u8; VLEN]),
        Err(LeafError::SlotOutOfBounds { .. })
    ));

    let view = node.as_node();
    assert!(matches!(
        view.key_at(geo.no_pairs()),
        Err(LeafError::SlotOutOfBounds { slot, no_pairs }) if slot == no_pairs
    ));
    assert!(view.value_at(geo.no_pairs()).is_err());
    assert!(view.fill_count(geo.no_pairs() + 1).is_err());
}

#[test]
fn test_set_value_requires_exact_length() {
    let mut page = empty_page();
    let mut node = LeafNodeMut::new(&mut page, geometry()).unwrap();

    let result = node.set_value(0, b"short");

    assert!(matches!(
        result,
        Err(LeafError::ValueLength { expected: VLEN, actual: 5 })
    ));
}

// =============================================================================
// Scan Tests
// =============================================================================

#[test]
fn test_find_insert_position() {
    let mut page = empty_page();
    let geo = geometry();
    insert_all(&mut page, geo, &[2, 4, 6]);
    let node = LeafNode::new(&page, geo).unwrap();

    assert_eq!(node.find_insert_position(1).unwrap(), 0);
    assert_eq!(node.find_insert_position(4).unwrap(), 1);
    assert_eq!(node.find_insert_position(5).unwrap(), 2);
    assert_eq!(node.find_insert_position(7).unwrap(), 3);
}

#[test]
fn test_fill_count_from_start() {
    let mut page = empty_page();
    let geo = geometry();
    insert_all(&mut page, geo, &[10, 20, 30, 40]);
    let node = LeafNode::new(&page, geo).unwrap();

    assert_eq!(node.fill_count(0).unwrap(), 4);
    assert_eq!(node.fill_count(2).unwrap(), 4);
    assert_eq!(node.fill_count(4).unwrap(), 4);
    assert_eq!(node.fill_count(geo.no_pairs()).unwrap(), geo.no_pairs());
}

#[test]
fn test_lookup_scans_past_gaps() {
    // Slot 1 is empty, slot 2 holds a key: fill stops at 1 but lookup still finds it
    let mut page = empty_page();
    let geo = geometry();
    let mut node = LeafNodeMut::new(&mut page, geo).unwrap();
    node.set_key(0, 5).unwrap();
    node.set_value(0, &value_for(5)).unwrap();
    node.set_key(2, 8).unwrap();
    node.set_value(2, &value_for(8)).unwrap();

    let view = node.as_node();
    assert_eq!(view.fill_count(0).unwrap(), 1);
    assert_eq!(view.lookup(8).unwrap(), Some(value_for(8).as_slice()));
}

#[test]
fn test_lookup_zero_is_never_found() {
    let page = empty_page();
    let node = LeafNode::new(&page, geometry()).unwrap();

    assert_eq!(node.lookup(0).unwrap(), None);
}

// =============================================================================
// Insert Tests
// =============================================================================

#[test]
fn test_insert_then_lookup() {
    let mut page = empty_page();
    let mut node = LeafNodeMut::new(&mut page, geometry()).unwrap();

    let outcome = node.insert(42, &value_for(42)).unwrap();

    assert_eq!(outcome, Insertion::Inserted { slot: 0 });
    assert_eq!(node.as_node().lookup(42).unwrap(), Some(value_for(42).as_slice()));
    assert_eq!(node.as_node().lookup(43).unwrap(), None);
}

#[test]
fn test_insert_keeps_sorted_prefix() {
    let mut page = empty_page();
    let geo = geometry();
    let keys = [50, 3, 99, 12, 7, 1000, 8, 64];
    insert_all(&mut page, geo, &keys);

    let node = LeafNode::new(&page, geo).unwrap();
    let fill = node.fill_count(0).unwrap();
    assert_eq!(fill, keys.len());

    for slot in 0..fill - 1 {
        assert!(node.key_at(slot).unwrap() < node.key_at(slot + 1).unwrap());
    }
    for slot in fill..geo.no_pairs() {
        assert_eq!(node.key_at(slot).unwrap(), 0);
    }

    // Every value moved together with its key
    for &key in &keys {
        assert_eq!(node.lookup(key).unwrap(), Some(value_for(key).as_slice()));
    }
}

#[test]
fn test_insert_reports_slot() {
    let mut page = empty_page();
    let geo = geometry();
    insert_all(&mut page, geo, &[10, 30]);
    let mut node = LeafNodeMut::new(&mut page, geo).unwrap();

    assert_eq!(
        node.insert(20, &value_for(20)).unwrap(),
        Insertion::Inserted { slot: 1 }
    );
    assert_eq!(
        node.insert(5, &value_for(5)).unwrap(),
        Insertion::Inserted { slot: 0 }
    );
    assert_eq!(
        node.insert(40, &value_for(40)).unwrap(),
        Insertion::Inserted { slot: 4 }
    );
}

#[test]
fn test_duplicate_insert_rejected_without_mutation() {
    let mut page = empty_page();
    let geo = geometry();
    insert_all(&mut page, geo, &[1, 2, 3]);
    let before = page.clone();

    let mut node = LeafNodeMut::new(&mut page, geo).unwrap();
    let result = node.insert(2, &[0xFF; VLEN]);

    assert!(matches!(result, Err(LeafError::DuplicateKey { key: 2 })));
    assert_eq!(page, before);
}

#[test]
fn test_full_node_refuses_insert_without_mutation() {
    let mut page = empty_page();
    let geo = small_geometry();
    insert_all(&mut page, geo, &[4, 1, 3, 2]);
    let before = page.clone();

    let mut node = LeafNodeMut::new(&mut page, geo).unwrap();
    let outcome = node.insert(5, &value_for_len(5, geo.value_length())).unwrap();

    assert_eq!(outcome, Insertion::Full);
    assert_eq!(page, before);
}

#[test]
fn test_duplicate_in_full_node_is_duplicate() {
    let mut page = empty_page();
    let geo = small_geometry();
    insert_all(&mut page, geo, &[1, 2, 3, 4]);
    let mut node = LeafNodeMut::new(&mut page, geo).unwrap();

    let result = node.insert(3, &value_for_len(3, geo.value_length()));

    assert!(matches!(result, Err(LeafError::DuplicateKey { key: 3 })));
}

#[test]
fn test_insert_rejects_reserved_key() {
    let mut page = empty_page();
    let mut node = LeafNodeMut::new(&mut page, geometry()).unwrap();

    let result = node.insert(0, &value_for(0));

    assert!(matches!(result, Err(LeafError::ReservedKey)));
    assert_eq!(node.as_node().fill_count(0).unwrap(), 0);
}

#[test]
fn test_insert_rejects_wrong_value_length() {
    let mut page = empty_page();
    let mut node = LeafNodeMut::new(&mut page, geometry()).unwrap();

    let result = node.insert(1, b"toolongvalue");

    assert!(matches!(result, Err(LeafError::ValueLength { .. })));
}

#[test]
fn test_fill_to_capacity() {
    let mut page = empty_page();
    let geo = geometry();
    let mut node = LeafNodeMut::new(&mut page, geo).unwrap();

    // Descending keys force a full shift on every insert
    let count = geo.no_pairs() as u32;
    for key in (1..=count).rev() {
        node.insert(key, &value_for(key)).unwrap();
    }

    assert_eq!(node.insert(count + 1, &value_for(count + 1)).unwrap(), Insertion::Full);
    let view = node.as_node();
    assert_eq!(view.fill_count(0).unwrap(), geo.no_pairs());
    assert_eq!(view.keys().unwrap(), (1..=count).collect::<Vec<_>>());
}

// =============================================================================
// Iteration Tests
// =============================================================================

#[test]
fn test_iterate_in_key_order() {
    let mut page = empty_page();
    let geo = geometry();
    insert_all(&mut page, geo, &[5, 1, 9]);

    let node = LeafNode::new(&page, geo).unwrap();
    let records = node.iterate().unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records.as_bytes().len(), 3 * VLEN);
    let values: Vec<&[u8]> = records.iter().collect();
    assert_eq!(values, vec![&value_for(1)[..], &value_for(5)[..], &value_for(9)[..]]);
    assert_eq!(records.get(1), Some(&value_for(5)[..]));
    assert_eq!(records.get(3), None);
}

// =============================================================================
// Layout Tests
// =============================================================================

#[test]
fn test_on_page_layout() {
    let mut page = empty_page();
    let geo = geometry();
    insert_all(&mut page, geo, &[0x0102_0304, 7]);

    let keys_start = PAGE_HEADER_SIZE;
    let values_start = PAGE_HEADER_SIZE + geo.no_pairs() * KEY_SIZE;

    // Slot 0 holds 7, slot 1 holds 0x01020304, both little-endian
    assert_eq!(&page[keys_start..keys_start + 4], &7u32.to_le_bytes());
    assert_eq!(&page[keys_start + 4..keys_start + 8], &[0x04, 0x03, 0x02, 0x01]);
    assert_eq!(&page[values_start..values_start + VLEN], value_for(7).as_slice());
    assert_eq!(
        &page[values_start + VLEN..values_start + 2 * VLEN],
        value_for(0x0102_0304).as_slice()
    );
}
