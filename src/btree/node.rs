//! Keyed leaf node
//!
//! Interprets one page buffer as `[pgno][keys...][values...]`.
//!
//! Occupied slots form a sorted prefix `[0, fill)`; key `0` marks an empty
//! slot, so `fill` is never stored and is recomputed by scanning.

use std::slice::ChunksExact;

use crate::error::{LeafError, Result};
use crate::pager::{PageId, PAGE_SIZE};

use super::geometry::{Geometry, KEY_SIZE};

/// Key value marking an unoccupied slot
pub const SENTINEL_KEY: u32 = 0;

/// Result of a leaf insert that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// Key and value were written at `slot`
    Inserted { slot: usize },

    /// Every slot is occupied; nothing was written
    Full,
}

/// Read-only view of a page buffer through a leaf geometry
#[derive(Debug, Clone, Copy)]
pub struct LeafNode<'a> {
    buf: &'a [u8],
    geo: Geometry,
}

impl<'a> LeafNode<'a> {
    /// Wrap a page-sized buffer
    pub fn new(buf: &'a [u8], geo: Geometry) -> Result<Self> {
        check_page_len(buf.len())?;
        Ok(Self { buf, geo })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geo
    }

    /// Page number stored in the leading header field
    pub fn page_number(&self) -> PageId {
        read_u32(self.buf, 0)
    }

    /// Key in `slot`
    pub fn key_at(&self, slot: usize) -> Result<u32> {
        check_slot(&self.geo, slot)?;
        Ok(read_u32(self.buf, self.geo.key_offset(slot)))
    }

    /// Value bytes in `slot`
    pub fn value_at(&self, slot: usize) -> Result<&'a [u8]> {
        check_slot(&self.geo, slot)?;
        let start = self.geo.value_offset(slot);
        Ok(&self.buf[start..start + self.geo.value_length()])
    }

    /// First slot that is empty or holds a key `>= key`
    ///
    /// Does not detect duplicates on its own.
    pub fn find_insert_position(&self, key: u32) -> Result<usize> {
        let mut slot = 0;
        while slot < self.geo.no_pairs() {
            let current = self.key_at(slot)?;
            if current == SENTINEL_KEY || current >= key {
                break;
            }
            slot += 1;
        }
        Ok(slot)
    }

    /// Index one past the last occupied slot, scanning from `start`
    pub fn fill_count(&self, start: usize) -> Result<usize> {
        if start > self.geo.no_pairs() {
            return Err(LeafError::SlotOutOfBounds {
                slot: start,
                no_pairs: self.geo.no_pairs(),
            });
        }

        let mut slot = start;
        while slot < self.geo.no_pairs() && self.key_at(slot)? != SENTINEL_KEY {
            slot += 1;
        }
        Ok(slot)
    }

    /// Exact-match lookup over the whole slot range
    pub fn lookup(&self, key: u32) -> Result<Option<&'a [u8]>> {
        if key == SENTINEL_KEY {
            return Ok(None);
        }

        for slot in 0..self.geo.no_pairs() {
            if self.key_at(slot)? == key {
                return self.value_at(slot).map(Some);
            }
        }
        Ok(None)
    }

    /// Snapshot of the occupied values, in key order
    pub fn iterate(&self) -> Result<Records<'a>> {
        let count = self.fill_count(0)?;
        let base = self.geo.values_offset();
        let end = base + count * self.geo.value_length();

        Ok(Records {
            values: &self.buf[base..end],
            vlen: self.geo.value_length(),
        })
    }

    /// Occupied keys, in slot order
    pub fn keys(&self) -> Result<Vec<u32>> {
        let fill = self.fill_count(0)?;
        (0..fill).map(|slot| self.key_at(slot)).collect()
    }
}

/// Mutable view of a page buffer through a leaf geometry
pub struct LeafNodeMut<'a> {
    buf: &'a mut [u8],
    geo: Geometry,
}

impl<'a> LeafNodeMut<'a> {
    /// Wrap a page-sized buffer
    pub fn new(buf: &'a mut [u8], geo: Geometry) -> Result<Self> {
        check_page_len(buf.len())?;
        Ok(Self { buf, geo })
    }

    /// Reborrow as a read-only view
    pub fn as_node(&self) -> LeafNode<'_> {
        LeafNode {
            buf: &*self.buf,
            geo: self.geo,
        }
    }

    pub fn page_number(&self) -> PageId {
        self.as_node().page_number()
    }

    pub fn set_page_number(&mut self, page: PageId) {
        write_u32(self.buf, 0, page);
    }

    pub fn set_key(&mut self, slot: usize, key: u32) -> Result<()> {
        check_slot(&self.geo, slot)?;
        let offset = self.geo.key_offset(slot);
        write_u32(self.buf, offset, key);
        Ok(())
    }

    /// Copy exactly `value_length` bytes into `slot`
    pub fn set_value(&mut self, slot: usize, value: &[u8]) -> Result<()> {
        check_slot(&self.geo, slot)?;
        check_value_len(&self.geo, value)?;

        let start = self.geo.value_offset(slot);
        let end = start + self.geo.value_length();
        self.buf[start..end].copy_from_slice(value);
        Ok(())
    }

    /// Sorted insert into the occupied prefix
    ///
    /// All checks run before the first byte is written, so a rejected
    /// insert (duplicate, full, bad input) leaves the page untouched.
    pub fn insert(&mut self, key: u32, value: &[u8]) -> Result<Insertion> {
        if key == SENTINEL_KEY {
            return Err(LeafError::ReservedKey);
        }
        check_value_len(&self.geo, value)?;

        let node = self.as_node();
        let position = node.find_insert_position(key)?;
        let fill = node.fill_count(position)?;

        if position < fill && node.key_at(position)? == key {
            return Err(LeafError::DuplicateKey { key });
        }
        if fill == self.geo.no_pairs() {
            return Ok(Insertion::Full);
        }

        // Shift [position, fill) one slot right; copy_within handles the overlap
        let keys = self.geo.key_offset(position)..self.geo.key_offset(fill);
        let values = self.geo.value_offset(position)..self.geo.value_offset(fill);
        let key_dest = keys.start + KEY_SIZE;
        let value_dest = values.start + self.geo.value_length();
        self.buf.copy_within(keys, key_dest);
        self.buf.copy_within(values, value_dest);

        self.set_key(position, key)?;
        self.set_value(position, value)?;

        Ok(Insertion::Inserted { slot: position })
    }
}

/// Contiguous run of fixed-length records starting at value slot 0
#[derive(Debug, Clone, Copy)]
pub struct Records<'a> {
    values: &'a [u8],
    vlen: usize,
}

impl<'a> Records<'a> {
    /// Number of records
    pub fn len(&self) -> usize {
        self.values.len() / self.vlen
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw bytes: `len() * value_length` bytes from the first value slot
    pub fn as_bytes(&self) -> &'a [u8] {
        self.values
    }

    pub fn get(&self, index: usize) -> Option<&'a [u8]> {
        let start = index.checked_mul(self.vlen)?;
        self.values.get(start..start + self.vlen)
    }

    pub fn iter(&self) -> ChunksExact<'a, u8> {
        self.values.chunks_exact(self.vlen)
    }
}

impl<'a> IntoIterator for Records<'a> {
    type Item = &'a [u8];
    type IntoIter = ChunksExact<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn check_page_len(actual: usize) -> Result<()> {
    if actual != PAGE_SIZE {
        return Err(LeafError::ValueLength {
            expected: PAGE_SIZE,
            actual,
        });
    }
    Ok(())
}

fn check_slot(geo: &Geometry, slot: usize) -> Result<()> {
    if slot >= geo.no_pairs() {
        return Err(LeafError::SlotOutOfBounds {
            slot,
            no_pairs: geo.no_pairs(),
        });
    }
    Ok(())
}

fn check_value_len(geo: &Geometry, value: &[u8]) -> Result<()> {
    if value.len() != geo.value_length() {
        return Err(LeafError::ValueLength {
            expected: geo.value_length(),
            actual: value.len(),
        });
    }
    Ok(())
}

fn read_u32(buf: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; KEY_SIZE];
    bytes.copy_from_slice(&buf[offset..offset + KEY_SIZE]);
    u32::from_le_bytes(bytes)
}

fn write_u32(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + KEY_SIZE].copy_from_slice(&value.to_le_bytes());
}
