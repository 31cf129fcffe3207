//! Leaf geometry
//!
//! Derives how many fixed-length records one page can hold.

use crate::error::{LeafError, Result};
use crate::pager::PAGE_SIZE;

/// Size of a key in bytes (u32)
pub const KEY_SIZE: usize = std::mem::size_of::<u32>();

/// Size of the leading page-number field
pub const PAGE_HEADER_SIZE: usize = std::mem::size_of::<u32>();

/// Largest value length that still leaves room for one key/value pair
pub const MAX_VALUE_LENGTH: usize = PAGE_SIZE - PAGE_HEADER_SIZE - KEY_SIZE;

/// Capacity and layout parameters for one value type
///
/// ```text
/// ┌──────────┬──────────────────────────┬──────────────────────────────┐
/// │ pgno (4) │ key_0 .. key_{n-1} (4n)  │ val_0 .. val_{n-1} (vlen*n)  │
/// └──────────┴──────────────────────────┴──────────────────────────────┘
/// n = no_pairs = (PAGE_SIZE - 4) / (4 + vlen)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Minimum number of keys in a non-root node (reserved for splitting)
    k: usize,
    /// Length of one value in bytes
    vlen: usize,
    /// Key/value slots per leaf page
    no_pairs: usize,
}

impl Geometry {
    /// Compute the geometry for values of `value_length` bytes
    ///
    /// Fails with `InvalidGeometry` unless `1 <= value_length` and at least
    /// one pair fits in a page.
    pub fn new(value_length: usize) -> Result<Self> {
        if value_length < 1 || value_length > MAX_VALUE_LENGTH {
            return Err(LeafError::InvalidGeometry { value_length });
        }

        Ok(Self {
            k: (PAGE_SIZE - 2 * KEY_SIZE) / (4 * KEY_SIZE),
            vlen: value_length,
            no_pairs: (PAGE_SIZE - KEY_SIZE) / (KEY_SIZE + value_length),
        })
    }

    /// Minimum fan-out of a balanced tree
    pub fn k(&self) -> usize {
        self.k
    }

    /// Maximum keys in a full node (`2k`)
    pub fn max_keys(&self) -> usize {
        2 * self.k
    }

    pub fn value_length(&self) -> usize {
        self.vlen
    }

    pub fn no_pairs(&self) -> usize {
        self.no_pairs
    }

    /// Byte offset of key slot `slot`
    pub(crate) fn key_offset(&self, slot: usize) -> usize {
        PAGE_HEADER_SIZE + slot * KEY_SIZE
    }

    /// Byte offset of the first value slot
    pub(crate) fn values_offset(&self) -> usize {
        PAGE_HEADER_SIZE + self.no_pairs * KEY_SIZE
    }

    /// Byte offset of value slot `slot`
    pub(crate) fn value_offset(&self, slot: usize) -> usize {
        self.values_offset() + slot * self.vlen
    }
}

/// Compute the geometry for a value type (see [`Geometry::new`])
pub fn compute_geometry(value_length: usize) -> Result<Geometry> {
    Geometry::new(value_length)
}
