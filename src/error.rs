//! Error types for LeafDB
//!
//! Provides a unified error type for all storage operations.

use thiserror::Error;

use crate::pager::PageId;

/// Result type alias using LeafError
pub type Result<T> = std::result::Result<T, LeafError>;

/// Unified error type for LeafDB operations
#[derive(Debug, Error)]
pub enum LeafError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Pager Errors
    // -------------------------------------------------------------------------
    #[error("Page {page} is out of bounds (capacity is {max_pages} pages)")]
    CapacityExceeded { page: PageId, max_pages: u32 },

    #[error("Tried to flush page {page}, which was never loaded")]
    MissingPage { page: PageId },

    #[error("Flush length {len} exceeds the page size")]
    FlushLength { len: usize },

    // -------------------------------------------------------------------------
    // Layout Errors
    // -------------------------------------------------------------------------
    #[error("Invalid geometry: value length {value_length} does not fit a page")]
    InvalidGeometry { value_length: usize },

    #[error("Slot {slot} out of bounds (node holds {no_pairs} slots)")]
    SlotOutOfBounds { slot: usize, no_pairs: usize },

    #[error("Value length mismatch: expected {expected} bytes, got {actual}")]
    ValueLength { expected: usize, actual: usize },

    // -------------------------------------------------------------------------
    // Insert Errors
    // -------------------------------------------------------------------------
    #[error("Duplicate key: {key}")]
    DuplicateKey { key: u32 },

    #[error("Leaf node on page {page} is full; splitting a leaf node is not yet implemented")]
    NodeFull { page: PageId },

    #[error("Key 0 is reserved as the empty-slot marker")]
    ReservedKey,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
