//! B+Tree Module
//!
//! Keyed page layout mapping unique u32 keys to fixed-length values.
//!
//! ## Responsibilities
//! - Derive slot capacity from the value length (geometry)
//! - Interpret a page as one leaf node
//! - Sorted insert, exact lookup, and bulk iteration within that leaf
//!
//! ## Leaf Layout
//! ```text
//! ┌──────────┬───────────────────────────┬───────────────────────────────┐
//! │ pgno (4) │ keys: no_pairs × u32 (LE) │ values: no_pairs × vlen bytes │
//! └──────────┴───────────────────────────┴───────────────────────────────┘
//! ```
//!
//! The tree is currently a single leaf; internal nodes and splitting are
//! not implemented, so a full leaf refuses further inserts.

mod geometry;
mod node;

pub use geometry::{compute_geometry, Geometry, KEY_SIZE, MAX_VALUE_LENGTH, PAGE_HEADER_SIZE};
pub use node::{Insertion, LeafNode, LeafNodeMut, Records, SENTINEL_KEY};
