//! Pager Module
//!
//! Oversimplified page cache sitting between the keyed layout and the
//! backing file.
//!
//! ## Responsibilities
//! - Own the database file handle
//! - Track how many pages the file already holds (its extent)
//! - Hand out page buffers by page number, loading them on first access
//! - Write pages back only when explicitly flushed
//!
//! ## File Format
//! ```text
//! ┌──────────────┬──────────────┬──────────────┬─────
//! │ Page 0 (4KB) │ Page 1 (4KB) │ Page 2 (4KB) │ ...
//! └──────────────┴──────────────┴──────────────┴─────
//! offset(page) = page * PAGE_SIZE
//! ```
//!
//! There is no eviction: a loaded page stays resident until the pager is
//! dropped, and the slot table is bounded by `Config::max_pages`.

mod cache;

pub use cache::Pager;

/// Size of one page in bytes; the unit of disk I/O and caching
pub const PAGE_SIZE: usize = 4096;

/// Zero-based page number
pub type PageId = u32;

/// Raw page buffer
pub type Page = [u8; PAGE_SIZE];

/// Number of pages needed to cover `file_len` bytes (a partial tail counts)
pub fn pages_in_extent(file_len: u64) -> u32 {
    file_len.div_ceil(PAGE_SIZE as u64) as u32
}

/// Byte offset of a page inside the database file
pub fn page_offset(page: PageId) -> u64 {
    page as u64 * PAGE_SIZE as u64
}
