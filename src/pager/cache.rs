//! Page cache
//!
//! Bounded, never-evicting slot table of page buffers backed by one file.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::config::{Config, FlushSync};
use crate::error::{LeafError, Result};

use super::{page_offset, pages_in_extent, Page, PageId, PAGE_SIZE};

/// Owns the database file and every page loaded from it
///
/// ## Lifecycle of a slot
/// - Empty until the page is first requested
/// - Filled from disk if the page lies inside the file extent,
///   otherwise with zeroes
/// - Stays resident until the pager is dropped (no eviction)
pub struct Pager {
    /// Path of the backing file (for logging)
    path: PathBuf,

    /// Backing file, opened read/write
    file: File,

    /// Pages known to exist on disk (or already handed out by `next`)
    page_count: u32,

    /// Durability strategy applied on every flush
    flush_sync: FlushSync,

    /// Resident pages indexed by page number; length == max_pages
    cache: Vec<Option<Box<Page>>>,
}

impl Pager {
    /// Open or create the backing file described by `config`
    ///
    /// Computes the page extent from the file length; the slot table
    /// starts out empty.
    pub fn open(config: &Config) -> Result<Self> {
        config.validate()?;

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&config.db_path)?;

        let file_len = file.metadata()?.len();
        let page_count = pages_in_extent(file_len);

        tracing::debug!(
            path = %config.db_path.display(),
            file_len,
            page_count,
            "Opened pager"
        );

        Ok(Self {
            path: config.db_path.clone(),
            file,
            page_count,
            flush_sync: config.flush_sync,
            cache: (0..config.max_pages).map(|_| None).collect(),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified database file
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().db_path(path).build();
        Self::open(&config)
    }

    /// Get a page, loading it on a cache miss
    ///
    /// A miss allocates a zeroed buffer and, if the page lies inside the
    /// on-disk extent, fills it from `page * PAGE_SIZE`.
    pub fn get(&mut self, page: PageId) -> Result<&mut Page> {
        let slot = self.slot_index(page)?;

        if self.cache[slot].is_none() {
            let buffer = self.load(page)?;
            self.cache[slot] = Some(buffer);
        }

        self.cache[slot]
            .as_deref_mut()
            .ok_or(LeafError::MissingPage { page })
    }

    /// Borrow a resident page without touching the disk
    pub fn page(&self, page: PageId) -> Option<&Page> {
        self.cache.get(page as usize)?.as_deref()
    }

    /// Allocate a fresh page at the end of the known extent
    ///
    /// The extent counter moves before the page reaches disk; a page that
    /// is handed out here and never flushed leaves `page_count` ahead of the
    /// file after a restart.
    pub fn next(&mut self) -> Result<(PageId, &mut Page)> {
        let page = self.page_count;
        self.get(page)?;
        self.page_count += 1;

        tracing::debug!(page, "Allocated page at end of extent");

        let buffer = self.get(page)?;
        Ok((page, buffer))
    }

    /// Write the first `len` bytes of a resident page to its file offset
    pub fn flush(&mut self, page: PageId, len: usize) -> Result<()> {
        if len > PAGE_SIZE {
            return Err(LeafError::FlushLength { len });
        }

        let buffer = self
            .cache
            .get(page as usize)
            .and_then(|slot| slot.as_deref())
            .ok_or(LeafError::MissingPage { page })?;

        self.file.seek(SeekFrom::Start(page_offset(page)))?;
        self.file.write_all(&buffer[..len])?;

        if self.flush_sync == FlushSync::EveryFlush {
            self.file.sync_data()?;
        }

        // The page is on disk now, so it is part of the extent
        self.page_count = self.page_count.max(page + 1);

        tracing::debug!(page, len, "Flushed page");
        Ok(())
    }

    /// Flush every resident page in full
    pub fn flush_all(&mut self) -> Result<()> {
        let resident: Vec<PageId> = self.resident_pages().collect();
        for page in resident {
            self.flush(page, PAGE_SIZE)?;
        }
        Ok(())
    }

    /// Force file contents to disk
    pub fn sync(&self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of pages in the known extent
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Resident page capacity
    pub fn max_pages(&self) -> u32 {
        self.cache.len() as u32
    }

    /// Page numbers currently held in memory, ascending
    pub fn resident_pages(&self) -> impl Iterator<Item = PageId> + '_ {
        self.cache
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(page, _)| page as PageId)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Map a page number onto the slot table, enforcing capacity
    fn slot_index(&self, page: PageId) -> Result<usize> {
        let slot = page as usize;
        if slot >= self.cache.len() {
            return Err(LeafError::CapacityExceeded {
                page,
                max_pages: self.max_pages(),
            });
        }
        Ok(slot)
    }

    /// Build the buffer for a cache miss
    fn load(&mut self, page: PageId) -> Result<Box<Page>> {
        let mut buffer = zeroed_page();

        if page < self.page_count {
            self.file.seek(SeekFrom::Start(page_offset(page)))?;
            let read = read_up_to(&mut self.file, &mut buffer[..])?;
            tracing::debug!(page, read, "Loaded page from disk");
        } else {
            tracing::debug!(page, "Page beyond extent, using zero page");
        }

        Ok(buffer)
    }
}

fn zeroed_page() -> Box<Page> {
    Box::new([0u8; PAGE_SIZE])
}

/// Read until `buf` is full or the file ends; a short tail stays zeroed
fn read_up_to(file: &mut File, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
