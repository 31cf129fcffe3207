//! Configuration for LeafDB
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{LeafError, Result};

/// Upper bound on `max_pages`; the slot table is sized up front
pub const MAX_PAGES_LIMIT: u32 = 1 << 20;

/// Main configuration for a LeafDB store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Backing database file (created on first open)
    pub db_path: PathBuf,

    // -------------------------------------------------------------------------
    // Pager Configuration
    // -------------------------------------------------------------------------
    /// Maximum number of resident pages; page numbers at or beyond this
    /// bound are rejected with `CapacityExceeded`
    pub max_pages: u32,

    /// What a page flush does after writing the bytes
    pub flush_sync: FlushSync,
}

/// Flush durability strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushSync {
    /// Write the page and leave durability to the OS write-back
    OsWriteBack,

    /// `sync_data` after every page write (slowest, survives power loss)
    EveryFlush,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./leafdb.db"),
            max_pages: 100,
            flush_sync: FlushSync::OsWriteBack,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check values that would make the pager unusable
    pub fn validate(&self) -> Result<()> {
        if self.max_pages == 0 {
            return Err(LeafError::Config(
                "max_pages must be at least 1".to_string(),
            ));
        }
        if self.max_pages > MAX_PAGES_LIMIT {
            return Err(LeafError::Config(format!(
                "max_pages must be at most {}",
                MAX_PAGES_LIMIT
            )));
        }
        if self.db_path.as_os_str().is_empty() {
            return Err(LeafError::Config("db_path must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing database file
    pub fn db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.db_path = path.into();
        self
    }

    /// Set the resident page capacity
    pub fn max_pages(mut self, count: u32) -> Self {
        self.config.max_pages = count;
        self
    }

    /// Set the flush durability strategy
    pub fn flush_sync(mut self, strategy: FlushSync) -> Self {
        self.config.flush_sync = strategy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
