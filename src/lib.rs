//! # LeafDB
//!
//! A minimal persistent key-value store with:
//! - Fixed-size 4 KB pages on disk
//! - A bounded, never-evicting page cache
//! - A keyed leaf layout mapping unique u32 keys to fixed-length records
//! - A small SQL-like shell over a single hard-coded table
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    REPL (bin/leafdb)                        │
//! │              insert / select / .btree / .exit               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │              Session (command + table rows)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ open / insert / lookup / iterate_all / dump
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                         Store                               │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │  B+Tree leaf    │                │     Pager       │
//!   │ (geometry/node) │                │  (page cache)   │
//!   └─────────────────┘                └────────┬────────┘
//!                                               ▼
//!                                        database file
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod pager;
pub mod btree;
pub mod store;
pub mod table;
pub mod command;
pub mod session;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LeafError, Result};
pub use config::Config;
pub use store::Store;
pub use session::Session;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of LeafDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
