//! Table Module
//!
//! The single hard-coded table and its fixed-width row encoding.
//!
//! ```text
//! CREATE TABLE users (
//!   id INT,
//!   username VARCHAR(32),
//!   email VARCHAR(255)
//! );
//! ```
//!
//! ## Row Format
//! ```text
//! ┌─────────┬────────────────────┬────────────────────┐
//! │ id (4)  │ username (33)      │ email (256)        │
//! │ u32 LE  │ NUL padded         │ NUL padded         │
//! └─────────┴────────────────────┴────────────────────┘
//! ```

mod row;

pub use row::{Row, RowError, EMAIL_SIZE, ROW_SIZE, USERNAME_SIZE};
