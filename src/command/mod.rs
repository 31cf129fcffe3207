//! Command Module
//!
//! Turns one line of user input into something the session can execute.
//!
//! ## Input Forms
//! - `.exit`, `.btree`, `.constants` - meta commands (leading dot)
//! - `insert <id> <username> <email>` - insert one row
//! - `select` - print every row in key order

mod meta;
mod statement;

pub use meta::MetaCommand;
pub use statement::{PrepareError, Statement};
