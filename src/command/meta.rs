//! Meta commands
//!
//! Dot-prefixed commands that act on the session rather than the table.

/// A parsed meta command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    /// Close the store and leave the loop
    Exit,

    /// Print the geometry and root leaf keys
    Btree,

    /// Print page and row layout constants
    Constants,

    /// Anything else starting with a dot
    Unrecognized(String),
}

impl MetaCommand {
    /// Parse input that starts with `.`
    pub fn parse(input: &str) -> Self {
        match input {
            ".exit" => MetaCommand::Exit,
            ".btree" => MetaCommand::Btree,
            ".constants" => MetaCommand::Constants,
            other => MetaCommand::Unrecognized(other.to_string()),
        }
    }

    /// Whether `input` should be handled as a meta command
    pub fn is_meta(input: &str) -> bool {
        input.starts_with('.')
    }
}
