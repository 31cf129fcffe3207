//! Statement parsing
//!
//! `insert` and `select` against the single `users` table.

use thiserror::Error;

use crate::table::{Row, RowError, EMAIL_SIZE, USERNAME_SIZE};

/// A prepared statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Insert one row keyed by its id
    Insert(Row),

    /// Print every row
    Select,
}

/// Why a line could not be turned into a statement
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrepareError {
    #[error("Syntax error. Could not parse statement.")]
    SyntaxError,

    #[error("Error: id must be positive.")]
    NegativeId,

    #[error("Error: string is too long.")]
    StringTooLong,

    #[error("Unrecognized keyword at start of '{0}'.")]
    UnrecognizedStatement(String),
}

impl From<RowError> for PrepareError {
    fn from(err: RowError) -> Self {
        match err {
            RowError::StringTooLong => PrepareError::StringTooLong,
        }
    }
}

impl Statement {
    /// Usage hint printed after a syntax error
    pub const INSERT_USAGE: &'static str = "Usage: insert id name email";

    /// Parse one input line
    ///
    /// Any line beginning with `insert` is treated as an insert; tokens
    /// after the email are ignored.
    pub fn prepare(input: &str) -> Result<Self, PrepareError> {
        if input.starts_with("insert") {
            return Self::prepare_insert(input);
        }
        if input == "select" {
            return Ok(Statement::Select);
        }
        Err(PrepareError::UnrecognizedStatement(input.to_string()))
    }

    fn prepare_insert(input: &str) -> Result<Self, PrepareError> {
        let mut tokens = input.split_whitespace().skip(1);

        let id_token = tokens.next().ok_or(PrepareError::SyntaxError)?;
        let id: i64 = id_token.parse().map_err(|_| PrepareError::SyntaxError)?;
        // 0 is the empty-slot key, so ids start at 1
        if id <= 0 {
            return Err(PrepareError::NegativeId);
        }
        let id = u32::try_from(id).map_err(|_| PrepareError::SyntaxError)?;

        let username = next_column(&mut tokens, USERNAME_SIZE)?;
        let email = next_column(&mut tokens, EMAIL_SIZE)?;

        Ok(Statement::Insert(Row::new(id, username, email)?))
    }
}

/// Next text column, checked against its width before later columns are read
fn next_column<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    width: usize,
) -> Result<&'a str, PrepareError> {
    let token = tokens.next().ok_or(PrepareError::SyntaxError)?;
    if token.len() > width {
        return Err(PrepareError::StringTooLong);
    }
    Ok(token)
}
