//! Row definitions
//!
//! Fixed-width encoding of a `users` row into one leaf value.

use std::fmt;

use bytes::{Buf, BufMut, BytesMut};
use thiserror::Error;

use crate::error::{LeafError, Result};

/// Maximum username length in bytes
pub const USERNAME_SIZE: usize = 32;

/// Maximum email length in bytes
pub const EMAIL_SIZE: usize = 255;

const ID_FIELD: usize = std::mem::size_of::<u32>();
const USERNAME_FIELD: usize = USERNAME_SIZE + 1;
const EMAIL_FIELD: usize = EMAIL_SIZE + 1;

/// Encoded row length; the value length of the table's store
pub const ROW_SIZE: usize = ID_FIELD + USERNAME_FIELD + EMAIL_FIELD;

/// Reasons a row cannot be built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("string is too long")]
    StringTooLong,
}

/// One row of the `users` table
///
/// Fields are only set through `new` and `deserialize`; `serialize`
/// always produces exactly `ROW_SIZE` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: u32,
    username: String,
    email: String,
}

impl Row {
    /// Build a row, checking the column widths
    pub fn new(
        id: u32,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> std::result::Result<Self, RowError> {
        let username = username.into();
        let email = email.into();

        if username.len() > USERNAME_SIZE || email.len() > EMAIL_SIZE {
            return Err(RowError::StringTooLong);
        }

        Ok(Self {
            id,
            username,
            email,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Encode to exactly `ROW_SIZE` bytes
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(ROW_SIZE);
        buf.put_u32_le(self.id);
        put_padded(&mut buf, self.username.as_bytes(), USERNAME_FIELD);
        put_padded(&mut buf, self.email.as_bytes(), EMAIL_FIELD);
        buf.to_vec()
    }

    /// Decode from a `ROW_SIZE` value slot
    ///
    /// Text columns end at the first NUL byte.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ROW_SIZE {
            return Err(LeafError::ValueLength {
                expected: ROW_SIZE,
                actual: bytes.len(),
            });
        }

        let mut buf = bytes;
        let id = buf.get_u32_le();
        let username = take_padded(&mut buf, USERNAME_FIELD);
        let email = take_padded(&mut buf, EMAIL_FIELD);

        Ok(Self {
            id,
            username,
            email,
        })
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username, self.email)
    }
}

/// Write `text` into a `width`-byte field; text from a corrupt slot is cut
fn put_padded(buf: &mut BytesMut, text: &[u8], width: usize) {
    let text = &text[..text.len().min(width)];
    buf.put_slice(text);
    buf.put_bytes(0, width - text.len());
}

fn take_padded(buf: &mut &[u8], width: usize) -> String {
    let field = &buf[..width];
    let end = field.iter().position(|&b| b == 0).unwrap_or(width);
    let text = String::from_utf8_lossy(&field[..end]).into_owned();
    buf.advance(width);
    text
}
