use thiserror::Error;

/// Errors that can occur while decoding bencode.
///
/// [`UnexpectedEof`](BencodeError::UnexpectedEof) is special: it means the
/// input is a prefix of a (possibly) valid value. A caller reading from a
/// stream should append more bytes and decode again from the start; every
/// other variant is a hard syntax error in the input itself.
///
/// # Examples
///
/// ```
/// use riptide::bencode::{decode, BencodeError};
///
/// // Truncated input: retryable once more bytes arrive
/// assert!(matches!(decode(b"i42"), Err(BencodeError::UnexpectedEof)));
///
/// // Leading zeros are malformed, not incomplete
/// assert!(matches!(decode(b"i007e"), Err(BencodeError::InvalidInteger(_))));
///
/// // Data after the value
/// assert!(matches!(decode(b"i42eextra"), Err(BencodeError::TrailingData)));
/// ```
#[derive(Debug, Error)]
pub enum BencodeError {
    /// Input ended before a complete value was parsed.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Integer is malformed (leading zeros, `-0`, empty, or overflows i64).
    #[error("invalid integer: {0}")]
    InvalidInteger(String),

    /// Byte string length prefix is not a valid number.
    #[error("invalid string length")]
    InvalidStringLength,

    /// Encountered a byte that starts no production.
    #[error("unexpected character: {0}")]
    UnexpectedChar(char),

    /// A dictionary key was not a byte string.
    #[error("dictionary key is not a string")]
    InvalidDictKey,

    /// Dictionary keys were not in ascending byte order.
    #[error("dictionary keys out of order")]
    UnsortedKeys,

    /// The same dictionary key appeared twice.
    #[error("duplicate dictionary key")]
    DuplicateKey,

    /// Extra data exists after the bencode value.
    #[error("trailing data after value")]
    TrailingData,

    /// Recursion limit (64 levels) exceeded to prevent stack overflow.
    #[error("nesting too deep")]
    NestingTooDeep,
}

impl BencodeError {
    /// `true` when the error only means the input was cut short.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, BencodeError::UnexpectedEof)
    }
}
