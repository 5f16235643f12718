//! Bencode encoding and decoding (BEP-3)
//!
//! Bencode is the encoding used by BitTorrent for storing and transmitting
//! loosely structured data. The decoder here is incremental: handed a prefix
//! of a valid value it reports "more bytes needed" rather than a hard error,
//! so it can be driven against a buffer that grows as a tracker response
//! streams in.

mod decode;
mod encode;
mod error;
mod value;

pub use decode::{decode, decode_prefix};
pub use encode::{encode, encode_into};
pub use error::BencodeError;
pub use value::Value;

#[cfg(test)]
mod tests;
