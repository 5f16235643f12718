use sha1::{Digest, Sha1};
use std::fmt;

/// A torrent's identity: the 20-byte SHA-1 digest of its bencoded `info`
/// dictionary.
///
/// The digest is taken over the exact bytes of the bencoded form, which is
/// why the encoder's byte-exact round trip matters: every client hashing the
/// same info dictionary must arrive at the same 20 bytes.
///
/// # Examples
///
/// ```
/// use riptide::metainfo::InfoHash;
///
/// let hash = InfoHash::from_bytes([0xab; 20]);
/// assert_eq!(hash.to_hex(), "abababababababababababababababababababab");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfoHash(pub [u8; 20]);

impl InfoHash {
    /// Creates an info hash from a raw 20-byte digest.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Hashes the bencoded bytes of an info dictionary.
    pub fn from_info_bytes(info_bytes: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(info_bytes);
        Self(hasher.finalize().into())
    }

    /// Returns the raw bytes of the info hash.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Converts to a lowercase hexadecimal string.
    pub fn to_hex(&self) -> String {
        self.0.iter().fold(String::with_capacity(40), |mut s, b| {
            use std::fmt::Write;
            let _ = write!(s, "{:02x}", b);
            s
        })
    }

    /// Percent-encodes the raw digest for use in a tracker announce URL.
    ///
    /// RFC 3986 rules: unreserved bytes (`A-Z a-z 0-9 - _ . ~`) pass through,
    /// every other byte becomes `%XX`.
    pub fn url_encode(&self) -> String {
        crate::tracker::percent_encode(&self.0)
    }
}

impl fmt::Debug for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoHash({})", self.to_hex())
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
