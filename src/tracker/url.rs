/// Builds an announce URL by appending query parameters to a base URL.
///
/// The base is copied verbatim; the first [`param`](AnnounceUrl::param) call
/// appends `?`, later calls `&`. Keys and values are used as-is, so anything
/// that needs escaping (the raw info hash in particular) must be
/// percent-encoded by the caller first.
///
/// # Examples
///
/// ```
/// use riptide::tracker::AnnounceUrl;
///
/// let url = AnnounceUrl::new("http://tracker.example.com/announce")
///     .param("port", "6881")
///     .param("compact", "1")
///     .into_string();
/// assert_eq!(url, "http://tracker.example.com/announce?port=6881&compact=1");
/// ```
#[derive(Debug, Clone)]
pub struct AnnounceUrl {
    url: String,
    has_query: bool,
}

impl AnnounceUrl {
    /// Starts a URL from the given base.
    pub fn new(base: &str) -> Self {
        Self {
            url: base.to_string(),
            has_query: false,
        }
    }

    /// Appends one `key=value` query parameter.
    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.url.push(if self.has_query { '&' } else { '?' });
        self.has_query = true;
        self.url.push_str(key);
        self.url.push('=');
        self.url.push_str(value);
        self
    }

    /// Returns the finished URL.
    pub fn into_string(self) -> String {
        self.url
    }
}

/// Percent-encodes raw bytes per RFC 3986.
///
/// Unreserved bytes (`A-Z a-z 0-9 - _ . ~`) pass through; every other byte
/// becomes `%XX`. This is the encoding the announce query expects for binary
/// values such as the info hash.
pub fn percent_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for &b in bytes {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') {
            out.push(b as char);
        } else {
            use std::fmt::Write;
            let _ = write!(out, "%{:02X}", b);
        }
    }
    out
}
