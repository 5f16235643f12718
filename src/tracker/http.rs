use std::time::Duration;

use bytes::BytesMut;
use reqwest::Client;
use tracing::debug;

use super::error::TrackerError;
use super::response::AnnounceResponse;
use super::url::{percent_encode, AnnounceUrl};
use crate::bencode::{decode, BencodeError};
use crate::metainfo::InfoHash;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Default port advertised to the tracker.
pub const DEFAULT_PORT: u16 = 6881;

/// An HTTP tracker client (BEP-3).
///
/// # Examples
///
/// ```no_run
/// use riptide::metainfo::InfoHash;
/// use riptide::tracker::{HttpTracker, DEFAULT_PORT};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let tracker = HttpTracker::new("http://tracker.example.com/announce")?;
/// let response = tracker
///     .announce(
///         &InfoHash::from_bytes([0u8; 20]),
///         b"00112233445566778899",
///         DEFAULT_PORT,
///         0,    // uploaded
///         0,    // downloaded
///         1000, // left
///     )
///     .await?;
///
/// println!("found {} peers", response.peers.len());
/// # Ok(())
/// # }
/// ```
pub struct HttpTracker {
    client: Client,
    url: String,
}

impl HttpTracker {
    pub fn new(url: &str) -> Result<Self, TrackerError> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(TrackerError::InvalidUrl(url.to_string()));
        }

        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(TrackerError::Http)?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Announces to the tracker and returns its interval and peer list.
    ///
    /// The request is a GET on the announce URL carrying `info_hash`,
    /// `peer_id`, `port`, `uploaded`, `downloaded`, `compact=1`, and `left`.
    /// The response body is accumulated chunk by chunk and re-decoded from
    /// the start after each arrival until it forms a complete value.
    pub async fn announce(
        &self,
        info_hash: &InfoHash,
        peer_id: &[u8; 20],
        port: u16,
        uploaded: u64,
        downloaded: u64,
        left: u64,
    ) -> Result<AnnounceResponse, TrackerError> {
        let url = AnnounceUrl::new(&self.url)
            .param("info_hash", &info_hash.url_encode())
            .param("peer_id", &percent_encode(peer_id))
            .param("port", &port.to_string())
            .param("uploaded", &uploaded.to_string())
            .param("downloaded", &downloaded.to_string())
            .param("compact", "1")
            .param("left", &left.to_string())
            .into_string();

        debug!(url = %url, "announcing to tracker");

        let mut response = self.client.get(&url).send().await?;

        let mut buf = BytesMut::new();
        let value = loop {
            match response.chunk().await? {
                Some(chunk) => {
                    buf.extend_from_slice(&chunk);
                    match decode(&buf) {
                        Ok(value) => break value,
                        // A prefix of the body; keep reading.
                        Err(BencodeError::UnexpectedEof) => continue,
                        Err(e) => return Err(e.into()),
                    }
                }
                None => {
                    return Err(TrackerError::InvalidResponse(
                        "truncated response body".into(),
                    ))
                }
            }
        };

        let announce = AnnounceResponse::from_value(&value)?;
        debug!(
            interval = announce.interval,
            peers = announce.peers.len(),
            "tracker responded"
        );

        Ok(announce)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
