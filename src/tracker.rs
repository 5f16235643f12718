//! HTTP tracker protocol (BEP-3, BEP-23)
//!
//! Trackers are servers that help peers find each other. A client "announces"
//! itself with an HTTP GET carrying the torrent's info hash and transfer
//! statistics; the tracker answers with a bencoded dictionary containing a
//! re-announce interval and a compact peer list.
//!
//! The response body is decoded incrementally as it streams in: after every
//! chunk the accumulated buffer is decoded from the start, and an incomplete
//! result just means the body has not finished arriving.
//!
//! ```no_run
//! use riptide::metainfo::Metainfo;
//! use riptide::tracker::{HttpTracker, DEFAULT_PORT};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! # let metainfo = Metainfo::from_bytes(&[])?;
//! let tracker = HttpTracker::new(&metainfo.announce)?;
//! let response = tracker
//!     .announce(
//!         &metainfo.info_hash,
//!         b"00112233445566778899",
//!         DEFAULT_PORT,
//!         0,
//!         0,
//!         metainfo.info.total_length,
//!     )
//!     .await?;
//!
//! for peer in &response.peers {
//!     println!("{}", peer);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod http;
mod response;
mod url;

pub use error::TrackerError;
pub use http::{HttpTracker, DEFAULT_PORT};
pub use response::{parse_compact_peers, AnnounceResponse};
pub use url::{percent_encode, AnnounceUrl};

#[cfg(test)]
mod tests;
