//! riptide - a single-file BitTorrent client
//!
//! Given a `.torrent` file describing a single file, riptide contacts the
//! HTTP tracker to discover peers, handshakes with them over TCP, and
//! downloads the file's pieces, verifying each against its SHA-1 hash.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 bencode encoding and incremental decoding
//! - [`metainfo`] - Torrent metainfo, piece/block layout, info hashes
//! - [`tracker`] - HTTP tracker announces and compact peer lists
//! - [`peer`] - Peer wire protocol: handshake, messages, transport
//! - [`download`] - Piece download and verification over one peer

pub mod bencode;
pub mod download;
pub mod metainfo;
pub mod peer;
pub mod tracker;

pub use bencode::{decode, decode_prefix, encode, BencodeError, Value};
pub use download::{download_piece, DownloadError};
pub use metainfo::{Info, InfoHash, Metainfo, MetainfoError};
pub use peer::{Handshake, Message, PeerConnection, PeerError, PeerId};
pub use tracker::{AnnounceResponse, HttpTracker, TrackerError};
