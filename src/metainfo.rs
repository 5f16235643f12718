//! Torrent metainfo handling (BEP-3)
//!
//! This module parses single-file `.torrent` files into a structured model:
//! the file's identity (info hash), its decomposition into pieces, and each
//! piece's decomposition into 16 KiB blocks.

mod error;
mod info_hash;
mod piece;
mod torrent;

pub use error::MetainfoError;
pub use info_hash::InfoHash;
pub use piece::{Block, Piece, BLOCK_SIZE};
pub use torrent::{Info, Metainfo};
