//! Sequential piece download over a single peer connection.
//!
//! After the handshake the conversation for one piece is: wait out the
//! peer's opening traffic until it unchokes us, keep a bounded pipeline of
//! block requests in flight, collect the returned blocks, then verify the
//! assembled piece against its SHA-1 hash.

use bytes::Bytes;
use sha1::{Digest, Sha1};
use thiserror::Error;
use tracing::{debug, warn};

use crate::metainfo::{Piece, BLOCK_SIZE};
use crate::peer::{Message, PeerConnection, PeerError};

/// How many block requests are kept in flight at once.
const PIPELINE_DEPTH: usize = 5;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("peer error: {0}")]
    Peer(#[from] PeerError),

    #[error("peer choked us mid-transfer")]
    Choked,

    #[error("unexpected block: piece {index}, offset {begin}")]
    UnexpectedBlock { index: u32, begin: u32 },

    #[error("piece {index} failed hash verification")]
    HashMismatch { index: usize },
}

// Collects the blocks of one piece as they arrive, slotted by offset.
struct PieceAssembly<'a> {
    piece: &'a Piece,
    blocks: Vec<Option<Bytes>>,
    blocks_received: usize,
}

impl<'a> PieceAssembly<'a> {
    fn new(piece: &'a Piece) -> Self {
        Self {
            piece,
            blocks: vec![None; piece.block_count()],
            blocks_received: 0,
        }
    }

    fn accept(&mut self, begin: u32, data: Bytes) -> Result<(), DownloadError> {
        let slot = (begin / BLOCK_SIZE) as usize;

        let expected = self
            .piece
            .blocks
            .get(slot)
            .filter(|b| b.offset == begin && b.length as usize == data.len());

        if expected.is_none() || self.blocks[slot].is_some() {
            return Err(DownloadError::UnexpectedBlock {
                index: self.piece.index as u32,
                begin,
            });
        }

        self.blocks[slot] = Some(data);
        self.blocks_received += 1;
        Ok(())
    }

    fn is_complete(&self) -> bool {
        self.blocks_received == self.blocks.len()
    }

    // Concatenates the blocks in ascending offset order.
    fn assemble(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.piece.size as usize);
        for block in self.blocks.into_iter().flatten() {
            out.extend_from_slice(&block);
        }
        out
    }
}

/// Downloads one piece from a connected peer and verifies it.
///
/// Sends `Interested`, waits for `Unchoke` (tolerating whatever the peer
/// sends first, typically its bitfield), then requests every block of the
/// piece with a bounded number of requests outstanding.
///
/// # Errors
///
/// Fails on transport errors, on blocks that were never requested, if the
/// peer chokes us once the transfer has started, or if the assembled piece
/// does not match its hash.
pub async fn download_piece(
    conn: &mut PeerConnection,
    piece: &Piece,
) -> Result<Vec<u8>, DownloadError> {
    conn.send(Message::Interested).await?;

    while conn.choke.peer_choking {
        let message = conn.receive().await?;
        debug!(piece = piece.index, ?message, "waiting for unchoke");
    }

    let mut assembly = PieceAssembly::new(piece);
    let mut next_request = 0;
    let mut in_flight = 0;

    while !assembly.is_complete() {
        while in_flight < PIPELINE_DEPTH && next_request < piece.blocks.len() {
            let block = piece.blocks[next_request];
            conn.send(Message::Request {
                index: piece.index as u32,
                begin: block.offset,
                length: block.length,
            })
            .await?;
            next_request += 1;
            in_flight += 1;
        }

        match conn.receive().await? {
            Message::Piece { index, begin, data } => {
                if index as usize != piece.index {
                    return Err(DownloadError::UnexpectedBlock { index, begin });
                }
                assembly.accept(begin, data)?;
                in_flight -= 1;
            }
            Message::Choke => return Err(DownloadError::Choked),
            other => {
                debug!(piece = piece.index, ?other, "ignoring message");
            }
        }
    }

    let data = assembly.assemble();

    let digest: [u8; 20] = Sha1::digest(&data).into();
    if digest != piece.hash {
        warn!(piece = piece.index, "piece failed hash verification");
        return Err(DownloadError::HashMismatch { index: piece.index });
    }

    debug!(piece = piece.index, bytes = data.len(), "piece verified");
    Ok(data)
}
