/// Standard block size (16 KiB), the unit of request in the peer protocol.
pub const BLOCK_SIZE: u32 = 16384;

/// A fixed-size slice of a piece.
///
/// Blocks are laid out back to back at ascending offsets; all are
/// [`BLOCK_SIZE`] long except possibly the last one in a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Byte offset within the piece.
    pub offset: u32,
    /// Length of the block in bytes.
    pub length: u32,
}

/// One piece of the torrent payload.
///
/// Every piece is `piece length` bytes except possibly the last, and each is
/// hashed independently so downloads can be verified piece by piece.
#[derive(Debug, Clone)]
pub struct Piece {
    /// Index of this piece within the torrent.
    pub index: usize,
    /// Actual size of this piece in bytes.
    pub size: u64,
    /// SHA-1 hash the downloaded piece must match.
    pub hash: [u8; 20],
    /// Block layout, ascending by offset.
    pub blocks: Vec<Block>,
}

impl Piece {
    pub(crate) fn new(index: usize, size: u64, hash: [u8; 20]) -> Self {
        Self {
            index,
            size,
            hash,
            blocks: layout_blocks(size),
        }
    }

    /// Number of blocks in this piece.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

fn layout_blocks(piece_size: u64) -> Vec<Block> {
    let count = piece_size.div_ceil(BLOCK_SIZE as u64) as usize;
    let mut blocks = Vec::with_capacity(count);

    let mut offset = 0u64;
    while offset < piece_size {
        let length = std::cmp::min(BLOCK_SIZE as u64, piece_size - offset);
        blocks.push(Block {
            offset: offset as u32,
            length: length as u32,
        });
        offset += length;
    }

    blocks
}
