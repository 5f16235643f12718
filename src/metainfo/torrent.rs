use super::error::MetainfoError;
use super::info_hash::InfoHash;
use super::piece::Piece;
use crate::bencode::{decode, encode, Value};
use bytes::Bytes;

/// A parsed single-file torrent.
///
/// # Examples
///
/// ```no_run
/// use riptide::metainfo::Metainfo;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let data = std::fs::read("example.torrent")?;
/// let metainfo = Metainfo::from_bytes(&data)?;
///
/// println!("Torrent: {}", metainfo.info.name);
/// println!("Size: {} bytes", metainfo.info.total_length);
/// println!("Info hash: {}", metainfo.info_hash);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Metainfo {
    /// Tracker announce URL.
    pub announce: String,
    /// The info dictionary containing file and piece information.
    pub info: Info,
    /// The unique identifier for this torrent (hash of the info dictionary).
    pub info_hash: InfoHash,
    raw_info: Bytes,
}

/// The info dictionary from a torrent file.
#[derive(Debug, Clone)]
pub struct Info {
    /// Suggested name for the downloaded file.
    pub name: String,
    /// Number of bytes per piece (the last piece may be shorter).
    pub piece_length: u64,
    /// Total size of the file in bytes.
    pub total_length: u64,
    /// Per-piece sizes, hashes, and block layouts.
    pub pieces: Vec<Piece>,
}

impl Metainfo {
    /// Parses a torrent file from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The data is not valid bencode
    /// - `announce` or a required info field is missing or the wrong kind
    /// - The torrent is not single-file
    /// - The `pieces` field is empty, not a multiple of 20 bytes, or does not
    ///   agree with the piece count implied by `length` and `piece length`
    pub fn from_bytes(data: &[u8]) -> Result<Self, MetainfoError> {
        let value = decode(data)?;
        let dict = value.as_dict().ok_or(MetainfoError::InvalidField("root"))?;

        let announce = dict
            .get(b"announce".as_slice())
            .and_then(|v| v.as_str())
            .ok_or(MetainfoError::MissingField("announce"))?
            .to_string();

        let info_value = dict
            .get(b"info".as_slice())
            .ok_or(MetainfoError::MissingField("info"))?;

        let raw_info = Bytes::from(encode(info_value));
        let info_hash = InfoHash::from_info_bytes(&raw_info);

        let info = parse_info(info_value)?;

        Ok(Self {
            announce,
            info,
            info_hash,
            raw_info,
        })
    }

    /// Returns the raw bencoded info dictionary.
    ///
    /// These are the exact bytes the info hash is computed over.
    pub fn raw_info(&self) -> &Bytes {
        &self.raw_info
    }
}

impl Info {
    /// Number of pieces in the torrent.
    pub fn num_pieces(&self) -> usize {
        self.pieces.len()
    }
}

fn parse_info(value: &Value) -> Result<Info, MetainfoError> {
    let dict = value.as_dict().ok_or(MetainfoError::InvalidField("info"))?;

    let name = dict
        .get(b"name".as_slice())
        .and_then(|v| v.as_str())
        .ok_or(MetainfoError::MissingField("name"))?
        .to_string();

    let total_length = dict
        .get(b"length".as_slice())
        .and_then(|v| v.as_integer())
        .ok_or(MetainfoError::MissingField("length"))?;

    if total_length < 0 {
        return Err(MetainfoError::InvalidField("length"));
    }
    let total_length = total_length as u64;

    let piece_length = dict
        .get(b"piece length".as_slice())
        .and_then(|v| v.as_integer())
        .ok_or(MetainfoError::MissingField("piece length"))?;

    if piece_length <= 0 {
        return Err(MetainfoError::InvalidField("piece length"));
    }
    let piece_length = piece_length as u64;

    let pieces_bytes = dict
        .get(b"pieces".as_slice())
        .and_then(|v| v.as_bytes())
        .ok_or(MetainfoError::MissingField("pieces"))?;

    if pieces_bytes.is_empty() || pieces_bytes.len() % 20 != 0 {
        return Err(MetainfoError::InvalidField("pieces"));
    }

    let num_pieces = pieces_bytes.len() / 20;
    if num_pieces as u64 != total_length.div_ceil(piece_length) {
        return Err(MetainfoError::InvalidField("pieces"));
    }

    let pieces = pieces_bytes
        .chunks_exact(20)
        .enumerate()
        .map(|(index, chunk)| {
            let mut hash = [0u8; 20];
            hash.copy_from_slice(chunk);
            let size = if index + 1 < num_pieces {
                piece_length
            } else {
                // Last piece: whatever the file size leaves over.
                match total_length % piece_length {
                    0 => piece_length,
                    remainder => remainder,
                }
            };
            Piece::new(index, size, hash)
        })
        .collect();

    Ok(Info {
        name,
        piece_length,
        total_length,
        pieces,
    })
}
