use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use super::error::TrackerError;
use crate::bencode::Value;

/// A successful tracker announce response.
#[derive(Debug, Clone)]
pub struct AnnounceResponse {
    /// Seconds the tracker wants us to wait before re-announcing.
    pub interval: i64,
    /// Peers in the order the tracker listed them.
    pub peers: Vec<SocketAddr>,
}

impl AnnounceResponse {
    /// Extracts an announce response from a decoded tracker dictionary.
    ///
    /// A `failure reason` key wins over everything else and surfaces as
    /// [`TrackerError::Failure`]; otherwise `interval` and a compact `peers`
    /// string are required.
    pub fn from_value(value: &Value) -> Result<Self, TrackerError> {
        let dict = value
            .as_dict()
            .ok_or_else(|| TrackerError::InvalidResponse("expected dictionary".into()))?;

        if let Some(failure) = dict.get(b"failure reason".as_slice()) {
            let reason = failure.as_str().ok_or_else(|| {
                TrackerError::InvalidResponse("failure reason is not a string".into())
            })?;
            return Err(TrackerError::Failure(reason.to_string()));
        }

        let interval = dict
            .get(b"interval".as_slice())
            .and_then(|v| v.as_integer())
            .ok_or_else(|| TrackerError::InvalidResponse("missing interval".into()))?;

        let peers_bytes = dict
            .get(b"peers".as_slice())
            .and_then(|v| v.as_bytes())
            .ok_or_else(|| TrackerError::InvalidResponse("missing peers".into()))?;

        let peers = parse_compact_peers(peers_bytes)?;

        Ok(Self { interval, peers })
    }
}

/// Parses a compact peer list (BEP-23).
///
/// Each 6-byte group is 4 IPv4 octets followed by a big-endian port. Order is
/// preserved. A length that is not a multiple of 6 is rejected.
pub fn parse_compact_peers(data: &[u8]) -> Result<Vec<SocketAddr>, TrackerError> {
    if data.len() % 6 != 0 {
        return Err(TrackerError::InvalidResponse(
            "peer list length not a multiple of 6".into(),
        ));
    }

    Ok(data
        .chunks_exact(6)
        .map(|chunk| {
            let ip = Ipv4Addr::new(chunk[0], chunk[1], chunk[2], chunk[3]);
            let port = u16::from_be_bytes([chunk[4], chunk[5]]);
            SocketAddr::new(IpAddr::V4(ip), port)
        })
        .collect())
}
