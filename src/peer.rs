//! Peer wire protocol (BEP-3)
//!
//! Peer connections open with a fixed 68-byte handshake and then exchange
//! length-prefixed messages. This module implements the handshake, the base
//! message set, and a buffered transport over TCP.

mod connection;
mod error;
mod message;
mod peer_id;
mod transport;

pub use connection::{parse_peer_addr, ChokeState, PeerConnection};
pub use error::PeerError;
pub use message::{Handshake, Message, MessageId, HANDSHAKE_LEN, PROTOCOL};
pub use peer_id::PeerId;
pub use transport::PeerTransport;
