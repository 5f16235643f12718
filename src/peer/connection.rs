use super::error::PeerError;
use super::message::{Handshake, Message};
use super::transport::PeerTransport;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio::net::TcpStream;
use tracing::debug;

/// Choke and interest bookkeeping for one connection.
///
/// Both sides start choked and uninterested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChokeState {
    pub am_choking: bool,
    pub am_interested: bool,
    pub peer_choking: bool,
    pub peer_interested: bool,
}

impl Default for ChokeState {
    fn default() -> Self {
        Self {
            am_choking: true,
            am_interested: false,
            peer_choking: true,
            peer_interested: false,
        }
    }
}

/// An established connection to a peer.
///
/// `connect` dials the peer, exchanges handshakes, and returns a connection
/// ready for message exchange. The remote handshake is kept verbatim; the
/// caller decides what to make of its info hash and peer ID.
pub struct PeerConnection {
    pub addr: SocketAddr,
    /// The handshake the remote side sent, as received.
    pub remote: Handshake,
    pub choke: ChokeState,
    transport: PeerTransport,
}

impl PeerConnection {
    /// Connects to a peer and performs the handshake.
    pub async fn connect(
        addr: SocketAddr,
        info_hash: [u8; 20],
        peer_id: [u8; 20],
    ) -> Result<Self, PeerError> {
        let stream = TcpStream::connect(addr).await?;
        let mut transport = PeerTransport::new(stream);

        transport
            .send_handshake(&Handshake::new(info_hash, peer_id))
            .await?;
        let remote = transport.receive_handshake().await?;

        debug!(peer = %addr, "handshake complete");

        Ok(Self {
            addr,
            remote,
            choke: ChokeState::default(),
            transport,
        })
    }

    /// The peer ID the remote side announced in its handshake.
    pub fn remote_peer_id(&self) -> &[u8; 20] {
        &self.remote.peer_id
    }

    /// Sends a message, tracking our side of the choke state.
    pub async fn send(&mut self, message: Message) -> Result<(), PeerError> {
        match &message {
            Message::Choke => self.choke.am_choking = true,
            Message::Unchoke => self.choke.am_choking = false,
            Message::Interested => self.choke.am_interested = true,
            Message::NotInterested => self.choke.am_interested = false,
            _ => {}
        }
        self.transport.send_message(&message).await
    }

    /// Receives the next message, tracking the peer's side of the choke state.
    pub async fn receive(&mut self) -> Result<Message, PeerError> {
        let message = self.transport.receive_message().await?;

        match &message {
            Message::Choke => self.choke.peer_choking = true,
            Message::Unchoke => self.choke.peer_choking = false,
            Message::Interested => self.choke.peer_interested = true,
            Message::NotInterested => self.choke.peer_interested = false,
            _ => {}
        }

        Ok(message)
    }
}

/// Parses an `ip:port` peer address.
///
/// IPv4 only; the port must be in `1..=65535`.
///
/// # Examples
///
/// ```
/// use riptide::peer::parse_peer_addr;
///
/// let addr = parse_peer_addr("10.0.0.1:6881").unwrap();
/// assert_eq!(addr.port(), 6881);
///
/// assert!(parse_peer_addr("10.0.0.1").is_err());
/// assert!(parse_peer_addr(":6881").is_err());
/// assert!(parse_peer_addr("10.0.0.1:0").is_err());
/// ```
pub fn parse_peer_addr(addr: &str) -> Result<SocketAddr, PeerError> {
    let (ip, port) = addr
        .split_once(':')
        .ok_or_else(|| PeerError::InvalidAddress(addr.to_string()))?;

    let ip: Ipv4Addr = ip
        .parse()
        .map_err(|_| PeerError::InvalidAddress(addr.to_string()))?;

    let port: u16 = port
        .parse()
        .map_err(|_| PeerError::InvalidAddress(addr.to_string()))?;

    if port == 0 {
        return Err(PeerError::InvalidAddress(addr.to_string()));
    }

    Ok(SocketAddr::new(IpAddr::V4(ip), port))
}
