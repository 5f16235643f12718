use tokio::io::{AsyncReadExt, AsyncWriteExt};

use super::*;
use crate::bencode::decode;
use crate::metainfo::InfoHash;

#[test]
fn test_parse_compact_peers() {
    let data = [
        0x0A, 0x00, 0x00, 0x01, 0x1A, 0xE1, // 10.0.0.1:6881
        192, 168, 1, 1, 0x1A, 0xE2, // 192.168.1.1:6882
    ];

    let peers = parse_compact_peers(&data).unwrap();
    assert_eq!(peers.len(), 2);
    assert_eq!(peers[0], "10.0.0.1:6881".parse().unwrap());
    assert_eq!(peers[1], "192.168.1.1:6882".parse().unwrap());
}

#[test]
fn test_parse_compact_peers_bad_length() {
    let data = [10, 0, 0, 1, 0x1A];
    assert!(matches!(
        parse_compact_peers(&data),
        Err(TrackerError::InvalidResponse(_))
    ));
}

#[test]
fn test_percent_encode() {
    assert_eq!(percent_encode(b"abc-_.~123"), "abc-_.~123");
    assert_eq!(percent_encode(&[0x1A, 0xE1, 0x00, b'/']), "%1A%E1%00%2F");
}

#[test]
fn test_announce_url_param_order() {
    let url = AnnounceUrl::new("http://t.example/announce")
        .param("info_hash", "%12%34")
        .param("peer_id", "00112233445566778899")
        .param("port", "6881")
        .param("compact", "1")
        .into_string();

    assert_eq!(
        url,
        "http://t.example/announce?info_hash=%12%34&peer_id=00112233445566778899&port=6881&compact=1"
    );
}

#[test]
fn test_response_from_value() {
    let mut body = Vec::new();
    body.extend_from_slice(b"d8:intervali1800e5:peers6:");
    body.extend_from_slice(&[10, 0, 0, 1, 0x1A, 0xE1]);
    body.push(b'e');

    let value = decode(&body).unwrap();
    let response = AnnounceResponse::from_value(&value).unwrap();
    assert_eq!(response.interval, 1800);
    assert_eq!(response.peers, vec!["10.0.0.1:6881".parse().unwrap()]);
}

#[test]
fn test_response_failure_reason() {
    let value = decode(b"d14:failure reason9:not founde").unwrap();
    match AnnounceResponse::from_value(&value) {
        Err(TrackerError::Failure(reason)) => assert_eq!(reason, "not found"),
        other => panic!("expected failure, got {:?}", other.map(|r| r.interval)),
    }
}

#[test]
fn test_response_missing_interval() {
    let value = decode(b"d5:peers0:e").unwrap();
    assert!(matches!(
        AnnounceResponse::from_value(&value),
        Err(TrackerError::InvalidResponse(_))
    ));
}

#[test]
fn test_http_tracker_invalid_url() {
    assert!(matches!(
        HttpTracker::new("udp://tracker.example.com:6969"),
        Err(TrackerError::InvalidUrl(_))
    ));
}

// Serves a single HTTP response on a local listener and returns the raw
// request it received.
async fn serve_once(body: Vec<u8>) -> (std::net::SocketAddr, tokio::task::JoinHandle<String>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut byte = [0u8; 1];
        while !request.ends_with(b"\r\n\r\n") {
            if stream.read(&mut byte).await.unwrap() == 0 {
                break;
            }
            request.push(byte[0]);
        }

        let header = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(header.as_bytes()).await.unwrap();
        stream.write_all(&body).await.unwrap();
        stream.flush().await.unwrap();

        String::from_utf8_lossy(&request).into_owned()
    });

    (addr, handle)
}

#[tokio::test]
async fn test_announce_against_local_tracker() {
    let mut body = Vec::new();
    body.extend_from_slice(b"d8:intervali900e5:peers12:");
    body.extend_from_slice(&[10, 0, 0, 1, 0x1A, 0xE1, 10, 0, 0, 2, 0x1A, 0xE2]);
    body.push(b'e');

    let (addr, server) = serve_once(body).await;

    let tracker = HttpTracker::new(&format!("http://{}/announce", addr)).unwrap();
    let response = tracker
        .announce(
            &InfoHash::from_bytes([0x12; 20]),
            b"00112233445566778899",
            6881,
            0,
            0,
            1000,
        )
        .await
        .unwrap();

    assert_eq!(response.interval, 900);
    assert_eq!(
        response.peers,
        vec![
            "10.0.0.1:6881".parse().unwrap(),
            "10.0.0.2:6882".parse().unwrap(),
        ]
    );

    // The query string carries the parameters in announce order, with the
    // info hash percent-encoded byte by byte.
    let request = server.await.unwrap();
    let expected_query = concat!(
        "/announce?info_hash=%12%12%12%12%12%12%12%12%12%12%12%12%12%12%12%12%12%12%12%12",
        "&peer_id=00112233445566778899",
        "&port=6881&uploaded=0&downloaded=0&compact=1&left=1000"
    );
    assert!(
        request.contains(expected_query),
        "request was: {}",
        request
    );
}

#[tokio::test]
async fn test_announce_tracker_failure() {
    let (addr, _server) = serve_once(b"d14:failure reason12:unregisterede".to_vec()).await;

    let tracker = HttpTracker::new(&format!("http://{}/announce", addr)).unwrap();
    let result = tracker
        .announce(
            &InfoHash::from_bytes([0x34; 20]),
            b"00112233445566778899",
            6881,
            0,
            0,
            42,
        )
        .await;

    assert!(matches!(result, Err(TrackerError::Failure(r)) if r == "unregistered"));
}
