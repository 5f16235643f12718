use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;

use riptide::bencode::{decode, Value};
use riptide::download::download_piece;
use riptide::metainfo::{Metainfo, Piece};
use riptide::peer::{parse_peer_addr, PeerConnection, PeerId};
use riptide::tracker::{HttpTracker, DEFAULT_PORT};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[clap(rename_all = "snake_case")]
enum Commands {
    /// Decode a bencoded value and print it
    Decode { value: String },
    /// Print a torrent's metadata
    Info { torrent: PathBuf },
    /// Announce to the tracker and list peers
    Peers { torrent: PathBuf },
    /// Handshake with a peer and print its peer ID
    Handshake { torrent: PathBuf, peer: String },
    /// Download a single piece and write it to a file
    DownloadPiece {
        #[arg(short)]
        output: PathBuf,
        torrent: PathBuf,
        piece: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode { value } => {
            let decoded = decode(value.as_bytes()).context("decoding bencoded value")?;
            println!("{}", render(&decoded));
        }
        Commands::Info { torrent } => {
            let metainfo = read_torrent(&torrent)?;
            println!("Name: {}", metainfo.info.name);
            println!("Tracker URL: {}", metainfo.announce);
            println!("Length: {}", metainfo.info.total_length);
            println!("Info Hash: {}", metainfo.info_hash);
            println!("Piece Length: {}", metainfo.info.piece_length);
            println!("Piece Hashes:");
            for piece in &metainfo.info.pieces {
                println!("{}", hex(&piece.hash));
            }
        }
        Commands::Peers { torrent } => {
            let metainfo = read_torrent(&torrent)?;
            let response = announce(&metainfo, &PeerId::generate())
                .await
                .context("announcing to tracker")?;
            for peer in &response.peers {
                println!("{}", peer);
            }
        }
        Commands::Handshake { torrent, peer } => {
            let metainfo = read_torrent(&torrent)?;
            let addr = parse_peer_addr(&peer)?;
            let conn = PeerConnection::connect(
                addr,
                *metainfo.info_hash.as_bytes(),
                *PeerId::generate().as_bytes(),
            )
            .await
            .context("handshaking with peer")?;
            println!("Peer ID: {}", hex(conn.remote_peer_id()));
        }
        Commands::DownloadPiece {
            output,
            torrent,
            piece,
        } => {
            let metainfo = read_torrent(&torrent)?;
            let target = metainfo
                .info
                .pieces
                .get(piece)
                .with_context(|| format!("piece {} out of range", piece))?;

            let peer_id = PeerId::generate();
            let response = announce(&metainfo, &peer_id)
                .await
                .context("announcing to tracker")?;
            if response.peers.is_empty() {
                bail!("tracker returned no peers");
            }

            let data = fetch_from_any(&response.peers, &metainfo, target, &peer_id).await?;
            std::fs::write(&output, &data)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("Piece {} downloaded to {}.", piece, output.display());
        }
    }

    Ok(())
}

fn read_torrent(path: &Path) -> Result<Metainfo> {
    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Metainfo::from_bytes(&data).with_context(|| format!("parsing {}", path.display()))
}

async fn announce(metainfo: &Metainfo, peer_id: &PeerId) -> Result<riptide::AnnounceResponse> {
    let tracker = HttpTracker::new(&metainfo.announce)?;
    let response = tracker
        .announce(
            &metainfo.info_hash,
            peer_id.as_bytes(),
            DEFAULT_PORT,
            0,
            0,
            metainfo.info.total_length,
        )
        .await?;
    Ok(response)
}

// Tries peers in tracker order until one serves the piece.
async fn fetch_from_any(
    peers: &[SocketAddr],
    metainfo: &Metainfo,
    piece: &Piece,
    peer_id: &PeerId,
) -> Result<Vec<u8>> {
    for &addr in peers {
        let result = async {
            let mut conn = PeerConnection::connect(
                addr,
                *metainfo.info_hash.as_bytes(),
                *peer_id.as_bytes(),
            )
            .await?;
            anyhow::Ok(download_piece(&mut conn, piece).await?)
        }
        .await;

        match result {
            Ok(data) => return Ok(data),
            Err(e) => warn!(peer = %addr, error = %e, "peer failed, trying next"),
        }
    }

    bail!("no peer could serve piece {}", piece.index)
}

fn render(value: &Value) -> String {
    match value {
        Value::Integer(i) => i.to_string(),
        Value::Bytes(b) => format!("\"{}\"", String::from_utf8_lossy(b)),
        Value::List(items) => {
            let inner: Vec<String> = items.iter().map(render).collect();
            format!("[{}]", inner.join(","))
        }
        Value::Dict(dict) => {
            let inner: Vec<String> = dict
                .iter()
                .map(|(k, v)| format!("\"{}\":{}", String::from_utf8_lossy(k), render(v)))
                .collect();
            format!("{{{}}}", inner.join(","))
        }
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::new(), |mut s, b| {
        use std::fmt::Write;
        let _ = write!(s, "{:02x}", b);
        s
    })
}
