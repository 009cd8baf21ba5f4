//! Establishing the byte stream between the two peers.
//!
//! The listening peer plays Black and moves first; the connecting peer plays
//! White. Once connected the stream is handed to a `Session` and never
//! touched here again.

use log::info;
use shared::Player;
use std::io;
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Listens and accepts.
    Host,
    /// Connects to a host.
    Guest,
}

impl Role {
    pub fn color(self) -> Player {
        match self {
            Role::Host => Player::Black,
            Role::Guest => Player::White,
        }
    }
}

pub async fn listen<A: ToSocketAddrs>(addr: A) -> io::Result<TcpListener> {
    let listener = TcpListener::bind(addr).await?;
    info!("Waiting for a peer on {}", listener.local_addr()?);
    Ok(listener)
}

/// Accepts a single peer.
pub async fn accept_peer(listener: &TcpListener) -> io::Result<TcpStream> {
    let (stream, addr) = listener.accept().await?;
    stream.set_nodelay(true)?;
    info!("Peer connected from {}", addr);
    Ok(stream)
}

pub async fn connect_peer<A: ToSocketAddrs>(addr: A) -> io::Result<TcpStream> {
    let stream = TcpStream::connect(addr).await?;
    stream.set_nodelay(true)?;
    info!("Connected to {}", stream.peer_addr()?);
    Ok(stream)
}
