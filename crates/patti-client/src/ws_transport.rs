//! WebSocket transport implementation for native targets.
//!
//! Uses `tokio-tungstenite` to provide a [`Transport`] over the game-room
//! socket. Used by the terminal watcher.

use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::transport::{Transport, TransportError};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket transport for native (non-WASM) targets.
pub struct WsTransport {
    stream: WsStream,
}

impl WsTransport {
    /// Connect to a game-room endpoint such as `ws://host/ws/game/42/`.
    ///
    /// Resolves after the server accepts the handshake.
    pub async fn connect(url: &str) -> Result<Self, TransportError> {
        let (stream, _response) = connect_async(url)
            .await
            .map_err(|e| TransportError::Io(e.to_string()))?;
        Ok(Self { stream })
    }
}

impl Transport for WsTransport {
    /// `connect` already waited for the handshake.
    async fn open(&mut self) -> Result<(), TransportError> {
        Ok(())
    }

    async fn recv(&mut self) -> Result<Option<String>, TransportError> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Some(text.to_string())),
                Some(Ok(Message::Close(_))) => return Ok(None),
                None => return Err(TransportError::ConnectionClosed),
                // Binary, ping and pong frames carry no table state.
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(TransportError::Io(e.to_string())),
            }
        }
    }
}
