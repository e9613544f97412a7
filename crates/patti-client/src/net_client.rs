//! Framework-agnostic network client for the game-room socket.
//!
//! Spawns a background reader (or registers socket callbacks on the web) and
//! exposes a channel of [`NetEvent`]s, so the caller applies frames without
//! owning the socket directly. The channel closing signals that the socket
//! closed; [`NetEvent::Opened`] is only sent once the server has accepted the
//! connection.
//!
//! Use [`NetClient::from_transport`] to construct a client over any
//! [`Transport`](crate::transport::Transport) implementation, or
//! [`connect_ws`](NetClient::connect_ws) for the game-room WebSocket.

use tokio::sync::mpsc;

use crate::transport::TransportError;
#[cfg(feature = "native")]
use crate::transport::Transport;

/// One event from the socket, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetEvent {
    /// The handshake completed.
    Opened,
    /// A text frame.
    Frame(String),
}

/// A channel-based client for one game-room socket.
pub struct NetClient {
    /// Socket events. Channel close = disconnected.
    pub incoming: mpsc::UnboundedReceiver<NetEvent>,
    /// Keeps the browser socket handle owned for the page's lifetime.
    #[cfg(all(feature = "web", not(feature = "native")))]
    _socket: web_sys::WebSocket,
}

impl NetClient {
    // ------------------------------------------------------------------
    // Generic transport constructor (native only — uses tokio::spawn)
    // ------------------------------------------------------------------

    /// Create a `NetClient` over any [`Transport`] implementation.
    #[cfg(feature = "native")]
    pub fn from_transport<T: Transport>(transport: T) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self::spawn_reader_task(transport, event_tx);
        Self { incoming: event_rx }
    }

    /// Connect to the game-room WebSocket and spawn the reader task.
    ///
    /// No handshake payload is sent.
    #[cfg(feature = "native")]
    pub async fn connect_ws(url: &str) -> Result<Self, TransportError> {
        let transport = crate::ws_transport::WsTransport::connect(url).await?;
        Ok(Self::from_transport(transport))
    }

    // ------------------------------------------------------------------
    // WASM WebSocket constructor
    // ------------------------------------------------------------------

    /// Open the game-room WebSocket from a WASM environment.
    ///
    /// Returns while the socket is still connecting. `open`, `message` and
    /// `close` callbacks feed the channel; the sender is dropped on close.
    #[cfg(all(feature = "web", not(feature = "native")))]
    pub async fn connect_ws(url: &str) -> Result<Self, TransportError> {
        use std::cell::RefCell;
        use std::rc::Rc;

        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;
        use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

        let ws = WebSocket::new(url).map_err(|e| TransportError::Io(format!("{e:?}")))?;

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let sender = Rc::new(RefCell::new(Some(event_tx)));

        let onopen = {
            let sender = Rc::clone(&sender);
            Closure::<dyn FnMut()>::new(move || {
                if let Some(tx) = sender.borrow().as_ref() {
                    let _ = tx.send(NetEvent::Opened);
                }
            })
        };
        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        onopen.forget();

        let onmessage = {
            let sender = Rc::clone(&sender);
            Closure::<dyn FnMut(MessageEvent)>::new(move |e: MessageEvent| {
                // Binary frames carry no table state.
                let Some(text) = e.data().as_string() else {
                    return;
                };
                if let Some(tx) = sender.borrow().as_ref() {
                    let _ = tx.send(NetEvent::Frame(text));
                }
            })
        };
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        onmessage.forget();

        let onerror = Closure::<dyn FnMut(Event)>::new(move |_e: Event| {
            tracing::warn!("socket error");
        });
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();

        let onclose = {
            let sender = Rc::clone(&sender);
            Closure::<dyn FnMut(CloseEvent)>::new(move |e: CloseEvent| {
                tracing::debug!(code = e.code(), reason = %e.reason(), "socket closed");
                sender.borrow_mut().take();
            })
        };
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));
        onclose.forget();

        Ok(Self {
            incoming: event_rx,
            _socket: ws,
        })
    }

    // ------------------------------------------------------------------
    // Private: background task spawner (native only)
    // ------------------------------------------------------------------

    #[cfg(feature = "native")]
    fn spawn_reader_task<T: Transport>(
        mut transport: T,
        event_tx: mpsc::UnboundedSender<NetEvent>,
    ) {
        tokio::spawn(async move {
            if let Err(e) = transport.open().await {
                tracing::warn!("handshake failed: {e}");
                return;
            }
            if event_tx.send(NetEvent::Opened).is_err() {
                return;
            }
            loop {
                match transport.recv().await {
                    Ok(Some(frame)) => {
                        if event_tx.send(NetEvent::Frame(frame)).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(TransportError::ConnectionClosed) => {
                        tracing::warn!("socket dropped without a close frame");
                        break;
                    }
                    Err(e) => {
                        tracing::warn!("socket error: {e}");
                        break;
                    }
                }
            }
            // Connection closed or error — channel drops, signalling disconnect.
        });
    }
}

#[cfg(all(test, feature = "native"))]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;

    fn frame(text: &str) -> Option<NetEvent> {
        Some(NetEvent::Frame(text.to_string()))
    }

    #[test]
    fn opened_then_frames_in_order_then_channel_closes() {
        tokio_test::block_on(async {
            let transport = ScriptedTransport::frames(["one", "two"]);
            let mut net = NetClient::from_transport(transport);
            assert_eq!(net.incoming.recv().await, Some(NetEvent::Opened));
            assert_eq!(net.incoming.recv().await, frame("one"));
            assert_eq!(net.incoming.recv().await, frame("two"));
            assert_eq!(net.incoming.recv().await, None);
        });
    }

    #[test]
    fn transport_error_closes_channel() {
        tokio_test::block_on(async {
            let transport = ScriptedTransport::new(vec![
                Ok(Some("first".to_string())),
                Err(TransportError::ConnectionClosed),
                Ok(Some("never".to_string())),
            ]);
            let mut net = NetClient::from_transport(transport);
            assert_eq!(net.incoming.recv().await, Some(NetEvent::Opened));
            assert_eq!(net.incoming.recv().await, frame("first"));
            assert_eq!(net.incoming.recv().await, None);
        });
    }

    #[test]
    fn failed_handshake_sends_nothing() {
        tokio_test::block_on(async {
            let transport = ScriptedTransport::refusing(TransportError::Io("refused".to_string()));
            let mut net = NetClient::from_transport(transport);
            assert_eq!(net.incoming.recv().await, None);
        });
    }
}
