//! Framework-agnostic room session.
//!
//! Owns a [`NetClient`] and a [`GameRoomClient`] and feeds one into the
//! other. Frontends only need to:
//! 1. Build a session with [`RoomSession::connect_ws`].
//! 2. Call [`RoomSession::recv`] in a loop (or [`RoomSession::run`]).

use patti_core::config::ClientConfig;
use patti_core::document::TableDocument;
use patti_core::room_client::{ClientError, GameRoomClient};

use crate::net_client::{NetClient, NetEvent};
#[cfg(feature = "native")]
use crate::transport::Transport;
use crate::transport::TransportError;

/// Outcome of processing a single network event.
#[derive(Debug)]
pub enum PollResult {
    /// The server accepted the connection.
    Opened,
    /// A frame was applied to the document.
    Applied,
    /// A frame could not be applied; the socket stays open.
    Rejected(ClientError),
    /// The server closed the connection.
    Disconnected,
    /// No frame was available (channel empty).
    Empty,
}

pub struct RoomSession<D> {
    net: NetClient,
    client: GameRoomClient<D>,
}

impl<D: TableDocument> RoomSession<D> {
    /// Wrap a [`NetClient`]. `on_open` fires when its `Opened` event arrives.
    pub fn new(net: NetClient, config: &ClientConfig, document: D) -> Self {
        let client = GameRoomClient::new(config, document);
        Self { net, client }
    }

    /// Create a session over any [`Transport`] implementation.
    #[cfg(feature = "native")]
    pub fn from_transport<T: Transport>(
        transport: T,
        config: &ClientConfig,
        document: D,
    ) -> Self {
        Self::new(NetClient::from_transport(transport), config, document)
    }

    /// Open the game-room socket described by `config`.
    #[cfg(any(feature = "native", feature = "web"))]
    pub async fn connect_ws(config: &ClientConfig, document: D) -> Result<Self, TransportError> {
        let url = config.endpoint_url();
        tracing::info!(room = config.game_room_id(), %url, "connecting");
        let net = NetClient::connect_ws(&url).await?;
        Ok(Self::new(net, config, document))
    }

    pub fn client(&self) -> &GameRoomClient<D> {
        &self.client
    }

    pub fn document(&self) -> &D {
        self.client.document()
    }

    /// Try to receive and handle one event (non-blocking).
    pub fn try_recv(&mut self) -> PollResult {
        match self.net.incoming.try_recv() {
            Ok(event) => self.handle_event(event),
            Err(tokio::sync::mpsc::error::TryRecvError::Empty) => PollResult::Empty,
            Err(tokio::sync::mpsc::error::TryRecvError::Disconnected) => self.handle_close(),
        }
    }

    /// Await the next event and handle it.
    pub async fn recv(&mut self) -> PollResult {
        match self.net.incoming.recv().await {
            Some(event) => self.handle_event(event),
            None => self.handle_close(),
        }
    }

    /// Apply frames until the socket closes. Rejected frames are logged and
    /// dropped.
    pub async fn run(&mut self) {
        loop {
            match self.recv().await {
                PollResult::Opened | PollResult::Applied | PollResult::Empty => {}
                PollResult::Rejected(e) => log_rejected(self.client.room_id(), &e),
                PollResult::Disconnected => return,
            }
        }
    }

    // -- private -----------------------------------------------------------

    fn handle_event(&mut self, event: NetEvent) -> PollResult {
        match event {
            NetEvent::Opened => {
                self.client.on_open();
                PollResult::Opened
            }
            NetEvent::Frame(frame) => match self.client.on_message(&frame) {
                Ok(()) => PollResult::Applied,
                Err(e) => PollResult::Rejected(e),
            },
        }
    }

    fn handle_close(&mut self) -> PollResult {
        self.client.on_close();
        PollResult::Disconnected
    }
}

/// Log a frame that could not be applied.
pub fn log_rejected(room: &str, error: &ClientError) {
    tracing::error!(room, "failed to apply frame: {error}");
}

#[cfg(all(test, feature = "native"))]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use patti_core::document::MemoryDocument;
    use patti_core::protocol::PlayerId;
    use patti_core::room_client::ConnectionState;

    fn config() -> ClientConfig {
        ClientConfig::new("localhost:8000", "42").unwrap()
    }

    #[test]
    fn applies_frames_in_order_and_reports_close() {
        tokio_test::block_on(async {
            let transport = ScriptedTransport::frames([
                concat!(
                    r#"{"pot":10,"current_bet":2,"#,
                    r#""players":[{"id":1,"username":"asha","status":"waiting"}]}"#,
                ),
                concat!(
                    r#"{"pot":30,"current_bet":5,"#,
                    r#""players":[{"id":2,"username":"bo","status":"turn"}]}"#,
                ),
            ]);
            let doc = MemoryDocument::table();
            let mut session = RoomSession::from_transport(transport, &config(), doc);
            assert_eq!(session.client().state(), ConnectionState::Connecting);

            assert!(matches!(session.recv().await, PollResult::Opened));
            assert_eq!(session.client().state(), ConnectionState::Open);
            assert!(matches!(session.recv().await, PollResult::Applied));
            assert!(matches!(session.recv().await, PollResult::Applied));
            assert!(matches!(session.recv().await, PollResult::Disconnected));

            let doc = session.document();
            assert_eq!(doc.pot.as_deref(), Some("30"));
            assert_eq!(doc.current_bet.as_deref(), Some("♦ 5"));
            assert_eq!(doc.list_items(), ["bo (turn)"]);
            assert_eq!(session.client().state(), ConnectionState::Closed);
            assert!(session.client().was_opened());
        });
    }

    #[test]
    fn malformed_frame_is_rejected_and_session_continues() {
        tokio_test::block_on(async {
            let transport = ScriptedTransport::frames([
                "garbage",
                r#"{"player_left":true,"player_id":3}"#,
            ]);
            let doc = MemoryDocument::table().with_player_row(3, "waiting");
            let mut session = RoomSession::from_transport(transport, &config(), doc);

            assert!(matches!(session.recv().await, PollResult::Opened));
            assert!(matches!(
                session.recv().await,
                PollResult::Rejected(ClientError::Decode(_))
            ));
            assert!(matches!(session.recv().await, PollResult::Applied));
            assert!(session.document().row(&PlayerId::from(3)).is_none());
        });
    }

    #[test]
    fn run_drains_until_close() {
        tokio_test::block_on(async {
            let transport = ScriptedTransport::frames([r#"{"pot":1}"#, "{", r#"{"pot":2}"#]);
            let doc = MemoryDocument::table();
            let mut session = RoomSession::from_transport(transport, &config(), doc);
            session.run().await;
            assert_eq!(session.document().pot.as_deref(), Some("2"));
            assert_eq!(session.client().state(), ConnectionState::Closed);
            assert!(session.client().was_opened());
            assert!(matches!(session.try_recv(), PollResult::Disconnected));
        });
    }

    #[test]
    fn refused_connection_never_opens() {
        tokio_test::block_on(async {
            let transport = ScriptedTransport::refusing(TransportError::Io("refused".to_string()));
            let doc = MemoryDocument::table();
            let mut session = RoomSession::from_transport(transport, &config(), doc);

            assert!(matches!(session.recv().await, PollResult::Disconnected));
            assert_eq!(session.client().state(), ConnectionState::Closed);
            assert!(!session.client().was_opened());
            assert!(session.document().pot.is_none());
        });
    }
}
