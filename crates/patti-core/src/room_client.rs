//! The game-room client.
//!
//! Applies server-pushed frames to a [`TableDocument`]. The client owns the
//! document exclusively; frames are applied one at a time in arrival order.
//!
//! Each frame is handled the same way:
//! 1. The table (pot, bet, existing score nodes) is always refreshed.
//! 2. A roster (`players`) re-renders the player list.
//! 3. A leave event (`player_left`) removes the row of the outer `player_id`.

use thiserror::Error;

use crate::config::ClientConfig;
use crate::document::{DocumentError, TableDocument};
use crate::protocol::{GameMessage, Player, PlayerId, parse_server_frame};

#[derive(Debug, Error)]
pub enum ClientError {
    /// The frame was not a valid game message.
    #[error("malformed frame: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Socket state. `Connecting` until the server accepts the handshake, then
/// `Open` → `Closed`. A failed handshake goes straight to `Closed`. There is
/// no way back out of `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

pub struct GameRoomClient<D> {
    room_id: String,
    document: D,
    state: ConnectionState,
    opened: bool,
}

impl<D: TableDocument> GameRoomClient<D> {
    pub fn new(config: &ClientConfig, document: D) -> Self {
        Self {
            room_id: config.game_room_id().to_string(),
            document,
            state: ConnectionState::Connecting,
            opened: false,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Whether the socket ever reached `Open`.
    pub fn was_opened(&self) -> bool {
        self.opened
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn on_open(&mut self) {
        if self.state != ConnectionState::Connecting {
            return;
        }
        self.state = ConnectionState::Open;
        self.opened = true;
        tracing::info!(room = %self.room_id, "Connected to game room");
    }

    pub fn on_close(&mut self) {
        match self.state {
            ConnectionState::Closed => {}
            ConnectionState::Connecting => {
                self.state = ConnectionState::Closed;
                tracing::warn!(room = %self.room_id, "Could not connect to game room");
            }
            ConnectionState::Open => {
                self.state = ConnectionState::Closed;
                tracing::info!(room = %self.room_id, "Disconnected from game room");
            }
        }
    }

    /// Decode a raw text frame and apply it.
    ///
    /// The document is untouched when decoding fails.
    pub fn on_message(&mut self, frame: &str) -> Result<(), ClientError> {
        if self.state == ConnectionState::Closed {
            tracing::warn!(room = %self.room_id, "frame after close ignored");
            return Ok(());
        }
        let msg = parse_server_frame(frame)?;
        tracing::debug!(room = %self.room_id, kind = ?msg.kind, "Received game data");
        self.apply(&msg)
    }

    /// Apply an already decoded message.
    pub fn apply(&mut self, msg: &GameMessage) -> Result<(), ClientError> {
        self.update_game_ui(msg)?;
        if let Some(players) = &msg.players {
            self.update_players_list(players)?;
        }
        if msg.player_left {
            match &msg.player_id {
                Some(player) => {
                    self.remove_player_from_ui(player)?;
                }
                None => tracing::debug!(room = %self.room_id, "leave event without player_id"),
            }
        }
        Ok(())
    }

    /// Refresh the pot, the current bet and the score of every listed
    /// player that already has a row. Never creates rows.
    pub fn update_game_ui(&mut self, msg: &GameMessage) -> Result<(), DocumentError> {
        self.document.set_pot_text(&msg.pot_text())?;
        self.document.set_current_bet_text(&msg.current_bet_text())?;

        if let Some(players) = &msg.players {
            for player in players {
                if !self.document.set_player_score(&player.id, &player.status)? {
                    tracing::trace!(player = %player.id, "no score node, skipped");
                }
            }
        }
        Ok(())
    }

    /// Replace the player list with one item per player, in input order.
    pub fn update_players_list(&mut self, players: &[Player]) -> Result<(), DocumentError> {
        let items: Vec<String> = players.iter().map(Player::list_label).collect();
        self.document.replace_player_list(&items)
    }

    /// Remove a player's row. Returns `false` if it was not on the page.
    pub fn remove_player_from_ui(&mut self, player: &PlayerId) -> Result<bool, DocumentError> {
        let removed = self.document.remove_player(player)?;
        if removed {
            tracing::info!(room = %self.room_id, player = %player, "Player removed from UI");
        }
        Ok(removed)
    }
}
