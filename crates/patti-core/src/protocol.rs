//! Wire model of the game-room socket.
//!
//! Frames are JSON objects pushed by the server. Nothing is sent back, so the
//! types here only decode.

use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};
use std::fmt;

/// Suit symbol shown in front of the current bet.
pub const BET_SYMBOL: &str = "♦";

/// Player identifier as sent by the server.
///
/// The server emits numeric user ids, but the wire format is not strict
/// about it: any JSON number or string is accepted. Numbers render the way
/// the page prints them, so `3` and `3.0` both key `player-3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum PlayerId {
    Number(Number),
    Text(String),
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::Number(n) => f.write_str(&format_amount(n)),
            PlayerId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for PlayerId {
    fn from(id: i64) -> Self {
        PlayerId::Number(Number::from(id))
    }
}

impl From<i32> for PlayerId {
    fn from(id: i32) -> Self {
        PlayerId::Number(Number::from(id))
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        PlayerId::Text(id.to_string())
    }
}

/// One seat in a roster update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub status: String,
}

impl Player {
    /// Text of this player's list item, e.g. `"alice (waiting)"`.
    pub fn list_label(&self) -> String {
        format!("{} ({})", self.username, self.status)
    }
}

/// Payload of one server-pushed frame.
///
/// Every field is optional; the server mixes table updates, roster updates
/// and leave events over the same socket.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GameMessage {
    /// Server event kind (`game_update`, `player_disconnected`, ...).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub pot: Option<Number>,

    #[serde(default)]
    pub current_bet: Option<Number>,

    /// Present only on roster updates. `null` counts as absent.
    #[serde(default)]
    pub players: Option<Vec<Player>>,

    #[serde(default, deserialize_with = "truthy")]
    pub player_left: bool,

    /// Who left. Deliberately separate from [`Player::id`].
    #[serde(default)]
    pub player_id: Option<PlayerId>,
}

impl GameMessage {
    /// Text for the pot display. Absent pot renders as empty text.
    pub fn pot_text(&self) -> String {
        self.pot.as_ref().map(format_amount).unwrap_or_default()
    }

    /// Text for the current-bet display: the suit symbol, a space, the amount.
    pub fn current_bet_text(&self) -> String {
        let amount = self
            .current_bet
            .as_ref()
            .map(format_amount)
            .unwrap_or_default();
        format!("{BET_SYMBOL} {amount}")
    }
}

/// Decode a raw text frame as a [`GameMessage`].
pub fn parse_server_frame(frame: &str) -> Result<GameMessage, serde_json::Error> {
    serde_json::from_str(frame)
}

/// Render a number the way the page would print a JavaScript number:
/// whole floats below 1e21 lose their fraction, everything else prints as-is.
pub fn format_amount(amount: &Number) -> String {
    if let Some(f) = amount.as_f64().filter(|_| amount.is_f64()) {
        if f == 0.0 {
            return "0".to_string();
        }
        if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 {
            return format!("{f:.0}");
        }
    }
    amount.to_string()
}

/// JavaScript truthiness for flag fields.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}
