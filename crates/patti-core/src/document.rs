//! The DOM regions the room client owns.
//!
//! [`TableDocument`] is the seam between the client and whatever renders the
//! table. The browser build implements it over `web-sys`; tests and the
//! terminal watcher use [`MemoryDocument`].

use std::fmt;

use thiserror::Error;

use crate::protocol::PlayerId;

/// Element showing the pot.
pub const POT_ELEMENT_ID: &str = "table-pot";
/// Element showing the current bet.
pub const CURRENT_BET_ELEMENT_ID: &str = "current-bet";
/// Container holding one `<li>` per seated player.
pub const PLAYER_LIST_ELEMENT_ID: &str = "player-list";
/// Class of the score node nested inside a player row.
pub const PLAYER_SCORE_CLASS: &str = "player-score";

/// Element id of a player's row, e.g. `player-7`.
pub fn player_element_id(player: &PlayerId) -> String {
    format!("player-{player}")
}

/// A platform DOM call failed.
#[derive(Debug, Error)]
#[error("document operation failed: {0}")]
pub struct DocumentError(pub String);

/// Typed handle to the table regions of the page.
///
/// Missing elements are not errors: setters skip them and the player
/// operations report `false`. Errors are reserved for the platform itself
/// failing.
pub trait TableDocument {
    /// Overwrite the pot display text.
    fn set_pot_text(&mut self, text: &str) -> Result<(), DocumentError>;

    /// Overwrite the current-bet display text.
    fn set_current_bet_text(&mut self, text: &str) -> Result<(), DocumentError>;

    /// Overwrite the score node of an existing player row.
    ///
    /// Returns `false` when the row or its score node does not exist.
    fn set_player_score(&mut self, player: &PlayerId, text: &str) -> Result<bool, DocumentError>;

    /// Clear the player list and render `items` in order.
    fn replace_player_list(&mut self, items: &[String]) -> Result<(), DocumentError>;

    /// Remove a player's row from the document.
    ///
    /// Returns `false` when there was no such row.
    fn remove_player(&mut self, player: &PlayerId) -> Result<bool, DocumentError>;
}

/// A server-rendered seat: element `player-{id}`, optionally with a score node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRow {
    pub element_id: String,
    pub score: Option<String>,
}

/// In-memory document.
///
/// `None` for a fixed region means the page has no such element, which lets
/// tests cover the soft-miss paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDocument {
    pub pot: Option<String>,
    pub current_bet: Option<String>,
    pub player_list: Option<Vec<String>>,
    pub rows: Vec<PlayerRow>,
}

impl MemoryDocument {
    /// A page with the pot, bet and list elements present and no seats.
    pub fn table() -> Self {
        Self {
            pot: Some(String::new()),
            current_bet: Some(String::new()),
            player_list: Some(Vec::new()),
            rows: Vec::new(),
        }
    }

    /// Add a seat row with a score node holding `score`.
    pub fn with_player_row(mut self, player: impl Into<PlayerId>, score: &str) -> Self {
        self.rows.push(PlayerRow {
            element_id: player_element_id(&player.into()),
            score: Some(score.to_string()),
        });
        self
    }

    /// Add a seat row without a score node.
    pub fn with_bare_player_row(mut self, player: impl Into<PlayerId>) -> Self {
        self.rows.push(PlayerRow {
            element_id: player_element_id(&player.into()),
            score: None,
        });
        self
    }

    pub fn row(&self, player: &PlayerId) -> Option<&PlayerRow> {
        let id = player_element_id(player);
        self.rows.iter().find(|r| r.element_id == id)
    }

    pub fn score(&self, player: &PlayerId) -> Option<&str> {
        self.row(player).and_then(|r| r.score.as_deref())
    }

    pub fn list_items(&self) -> &[String] {
        self.player_list.as_deref().unwrap_or(&[])
    }
}

impl TableDocument for MemoryDocument {
    fn set_pot_text(&mut self, text: &str) -> Result<(), DocumentError> {
        if let Some(pot) = self.pot.as_mut() {
            *pot = text.to_string();
        }
        Ok(())
    }

    fn set_current_bet_text(&mut self, text: &str) -> Result<(), DocumentError> {
        if let Some(bet) = self.current_bet.as_mut() {
            *bet = text.to_string();
        }
        Ok(())
    }

    fn set_player_score(&mut self, player: &PlayerId, text: &str) -> Result<bool, DocumentError> {
        let id = player_element_id(player);
        let score = self
            .rows
            .iter_mut()
            .find(|r| r.element_id == id)
            .and_then(|r| r.score.as_mut());
        Ok(match score {
            Some(score) => {
                *score = text.to_string();
                true
            }
            None => false,
        })
    }

    fn replace_player_list(&mut self, items: &[String]) -> Result<(), DocumentError> {
        if let Some(list) = self.player_list.as_mut() {
            list.clear();
            list.extend(items.iter().cloned());
        }
        Ok(())
    }

    fn remove_player(&mut self, player: &PlayerId) -> Result<bool, DocumentError> {
        let id = player_element_id(player);
        let before = self.rows.len();
        self.rows.retain(|r| r.element_id != id);
        Ok(self.rows.len() != before)
    }
}

impl fmt::Display for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pot: {}", self.pot.as_deref().unwrap_or("-"))?;
        writeln!(f, "Current bet: {}", self.current_bet.as_deref().unwrap_or("-"))?;
        writeln!(f, "Players:")?;
        for item in self.list_items() {
            writeln!(f, "  - {item}")?;
        }
        for row in &self.rows {
            writeln!(
                f,
                "  [{}] {}",
                row.element_id,
                row.score.as_deref().unwrap_or("")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_element_ids() {
        assert_eq!(player_element_id(&PlayerId::from(7)), "player-7");
        assert_eq!(player_element_id(&PlayerId::from("x9")), "player-x9");
    }

    #[test]
    fn missing_fixed_elements_are_skipped() {
        let mut doc = MemoryDocument::default();
        doc.set_pot_text("10").unwrap();
        doc.set_current_bet_text("♦ 2").unwrap();
        doc.replace_player_list(&["a (b)".to_string()]).unwrap();
        assert_eq!(doc, MemoryDocument::default());
    }

    #[test]
    fn score_requires_row_and_score_node() {
        let mut doc = MemoryDocument::table()
            .with_player_row(1, "old")
            .with_bare_player_row(2);
        assert!(doc.set_player_score(&PlayerId::from(1), "new").unwrap());
        assert!(!doc.set_player_score(&PlayerId::from(2), "new").unwrap());
        assert!(!doc.set_player_score(&PlayerId::from(3), "new").unwrap());
        assert_eq!(doc.score(&PlayerId::from(1)), Some("new"));
        assert!(doc.row(&PlayerId::from(2)).unwrap().score.is_none());
    }

    #[test]
    fn remove_reports_presence() {
        let mut doc = MemoryDocument::table().with_player_row(5, "");
        assert!(doc.remove_player(&PlayerId::from(5)).unwrap());
        assert!(!doc.remove_player(&PlayerId::from(5)).unwrap());
        assert!(doc.rows.is_empty());
    }

    #[test]
    fn snapshot_lists_everything() {
        let mut doc = MemoryDocument::table().with_player_row(1, "turn");
        doc.set_pot_text("150").unwrap();
        doc.replace_player_list(&["asha (turn)".to_string()]).unwrap();
        let text = doc.to_string();
        assert!(text.contains("Pot: 150"));
        assert!(text.contains("  - asha (turn)"));
        assert!(text.contains("[player-1] turn"));
    }
}
