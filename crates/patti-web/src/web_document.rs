//! `web-sys` implementation of [`TableDocument`].

use patti_core::document::{
    CURRENT_BET_ELEMENT_ID, DocumentError, PLAYER_LIST_ELEMENT_ID, PLAYER_SCORE_CLASS,
    POT_ELEMENT_ID, TableDocument, player_element_id,
};
use patti_core::protocol::PlayerId;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

fn js_err(e: JsValue) -> DocumentError {
    DocumentError(format!("{e:?}"))
}

/// The page's table markup.
pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn fixed_element(&self, id: &str) -> Option<Element> {
        let element = self.document.get_element_by_id(id);
        if element.is_none() {
            tracing::warn!(id, "element missing from page");
        }
        element
    }

    fn player_row(&self, player: &PlayerId) -> Option<Element> {
        self.document.get_element_by_id(&player_element_id(player))
    }
}

impl TableDocument for WebDocument {
    fn set_pot_text(&mut self, text: &str) -> Result<(), DocumentError> {
        if let Some(node) = self.fixed_element(POT_ELEMENT_ID) {
            node.set_text_content(Some(text));
        }
        Ok(())
    }

    fn set_current_bet_text(&mut self, text: &str) -> Result<(), DocumentError> {
        if let Some(node) = self.fixed_element(CURRENT_BET_ELEMENT_ID) {
            node.set_text_content(Some(text));
        }
        Ok(())
    }

    fn set_player_score(&mut self, player: &PlayerId, text: &str) -> Result<bool, DocumentError> {
        let Some(row) = self.player_row(player) else {
            return Ok(false);
        };
        let score = row
            .query_selector(&format!(".{PLAYER_SCORE_CLASS}"))
            .map_err(js_err)?;
        Ok(match score {
            Some(score) => {
                score.set_text_content(Some(text));
                true
            }
            None => false,
        })
    }

    fn replace_player_list(&mut self, items: &[String]) -> Result<(), DocumentError> {
        let Some(list) = self.fixed_element(PLAYER_LIST_ELEMENT_ID) else {
            return Ok(());
        };
        list.set_inner_html("");
        for item in items {
            let li = self.document.create_element("li").map_err(js_err)?;
            li.set_text_content(Some(item));
            list.append_child(&li).map_err(js_err)?;
        }
        Ok(())
    }

    fn remove_player(&mut self, player: &PlayerId) -> Result<bool, DocumentError> {
        Ok(match self.player_row(player) {
            Some(row) => {
                row.remove();
                true
            }
            None => false,
        })
    }
}
