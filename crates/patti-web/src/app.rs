//! Page bootstrap for the browser table view.
//!
//! Reads the page-supplied globals once, installs the navigation guards,
//! opens the game-room socket and applies frames until it closes. No
//! reconnection is attempted.

use patti_client::room_session::RoomSession;
use patti_core::config::ClientConfig;
use patti_core::navigation::NavigationGuard;
use wasm_bindgen::JsValue;
use web_sys::Window;

use crate::browser::{BrowserNavigator, install_navigation_guard};
use crate::web_document::WebDocument;

/// Global holding the game room id, set by the page template.
const ROOM_ID_GLOBAL: &str = "gameRoomId";
/// Optional global holding the signed-in user's id.
const USER_ID_GLOBAL: &str = "userId";

/// Read a page global as text. Numbers are accepted (`42` → `"42"`).
fn read_global(window: &Window, name: &str) -> Option<String> {
    let value = js_sys::Reflect::get(window, &JsValue::from_str(name)).ok()?;
    value
        .as_string()
        .or_else(|| value.as_f64().map(|n| n.to_string()))
}

/// Build the client configuration from the page.
fn page_config(window: &Window) -> Result<ClientConfig, Box<dyn std::error::Error>> {
    let host = window
        .location()
        .host()
        .map_err(|e| format!("cannot read location.host: {e:?}"))?;
    let room_id =
        read_global(window, ROOM_ID_GLOBAL).ok_or("page did not define `gameRoomId`")?;
    let mut config = ClientConfig::new(&host, &room_id)?;
    if let Some(user_id) = read_global(window, USER_ID_GLOBAL) {
        config = config.with_user_id(user_id);
    }
    Ok(config)
}

/// Run the table view for this page load.
pub async fn start() -> Result<(), Box<dyn std::error::Error>> {
    let window = web_sys::window().ok_or("no global `window`")?;
    let document = window.document().ok_or("no `document` on window")?;

    let config = page_config(&window)?;
    tracing::info!(room = config.game_room_id(), "Loading table view");

    let guard = NavigationGuard::new(BrowserNavigator::new(window.clone()), &config);
    install_navigation_guard(&window, guard)
        .map_err(|e| format!("cannot install navigation listeners: {e:?}"))?;

    let mut session = RoomSession::connect_ws(&config, WebDocument::new(document)).await?;
    session.run().await;
    Ok(())
}
