//! Watcher orchestrator — connects the room session to stdout.
//!
//! Drives a [`RoomSession`] over an in-memory document and prints the table
//! after every applied frame.

use patti_client::room_session::{PollResult, RoomSession, log_rejected};
use patti_core::config::ClientConfig;
use patti_core::document::MemoryDocument;
use tracing::Instrument;

/// Connect to `room` on `host` and print the table until the server closes
/// the socket.
pub async fn start_watch(
    host: &str,
    room: &str,
    user: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ClientConfig::new(host, room)?;
    if let Some(user) = user {
        config = config.with_user_id(user);
    }

    let span = tracing::info_span!("watch", room = config.game_room_id(), user = config.user_id());
    run_event_loop(&config).instrument(span).await
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

async fn run_event_loop(config: &ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = RoomSession::connect_ws(config, MemoryDocument::table()).await?;

    loop {
        match session.recv().await {
            PollResult::Applied => {
                println!("{}", session.document());
            }
            PollResult::Rejected(e) => log_rejected(config.game_room_id(), &e),
            PollResult::Disconnected => break,
            PollResult::Opened | PollResult::Empty => {}
        }
    }

    Ok(())
}
