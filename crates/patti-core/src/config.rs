//! Client configuration.
//!
//! Everything the page used to supply through globals (`gameRoomId`, the
//! signed-in user) is passed in here explicitly.

use std::time::Duration;

use thiserror::Error;

/// Where a declined "continue playing?" prompt sends the user.
pub const DEFAULT_FALLBACK_URL: &str = "/interface-page-url";

/// Delay between leaving for the fallback URL and forcing a reload.
pub const DEFAULT_RELOAD_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("host cannot be empty")]
    EmptyHost,

    #[error("game room id cannot be empty")]
    EmptyRoomId,

    #[error("game room id {0:?} must not contain '/' or whitespace")]
    InvalidRoomId(String),
}

/// Connection and navigation settings for one page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    host: String,
    game_room_id: String,
    user_id: Option<String>,
    fallback_url: String,
    reload_delay: Duration,
}

impl ClientConfig {
    /// Build a configuration for `game_room_id` served from `host`
    /// (`host[:port]`, as in `location.host`).
    pub fn new(host: &str, game_room_id: &str) -> Result<Self, ConfigError> {
        let host = host.trim();
        if host.is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        validate_room_id(game_room_id)?;
        Ok(Self {
            host: host.to_string(),
            game_room_id: game_room_id.to_string(),
            user_id: None,
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
            reload_delay: DEFAULT_RELOAD_DELAY,
        })
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_fallback_url(mut self, url: impl Into<String>) -> Self {
        self.fallback_url = url.into();
        self
    }

    pub fn with_reload_delay(mut self, delay: Duration) -> Self {
        self.reload_delay = delay;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn game_room_id(&self) -> &str {
        &self.game_room_id
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn fallback_url(&self) -> &str {
        &self.fallback_url
    }

    pub fn reload_delay(&self) -> Duration {
        self.reload_delay
    }

    /// WebSocket endpoint of the game room: `ws://<host>/ws/game/<id>/`.
    pub fn endpoint_url(&self) -> String {
        format!("ws://{}/ws/game/{}/", self.host, self.game_room_id)
    }
}

/// Room ids end up in a URL path segment.
pub fn validate_room_id(id: &str) -> Result<(), ConfigError> {
    if id.is_empty() {
        return Err(ConfigError::EmptyRoomId);
    }
    if id.chars().any(|c| c == '/' || c.is_whitespace()) {
        return Err(ConfigError::InvalidRoomId(id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_format() {
        let config = ClientConfig::new("localhost:8000", "42").unwrap();
        assert_eq!(config.endpoint_url(), "ws://localhost:8000/ws/game/42/");
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::new("example.com", "7").unwrap();
        assert_eq!(config.fallback_url(), "/interface-page-url");
        assert_eq!(config.reload_delay(), Duration::from_millis(100));
        assert_eq!(config.user_id(), None);
    }

    #[test]
    fn builder_overrides() {
        let config = ClientConfig::new("example.com", "7")
            .unwrap()
            .with_user_id("12")
            .with_fallback_url("/lobby/")
            .with_reload_delay(Duration::from_millis(250));
        assert_eq!(config.user_id(), Some("12"));
        assert_eq!(config.fallback_url(), "/lobby/");
        assert_eq!(config.reload_delay(), Duration::from_millis(250));
    }

    #[test]
    fn invalid_configs() {
        assert_eq!(ClientConfig::new("  ", "1"), Err(ConfigError::EmptyHost));
        assert_eq!(ClientConfig::new("h", ""), Err(ConfigError::EmptyRoomId));
        assert_eq!(
            ClientConfig::new("h", "1/2"),
            Err(ConfigError::InvalidRoomId("1/2".to_string()))
        );
        assert!(ClientConfig::new("h", "room 1").is_err());
    }
}
