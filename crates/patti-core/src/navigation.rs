//! Back/forward navigation guards.
//!
//! Going back while seated asks the player whether to keep playing, and a
//! page restored from the back/forward cache is always reloaded so a stale
//! socket and table are never shown.

use std::time::Duration;

use crate::config::ClientConfig;

/// Prompt shown on back/forward navigation.
pub const CONTINUE_PROMPT: &str = "Do you want to continue playing? Click 'OK' to stay or 'Cancel' to return to the main page.";

/// Browser capabilities the guard needs.
pub trait Navigator {
    /// Ask the user to confirm; `true` means OK.
    fn confirm(&self, message: &str) -> bool;

    /// Navigate to `url`.
    fn assign(&self, url: &str);

    /// Force a full reload now.
    fn reload(&self);

    /// Force a full reload after `delay`.
    fn schedule_reload(&self, delay: Duration);
}

/// What a guard did in response to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The user chose to keep playing.
    Stayed,
    /// The user declined; sent to `url` with a reload scheduled.
    Left { url: String },
    /// The page was reloaded.
    Reloaded,
    /// Nothing to do.
    Ignored,
}

pub struct NavigationGuard<N> {
    navigator: N,
    fallback_url: String,
    reload_delay: Duration,
}

impl<N: Navigator> NavigationGuard<N> {
    pub fn new(navigator: N, config: &ClientConfig) -> Self {
        Self {
            navigator,
            fallback_url: config.fallback_url().to_string(),
            reload_delay: config.reload_delay(),
        }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Handle a `popstate` event.
    pub fn on_popstate(&self) -> NavigationOutcome {
        if self.navigator.confirm(CONTINUE_PROMPT) {
            tracing::debug!("player chose to stay at the table");
            return NavigationOutcome::Stayed;
        }
        tracing::info!(url = %self.fallback_url, "leaving the table");
        self.navigator.assign(&self.fallback_url);
        self.navigator.schedule_reload(self.reload_delay);
        NavigationOutcome::Left {
            url: self.fallback_url.clone(),
        }
    }

    /// Handle a `pageshow` event; `persisted` is set when the page came
    /// from the back/forward cache.
    pub fn on_pageshow(&self, persisted: bool) -> NavigationOutcome {
        if !persisted {
            return NavigationOutcome::Ignored;
        }
        tracing::info!("page restored from cache, reloading");
        self.navigator.reload();
        NavigationOutcome::Reloaded
    }
}
