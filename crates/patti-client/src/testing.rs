use std::collections::VecDeque;

use crate::transport::{Transport, TransportError};

/// In-memory transport that replays a fixed script, then reports close.
pub struct ScriptedTransport {
    open_error: Option<TransportError>,
    script: VecDeque<Result<Option<String>, TransportError>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<Option<String>, TransportError>>) -> Self {
        Self {
            open_error: None,
            script: script.into(),
        }
    }

    pub fn frames<const N: usize>(frames: [&str; N]) -> Self {
        Self::new(frames.iter().map(|f| Ok(Some(f.to_string()))).collect())
    }

    /// A transport whose handshake fails with `error`.
    pub fn refusing(error: TransportError) -> Self {
        Self {
            open_error: Some(error),
            script: VecDeque::new(),
        }
    }
}

impl Transport for ScriptedTransport {
    async fn open(&mut self) -> Result<(), TransportError> {
        match self.open_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn recv(&mut self) -> Result<Option<String>, TransportError> {
        self.script.pop_front().unwrap_or(Ok(None))
    }
}
