//! Transient error message shown above a list

use std::time::Duration;

use tokio::time::Instant;

/// How long a raised message stays visible.
pub const BANNER_TTL: Duration = Duration::from_secs(3);

/// At most one message; raising a new one replaces the old and restarts
/// the timer.
#[derive(Debug, Default, Clone)]
pub struct ErrorBanner {
    message: Option<(String, Instant)>,
}

impl ErrorBanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&mut self, message: impl Into<String>) {
        self.message = Some((message.into(), Instant::now()));
    }

    pub fn dismiss(&mut self) {
        self.message = None;
    }

    /// The visible message, if it has not expired.
    pub fn current(&self) -> Option<&str> {
        match &self.message {
            Some((text, raised)) if raised.elapsed() < BANNER_TTL => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.current().is_some()
    }
}
