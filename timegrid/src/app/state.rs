use std::time::{Duration, Instant};

use thiserror::Error;

/// Success and info messages disappear after this long; errors stay until replaced.
pub const STATUS_TTL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Grid,
    Activities,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub set_at: Instant,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            set_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.kind != StatusKind::Error && now.duration_since(self.set_at) >= STATUS_TTL
    }
}

/// Session-level rejections of user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Please select an activity first")]
    NoActivitySelected,
}

/// User intents the session understands, independent of how they were triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    SlotClick(crate::grid::SlotKey),
    SelectActivity(crate::activity::VisibleRow),
    Refresh,
    Save,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_non_errors_expire() {
        let info = StatusMessage::new("Data loaded!", StatusKind::Success);
        let error = StatusMessage::new("Error saving", StatusKind::Error);
        let later = info.set_at + STATUS_TTL + Duration::from_millis(1);

        assert!(!info.is_expired(info.set_at));
        assert!(info.is_expired(later));
        assert!(!error.is_expired(error.set_at + Duration::from_secs(60)));
    }
}
