//! Transient banner shown on phase switches.

use serde::{Deserialize, Serialize};

use crate::timer::TimerMode;

/// How long a banner stays up before it hides itself.
pub const AUTO_DISMISS_MS: u64 = 5_000;

/// Outbound props for the banner collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationProps {
    pub message: String,
    pub visible: bool,
}

/// Single-slot notification surface. A new message replaces the old one.
#[derive(Debug, Clone, Default)]
pub struct Notification {
    message: String,
    shown_at_ms: Option<u64>,
}

impl Notification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>, now_ms: u64) {
        self.message = message.into();
        self.shown_at_ms = Some(now_ms);
    }

    /// Hide the banner. Returns `true` if it was visible.
    pub fn dismiss(&mut self) -> bool {
        self.shown_at_ms.take().is_some()
    }

    /// Hide the banner if its display time has run out.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms() {
            Some(deadline) if now_ms >= deadline => self.dismiss(),
            _ => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.shown_at_ms.is_some()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// When the visible banner auto-dismisses, if one is visible.
    pub fn deadline_ms(&self) -> Option<u64> {
        self.shown_at_ms.map(|at| at.saturating_add(AUTO_DISMISS_MS))
    }

    pub fn props(&self) -> NotificationProps {
        NotificationProps {
            message: self.message.clone(),
            visible: self.is_visible(),
        }
    }
}

/// Banner text for a transition into `to`.
pub fn phase_message(to: TimerMode) -> &'static str {
    match to {
        TimerMode::ShortBreak => "Work session complete! Time for a short break. ☕",
        TimerMode::LongBreak => "Great work! Time for a long break. 🎉",
        TimerMode::Work => "Break time is over! Ready to focus? 🚀",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_dismisses_after_five_seconds() {
        let mut n = Notification::new();
        n.show("hello", 1_000);
        assert!(!n.expire(5_999));
        assert!(n.is_visible());
        assert!(n.expire(6_000));
        assert!(!n.is_visible());
    }

    #[test]
    fn new_message_replaces_and_restarts_delay() {
        let mut n = Notification::new();
        n.show("first", 0);
        n.show("second", 4_000);
        assert_eq!(n.message(), "second");
        assert!(!n.expire(5_000));
        assert_eq!(n.deadline_ms(), Some(9_000));
    }

    #[test]
    fn dismiss_is_reported_once() {
        let mut n = Notification::new();
        assert!(!n.dismiss());
        n.show("x", 0);
        assert!(n.dismiss());
        assert!(!n.dismiss());
        assert!(!n.props().visible);
    }
}
