use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{PhaseLengths, TimerMode};

/// Every state change in the engine produces an Event.
/// Front ends render from snapshots; logs and tests inspect the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A phase ended, either by running out or by an explicit skip.
    PhaseCompleted {
        from: TimerMode,
        to: TimerMode,
        sessions_completed: u32,
        skipped: bool,
        at: DateTime<Utc>,
    },
    LengthChanged {
        mode: TimerMode,
        minutes: u32,
        at: DateTime<Utc>,
    },
    TimerCleared {
        at: DateTime<Utc>,
    },
    NotificationShown {
        message: String,
        at: DateTime<Utc>,
    },
    NotificationDismissed {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: TimerMode,
        is_running: bool,
        remaining_secs: u64,
        total_secs: u64,
        sessions_completed: u32,
        lengths: PhaseLengths,
        at: DateTime<Utc>,
    },
}

/// Convert engine milliseconds into an event timestamp.
pub(crate) fn timestamp(ms: u64) -> DateTime<Utc> {
    i64::try_from(ms)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_by_type() {
        let event = Event::TimerCleared { at: timestamp(0) };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "TimerCleared");
    }

    #[test]
    fn timestamp_converts_epoch_millis() {
        assert_eq!(timestamp(1_500).timestamp_millis(), 1_500);
    }
}
