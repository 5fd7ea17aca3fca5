//! Display-facing projections of the engine state.
//!
//! Everything here is a pure function of values the engine hands out.

use serde::{Deserialize, Serialize};

use crate::timer::{PhaseLengths, TimerMode};

/// Outbound props for the countdown display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayProps {
    pub minutes: u64,
    pub seconds: u64,
    pub is_running: bool,
    pub mode: TimerMode,
}

impl DisplayProps {
    pub fn new(remaining_secs: u64, is_running: bool, mode: TimerMode) -> Self {
        Self {
            minutes: remaining_secs / 60,
            seconds: remaining_secs % 60,
            is_running,
            mode,
        }
    }

    pub fn remaining_secs(&self) -> u64 {
        self.minutes * 60 + self.seconds
    }

    /// `MM:SS`, zero padded.
    pub fn clock_text(&self) -> String {
        format!("{:02}:{:02}", self.minutes, self.seconds)
    }

    /// Elapsed fraction of the active phase, 0.0 ..= 1.0.
    pub fn progress(&self, lengths: &PhaseLengths) -> f64 {
        let total = lengths.seconds(self.mode);
        if total == 0 {
            return 0.0;
        }
        let remaining = self.remaining_secs().min(total);
        1.0 - remaining as f64 / total as f64
    }
}

/// Running totals for the session panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub sessions_completed: u32,
    pub focus_minutes: u64,
}

impl SessionSummary {
    pub fn new(sessions_completed: u32, work_minutes: u32) -> Self {
        Self {
            sessions_completed,
            focus_minutes: u64::from(sessions_completed) * u64::from(work_minutes),
        }
    }

    /// Focus time as `Hh Mm`.
    pub fn focus_text(&self) -> String {
        format!("{}h {}m", self.focus_minutes / 60, self.focus_minutes % 60)
    }
}

/// Render a fixed-width text progress bar.
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
