use serde::{Deserialize, Serialize};

/// Number of completed work sessions between long breaks.
pub const SESSIONS_PER_LONG_BREAK: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    Work,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub const ALL: [TimerMode; 3] = [TimerMode::Work, TimerMode::ShortBreak, TimerMode::LongBreak];

    /// Human-readable label shown above the countdown.
    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Work => "Focus Time",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }

    /// Allowed length range in minutes, inclusive.
    pub fn bounds(self) -> (u32, u32) {
        match self {
            TimerMode::Work => (1, 60),
            TimerMode::ShortBreak => (1, 30),
            TimerMode::LongBreak => (5, 60),
        }
    }

    /// Clamp a requested length into this phase's bounds.
    ///
    /// Takes a signed value so that negative input from a caller is
    /// representable and lands on the minimum instead of wrapping.
    pub fn clamp_minutes(self, minutes: i64) -> u32 {
        let (min, max) = self.bounds();
        minutes.clamp(min as i64, max as i64) as u32
    }

    /// The mode that follows this one, given the session count *after*
    /// any increment for a just-completed work phase.
    pub fn next(self, sessions_completed: u32) -> TimerMode {
        match self {
            TimerMode::Work if sessions_completed % SESSIONS_PER_LONG_BREAK == 0 => {
                TimerMode::LongBreak
            }
            TimerMode::Work => TimerMode::ShortBreak,
            TimerMode::ShortBreak | TimerMode::LongBreak => TimerMode::Work,
        }
    }
}

impl std::fmt::Display for TimerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Configured phase durations in minutes.
///
/// Values are always within [`TimerMode::bounds`]; every write goes through
/// [`PhaseLengths::new`] or [`PhaseLengths::set`], deserialization included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawLengths")]
pub struct PhaseLengths {
    work_minutes: u32,
    short_break_minutes: u32,
    long_break_minutes: u32,
}

impl PhaseLengths {
    /// Build from arbitrary values, clamping each into range.
    pub fn new(work: i64, short_break: i64, long_break: i64) -> Self {
        Self {
            work_minutes: TimerMode::Work.clamp_minutes(work),
            short_break_minutes: TimerMode::ShortBreak.clamp_minutes(short_break),
            long_break_minutes: TimerMode::LongBreak.clamp_minutes(long_break),
        }
    }

    pub fn minutes(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Work => self.work_minutes,
            TimerMode::ShortBreak => self.short_break_minutes,
            TimerMode::LongBreak => self.long_break_minutes,
        }
    }

    pub fn seconds(&self, mode: TimerMode) -> u64 {
        u64::from(self.minutes(mode)) * 60
    }

    /// Set a phase length, returning the clamped value actually stored.
    pub fn set(&mut self, mode: TimerMode, minutes: i64) -> u32 {
        let clamped = mode.clamp_minutes(minutes);
        match mode {
            TimerMode::Work => self.work_minutes = clamped,
            TimerMode::ShortBreak => self.short_break_minutes = clamped,
            TimerMode::LongBreak => self.long_break_minutes = clamped,
        }
        clamped
    }

    pub fn work_minutes(&self) -> u32 {
        self.work_minutes
    }

    pub fn short_break_minutes(&self) -> u32 {
        self.short_break_minutes
    }

    pub fn long_break_minutes(&self) -> u32 {
        self.long_break_minutes
    }
}

/// Unchecked wire form of [`PhaseLengths`].
#[derive(Deserialize)]
struct RawLengths {
    work_minutes: i64,
    short_break_minutes: i64,
    long_break_minutes: i64,
}

impl From<RawLengths> for PhaseLengths {
    fn from(raw: RawLengths) -> Self {
        Self::new(
            raw.work_minutes,
            raw.short_break_minutes,
            raw.long_break_minutes,
        )
    }
}

impl Default for PhaseLengths {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
        }
    }
}
