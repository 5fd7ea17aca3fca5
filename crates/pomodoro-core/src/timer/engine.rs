//! Timer engine implementation.
//!
//! The engine is a wall-clock-based state machine. It does not use internal
//! threads: the caller (see [`crate::runtime`]) delivers ticks, intents and
//! visibility signals one at a time.
//!
//! The displayed countdown is always derived from an absolute target end
//! timestamp, never from decrementing a counter, so missed or delayed ticks
//! cannot make it drift.
//!
//! ## State Transitions
//!
//! ```text
//! (Work|ShortBreak|LongBreak, Paused) <-> (same mode, Running)
//! Running --expiry--> (next mode, Paused)
//! any --skip--> (next mode, Paused)
//! ```
//!
//! ## Stale ticks
//!
//! Every intent that stops or rewinds the countdown bumps an epoch. Ticks are
//! issued against a [`TickToken`] carrying the epoch they were scheduled under
//! and are ignored once that epoch has passed.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(SystemClock);
//! engine.start();
//! let token = engine.tick_token().unwrap();
//! // Once per second:
//! engine.tick(token);
//! ```

use tracing::{debug, info, trace};

use super::mode::{PhaseLengths, TimerMode};
use crate::clock::{Clock, SystemClock};
use crate::display::{DisplayProps, SessionSummary};
use crate::events::{timestamp, Event};
use crate::notification::{phase_message, Notification, NotificationProps};

/// Authority to apply a tick, valid only for the epoch it was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken {
    epoch: u64,
}

impl TickToken {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Core timer engine.
///
/// Owns the whole timer state; the only way to change it is through the
/// intent methods below, each of which returns the events it produced.
#[derive(Debug, Clone)]
pub struct TimerEngine<C: Clock = SystemClock> {
    clock: C,
    mode: TimerMode,
    remaining_secs: u64,
    is_running: bool,
    sessions_completed: u32,
    lengths: PhaseLengths,
    /// Epoch milliseconds at which the running phase reaches zero.
    target_end_ms: Option<u64>,
    epoch: u64,
    notification: Notification,
    visible: bool,
}

impl<C: Clock> TimerEngine<C> {
    /// Create an engine in the default state: Work, 25/5/15, paused.
    pub fn new(clock: C) -> Self {
        Self::with_lengths(clock, PhaseLengths::default())
    }

    /// Create a paused Work engine with custom starting lengths.
    pub fn with_lengths(clock: C, lengths: PhaseLengths) -> Self {
        Self {
            clock,
            mode: TimerMode::Work,
            remaining_secs: lengths.seconds(TimerMode::Work),
            is_running: false,
            sessions_completed: 0,
            lengths,
            target_end_ms: None,
            epoch: 0,
            notification: Notification::new(),
            visible: true,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn sessions_completed(&self) -> u32 {
        self.sessions_completed
    }

    pub fn lengths(&self) -> PhaseLengths {
        self.lengths
    }

    pub fn target_end_ms(&self) -> Option<u64> {
        self.target_end_ms
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Configured length of the current phase in seconds.
    pub fn total_secs(&self) -> u64 {
        self.lengths.seconds(self.mode)
    }

    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    pub fn notification_props(&self) -> NotificationProps {
        self.notification.props()
    }

    pub fn display(&self) -> DisplayProps {
        DisplayProps::new(self.remaining_secs, self.is_running, self.mode)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::new(self.sessions_completed, self.lengths.work_minutes())
    }

    /// A token for the current countdown, if one is running.
    pub fn tick_token(&self) -> Option<TickToken> {
        self.is_running.then_some(TickToken { epoch: self.epoch })
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode,
            is_running: self.is_running,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            sessions_completed: self.sessions_completed,
            lengths: self.lengths,
            at: timestamp(self.clock.now_ms()),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Toggle between running and paused.
    pub fn start_pause(&mut self) -> Vec<Event> {
        if self.is_running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Start the countdown and apply one immediate tick.
    pub fn start(&mut self) -> Vec<Event> {
        if self.is_running {
            return Vec::new();
        }
        let now = self.clock.now_ms();
        self.is_running = true;
        if self.target_end_ms.is_none() {
            self.target_end_ms = Some(now.saturating_add(self.remaining_secs.saturating_mul(1000)));
        }
        debug!(mode = ?self.mode, remaining = self.remaining_secs, "timer started");

        let mut events = vec![Event::TimerStarted {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: timestamp(now),
        }];
        self.reconcile(now, &mut events);
        events
    }

    /// Stop the countdown, keeping the remaining time. A no-op when paused.
    pub fn pause(&mut self) -> Vec<Event> {
        if !self.is_running {
            return Vec::new();
        }
        let now = self.clock.now_ms();
        let mut events = Vec::new();
        // Flush elapsed time first; this may complete the phase.
        self.reconcile(now, &mut events);
        if !self.is_running {
            return events;
        }

        self.is_running = false;
        self.target_end_ms = None;
        self.bump_epoch();
        debug!(mode = ?self.mode, remaining = self.remaining_secs, "timer paused");
        events.push(Event::TimerPaused {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: timestamp(now),
        });
        events
    }

    /// Periodic recomputation. Ignored unless `token` is still current.
    pub fn tick(&mut self, token: TickToken) -> Vec<Event> {
        if token.epoch != self.epoch || !self.is_running || self.target_end_ms.is_none() {
            debug!(
                token_epoch = token.epoch,
                epoch = self.epoch,
                running = self.is_running,
                "dropping stale tick"
            );
            return Vec::new();
        }
        let mut events = Vec::new();
        self.reconcile(self.clock.now_ms(), &mut events);
        events
    }

    /// Rewind the current phase to its configured length and stop.
    pub fn reset(&mut self) -> Vec<Event> {
        self.target_end_ms = None;
        self.bump_epoch();
        self.is_running = false;
        self.remaining_secs = self.total_secs();
        debug!(mode = ?self.mode, "timer reset");
        vec![Event::TimerReset {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: timestamp(self.clock.now_ms()),
        }]
    }

    /// End the current phase now, exactly as if it had run out.
    pub fn skip(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        self.switch_phase(self.clock.now_ms(), true, &mut events);
        events
    }

    /// Return to the initial state and hide any banner.
    pub fn clear_all(&mut self) -> Vec<Event> {
        let now = self.clock.now_ms();
        self.target_end_ms = None;
        self.bump_epoch();
        self.lengths = PhaseLengths::default();
        self.mode = TimerMode::Work;
        self.remaining_secs = self.lengths.seconds(TimerMode::Work);
        self.is_running = false;
        self.sessions_completed = 0;
        info!("timer cleared");

        let mut events = vec![Event::TimerCleared { at: timestamp(now) }];
        if self.notification.dismiss() {
            events.push(Event::NotificationDismissed { at: timestamp(now) });
        }
        events
    }

    /// Change a phase length. Out-of-range values are clamped.
    ///
    /// If `mode` is the current phase, a paused countdown jumps to the new
    /// length, while a running one keeps its remaining time and only moves
    /// its target end forward from now.
    pub fn set_length(&mut self, mode: TimerMode, minutes: i64) -> Vec<Event> {
        let now = self.clock.now_ms();
        let stored = self.lengths.set(mode, minutes);
        if mode == self.mode {
            if self.is_running {
                self.target_end_ms =
                    Some(now.saturating_add(self.remaining_secs.saturating_mul(1000)));
            } else {
                self.remaining_secs = self.lengths.seconds(mode);
            }
        }
        debug!(?mode, requested = minutes, stored, "length changed");
        vec![Event::LengthChanged {
            mode,
            minutes: stored,
            at: timestamp(now),
        }]
    }

    pub fn set_work_length(&mut self, minutes: i64) -> Vec<Event> {
        self.set_length(TimerMode::Work, minutes)
    }

    pub fn set_short_break_length(&mut self, minutes: i64) -> Vec<Event> {
        self.set_length(TimerMode::ShortBreak, minutes)
    }

    pub fn set_long_break_length(&mut self, minutes: i64) -> Vec<Event> {
        self.set_length(TimerMode::LongBreak, minutes)
    }

    /// Host visibility signal. Becoming visible while running repairs any
    /// drift accumulated while ticks were throttled.
    pub fn set_visibility(&mut self, visible: bool) -> Vec<Event> {
        self.visible = visible;
        let mut events = Vec::new();
        if visible && self.is_running && self.target_end_ms.is_some() {
            debug!("visible again, reconciling");
            self.reconcile(self.clock.now_ms(), &mut events);
        }
        events
    }

    pub fn dismiss_notification(&mut self) -> Vec<Event> {
        if self.notification.dismiss() {
            vec![Event::NotificationDismissed {
                at: timestamp(self.clock.now_ms()),
            }]
        } else {
            Vec::new()
        }
    }

    /// Hide the banner if its display time has passed.
    pub fn expire_notification(&mut self) -> Vec<Event> {
        let now = self.clock.now_ms();
        if self.notification.expire(now) {
            vec![Event::NotificationDismissed { at: timestamp(now) }]
        } else {
            Vec::new()
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Recompute remaining time from the target; switch phase at zero.
    fn reconcile(&mut self, now: u64, events: &mut Vec<Event>) {
        let Some(target) = self.target_end_ms else {
            return;
        };
        self.remaining_secs = remaining_secs_until(target, now);
        trace!(remaining = self.remaining_secs, "tick");
        if self.remaining_secs == 0 {
            self.switch_phase(now, false, events);
        }
    }

    fn switch_phase(&mut self, now: u64, skipped: bool, events: &mut Vec<Event>) {
        let from = self.mode;
        if from == TimerMode::Work {
            self.sessions_completed = self.sessions_completed.saturating_add(1);
        }
        let to = from.next(self.sessions_completed);

        self.mode = to;
        self.remaining_secs = self.lengths.seconds(to);
        self.is_running = false;
        self.target_end_ms = None;
        self.bump_epoch();

        info!(
            from = ?from,
            to = ?to,
            sessions = self.sessions_completed,
            skipped,
            "phase switched"
        );

        let message = phase_message(to);
        self.notification.show(message, now);
        events.push(Event::PhaseCompleted {
            from,
            to,
            sessions_completed: self.sessions_completed,
            skipped,
            at: timestamp(now),
        });
        events.push(Event::NotificationShown {
            message: message.to_string(),
            at: timestamp(now),
        });
    }

    fn bump_epoch(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }
}

impl Default for TimerEngine<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

/// Whole seconds left until `target`, rounded to nearest, never negative.
fn remaining_secs_until(target_ms: u64, now_ms: u64) -> u64 {
    let diff = target_ms.saturating_sub(now_ms);
    diff.saturating_add(500) / 1000
}
