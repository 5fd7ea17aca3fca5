//! Serialized owner for a [`TimerEngine`].
//!
//! One tokio task owns the engine. Intents arrive over an mpsc channel, the
//! once-per-second tick is a local interval that only exists while the
//! engine is running, and the rendered state goes out on a watch channel.
//! Because everything funnels through one loop, a tick can never interleave
//! with an intent; the engine's epoch check covers ticks issued for a
//! countdown that has since been stopped.

use std::future::pending;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::display::{DisplayProps, SessionSummary};
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::notification::NotificationProps;
use crate::timer::{PhaseLengths, TickToken, TimerEngine, TimerMode};

const TICK_PERIOD: Duration = Duration::from_secs(1);
const COMMAND_BUFFER: usize = 32;
const EVENT_BUFFER: usize = 64;

/// A discrete user or host intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    StartPause,
    Reset,
    Skip,
    ClearAll,
    SetLength { mode: TimerMode, minutes: i64 },
    SetVisibility(bool),
    DismissNotification,
}

impl Intent {
    pub fn apply<C: Clock>(self, engine: &mut TimerEngine<C>) -> Vec<Event> {
        match self {
            Intent::StartPause => engine.start_pause(),
            Intent::Reset => engine.reset(),
            Intent::Skip => engine.skip(),
            Intent::ClearAll => engine.clear_all(),
            Intent::SetLength { mode, minutes } => engine.set_length(mode, minutes),
            Intent::SetVisibility(visible) => engine.set_visibility(visible),
            Intent::DismissNotification => engine.dismiss_notification(),
        }
    }
}

/// Everything a front end needs to render one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerView {
    pub display: DisplayProps,
    pub notification: NotificationProps,
    pub summary: SessionSummary,
    pub lengths: PhaseLengths,
}

impl TimerView {
    pub fn of<C: Clock>(engine: &TimerEngine<C>) -> Self {
        Self {
            display: engine.display(),
            notification: engine.notification_props(),
            summary: engine.summary(),
            lengths: engine.lengths(),
        }
    }

    pub fn progress(&self) -> f64 {
        self.display.progress(&self.lengths)
    }
}

enum Command {
    Intent(Intent, oneshot::Sender<TimerView>),
    Snapshot(oneshot::Sender<Event>),
    Shutdown,
}

/// Cloneable handle to a running timer task.
///
/// The task stops when [`TimerHandle::shutdown`] is called or the last
/// handle is dropped.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    commands: mpsc::Sender<Command>,
    view: watch::Receiver<TimerView>,
    events: broadcast::Sender<Event>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Intent(intent, _) => f.debug_tuple("Intent").field(intent).finish(),
            Command::Snapshot(_) => f.write_str("Snapshot"),
            Command::Shutdown => f.write_str("Shutdown"),
        }
    }
}

impl TimerHandle {
    /// Spawn the owner task on the current tokio runtime.
    ///
    /// The join handle yields the engine back once the task stops.
    pub fn spawn<C: Clock>(engine: TimerEngine<C>) -> (Self, JoinHandle<TimerEngine<C>>) {
        let (commands, rx) = mpsc::channel(COMMAND_BUFFER);
        let (view_tx, view) = watch::channel(TimerView::of(&engine));
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        let task = tokio::spawn(run(engine, rx, view_tx, events.clone()));
        (
            Self {
                commands,
                view,
                events,
            },
            task,
        )
    }

    /// Apply an intent and wait for the resulting view.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::RuntimeClosed`] if the task has stopped.
    pub async fn send(&self, intent: Intent) -> Result<TimerView> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::Intent(intent, reply))
            .await
            .map_err(|_| CoreError::RuntimeClosed)?;
        rx.await.map_err(|_| CoreError::RuntimeClosed)
    }

    pub async fn start_pause(&self) -> Result<TimerView> {
        self.send(Intent::StartPause).await
    }

    pub async fn reset(&self) -> Result<TimerView> {
        self.send(Intent::Reset).await
    }

    pub async fn skip(&self) -> Result<TimerView> {
        self.send(Intent::Skip).await
    }

    pub async fn clear_all(&self) -> Result<TimerView> {
        self.send(Intent::ClearAll).await
    }

    pub async fn set_length(&self, mode: TimerMode, minutes: i64) -> Result<TimerView> {
        self.send(Intent::SetLength { mode, minutes }).await
    }

    pub async fn set_visibility(&self, visible: bool) -> Result<TimerView> {
        self.send(Intent::SetVisibility(visible)).await
    }

    pub async fn dismiss_notification(&self) -> Result<TimerView> {
        self.send(Intent::DismissNotification).await
    }

    /// Full state snapshot event.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::RuntimeClosed`] if the task has stopped.
    pub async fn snapshot(&self) -> Result<Event> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::Snapshot(reply))
            .await
            .map_err(|_| CoreError::RuntimeClosed)?;
        rx.await.map_err(|_| CoreError::RuntimeClosed)
    }

    /// Ask the task to stop. Ticks stop with it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::RuntimeClosed`] if the task already stopped.
    pub async fn shutdown(&self) -> Result<()> {
        self.commands
            .send(Command::Shutdown)
            .await
            .map_err(|_| CoreError::RuntimeClosed)
    }

    /// Latest published view.
    pub fn view(&self) -> TimerView {
        self.view.borrow().clone()
    }

    /// Receiver that is notified on every view change.
    pub fn subscribe(&self) -> watch::Receiver<TimerView> {
        self.view.clone()
    }

    /// Stream of engine events, including ones caused by ticks.
    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }
}

async fn run<C: Clock>(
    mut engine: TimerEngine<C>,
    mut commands: mpsc::Receiver<Command>,
    view: watch::Sender<TimerView>,
    events: broadcast::Sender<Event>,
) -> TimerEngine<C> {
    info!("timer runtime started");
    let mut ticker: Option<(TickToken, Interval)> = None;

    loop {
        sync_ticker(&engine, &mut ticker);
        let dismiss_in = engine
            .notification()
            .deadline_ms()
            .map(|deadline| Duration::from_millis(deadline.saturating_sub(engine.clock().now_ms())));

        let produced = tokio::select! {
            cmd = commands.recv() => match cmd {
                Some(Command::Intent(intent, reply)) => {
                    debug!(?intent, "intent");
                    let produced = intent.apply(&mut engine);
                    let _ = reply.send(TimerView::of(&engine));
                    produced
                }
                Some(Command::Snapshot(reply)) => {
                    let _ = reply.send(engine.snapshot());
                    Vec::new()
                }
                Some(Command::Shutdown) | None => break,
            },
            token = next_tick(&mut ticker) => engine.tick(token),
            _ = sleep_for(dismiss_in) => engine.expire_notification(),
        };

        view.send_if_modified(|current| {
            let next = TimerView::of(&engine);
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
        for event in produced {
            let _ = events.send(event);
        }
    }

    info!("timer runtime stopped");
    engine
}

/// Keep exactly one interval alive for the current countdown, none when
/// stopped. A new epoch always gets a fresh interval.
fn sync_ticker<C: Clock>(engine: &TimerEngine<C>, ticker: &mut Option<(TickToken, Interval)>) {
    match engine.tick_token() {
        Some(token) if ticker.as_ref().is_some_and(|(current, _)| *current == token) => {}
        Some(token) => {
            debug!(epoch = token.epoch(), "tick interval armed");
            let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            *ticker = Some((token, interval));
        }
        None => {
            if ticker.take().is_some() {
                debug!("tick interval torn down");
            }
        }
    }
}

async fn next_tick(ticker: &mut Option<(TickToken, Interval)>) -> TickToken {
    match ticker {
        Some((token, interval)) => {
            interval.tick().await;
            *token
        }
        None => pending().await,
    }
}

async fn sleep_for(delay: Option<Duration>) {
    match delay {
        Some(delay) => tokio::time::sleep(delay).await,
        None => pending().await,
    }
}
