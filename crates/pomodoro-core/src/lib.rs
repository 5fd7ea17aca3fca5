//! # Pomodoro Core Library
//!
//! Core logic for a Pomodoro timer. Front ends (the CLI, or anything else
//! that can render a countdown) are thin layers over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a drift-correcting state machine. Remaining time is
//!   always recomputed from an absolute target end timestamp, so throttled
//!   or suspended ticks never skew the countdown.
//! - **Runtime**: a tokio task that owns the engine and serializes ticks,
//!   intents and visibility signals.
//! - **Storage**: TOML-based configuration (starting lengths and theme).
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`TimerHandle`]: Handle to the serialized runtime
//! - [`Config`]: Application configuration management
//! - [`Theme`]: Colour theme handed to renderers

pub mod clock;
pub mod display;
pub mod error;
pub mod events;
pub mod notification;
pub mod runtime;
pub mod storage;
pub mod theme;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock, TokioClock};
pub use display::{DisplayProps, SessionSummary};
pub use error::{ConfigError, CoreError};
pub use events::Event;
pub use notification::{Notification, NotificationProps, AUTO_DISMISS_MS};
pub use runtime::{Intent, TimerHandle, TimerView};
pub use storage::Config;
pub use theme::{Theme, THEMES};
pub use timer::{PhaseLengths, TickToken, TimerEngine, TimerMode};
