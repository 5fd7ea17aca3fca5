mod engine;
mod mode;

pub use engine::{TickToken, TimerEngine};
pub use mode::{PhaseLengths, TimerMode, SESSIONS_PER_LONG_BREAK};
