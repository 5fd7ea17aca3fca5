use pomodoro_core::{Config, SystemClock, TimerEngine};

/// Timer state is not persisted, so this is the state a new `run` starts in.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let engine = TimerEngine::with_lengths(SystemClock, config.lengths());
    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    Ok(())
}
