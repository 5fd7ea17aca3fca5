//! Line commands typed during `run`.

use pomodoro_core::{Intent, TimerMode};

pub const HELP: &str = "\
commands:
  s        start / pause
  r        reset current phase
  k        skip to next phase
  c        clear everything
  d        dismiss banner
  w N      work length (1-60 min)
  b N      short break length (1-30 min)
  l N      long break length (5-60 min)
  h / v    report the terminal hidden / visible
  ?        this help
  q        quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Intent(Intent),
    Help,
    Quit,
    Empty,
}

/// Parse one line of input.
pub fn parse(line: &str) -> Result<Input, String> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(Input::Empty);
    };

    let intent = match word {
        "s" | "start" | "pause" => Intent::StartPause,
        "r" | "reset" => Intent::Reset,
        "k" | "skip" => Intent::Skip,
        "c" | "clear" => Intent::ClearAll,
        "d" | "dismiss" => Intent::DismissNotification,
        "h" | "hide" => Intent::SetVisibility(false),
        "v" | "show" => Intent::SetVisibility(true),
        "w" | "work" => length(TimerMode::Work, parts.next())?,
        "b" | "break" => length(TimerMode::ShortBreak, parts.next())?,
        "l" | "long" => length(TimerMode::LongBreak, parts.next())?,
        "?" | "help" => return Ok(Input::Help),
        "q" | "quit" | "exit" => return Ok(Input::Quit),
        other => return Err(format!("unknown command '{other}', type ? for help")),
    };
    Ok(Input::Intent(intent))
}

fn length(mode: TimerMode, arg: Option<&str>) -> Result<Intent, String> {
    let arg = arg.ok_or_else(|| format!("missing minutes for {}", mode.label()))?;
    let minutes = arg
        .parse::<i64>()
        .map_err(|_| format!("invalid minutes '{arg}'"))?;
    Ok(Intent::SetLength { mode, minutes })
}
