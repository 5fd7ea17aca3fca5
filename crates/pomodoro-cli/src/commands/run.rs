use std::time::Duration;

use clap::Args;
use pomodoro_core::{Config, PhaseLengths, SystemClock, Theme, TimerEngine, TimerHandle, TimerMode};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::input::{self, Input, HELP};
use crate::render::Screen;

#[derive(Args)]
pub struct RunArgs {
    /// Work length in minutes (overrides config)
    #[arg(long)]
    work: Option<i64>,
    /// Short break length in minutes (overrides config)
    #[arg(long)]
    short_break: Option<i64>,
    /// Long break length in minutes (overrides config)
    #[arg(long)]
    long_break: Option<i64>,
    /// Theme key for this session (overrides config)
    #[arg(long)]
    theme: Option<String>,
}

impl RunArgs {
    fn lengths(&self, config: &Config) -> PhaseLengths {
        let mut lengths = config.lengths();
        for (mode, value) in [
            (TimerMode::Work, self.work),
            (TimerMode::ShortBreak, self.short_break),
            (TimerMode::LongBreak, self.long_break),
        ] {
            if let Some(minutes) = value {
                lengths.set(mode, minutes);
            }
        }
        lengths
    }
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let theme = match &args.theme {
        Some(key) => Theme::by_key(key)?,
        None => config.theme(),
    };
    let lengths = args.lengths(&config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(session(lengths, theme));
    // A pending stdin read must not keep the process alive.
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}

async fn session(lengths: PhaseLengths, theme: Theme) -> Result<(), Box<dyn std::error::Error>> {
    let (handle, task) = TimerHandle::spawn(TimerEngine::with_lengths(SystemClock, lengths));
    let mut views = handle.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut screen = Screen::default();

    println!("{}", theme.paint_accent("Pomodoro Timer -- type ? for help"));
    screen.draw(&views.borrow_and_update(), &theme);

    loop {
        tokio::select! {
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                screen.draw(&view, &theme);
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("stdin closed");
                    break;
                };
                match input::parse(&line) {
                    Ok(Input::Intent(intent)) => {
                        let view = handle.send(intent).await?;
                        screen.draw(&view, &theme);
                    }
                    Ok(Input::Help) => println!("{HELP}"),
                    Ok(Input::Quit) => break,
                    Ok(Input::Empty) => {}
                    Err(message) => {
                        warn!(%line, "rejected input");
                        eprintln!("{message}");
                    }
                }
            }
        }
    }

    handle.shutdown().await?;
    task.await?;
    Ok(())
}
