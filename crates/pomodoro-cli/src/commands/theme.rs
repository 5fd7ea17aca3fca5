use clap::Subcommand;
use pomodoro_core::{Config, THEMES};

#[derive(Subcommand)]
pub enum ThemeAction {
    /// List available themes
    List,
    /// Show the selected theme
    Show,
    /// Select a theme by key (e.g. "blue")
    Set {
        key: String,
    },
}

pub fn run(action: ThemeAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ThemeAction::List => {
            let current = Config::load()?.theme();
            for theme in THEMES {
                let marker = if theme.key == current.key { "*" } else { " " };
                println!("{marker} {:<8} {}", theme.key, theme.paint(theme.name));
            }
        }
        ThemeAction::Show => {
            let theme = Config::load()?.theme();
            println!("{} ({})", theme.name, theme.key);
        }
        ThemeAction::Set { key } => {
            let mut config = Config::load()?;
            let theme = config.set_theme(&key)?;
            config.save()?;
            println!("theme set to {}", theme.name);
        }
    }
    Ok(())
}
