//! Colour themes for front ends.
//!
//! A [`Theme`] is a plain value handed to whatever renders the timer. The
//! selected key is persisted in [`crate::Config`] under `ui.theme`.

use serde::Serialize;

use crate::error::{CoreError, Result};

pub const DEFAULT_THEME: &str = "red";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub key: &'static str,
    pub name: &'static str,
    /// ANSI SGR foreground code for the countdown.
    pub primary: u8,
    /// ANSI SGR foreground code for labels and the banner.
    pub accent: u8,
}

pub const THEMES: [Theme; 5] = [
    Theme {
        key: "red",
        name: "Classic Red",
        primary: 31,
        accent: 91,
    },
    Theme {
        key: "blue",
        name: "Ocean Blue",
        primary: 34,
        accent: 94,
    },
    Theme {
        key: "green",
        name: "Forest Green",
        primary: 32,
        accent: 92,
    },
    Theme {
        key: "purple",
        name: "Royal Purple",
        primary: 35,
        accent: 95,
    },
    Theme {
        key: "orange",
        name: "Sunset Orange",
        primary: 33,
        accent: 93,
    },
];

impl Theme {
    /// Look up a theme by key.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownTheme`] if no theme has this key.
    pub fn by_key(key: &str) -> Result<Theme> {
        THEMES
            .iter()
            .find(|t| t.key == key)
            .copied()
            .ok_or_else(|| CoreError::UnknownTheme(key.to_string()))
    }

    /// Look up a persisted key, falling back to the default theme.
    pub fn resolve(key: &str) -> Theme {
        Self::by_key(key).unwrap_or_default()
    }

    pub fn paint(&self, text: &str) -> String {
        format!("\x1b[{}m{}\x1b[0m", self.primary, text)
    }

    pub fn paint_accent(&self, text: &str) -> String {
        format!("\x1b[{}m{}\x1b[0m", self.accent, text)
    }
}

impl Default for Theme {
    fn default() -> Self {
        THEMES[0]
    }
}
