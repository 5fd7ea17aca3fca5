//! Terminal rendering of a [`TimerView`].

use pomodoro_core::display::progress_bar;
use pomodoro_core::{Theme, TimerView};

const BAR_WIDTH: usize = 24;

/// Status line for one frame, without trailing newline.
pub fn status_line(view: &TimerView, theme: &Theme) -> String {
    let display = &view.display;
    let state = if display.is_running { "running" } else { "paused" };
    format!(
        "{} {} {} {} | sessions {} | focus {}",
        theme.paint_accent(&format!("{:<11}", display.mode.label())),
        theme.paint(&display.clock_text()),
        progress_bar(view.progress(), BAR_WIDTH),
        state,
        view.summary.sessions_completed,
        view.summary.focus_text(),
    )
}

pub fn banner(message: &str, theme: &Theme) -> String {
    theme.paint_accent(&format!(">> {message}"))
}

/// Tracks what is on screen so banners print once per appearance.
#[derive(Debug, Default)]
pub struct Screen {
    last_line: String,
    banner: Option<String>,
}

impl Screen {
    pub fn draw(&mut self, view: &TimerView, theme: &Theme) {
        let current = view
            .notification
            .visible
            .then(|| view.notification.message.clone());
        if current.is_some() && current != self.banner {
            println!("{}", banner(&view.notification.message, theme));
            self.last_line.clear();
        }
        self.banner = current;

        let line = status_line(view, theme);
        if line != self.last_line {
            println!("{line}");
            self.last_line = line;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomodoro_core::{ManualClock, TimerEngine};

    #[test]
    fn status_line_shows_countdown_and_totals() {
        let mut engine = TimerEngine::new(ManualClock::new(0));
        engine.skip();
        let line = status_line(&TimerView::of(&engine), &Theme::default());
        assert!(line.contains("05:00"));
        assert!(line.contains("Short Break"));
        assert!(line.contains("sessions 1"));
        assert!(line.contains("focus 0h 25m"));
        assert!(line.contains("paused"));
    }

    #[test]
    fn banner_carries_message() {
        let text = banner("hello", &Theme::default());
        assert!(text.contains(">> hello"));
    }
}
