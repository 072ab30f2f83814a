//! Event loop for the interactive latency histogram.
//!
//! [`HistogramApp`] owns the theme and the histogram to display. It draws
//! until the user quits with `q`, `Q`, `Esc` or `Ctrl+C`.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use stats_core::histogram::Histogram;

use crate::histogram_view::{self, HistogramViewData};
use crate::themes::Theme;

/// Root state of the histogram viewer.
pub struct HistogramApp {
    pub theme: Theme,
    pub data: HistogramViewData,
}

impl HistogramApp {
    pub fn new(theme_name: &str, title: impl Into<String>, histogram: Histogram) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            data: HistogramViewData::new(title, histogram),
        }
    }

    /// Take over the terminal and draw the histogram until the user quits.
    ///
    /// The terminal is restored before returning, also when drawing fails.
    pub fn run(self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut terminal = restore_on_error(setup_terminal, restore_terminal)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if is_quit_key(&key) => break Ok(()),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }
        };

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        if self.data.histogram.total() == 0 {
            histogram_view::render_no_data(frame, area, &self.theme);
        } else {
            histogram_view::render_histogram_view(frame, area, &self.data, &self.theme);
        }
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Undo raw mode and the alternate screen after a failed setup. Errors are
/// ignored so the setup error is the one reported.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Run `setup`; if it fails, run `restore` before returning the error.
fn restore_on_error<T>(
    setup: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce(),
) -> io::Result<T> {
    match setup() {
        Ok(value) => Ok(value),
        Err(e) => {
            restore();
            Err(e)
        }
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_app_creation() {
        let hist = Histogram::from_samples(&[1.0, 2.0], 10);
        let app = HistogramApp::new("dark", "bench.log", hist);
        assert_eq!(app.data.title, "bench.log");
        assert_eq!(app.data.histogram.total(), 2);
        assert_eq!(app.theme.bar, Theme::dark().bar);
    }

    #[test]
    fn test_app_creation_unknown_theme_falls_back() {
        let app = HistogramApp::new("neon", "x", Histogram::from_samples(&[], 1));
        assert_eq!(app.data.histogram.total(), 0);
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit_key(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit_key(&key(KeyCode::Char('Q'), KeyModifiers::SHIFT)));
        assert!(is_quit_key(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_non_quit_keys() {
        assert!(!is_quit_key(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit_key(&key(KeyCode::Char('x'), KeyModifiers::NONE)));
        assert!(!is_quit_key(&key(KeyCode::Enter, KeyModifiers::NONE)));
    }

    #[test]
    fn test_release_events_ignored() {
        let mut release = key(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(!is_quit_key(&release));
    }

    #[test]
    fn test_restore_on_error_runs_restore_after_failed_setup() {
        let restored = std::cell::Cell::new(false);
        let result: io::Result<()> = restore_on_error(
            || Err(io::Error::new(io::ErrorKind::Other, "no tty")),
            || restored.set(true),
        );
        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn test_restore_on_error_skips_restore_on_success() {
        let restored = std::cell::Cell::new(false);
        let value = restore_on_error(|| Ok(7), || restored.set(true)).unwrap();
        assert_eq!(value, 7);
        assert!(!restored.get());
    }

    #[test]
    fn test_render_switches_on_empty_histogram() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let empty = HistogramApp::new("classic", "none", Histogram::from_samples(&[], 10));
        terminal.draw(|frame| empty.render(frame)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("No latency samples found"));

        let full = HistogramApp::new("classic", "some", Histogram::from_samples(&[1.0, 3.0], 10));
        terminal.draw(|frame| full.render(frame)).unwrap();
    }
}
