use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::app::Result;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                return Ok(AppEvent::Key(key));
            }
        }
        Ok(AppEvent::Tick)
    }
}

/// Normal-mode actions. Search mode reads raw keys instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    NextPage,
    PrevPage,
    SortByMagnitude,
    SortByDate,
    Search,
    ResetSearch,
    Refresh,
    ToggleLegend,
    None,
}

impl From<KeyEvent> for Action {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
            KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
            KeyCode::Char('n') | KeyCode::PageDown => Action::NextPage,
            KeyCode::Char('p') | KeyCode::PageUp => Action::PrevPage,
            KeyCode::Char('m') => Action::SortByMagnitude,
            KeyCode::Char('d') => Action::SortByDate,
            KeyCode::Char('/') => Action::Search,
            KeyCode::Char('c') | KeyCode::Esc => Action::ResetSearch,
            KeyCode::Char('R') => Action::Refresh,
            KeyCode::Char('l') => Action::ToggleLegend,
            _ => Action::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Action::from(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(Action::from(key(KeyCode::Char('m'))), Action::SortByMagnitude);
        assert_eq!(Action::from(key(KeyCode::Char('d'))), Action::SortByDate);
        assert_eq!(Action::from(key(KeyCode::Char('/'))), Action::Search);
        assert_eq!(Action::from(key(KeyCode::Char('R'))), Action::Refresh);
        assert_eq!(Action::from(key(KeyCode::Down)), Action::MoveDown);
        assert_eq!(Action::from(key(KeyCode::Char('x'))), Action::None);
    }

    #[test]
    fn test_ctrl_c_quits_but_plain_c_resets() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Action::from(ctrl_c), Action::Quit);
        assert_eq!(Action::from(key(KeyCode::Char('c'))), Action::ResetSearch);
    }
}
