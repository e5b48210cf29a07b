pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};
use crate::store::{EarthquakeStore, SortKey};

use self::app::{InputMode, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

const PAGE_SIZE: usize = 10;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let mut tui_app = TuiApp::new();
    let mut snapshots = ctx.store.subscribe();
    let event_handler = EventHandler::new(Duration::from_millis(100));

    spawn_refresh(&ctx.store);

    loop {
        if snapshots.has_changed().unwrap_or(false) {
            let snapshot = snapshots.borrow_and_update().clone();
            tui_app.apply_snapshot(snapshot);
        }

        terminal.draw(|frame| layout::render(frame, &tui_app))?;

        match event_handler.next()? {
            AppEvent::Key(key) => handle_key(&mut tui_app, &ctx.store, key),
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    ctx.store.close();
    Ok(())
}

/// Fetches in the background; the result arrives through the snapshot
/// channel on a later tick.
fn spawn_refresh(store: &Arc<EarthquakeStore>) {
    let store = store.clone();
    tokio::spawn(async move {
        store.fetch_all().await;
    });
}

fn handle_key(tui_app: &mut TuiApp, store: &Arc<EarthquakeStore>, key: KeyEvent) {
    if tui_app.input_mode == InputMode::Search {
        handle_search_key(tui_app, store, key);
        return;
    }

    tui_app.clear_status();
    match Action::from(key) {
        Action::Quit => tui_app.should_quit = true,
        Action::MoveUp => tui_app.move_up(),
        Action::MoveDown => tui_app.move_down(),
        Action::NextPage => tui_app.page_down(PAGE_SIZE),
        Action::PrevPage => tui_app.page_up(PAGE_SIZE),
        Action::SortByMagnitude => {
            store.sort(SortKey::Magnitude);
            tui_app.selected = 0;
        }
        Action::SortByDate => {
            store.sort(SortKey::Date);
            tui_app.selected = 0;
        }
        Action::Search => tui_app.begin_search(),
        Action::ResetSearch => {
            store.reset_search();
            tui_app.selected = 0;
        }
        Action::Refresh => spawn_refresh(store),
        Action::ToggleLegend => tui_app.show_legend = !tui_app.show_legend,
        Action::None => {}
    }
}

/// Search runs on every keystroke so the list narrows while typing.
fn handle_search_key(tui_app: &mut TuiApp, store: &EarthquakeStore, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            tui_app.end_search();
            if tui_app.search_input.trim().is_empty() {
                tui_app.set_status("Search cleared".to_string());
            }
        }
        KeyCode::Esc => {
            tui_app.end_search();
            tui_app.search_input.clear();
            store.reset_search();
        }
        KeyCode::Backspace => {
            tui_app.search_input.pop();
            store.search(&tui_app.search_input);
        }
        KeyCode::Char(c) => {
            tui_app.search_input.push(c);
            store.search(&tui_app.search_input);
        }
        _ => return,
    }
    tui_app.selected = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crossterm::event::KeyModifiers;

    use crate::fetcher::{FeedClient, FetchError};

    struct FixedClient;

    #[async_trait]
    impl FeedClient for FixedClient {
        async fn fetch(&self) -> std::result::Result<Vec<u8>, FetchError> {
            Ok(br#"{"features":[
                {"properties":{"mag":2.5,"place":"Reno, NV","time":1000},"geometry":{"coordinates":[0,0]}},
                {"properties":{"mag":4.0,"place":"Central Alaska","time":2000},"geometry":{"coordinates":[0,0]}}
            ]}"#
            .to_vec())
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn loaded_store() -> Arc<EarthquakeStore> {
        let store = Arc::new(EarthquakeStore::new(Arc::new(FixedClient)));
        store.fetch_all().await;
        store
    }

    #[tokio::test]
    async fn test_typing_searches_live() {
        let store = loaded_store().await;
        let mut app = TuiApp::new();

        handle_key(&mut app, &store, key(KeyCode::Char('/')));
        assert_eq!(app.input_mode, InputMode::Search);

        for c in "ala".chars() {
            handle_key(&mut app, &store, key(KeyCode::Char(c)));
        }
        assert_eq!(store.visible().len(), 1);

        handle_key(&mut app, &store, key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(store.snapshot().view.query.as_deref(), Some("ala"));
    }

    #[tokio::test]
    async fn test_escape_in_search_resets() {
        let store = loaded_store().await;
        let mut app = TuiApp::new();

        handle_key(&mut app, &store, key(KeyCode::Char('/')));
        handle_key(&mut app, &store, key(KeyCode::Char('r')));
        handle_key(&mut app, &store, key(KeyCode::Esc));

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(store.visible().len(), 2);
        assert_eq!(store.snapshot().view.query, None);
    }

    #[tokio::test]
    async fn test_sort_keys_reorder_store() {
        let store = loaded_store().await;
        let mut app = TuiApp::new();

        handle_key(&mut app, &store, key(KeyCode::Char('m')));
        assert_eq!(store.visible()[0].place, "Central Alaska");

        handle_key(&mut app, &store, key(KeyCode::Char('c')));
        assert_eq!(store.visible()[0].place, "Reno, NV");
    }

    #[tokio::test]
    async fn test_quit() {
        let store = loaded_store().await;
        let mut app = TuiApp::new();
        handle_key(&mut app, &store, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
