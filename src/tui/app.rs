use crate::domain::Earthquake;
use crate::store::StoreSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

pub struct TuiApp {
    pub snapshot: StoreSnapshot,
    pub selected: usize,
    pub input_mode: InputMode,
    pub search_input: String,
    pub show_legend: bool,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl TuiApp {
    pub fn new() -> Self {
        Self {
            snapshot: StoreSnapshot::default(),
            selected: 0,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            show_legend: false,
            should_quit: false,
            status_message: None,
        }
    }

    pub fn earthquakes(&self) -> &[Earthquake] {
        &self.snapshot.visible
    }

    pub fn selected_quake(&self) -> Option<&Earthquake> {
        self.snapshot.visible.get(self.selected)
    }

    /// Replaces the displayed state, keeping the selection in range.
    pub fn apply_snapshot(&mut self, snapshot: StoreSnapshot) {
        self.snapshot = snapshot;
        let len = self.snapshot.visible.len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.snapshot.visible.len() {
            self.selected += 1;
        }
    }

    pub fn page_down(&mut self, page: usize) {
        let last = self.snapshot.visible.len().saturating_sub(1);
        self.selected = (self.selected + page).min(last);
    }

    pub fn page_up(&mut self, page: usize) {
        self.selected = self.selected.saturating_sub(page);
    }

    pub fn begin_search(&mut self) {
        self.input_mode = InputMode::Search;
        self.search_input.clear();
    }

    pub fn end_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}
