// File: src/tui/state.rs
// Manages the application state for the TUI.
use crate::config::Config;
use crate::context::SharedContext;
use crate::model::{Priority, Task};
use crate::store::{Filter, ListStore};
use anyhow::Result;
use ratatui::widgets::ListState;

#[derive(PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    Creating,
    Editing,
    Searching,
    Moving,
    ConfirmClearDone,
    ConfirmClearAll,
}

pub struct AppState {
    // Data
    pub ctx: SharedContext,
    pub store: ListStore,
    pub config: Config,
    /// Snapshot of the store filtered for display; rebuilt after every
    /// mutation. Domain state is never read back out of this.
    pub visible: Vec<Task>,

    // UI State
    pub list_state: ListState,
    pub mode: InputMode,
    pub filter: Filter,
    pub message: String,
    pub show_full_help: bool,

    // Input Buffers
    pub input_buffer: String,
    pub cursor_position: usize,
    pub active_search_query: String,
    /// Priority the next created task gets; sticky across adds like the
    /// priority selector it replaces.
    pub new_priority: Priority,
    pub editing_id: Option<String>,
    pub moving_id: Option<String>,
}

impl AppState {
    pub fn new(ctx: SharedContext, config: Config) -> Result<Self> {
        let store = ListStore::load(ctx.clone(), config.insert)?;
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        let mut state = Self {
            ctx,
            store,
            config,
            visible: vec![],
            list_state,
            mode: InputMode::Normal,
            filter: Filter::All,
            message: String::new(),
            show_full_help: false,
            input_buffer: String::new(),
            cursor_position: 0,
            active_search_query: String::new(),
            new_priority: Priority::default(),
            editing_id: None,
            moving_id: None,
        };
        state.refresh_visible();
        Ok(state)
    }

    /// Rebuilds the visible snapshot from the store and clamps the
    /// selection. While a search is being typed, the in-progress buffer
    /// is the live query.
    pub fn refresh_visible(&mut self) {
        let query = if self.mode == InputMode::Searching {
            &self.input_buffer
        } else {
            &self.active_search_query
        };
        self.visible = self.store.visible(self.filter, query);

        let len = self.visible.len();
        if len == 0 {
            self.list_state.select(None);
        } else {
            let current = self.list_state.selected().unwrap_or(0);
            self.list_state.select(Some(current.min(len - 1)));
        }
    }

    pub fn get_selected_task(&self) -> Option<&Task> {
        self.list_state
            .selected()
            .and_then(|idx| self.visible.get(idx))
    }

    /// Moves the selection onto the task with the given id, if visible.
    pub fn select_id(&mut self, id: &str) {
        if let Some(idx) = self.visible.iter().position(|t| t.id == id) {
            self.list_state.select(Some(idx));
        }
    }

    /// Id of the visible neighbor above/below the given task, the
    /// reorder target for step-wise movement.
    pub fn visible_neighbor(&self, id: &str, below: bool) -> Option<String> {
        let idx = self.visible.iter().position(|t| t.id == id)?;
        let neighbor = if below {
            idx.checked_add(1).filter(|i| *i < self.visible.len())?
        } else {
            idx.checked_sub(1)?
        };
        Some(self.visible[neighbor].id.clone())
    }

    // --- NAVIGATION ---
    pub fn next(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= self.visible.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.visible.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn jump_to_start(&mut self) {
        if !self.visible.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn jump_to_end(&mut self) {
        if !self.visible.is_empty() {
            self.list_state.select(Some(self.visible.len() - 1));
        }
    }

    // --- INPUT HELPERS ---
    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }

    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }

    pub fn enter_char(&mut self, new_char: char) {
        // Safe insertion for UTF-8 strings
        let byte_index = self
            .input_buffer
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_position)
            .unwrap_or(self.input_buffer.len());

        self.input_buffer.insert(byte_index, new_char);
        self.move_cursor_right();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position != 0 {
            let current_index = self.cursor_position;
            let before = self.input_buffer.chars().take(current_index - 1);
            let after = self.input_buffer.chars().skip(current_index);
            self.input_buffer = before.chain(after).collect();
            self.move_cursor_left();
        }
    }

    pub fn reset_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.input_buffer.chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;
    use std::sync::Arc;

    fn test_state() -> AppState {
        let ctx = Arc::new(TestContext::new());
        AppState::new(ctx, Config::default()).unwrap()
    }

    fn seeded_state(n: usize) -> AppState {
        let mut state = test_state();
        for i in 0..n {
            state
                .store
                .add(&format!("task {}", i), Priority::Low)
                .unwrap();
        }
        state.refresh_visible();
        state
    }

    #[test]
    fn test_navigation_next_wraps() {
        let mut state = seeded_state(3);
        state.list_state.select(Some(0));

        state.next(); // 1
        assert_eq!(state.list_state.selected(), Some(1));

        state.next(); // 2
        assert_eq!(state.list_state.selected(), Some(2));

        state.next(); // Wrap to 0
        assert_eq!(state.list_state.selected(), Some(0));
    }

    #[test]
    fn test_navigation_previous_wraps() {
        let mut state = seeded_state(3);
        state.list_state.select(Some(0));

        state.previous(); // Wrap to last (2)
        assert_eq!(state.list_state.selected(), Some(2));

        state.previous(); // 1
        assert_eq!(state.list_state.selected(), Some(1));
    }

    #[test]
    fn test_navigation_empty_list_safety() {
        let mut state = test_state();

        // Should not panic
        state.next();
        state.previous();
        state.jump_to_end();
        assert_eq!(state.list_state.selected(), None);
    }

    #[test]
    fn test_cursor_clamping() {
        let mut state = test_state();
        state.input_buffer = "abc".to_string(); // len 3
        state.cursor_position = 0;

        state.move_cursor_right(); // 1
        state.move_cursor_right(); // 2
        state.move_cursor_right(); // 3 (after 'c')
        state.move_cursor_right(); // Should stay 3

        assert_eq!(state.cursor_position, 3);

        state.move_cursor_left(); // 2
        state.move_cursor_left(); // 1
        state.move_cursor_left(); // 0
        state.move_cursor_left(); // Should stay 0

        assert_eq!(state.cursor_position, 0);
    }

    #[test]
    fn test_visible_neighbor_ends() {
        let state = seeded_state(2);
        let first = state.visible[0].id.clone();
        let last = state.visible[1].id.clone();

        assert_eq!(state.visible_neighbor(&first, true), Some(last.clone()));
        assert_eq!(state.visible_neighbor(&first, false), None);
        assert_eq!(state.visible_neighbor(&last, true), None);
    }
}
