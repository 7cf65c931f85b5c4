// File: src/tui/handlers.rs
// Translates key events into commands and applies commands to the
// list store. The two halves are deliberately separate: a key handler
// never mutates the list, and every mutation flows through `dispatch`.
use crate::tui::action::Command;
use crate::tui::state::{AppState, InputMode};
use crossterm::event::{KeyCode, KeyEvent};

/// Maps a key event to a command, updating transient UI state (modes,
/// buffers, selection) along the way. Returns `None` when the event was
/// consumed by the UI alone.
pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Option<Command> {
    match state.mode {
        InputMode::Normal => handle_normal_mode(key, state),
        InputMode::Creating | InputMode::Editing | InputMode::Searching => {
            handle_input_mode(key, state)
        }
        InputMode::Moving => handle_moving_mode(key, state),
        InputMode::ConfirmClearDone | InputMode::ConfirmClearAll => handle_confirm_mode(key, state),
    }
}

fn handle_normal_mode(key: KeyEvent, state: &mut AppState) -> Option<Command> {
    match key.code {
        KeyCode::Char('q') => return Some(Command::Quit),
        KeyCode::Char('j') | KeyCode::Down => state.next(),
        KeyCode::Char('k') | KeyCode::Up => state.previous(),
        KeyCode::Char('g') | KeyCode::Home => state.jump_to_start(),
        KeyCode::Char('G') | KeyCode::End => state.jump_to_end(),
        KeyCode::Char('?') => state.show_full_help = !state.show_full_help,

        KeyCode::Char('a') => {
            state.mode = InputMode::Creating;
            state.reset_input();
            state.message.clear();
        }
        KeyCode::Char('e') => {
            if let Some(task) = state.get_selected_task() {
                let task_id = task.id.clone();
                let task_text = task.text.clone();
                state.editing_id = Some(task_id);
                state.input_buffer = task_text;
                state.cursor_position = state.input_buffer.chars().count();
                state.mode = InputMode::Editing;
                state.message.clear();
            }
        }
        KeyCode::Char('d') => {
            if let Some(task) = state.get_selected_task() {
                return Some(Command::Remove(task.id.clone()));
            }
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            if let Some(task) = state.get_selected_task() {
                return Some(Command::Toggle(task.id.clone()));
            }
        }
        KeyCode::Char('/') => {
            state.mode = InputMode::Searching;
            state.input_buffer = state.active_search_query.clone();
            state.cursor_position = state.input_buffer.chars().count();
        }
        KeyCode::Char('f') => return Some(Command::CycleFilter),
        KeyCode::Char('m') => {
            if let Some(task) = state.get_selected_task() {
                state.moving_id = Some(task.id.clone());
                state.mode = InputMode::Moving;
                state.message = "Move with j/k, drop with Enter".to_string();
            }
        }
        KeyCode::Char('C') => {
            let (done, _) = state.store.progress();
            if done == 0 {
                state.message = "No completed tasks to clear.".to_string();
            } else {
                state.mode = InputMode::ConfirmClearDone;
            }
        }
        KeyCode::Char('D') => {
            if state.store.is_empty() {
                state.message = "The list is already empty.".to_string();
            } else {
                state.mode = InputMode::ConfirmClearAll;
            }
        }
        KeyCode::Char('t') => return Some(Command::ToggleTheme),
        KeyCode::Esc => {
            if !state.active_search_query.is_empty() {
                return Some(Command::ClearSearch);
            }
        }
        _ => {}
    }
    None
}

fn handle_input_mode(key: KeyEvent, state: &mut AppState) -> Option<Command> {
    match key.code {
        KeyCode::Enter => {
            let text = state.input_buffer.clone();
            let cmd = match state.mode {
                InputMode::Creating => Command::Add {
                    text,
                    priority: state.new_priority,
                },
                InputMode::Editing => {
                    let id = state.editing_id.take()?;
                    Command::UpdateText { id, text }
                }
                InputMode::Searching => Command::CommitSearch(text),
                _ => unreachable!(),
            };
            state.mode = InputMode::Normal;
            state.reset_input();
            return Some(cmd);
        }
        KeyCode::Esc => {
            let was_searching = state.mode == InputMode::Searching;
            state.mode = InputMode::Normal;
            state.editing_id = None;
            state.reset_input();
            if was_searching {
                return Some(Command::ClearSearch);
            }
        }
        KeyCode::Tab if state.mode == InputMode::Creating => {
            state.new_priority = state.new_priority.cycled();
        }
        KeyCode::Char(c) => {
            state.enter_char(c);
            if state.mode == InputMode::Searching {
                state.refresh_visible(); // live narrowing while typing
            }
        }
        KeyCode::Backspace => {
            state.delete_char();
            if state.mode == InputMode::Searching {
                state.refresh_visible();
            }
        }
        KeyCode::Left => state.move_cursor_left(),
        KeyCode::Right => state.move_cursor_right(),
        _ => {}
    }
    None
}

fn handle_moving_mode(key: KeyEvent, state: &mut AppState) -> Option<Command> {
    let moved = state.moving_id.clone()?;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            let target = state.visible_neighbor(&moved, true)?;
            return Some(Command::Reorder { moved, target });
        }
        KeyCode::Char('k') | KeyCode::Up => {
            let target = state.visible_neighbor(&moved, false)?;
            return Some(Command::Reorder { moved, target });
        }
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('m') => {
            state.moving_id = None;
            state.mode = InputMode::Normal;
            state.message.clear();
        }
        _ => {}
    }
    None
}

fn handle_confirm_mode(key: KeyEvent, state: &mut AppState) -> Option<Command> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            let cmd = if state.mode == InputMode::ConfirmClearAll {
                Command::ClearAll
            } else {
                Command::ClearCompleted
            };
            state.mode = InputMode::Normal;
            return Some(cmd);
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            // Declined: nothing reaches the store.
            state.mode = InputMode::Normal;
            state.message = "Cancelled.".to_string();
        }
        _ => {}
    }
    None
}

/// Applies a command to the list store and refreshes the visible
/// snapshot. Returns `true` when the application should quit.
pub fn dispatch(state: &mut AppState, cmd: Command) -> bool {
    if cmd == Command::Quit {
        return true;
    }
    let result = apply(state, cmd);
    if let Err(e) = result {
        log::error!("command failed: {:#}", e);
        state.message = format!("Error: {}", e);
    }
    state.refresh_visible();
    false
}

fn apply(state: &mut AppState, cmd: Command) -> anyhow::Result<()> {
    match cmd {
        Command::Add { text, priority } => match state.store.add(&text, priority)? {
            Some(task) => {
                state.message = format!("Added \"{}\"", task.text);
                state.refresh_visible();
                state.select_id(&task.id);
            }
            None => state.message = "Cannot add an empty task.".to_string(),
        },
        Command::Remove(id) => {
            if state.store.remove(&id)? {
                state.message = "Task deleted.".to_string();
            }
        }
        Command::Toggle(id) => {
            if let Some(checked) = state.store.toggle_checked(&id)? {
                state.message = if checked {
                    "Marked done.".to_string()
                } else {
                    "Marked pending.".to_string()
                };
            }
        }
        Command::UpdateText { id, text } => {
            if state.store.update_text(&id, &text)? {
                state.message = "Task updated.".to_string();
            } else if text.trim().is_empty() {
                state.message = "Task text cannot be empty.".to_string();
            }
        }
        Command::ClearCompleted => {
            let n = state.store.clear_completed()?;
            state.message = format!("Cleared {} completed task(s).", n);
        }
        Command::ClearAll => {
            let n = state.store.clear_all()?;
            state.message = format!("Cleared {} task(s).", n);
        }
        Command::Reorder { moved, target } => {
            if state.store.reorder(&moved, &target)? {
                state.refresh_visible();
                state.select_id(&moved);
            }
        }
        Command::CycleFilter => {
            state.filter = state.filter.cycled();
            state.message = format!("Filter: {}", state.filter.label());
        }
        Command::CommitSearch(query) => {
            state.active_search_query = query.trim().to_string();
        }
        Command::ClearSearch => {
            state.active_search_query.clear();
        }
        Command::ToggleTheme => {
            state.config.theme = state.config.theme.toggled();
            state.config.save(state.ctx.as_ref())?;
            state.message = format!("Theme: {}", state.config.theme);
        }
        Command::Quit => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::context::TestContext;
    use crate::model::Priority;
    use crossterm::event::KeyModifiers;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state_with(tasks: &[&str]) -> AppState {
        let ctx = Arc::new(TestContext::new());
        let mut state = AppState::new(ctx, Config::default()).unwrap();
        for t in tasks {
            state.store.add(t, Priority::Low).unwrap();
        }
        state.refresh_visible();
        state
    }

    #[test]
    fn test_toggle_emitted_for_selected_task() {
        let mut state = state_with(&["a", "b"]);
        state.list_state.select(Some(1));
        let expected = state.visible[1].id.clone();

        let cmd = handle_key_event(key(KeyCode::Char(' ')), &mut state);
        assert_eq!(cmd, Some(Command::Toggle(expected)));
    }

    #[test]
    fn test_declining_confirmation_preserves_list() {
        let mut state = state_with(&["a", "b"]);
        assert!(handle_key_event(key(KeyCode::Char('D')), &mut state).is_none());
        assert!(matches!(state.mode, InputMode::ConfirmClearAll));

        // 'n' must not produce a command; the store stays untouched.
        let cmd = handle_key_event(key(KeyCode::Char('n')), &mut state);
        assert!(cmd.is_none());
        assert_eq!(state.store.len(), 2);
        assert!(matches!(state.mode, InputMode::Normal));
    }

    #[test]
    fn test_confirmed_clear_all_empties_list() {
        let mut state = state_with(&["a", "b"]);
        handle_key_event(key(KeyCode::Char('D')), &mut state);
        let cmd = handle_key_event(key(KeyCode::Char('y')), &mut state).unwrap();
        dispatch(&mut state, cmd);
        assert!(state.store.is_empty());
        assert!(state.visible.is_empty());
    }

    #[test]
    fn test_add_flow_rejects_blank_input() {
        let mut state = state_with(&[]);
        handle_key_event(key(KeyCode::Char('a')), &mut state);
        state.input_buffer = "   ".to_string();
        let cmd = handle_key_event(key(KeyCode::Enter), &mut state).unwrap();
        dispatch(&mut state, cmd);
        assert!(state.store.is_empty());
        assert!(!state.message.is_empty());
    }

    #[test]
    fn test_move_mode_reorders_with_visible_neighbor() {
        let mut state = state_with(&["a", "b"]);
        state.list_state.select(Some(0));
        let top = state.visible[0].id.clone();

        handle_key_event(key(KeyCode::Char('m')), &mut state);
        let cmd = handle_key_event(key(KeyCode::Char('j')), &mut state).unwrap();
        dispatch(&mut state, cmd);

        assert_eq!(state.store.tasks()[1].id, top);
        // Selection follows the moved task.
        assert_eq!(state.get_selected_task().unwrap().id, top);
    }
}
