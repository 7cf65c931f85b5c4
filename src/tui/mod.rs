// File: src/tui/mod.rs
// Entry point and main loop for the TUI application.
pub mod action;
pub mod handlers;
pub mod state;
pub mod view;

use crate::config::Config;
use crate::context::SharedContext;
use crate::tui::state::AppState;
use crate::tui::view::draw;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;

pub fn run(ctx: SharedContext) -> Result<()> {
    // --- 1. CONFIG ---
    let cfg = match Config::load(ctx.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            // A missing file is a fresh start; anything else is a
            // syntax/permission problem the user must fix first.
            if !Config::is_missing_config_error(&e) {
                anyhow::bail!("Error loading configuration:\n{}", e);
            }
            Config::default()
        }
    };

    // --- 2. STATE INIT (loads the persisted list) ---
    let mut app_state = AppState::new(ctx, cfg)?;

    // --- 3. TERMINAL SETUP ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Restore the terminal even when drawing panics.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        default_hook(info);
    }));

    // --- 4. UI LOOP ---
    let result = run_loop(&mut terminal, &mut app_state);

    // --- 5. CLEANUP ---
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app_state: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app_state))?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        match event::read()? {
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => app_state.next(),
                MouseEventKind::ScrollUp => app_state.previous(),
                _ => {}
            },
            Event::Key(key) => {
                // Filter out KeyRelease events to prevent double input on Windows
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }
                if let Some(cmd) = handlers::handle_key_event(key, app_state)
                    && handlers::dispatch(app_state, cmd)
                {
                    break;
                }
            }
            _ => {}
        }
    }
    Ok(())
}
