// File: src/tui/view.rs
use crate::config::AppTheme;
use crate::tui::state::{AppState, InputMode};
use unicode_width::UnicodeWidthStr;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
};

/// Concrete colors for the active theme. The rest of the module only
/// talks to this struct, never to `AppTheme` directly.
struct Palette {
    fg: Color,
    bg: Color,
    dim: Color,
    accent: Color,
    border: Color,
    high: Color,
    medium: Color,
    low: Color,
}

fn palette(theme: AppTheme) -> Palette {
    match theme {
        AppTheme::Dark => Palette {
            fg: Color::Reset,
            bg: Color::Reset,
            dim: Color::DarkGray,
            accent: Color::Cyan,
            border: Color::DarkGray,
            high: Color::Red,
            medium: Color::Yellow,
            low: Color::Green,
        },
        AppTheme::Light => Palette {
            fg: Color::Black,
            bg: Color::White,
            dim: Color::Gray,
            accent: Color::Blue,
            border: Color::Gray,
            high: Color::Red,
            medium: Color::Magenta,
            low: Color::Green,
        },
    }
}

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let pal = palette(state.config.theme);
    let base = Style::default().fg(pal.fg).bg(pal.bg);

    // Paint the whole frame so the light theme gets its background.
    f.render_widget(Block::default().style(base), f.area());

    let full_help_text = help_lines(&pal);
    let footer_height = if state.show_full_help {
        full_help_text.len() as u16 + 2
    } else {
        3
    };

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(footer_height),
        ])
        .split(f.area());

    // --- Header: title + filter/search on the left, progress gauge right ---
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(28)])
        .split(v_chunks[0]);

    let mut title_spans = vec![
        Span::styled(
            " tickli ",
            Style::default().fg(pal.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("[{}]", state.filter.label()),
            Style::default().fg(pal.fg),
        ),
    ];
    let query = if state.mode == InputMode::Searching {
        &state.input_buffer
    } else {
        &state.active_search_query
    };
    if !query.is_empty() {
        title_spans.push(Span::styled(
            format!("  /{}", query),
            Style::default().fg(pal.accent),
        ));
    }
    let header = Paragraph::new(Line::from(title_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(pal.border)),
    );
    f.render_widget(header, h_chunks[0]);

    let (done, total) = state.store.progress();
    let ratio = if total == 0 {
        0.0
    } else {
        done as f64 / total as f64
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(pal.border)),
        )
        .gauge_style(Style::default().fg(pal.low).bg(pal.bg))
        .ratio(ratio)
        .label(format!("{}/{} done", done, total));
    f.render_widget(gauge, h_chunks[1]);

    // --- Task list ---
    let items: Vec<ListItem> = state
        .visible
        .iter()
        .map(|task| {
            let prio_color = match task.priority {
                crate::model::Priority::High => pal.high,
                crate::model::Priority::Medium => pal.medium,
                crate::model::Priority::Low => pal.low,
            };

            let mut text_style = Style::default().fg(pal.fg);
            if task.checked {
                text_style = text_style.fg(pal.dim);
                if state.config.strikethrough_completed {
                    text_style = text_style.add_modifier(Modifier::CROSSED_OUT);
                }
            }
            if state.moving_id.as_deref() == Some(task.id.as_str()) {
                text_style = text_style.fg(pal.accent).add_modifier(Modifier::BOLD);
            }

            let spans = vec![
                Span::styled(format!(" {} ", task.checkbox_symbol()), text_style),
                Span::styled("\u{2022} ", Style::default().fg(prio_color)),
                Span::styled(task.text.clone(), text_style),
                Span::styled(format!("  {}", task.time), Style::default().fg(pal.dim)),
            ];
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list_title = if state.moving_id.is_some() {
        " Tasks (moving) "
    } else {
        " Tasks "
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(list_title)
                .border_style(Style::default().fg(pal.border)),
        )
        .highlight_style(
            Style::default()
                .fg(pal.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    f.render_stateful_widget(list, v_chunks[1], &mut state.list_state);

    // --- Footer ---
    match state.mode {
        InputMode::Creating | InputMode::Editing | InputMode::Searching => {
            let title = match state.mode {
                InputMode::Creating => {
                    format!(" New task ({})  [Tab: priority] ", state.new_priority)
                }
                InputMode::Editing => " Edit task ".to_string(),
                _ => " Search ".to_string(),
            };
            let input = Paragraph::new(state.input_buffer.as_str()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(pal.accent)),
            );
            f.render_widget(input, v_chunks[2]);

            // Cursor after the character the insertion point sits on.
            let prefix: String = state
                .input_buffer
                .chars()
                .take(state.cursor_position)
                .collect();
            let x = v_chunks[2].x + 1 + prefix.width() as u16;
            let y = v_chunks[2].y + 1;
            f.set_cursor_position((x, y));
        }
        InputMode::ConfirmClearDone => {
            let (done, _) = state.store.progress();
            draw_confirm(
                f,
                v_chunks[2],
                &pal,
                &format!("Clear {} completed task(s)? (y/n)", done),
            );
        }
        InputMode::ConfirmClearAll => {
            draw_confirm(
                f,
                v_chunks[2],
                &pal,
                &format!("Clear all {} task(s)? (y/n)", state.store.len()),
            );
        }
        _ => {
            let content: Vec<Line> = if state.show_full_help {
                full_help_text
            } else if !state.message.is_empty() {
                vec![Line::from(Span::styled(
                    state.message.clone(),
                    Style::default().fg(pal.accent),
                ))]
            } else {
                vec![Line::from(Span::styled(
                    " a:Add  e:Edit  d:Del  Space:Done  m:Move  /:Search  f:Filter  ?:More",
                    Style::default().fg(pal.dim),
                ))]
            };
            let footer = Paragraph::new(content).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(pal.border)),
            );
            f.render_widget(footer, v_chunks[2]);
        }
    }
}

fn draw_confirm(f: &mut Frame, area: ratatui::layout::Rect, pal: &Palette, prompt: &str) {
    let p = Paragraph::new(Line::from(vec![Span::styled(
        prompt.to_string(),
        Style::default().fg(pal.high).add_modifier(Modifier::BOLD),
    )]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Confirm ")
            .border_style(Style::default().fg(pal.high)),
    );
    f.render_widget(p, area);
}

fn help_lines(pal: &Palette) -> Vec<Line<'static>> {
    let section = |label: &'static str, color: Color| {
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };
    vec![
        Line::from(vec![
            section(" GLOBAL ", pal.accent),
            Span::raw(" ?:Toggle Help  t:Theme  q:Quit"),
        ]),
        Line::from(vec![
            section(" NAVIGATION ", pal.medium),
            Span::raw(" j/k:Up/Down  g/G:First/Last"),
        ]),
        Line::from(vec![
            section(" TASKS ", pal.low),
            Span::raw(" a:Add  e:Edit  d:Delete  Space/Enter:Toggle Done"),
        ]),
        Line::from(vec![
            section("       ", pal.fg),
            Span::raw("m:Move (j/k relocate, Enter drops)"),
        ]),
        Line::from(vec![
            section(" VIEW ", pal.accent),
            Span::raw(" /:Search  f:Cycle Filter (all/pending/completed)  Esc:Clear Search"),
        ]),
        Line::from(vec![
            section(" BULK ", pal.high),
            Span::raw(" C:Clear Completed  D:Clear All (both ask for confirmation)"),
        ]),
    ]
}
