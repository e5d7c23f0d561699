//! Layout components (stage header, progress bar, status bar)

use crate::app::{App, Focus};
use crate::state::{InputKind, STAGES};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};

/// Screen regions, top to bottom
pub struct ScreenLayout {
    pub header: Rect,
    pub progress: Rect,
    pub main: Rect,
    pub status: Rect,
}

/// Create the main layout
pub fn create_layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Stage header
            Constraint::Length(1), // Progress bar
            Constraint::Min(0),    // Step panel
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    ScreenLayout {
        header: chunks[0],
        progress: chunks[1],
        main: chunks[2],
        status: chunks[3],
    }
}

/// Draw the stage indicator; the active stage is highlighted
pub fn draw_stage_header(frame: &mut Frame, area: Rect, app: &App) {
    let active = app.steps.active_stage();
    let done = app.steps.is_success();

    let mut spans = vec![Span::raw(" ")];
    for (i, stage) in STAGES.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }
        let style = if active == Some(i) {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else if done || active.is_some_and(|a| i < a) {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("{}. {stage}", i + 1), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the progress bar
pub fn draw_progress(frame: &mut Frame, area: Rect, app: &App) {
    let percent = app.steps.progress_percent().min(100);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .percent(percent)
        .label(format!("{percent}%"));
    frame.render_widget(gauge, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" {} ", get_hints(app)),
        Style::default().fg(Color::Gray),
    )];

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}

/// Keyboard hints for the current focus
fn get_hints(app: &App) -> &'static str {
    if app.steps.is_success() {
        return "Enter:exit";
    }
    let focused = match app.focus {
        Focus::Input { group, input } => app
            .steps
            .current_step()
            .and_then(|s| s.groups.get(group))
            .and_then(|g| g.inputs.get(input))
            .map(|i| i.kind),
        Focus::Button(_) => None,
    };
    match focused {
        Some(InputKind::Tel) => "Tab:next  F2:region  Esc:back  ^C:quit",
        Some(InputKind::Radio) => "Tab:next  Space:select  Esc:back  ^C:quit",
        Some(InputKind::Checkbox) => "Tab:next  Space:toggle  Esc:back  ^C:quit",
        Some(_) => "Tab:next  Enter:next field  Esc:back  ^C:quit",
        None => "Tab:next  Enter:press  Esc:back  ^C:quit",
    }
}
