//! Active step rendering

use super::field_renderer::{draw_group, group_height, shifted};
use crate::app::{App, Focus, NavButton};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Horizontal room groups get to shake in
const SHAKE_MARGIN: u16 = 2;

/// Draw the active step: its groups and the navigation row
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(step) = app.steps.current_step() else {
        return;
    };

    let block = Block::default()
        .title(format!(
            " Step {} of {}: {} ",
            app.steps.current() + 1,
            app.steps.step_count(),
            step.title
        ))
        .title_style(Style::default().add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                // Groups
            Constraint::Length(BUTTON_HEIGHT), // Navigation
        ])
        .split(inner);
    let groups_area = chunks[0];

    let mut y = groups_area.y;
    for (g, group) in step.groups.iter().enumerate() {
        let height = group_height(group);
        if y + height > groups_area.y + groups_area.height {
            break;
        }
        let rest = Rect {
            x: groups_area.x + SHAKE_MARGIN,
            y,
            width: groups_area.width.saturating_sub(SHAKE_MARGIN * 2),
            height,
        };
        let offset = group.shake.map(|s| s.offset()).unwrap_or(0);
        let focused = match app.focus {
            Focus::Input { group, input } if group == g => Some(input),
            _ => None,
        };
        draw_group(frame, shifted(rest, offset, groups_area), group, focused, &app.phone);
        y += height;
    }

    draw_buttons(frame, chunks[1], app);
}

fn draw_buttons(frame: &mut Frame, area: Rect, app: &App) {
    let buttons = app.buttons();
    let mut constraints = vec![Constraint::Min(0)];
    constraints.extend(buttons.iter().map(|_| Constraint::Length(14)));
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, button) in buttons.iter().enumerate() {
        let accent = match button {
            NavButton::Submit => Some(Color::Green),
            _ => None,
        };
        render_button(
            frame,
            cells[i + 1],
            button.label(),
            app.focus == Focus::Button(*button),
            accent,
        );
    }
}
