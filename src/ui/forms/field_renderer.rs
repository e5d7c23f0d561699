//! Field rendering utilities for forms

use crate::phone::PhoneAdapter;
use crate::state::{FormGroup, FormInput, InputKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows a group needs: bordered body plus one error line
pub fn group_height(group: &FormGroup) -> u16 {
    let body = if group.inputs.iter().any(|i| i.kind.is_choice()) {
        group.inputs.len() as u16
    } else {
        1
    };
    body + 2 + 1
}

/// Shift `area` horizontally by `offset` columns, staying inside `bounds`
pub fn shifted(area: Rect, offset: i16, bounds: Rect) -> Rect {
    let min_x = bounds.x as i32;
    let max_x = (bounds.x + bounds.width).saturating_sub(area.width) as i32;
    let x = (area.x as i32 + offset as i32).clamp(min_x, max_x.max(min_x));
    Rect { x: x as u16, ..area }
}

fn marker(input: &FormInput) -> &'static str {
    match (input.kind, input.checked) {
        (InputKind::Radio, true) => "(•)",
        (InputKind::Radio, false) => "( )",
        (InputKind::Checkbox, true) => "[x]",
        (InputKind::Checkbox, false) => "[ ]",
        _ => "",
    }
}

/// Text shown for a free input
fn display_value(input: &FormInput, phone: &PhoneAdapter, is_active: bool) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if input.kind == InputKind::Tel {
        spans.push(Span::styled(
            format!("{} ", phone.region.dial_code()),
            Style::default().fg(Color::Yellow),
        ));
    }
    if input.value.is_empty() && !is_active {
        spans.push(Span::styled("(empty)", Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::raw(input.value.clone()));
    }
    if is_active {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }
    spans
}

/// Draw one labelled group with its inputs and inline error
///
/// `focused` is the index of the focused input within the group.
pub fn draw_group(
    frame: &mut Frame,
    area: Rect,
    group: &FormGroup,
    focused: Option<usize>,
    phone: &PhoneAdapter,
) {
    let has_error = group.error.is_some();
    let border_color = match (focused.is_some(), has_error) {
        (_, true) => Color::Red,
        (true, false) => Color::Cyan,
        (false, false) => Color::DarkGray,
    };

    let lines: Vec<Line> = group
        .inputs
        .iter()
        .enumerate()
        .map(|(i, input)| {
            let is_active = focused == Some(i);
            if input.kind.is_choice() {
                let style = if is_active {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else if input.checked {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(format!("{} {}", marker(input), input.label), style))
            } else {
                Line::from(display_value(input, phone, is_active))
            }
        })
        .collect();

    let mut title = format!(" {} ", group.label);
    if group.inputs.iter().any(|i| i.kind == InputKind::Tel) {
        title = format!(" {} [{}] ", group.label, phone.region.iso2().to_uppercase());
    }
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let body = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    frame.render_widget(Paragraph::new(lines).block(block), body);

    if let Some(error) = &group.error {
        let error_area = Rect {
            y: body.y + body.height,
            height: 1,
            ..area
        };
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {error}"), Style::default().fg(Color::Red))),
            error_area,
        );
    }
}
