//! Success dialog shown once the assessment is submitted

use super::base::{render_dialog, DialogConfig};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render the terminal success view centered on the screen
pub fn render_success_dialog(frame: &mut Frame) {
    let hint = vec![
        Span::raw("Press "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" to exit"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: "Assessment complete",
            title_color: Color::Green,
            border_color: Color::Green,
            message: "Thank you! Your hair assessment has been submitted.\nOur specialist will call you shortly with your personalised plan.",
            hint: Some(hint),
            max_width: 60,
        },
    );
}
