//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Configuration for rendering a dialog
pub struct DialogConfig<'a> {
    pub title: &'a str,
    pub title_color: Color,
    pub border_color: Color,
    /// Message content, `\n` separates paragraphs
    pub message: &'a str,
    /// Hint line at the bottom
    pub hint: Option<Vec<Span<'a>>>,
    pub max_width: u16,
}

/// Rect of `width` x `height` centered in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Render a centered dialog overlay
pub fn render_dialog(frame: &mut Frame, config: DialogConfig) {
    // 2 columns of padding each side plus borders
    let chrome = 6u16;
    let text_width = config.max_width.saturating_sub(chrome).max(1) as usize;
    let wrapped = wrap_text(config.message, text_width);

    let widest = wrapped
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(config.title.chars().count()))
        .max()
        .unwrap_or(0) as u16;
    let hint_rows = if config.hint.is_some() { 2 } else { 0 };
    let width = (widest + chrome).min(config.max_width);
    let height = 2 + wrapped.len() as u16 + hint_rows + 2;

    let dialog_area = centered(frame.area(), width, height);
    frame.render_widget(Clear, dialog_area);

    let mut content = vec![
        Line::from(Span::styled(
            config.title,
            Style::default()
                .fg(config.title_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(wrapped.into_iter().map(Line::from));
    if let Some(hint) = config.hint {
        content.push(Line::from(""));
        content.push(Line::from(hint));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(config.border_color));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);
    frame.render_widget(
        Paragraph::new(content),
        Rect {
            x: inner.x + 2.min(inner.width),
            width: inner.width.saturating_sub(4),
            ..inner
        },
    );
}

/// Greedy word wrap; every paragraph starts on a new line
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if line.is_empty() { word.len() } else { line.len() + 1 + word.len() };
            if needed > max_width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}
