use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::status::{DisplayCategory, Urgency};

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const SELECTED_STYLE: Style = Style::new()
    .bg(Color::Rgb(40, 40, 60))
    .add_modifier(Modifier::BOLD);

pub const PROMPT_STYLE: Style = Style::new().fg(Color::Cyan);

pub const WARNING_STYLE: Style = Style::new()
    .fg(Color::Red)
    .add_modifier(Modifier::BOLD);

pub fn badge_style(status: DisplayCategory) -> Style {
    match status.urgency() {
        Urgency::Highest => Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
        Urgency::Medium => Style::new().fg(Color::Yellow),
        Urgency::Neutral => Style::new().fg(Color::DarkGray),
        Urgency::None => Style::new().fg(Color::Rgb(80, 220, 100)),
    }
}

/// Status label as a colored Span.
pub fn badge_span(status: DisplayCategory) -> Span<'static> {
    Span::styled(status.label(), badge_style(status))
}

/// Wrap text to a given width. Returns (wrapped_string, line_count).
pub fn wrap_text(text: &str, width: usize) -> (String, u16) {
    if width == 0 {
        return (text.to_string(), 1);
    }
    let wrapped = textwrap::fill(text, width);
    let lines = wrapped.lines().count().max(1) as u16;
    (wrapped, lines)
}
