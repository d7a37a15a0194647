use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme;

/// Key hints for the current view, or a one-off message in their place.
pub fn render(frame: &mut Frame, area: Rect, hints: &[(&str, &str)], message: Option<&str>) {
    let line = match message {
        Some(msg) => Line::from(Span::styled(msg, theme::amber())),
        None => {
            let mut spans = Vec::new();
            for (key, label) in hints {
                spans.push(Span::styled(*key, theme::gold()));
                spans.push(Span::styled(*label, theme::dim()));
            }
            Line::from(spans)
        }
    };

    let paragraph = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
