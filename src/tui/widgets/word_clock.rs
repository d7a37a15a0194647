use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, phrase: &str) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            phrase,
            theme::gold().add_modifier(Modifier::ITALIC),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(theme::panel("Word Clock", false))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
