use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::features::stopwatch::format_elapsed;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, elapsed_ms: i64, running: bool) {
    let (state, state_style) = if running {
        ("running", theme::green())
    } else if elapsed_ms > 0 {
        ("paused", theme::amber())
    } else {
        ("ready", theme::dim())
    };

    // Vertically centre the three lines of content
    let pad = (area.height.saturating_sub(2 + 3) / 2) as usize;
    let mut text = vec![Line::from(""); pad];
    text.push(Line::from(Span::styled(
        format_elapsed(elapsed_ms),
        theme::gold().add_modifier(Modifier::BOLD),
    )));
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(state, state_style)));

    let paragraph = Paragraph::new(text)
        .block(theme::panel("Stopwatch", running))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
