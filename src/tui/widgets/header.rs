use chrono::{DateTime, Local};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::theme;
use crate::utils::format::{format_clock, format_long_date};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    now: DateTime<Local>,
    hour12: bool,
    hijri_str: &str,
    tabs: &[&str],
    active: usize,
) {
    let mut tab_spans = vec![Span::styled(
        "trifecta   ",
        theme::accent().add_modifier(Modifier::BOLD),
    )];
    for (i, tab) in tabs.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::styled("  ·  ", theme::dim()));
        }
        let style = if i == active {
            theme::gold().add_modifier(Modifier::BOLD)
        } else {
            theme::dim()
        };
        tab_spans.push(Span::styled(*tab, style));
    }

    let time_line = Line::from(Span::styled(
        format_clock(now.time(), hour12),
        theme::bold(),
    ));

    let mut date_spans = vec![Span::styled(format_long_date(now), theme::dim())];
    if !hijri_str.is_empty() {
        date_spans.push(Span::styled("  ·  ", theme::dim()));
        date_spans.push(Span::styled(hijri_str, theme::gold()));
    }

    let text = vec![Line::from(tab_spans), time_line, Line::from(date_spans)];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::ACCENT))
        .style(theme::base());

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
