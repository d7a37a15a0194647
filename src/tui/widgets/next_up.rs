use chrono::NaiveDateTime;
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::models::{Alarm, PrayerTime};
use crate::tui::theme;
use crate::utils::format::{format_duration_secs, format_time};

/// Next enabled prayer and next ringing alarm, each with a countdown in seconds.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    prayer: Option<(&PrayerTime, i64)>,
    alarm: Option<(&Alarm, NaiveDateTime, i64)>,
) {
    let mut lines = vec![Line::from("")];

    lines.push(match prayer {
        Some((prayer, secs)) => Line::from(vec![
            Span::styled("  Prayer  ", theme::dim()),
            Span::styled(
                format!("{:<9}", prayer.name),
                theme::gold().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{}  ", prayer.time), theme::dim()),
            Span::styled(
                format!("in {}", format_duration_secs(secs)),
                theme::amber().add_modifier(Modifier::BOLD),
            ),
        ]),
        None => Line::from(vec![
            Span::styled("  Prayer  ", theme::dim()),
            Span::styled("all disabled", theme::dim()),
        ]),
    });

    lines.push(Line::from(""));

    lines.push(match alarm {
        Some((alarm, at, secs)) => Line::from(vec![
            Span::styled("  Alarm   ", theme::dim()),
            Span::styled(
                format!("{:<9}", alarm.label),
                theme::bold(),
            ),
            Span::styled(
                format!("{} {}  ", at.format("%a"), format_time(at.time())),
                theme::dim(),
            ),
            Span::styled(
                format!("in {}", format_duration_secs(secs)),
                theme::amber(),
            ),
        ]),
        None => Line::from(vec![
            Span::styled("  Alarm   ", theme::dim()),
            Span::styled("none set", theme::dim()),
        ]),
    });

    let paragraph = Paragraph::new(lines).block(theme::panel("Next Up", false));
    frame.render_widget(paragraph, area);
}
