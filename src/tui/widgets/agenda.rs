use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use crate::models::{CalendarEvent, Task};
use crate::tui::theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    events_today: &[&CalendarEvent],
    pending: &[&Task],
    now: DateTime<Utc>,
) {
    let mut items: Vec<ListItem> = Vec::new();

    if events_today.is_empty() {
        items.push(ListItem::new(Line::from(Span::styled(
            "  No events today",
            theme::dim(),
        ))));
    }
    for event in events_today {
        items.push(ListItem::new(Line::from(vec![
            Span::styled("  ◆ ", theme::accent()),
            Span::styled(event.title.as_str(), theme::bold()),
        ])));
    }

    items.push(ListItem::new(Line::from("")));

    let overdue = pending.iter().filter(|t| t.is_overdue(now)).count();
    let mut summary = vec![Span::styled(
        format!("  {} pending", pending.len()),
        theme::gold().add_modifier(Modifier::BOLD),
    )];
    if overdue > 0 {
        summary.push(Span::styled(
            format!("  ·  {} overdue", overdue),
            theme::red(),
        ));
    }
    items.push(ListItem::new(Line::from(summary)));

    for task in pending {
        let (icon, style) = if task.is_overdue(now) {
            ("  ! ", theme::red())
        } else {
            ("  ○ ", theme::dim())
        };
        let mut spans = vec![
            Span::styled(icon, style),
            Span::styled(task.title.as_str(), theme::bold()),
        ];
        if let Some(due) = task.due_date {
            spans.push(Span::styled(
                format!("  due {}", due.with_timezone(&Local).format("%b %-d")),
                theme::dim(),
            ));
        }
        items.push(ListItem::new(Line::from(spans)));
    }

    let list = List::new(items).block(theme::panel("Today", false));
    frame.render_widget(list, area);
}
