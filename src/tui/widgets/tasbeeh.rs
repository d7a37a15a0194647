use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use crate::models::TasbeehEvent;
use crate::tui::theme;
use crate::utils::format::progress_bar;

pub fn render_list(frame: &mut Frame, area: Rect, events: &[TasbeehEvent], selected: usize) {
    let items: Vec<ListItem> = if events.is_empty() {
        vec![
            ListItem::new(Line::from("")),
            ListItem::new(Line::from(Span::styled("  No counters yet.", theme::dim()))),
            ListItem::new(Line::from(Span::styled(
                "  trifecta tasbeeh add <name>",
                theme::accent(),
            ))),
        ]
    } else {
        events
            .iter()
            .enumerate()
            .map(|(i, event)| {
                let name_style = if i == selected {
                    theme::gold().add_modifier(Modifier::BOLD)
                } else {
                    theme::bold()
                };
                let marker = if i == selected { "▸ " } else { "  " };
                let progress_style = if event.goal_reached() {
                    theme::green()
                } else {
                    theme::amber()
                };

                ListItem::new(Line::from(vec![
                    Span::styled(marker, theme::gold()),
                    Span::styled(format!("{:<18}", event.name), name_style),
                    Span::styled(progress_bar(event.daily_count, event.daily_goal, 8), progress_style),
                    Span::styled(
                        format!(" {}/{}", event.daily_count, event.daily_goal),
                        theme::dim(),
                    ),
                ]))
            })
            .collect()
    };

    let list = List::new(items).block(theme::panel("Counters", true));
    frame.render_widget(list, area);
}

/// Large readout for the selected counter.
pub fn render_counter(frame: &mut Frame, area: Rect, event: Option<&TasbeehEvent>) {
    let text = match event {
        None => vec![Line::from("")],
        Some(event) => {
            let count_style = if event.goal_reached() {
                theme::green().add_modifier(Modifier::BOLD)
            } else {
                theme::gold().add_modifier(Modifier::BOLD)
            };
            let width = area.width.saturating_sub(8).min(40) as usize;
            let mut lines = vec![
                Line::from(""),
                Line::from(Span::styled(event.name.as_str(), theme::bold())),
                Line::from(""),
                Line::from(Span::styled(event.daily_count.to_string(), count_style)),
                Line::from(Span::styled(
                    format!("of {} today", event.daily_goal),
                    theme::dim(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    progress_bar(event.daily_count, event.daily_goal, width),
                    count_style,
                )),
                Line::from(Span::styled(
                    format!("{:.0}%", event.progress_percent()),
                    theme::dim(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    format!("Total {}", event.total_count),
                    theme::dim(),
                )),
            ];
            if event.goal_reached() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled("Goal reached", theme::green())));
            }
            lines
        }
    };

    let paragraph = Paragraph::new(text)
        .block(theme::panel("Tasbeeh", false))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
