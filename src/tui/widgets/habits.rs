use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::features::StreakDuration;
use crate::models::Habit;
use crate::tui::theme;

const BAR_LEN: usize = 10;

pub fn render(frame: &mut Frame, area: Rect, streaks: &[(&Habit, StreakDuration)]) {
    let mut text = Vec::new();

    if streaks.is_empty() {
        text.push(Line::from(Span::styled("  No habits tracked", theme::dim())));
    }

    for (habit, streak) in streaks {
        // Bar fills over the first thirty days
        let ratio = (streak.days as f64 / 30.0).min(1.0);
        let filled = (ratio * BAR_LEN as f64).round() as usize;
        let empty = BAR_LEN.saturating_sub(filled);
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(empty));

        text.push(Line::from(vec![
            Span::styled(format!("  {:<16}", habit.name), theme::bold()),
            Span::styled(bar, theme::green()),
            Span::styled(
                format!("  {}", streak),
                theme::green().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", streak.tier().label()), theme::dim()),
        ]));
    }

    let paragraph = Paragraph::new(text).block(theme::panel("Streaks", false));
    frame.render_widget(paragraph, area);
}
