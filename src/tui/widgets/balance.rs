use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::features::FinanceSummary;
use crate::tui::theme;
use crate::utils::format::format_amount;

pub fn render(frame: &mut Frame, area: Rect, summary: &FinanceSummary) {
    let balance_style = if summary.balance < 0.0 {
        theme::red().add_modifier(Modifier::BOLD)
    } else {
        theme::gold().add_modifier(Modifier::BOLD)
    };

    let text = vec![
        Line::from(vec![
            Span::styled("  Income    ", theme::dim()),
            Span::styled(
                format!("{:>12}", format_amount(summary.total_income)),
                theme::green(),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Expenses  ", theme::dim()),
            Span::styled(
                format!("{:>12}", format_amount(summary.total_expenses)),
                theme::red(),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Balance   ", theme::dim()),
            Span::styled(format!("{:>12}", format_amount(summary.balance)), balance_style),
        ]),
    ];

    let paragraph = Paragraph::new(text).block(theme::panel("Finance", false));
    frame.render_widget(paragraph, area);
}
