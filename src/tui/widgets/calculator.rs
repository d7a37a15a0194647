use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::features::Calculator;
use crate::tui::theme;

const KEYPAD: [[&str; 4]; 4] = [
    ["7", "8", "9", "/"],
    ["4", "5", "6", "*"],
    ["1", "2", "3", "-"],
    ["0", ".", "%", "+"],
];

pub fn render(frame: &mut Frame, area: Rect, calc: &Calculator) {
    let display_style = if calc.is_error() {
        theme::red().add_modifier(Modifier::BOLD)
    } else {
        theme::gold().add_modifier(Modifier::BOLD)
    };
    let pending = calc
        .pending()
        .map(|op| format!("{} ", op.symbol()))
        .unwrap_or_default();

    let mut text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(pending, theme::accent()),
            Span::styled(calc.display(), display_style),
        ]),
        Line::from(""),
    ];

    for row in KEYPAD {
        let spans: Vec<Span> = row
            .iter()
            .map(|k| Span::styled(format!(" {:^3} ", k), theme::bold()))
            .collect();
        text.push(Line::from(spans));
    }

    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "[Enter] =   [n] ±   [c] clear   [Backspace] delete",
        theme::dim(),
    )));

    let paragraph = Paragraph::new(text)
        .block(theme::panel("Calculator", false))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
