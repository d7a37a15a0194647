use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

pub const BG: Color = Color::Rgb(15, 17, 24);
pub const SURFACE: Color = Color::Rgb(24, 27, 38);
pub const BORDER: Color = Color::Rgb(52, 58, 82);
pub const TEXT: Color = Color::Rgb(222, 226, 240);
pub const TEXT_DIM: Color = Color::Rgb(118, 126, 156);
pub const ACCENT: Color = Color::Rgb(122, 162, 247);
pub const GOLD: Color = Color::Rgb(224, 175, 104);
pub const GREEN: Color = Color::Rgb(115, 192, 130);
pub const AMBER: Color = Color::Rgb(230, 150, 80);
pub const RED: Color = Color::Rgb(236, 96, 110);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn gold() -> Style {
    Style::default().fg(GOLD)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

/// Rounded panel with a title; focused panels get an accent border.
pub fn panel(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .title(Span::styled(format!(" {} ", title), accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            accent()
        } else {
            Style::default().fg(BORDER)
        })
        .style(surface())
}
