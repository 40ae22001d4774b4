use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

use crate::domain::notification::BannerLevel;
use crate::domain::entities::OrderStatus;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub selection_style: Style,
    pub dimmed_style: Style,
    pub base_style: Style,
    pub title_style: Style,
    pub price_style: Style,
    pub error_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new("#f97316")
    }
}

impl Theme {
    #[must_use]
    pub fn new(accent_color_str: &str) -> Self {
        Self::from_color(parse_color(accent_color_str))
    }

    #[must_use]
    pub fn from_color(accent: Color) -> Self {
        Self {
            accent,
            selection_style: Style::default()
                .bg(accent)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            dimmed_style: Style::default().fg(Color::DarkGray),
            base_style: Style::default().fg(Color::Reset),
            title_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            price_style: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            error_style: Style::default().fg(Color::Red),
        }
    }

    #[must_use]
    pub const fn banner_color(&self, level: BannerLevel) -> Color {
        match level {
            BannerLevel::Success => Color::Green,
            BannerLevel::Info => self.accent,
            BannerLevel::Error => Color::Red,
        }
    }

    #[must_use]
    pub const fn status_color(status: &OrderStatus) -> Color {
        match status {
            OrderStatus::Pending => Color::Yellow,
            OrderStatus::Confirmed | OrderStatus::Processing => Color::Blue,
            OrderStatus::Shipped => Color::Magenta,
            OrderStatus::Delivered => Color::Green,
            OrderStatus::Cancelled => Color::Red,
            OrderStatus::Other(_) => Color::Gray,
        }
    }
}

fn parse_color(s: &str) -> Color {
    if s.starts_with('#')
        && let Some((r, g, b)) = parse_hex_color(s)
    {
        return Color::Rgb(r, g, b);
    }

    if let Ok(c) = Color::from_str(s) {
        return c;
    }

    match s.to_lowercase().as_str() {
        "orange" => Color::Indexed(208),
        _ => Color::Yellow,
    }
}

fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let s = s.trim_start_matches('#');
    if !s.is_ascii() {
        return None;
    }

    let channel = |hex: &str| u8::from_str_radix(hex, 16).ok();
    match s.len() {
        6 => Some((channel(&s[0..2])?, channel(&s[2..4])?, channel(&s[4..6])?)),
        3 => {
            let double = |i: usize| channel(&s[i..=i].repeat(2));
            Some((double(0)?, double(1)?, double(2)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("Red"), Color::Red);
        assert_eq!(parse_color("blue"), Color::Blue);
        assert_eq!(parse_color("#f97316"), Color::Rgb(249, 115, 22));
        assert_eq!(parse_color("#0f0"), Color::Rgb(0, 255, 0));
        assert_eq!(parse_color("Orange"), Color::Indexed(208));
        assert_eq!(parse_color("not-a-color"), Color::Yellow);
    }

    #[test]
    fn test_banner_colors() {
        let theme = Theme::new("Cyan");

        assert_eq!(theme.banner_color(BannerLevel::Info), Color::Cyan);
        assert_eq!(theme.banner_color(BannerLevel::Error), Color::Red);
    }
}
