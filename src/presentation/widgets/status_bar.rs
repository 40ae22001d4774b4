//! Bottom status line: the current banner on the left, key hints on the right.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::domain::notification::{Banner, BannerLevel};
use crate::presentation::theme::Theme;

#[derive(Debug, Clone)]
pub struct StatusBar {
    message: String,
    message_color: Color,
    hints: String,
    hint_style: Style,
}

impl StatusBar {
    #[must_use]
    pub fn new(banner: Option<&Banner>, hints: impl Into<String>, theme: &Theme) -> Self {
        let (message, message_color) = banner.map_or_else(
            || (String::new(), theme.accent),
            |b| (banner_text(b), theme.banner_color(b.level)),
        );

        Self {
            message,
            message_color,
            hints: hints.into(),
            hint_style: theme.dimmed_style,
        }
    }
}

fn banner_text(banner: &Banner) -> String {
    let icon = match banner.level {
        BannerLevel::Success => "✔",
        BannerLevel::Info => "ℹ",
        BannerLevel::Error => "✖",
    };
    format!("{icon} {}", banner.message)
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.message_color)
            .add_modifier(Modifier::BOLD);

        let width = area.width as usize;
        let left_len = self.message.width();
        let right_len = self.hints.width();

        let mut spans = vec![Span::styled(self.message.as_str(), style)];

        // Hints give way to the banner when both do not fit.
        if left_len + right_len < width {
            spans.push(Span::raw(" ".repeat(width - left_len - right_len)));
            spans.push(Span::styled(self.hints.as_str(), self.hint_style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_line(bar: &StatusBar, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_banner_and_hints_share_the_line() {
        let banner = Banner::success("Product added to cart!");
        let bar = StatusBar::new(Some(&banner), "q quit", &Theme::default());

        let line = render_line(&bar, 60);

        assert!(line.starts_with("✔ Product added to cart!"));
        assert!(line.trim_end().ends_with("q quit"));
    }

    #[test]
    fn test_hints_dropped_when_too_narrow() {
        let banner = Banner::error("Could not place order");
        let bar = StatusBar::new(Some(&banner), "enter checkout", &Theme::default());

        let line = render_line(&bar, 24);

        assert!(!line.contains("checkout"));
    }
}
