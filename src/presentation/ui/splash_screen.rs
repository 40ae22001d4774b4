//! Startup splash shown while the saved session is restored.

use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Paragraph, Widget},
};
use tachyonfx::{Effect, Interpolation, fx};

const LOGO_TEXT: &str = "
██╗  ██╗ █████╗ ██████╗ ███████╗███████╗
██║ ██╔╝██╔══██╗██╔══██╗██╔════╝██╔════╝
█████╔╝ ███████║██████╔╝█████╗  █████╗
██╔═██╗ ██╔══██║██╔═══╝ ██╔══╝  ██╔══╝
██║  ██╗██║  ██║██║     ███████╗███████╗
╚═╝  ╚═╝╚═╝  ╚═╝╚═╝     ╚══════╝╚══════╝";

const TAGLINE: &str = "shop from your terminal";

#[derive(Debug, Default)]
pub struct LoadingState {
    /// The session restore attempt has finished, successfully or not.
    pub session_ready: bool,
    pub intro_finished: bool,
    pub animation_complete: bool,
}

pub struct SplashScreen {
    intro_effect: Effect,
    outro_effect: Effect,
    pub state: LoadingState,
    pending_duration: Duration,
    accent: Color,
}

impl SplashScreen {
    #[must_use]
    pub fn new(accent: Color) -> Self {
        Self {
            intro_effect: fx::coalesce((900, Interpolation::CircOut)),
            outro_effect: fx::dissolve((500, Interpolation::CircIn)),
            state: LoadingState::default(),
            pending_duration: Duration::ZERO,
            accent,
        }
    }

    pub fn tick(&mut self, duration: Duration) {
        self.pending_duration = self.pending_duration.saturating_add(duration);
    }

    pub const fn set_session_ready(&mut self) {
        self.state.session_ready = true;
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.state.animation_complete
    }
}

impl Widget for &mut SplashScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let logo = Text::from(LOGO_TEXT.trim_matches('\n'))
            .style(Style::default().fg(self.accent))
            .centered();
        let logo_width = u16::try_from(logo.lines.iter().map(Line::width).max().unwrap_or(0))
            .unwrap_or(u16::MAX);
        let logo_height = u16::try_from(logo.lines.len()).unwrap_or(u16::MAX);

        let width = logo_width.min(area.width);
        let height = (logo_height + 2).min(area.height);
        let center = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );
        let [logo_area, _, tagline_area] = Layout::vertical([
            Constraint::Length(logo_height),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(center);

        Paragraph::new(logo).render(logo_area, buf);
        Paragraph::new(Line::from(TAGLINE).centered())
            .style(Style::default().fg(Color::DarkGray))
            .render(tagline_area, buf);

        let elapsed = self.pending_duration;
        self.pending_duration = Duration::ZERO;

        if !self.state.intro_finished {
            if self.intro_effect.process(elapsed.into(), buf, center).is_some() {
                self.state.intro_finished = true;
            }
        } else if self.state.session_ready
            && self.outro_effect.process(elapsed.into(), buf, center).is_some()
        {
            self.state.animation_complete = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splash_waits_for_session() {
        let mut splash = SplashScreen::new(Color::Yellow);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);

        for _ in 0..20 {
            splash.tick(Duration::from_millis(100));
            (&mut splash).render(area, &mut buf);
        }

        assert!(splash.state.intro_finished);
        assert!(!splash.is_finished());
    }

    #[test]
    fn test_splash_finishes_after_session_ready() {
        let mut splash = SplashScreen::new(Color::Yellow);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        splash.set_session_ready();

        for _ in 0..30 {
            splash.tick(Duration::from_millis(100));
            (&mut splash).render(area, &mut buf);
        }

        assert!(splash.is_finished());
    }
}
