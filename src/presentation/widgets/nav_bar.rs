//! Tab bar shown at the top of every screen.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::domain::navigation::{AdminRoute, Route};
use crate::presentation::theme::Theme;

pub struct NavBar<'a> {
    current: &'a Route,
    user_label: Option<&'a str>,
    show_admin: bool,
    theme: &'a Theme,
}

impl<'a> NavBar<'a> {
    #[must_use]
    pub const fn new(current: &'a Route, theme: &'a Theme) -> Self {
        Self {
            current,
            user_label: None,
            show_admin: false,
            theme,
        }
    }

    #[must_use]
    pub const fn user(mut self, label: Option<&'a str>) -> Self {
        self.user_label = label;
        self
    }

    #[must_use]
    pub const fn show_admin(mut self, show: bool) -> Self {
        self.show_admin = show;
        self
    }

    /// Tab highlighted for the current route. Product pages belong to the
    /// shopping tab.
    fn active_tab(&self) -> Option<Route> {
        match self.current {
            Route::ProductDetail(_) => Some(Route::Shopping),
            Route::Admin(_) => Some(Route::Admin(AdminRoute::Dashboard)),
            route if Route::TABS.contains(route) => Some(route.clone()),
            _ => None,
        }
    }
}

impl Widget for NavBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let active = self.active_tab();
        let mut spans = vec![Span::styled(" KAPEE ", self.theme.selection_style), Span::raw(" ")];

        let mut tabs: Vec<(String, Route)> = Route::TABS
            .iter()
            .enumerate()
            .map(|(idx, route)| (format!("{} {}", idx + 1, route.title()), route.clone()))
            .collect();
        if self.show_admin {
            tabs.push(("a Admin".to_string(), Route::Admin(AdminRoute::Dashboard)));
        }

        for (label, route) in tabs {
            let style = if active.as_ref() == Some(&route) {
                self.theme.title_style.add_modifier(Modifier::UNDERLINED)
            } else {
                self.theme.dimmed_style
            };
            spans.push(Span::styled(format!(" {label} "), style));
        }

        if let Some(user) = self.user_label {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!("@{user}"), Style::default().fg(self.theme.accent)));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ProductId;

    #[test]
    fn test_product_page_highlights_shopping() {
        let theme = Theme::default();
        let route = Route::ProductDetail(ProductId::from("p1"));

        assert_eq!(NavBar::new(&route, &theme).active_tab(), Some(Route::Shopping));
    }

    #[test]
    fn test_auth_routes_highlight_nothing() {
        let theme = Theme::default();

        assert_eq!(NavBar::new(&Route::Login, &theme).active_tab(), None);
    }
}
