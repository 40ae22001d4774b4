use chrono::{DateTime, Local, Utc};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{ListState, TableState};

/// Helper function to create a centered rect using up certain percentage of the available rect `r`
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// A box of fixed size centered in `r`, shrunk to fit.
#[must_use]
pub fn centered_box(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(
        r.x + (r.width - width) / 2,
        r.y + (r.height - height) / 2,
        width,
        height,
    )
}

/// Formats an order timestamp in local time, or a dash when missing.
#[must_use]
pub fn format_date(date: Option<&DateTime<Utc>>) -> String {
    date.map_or_else(
        || "-".to_string(),
        |dt| {
            let local: DateTime<Local> = (*dt).into();
            local.format("%Y-%m-%d %H:%M").to_string()
        },
    )
}

fn next_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(i) if i + 1 < len => i + 1,
        _ => 0,
    })
}

fn previous_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(i) if i > 0 && i < len => i - 1,
        _ => len - 1,
    })
}

fn clamped_index(current: Option<usize>, len: usize) -> Option<usize> {
    match (current, len) {
        (_, 0) => None,
        (None, _) => Some(0),
        (Some(i), len) => Some(i.min(len - 1)),
    }
}

/// Moves a list selection down, wrapping to the top.
pub fn select_next(state: &mut ListState, len: usize) {
    state.select(next_index(state.selected(), len));
}

/// Moves a list selection up, wrapping to the bottom.
pub fn select_previous(state: &mut ListState, len: usize) {
    state.select(previous_index(state.selected(), len));
}

/// Keeps a selection inside a list that was just replaced.
pub fn clamp_selection(state: &mut ListState, len: usize) {
    state.select(clamped_index(state.selected(), len));
}

pub fn select_next_row(state: &mut TableState, len: usize) {
    state.select(next_index(state.selected(), len));
}

pub fn select_previous_row(state: &mut TableState, len: usize) {
    state.select(previous_index(state.selected(), len));
}

pub fn clamp_row(state: &mut TableState, len: usize) {
    state.select(clamped_index(state.selected(), len));
}
