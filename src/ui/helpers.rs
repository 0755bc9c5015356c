use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::models::Grid;

/// Widest a grid column is allowed to render. Long text cells get clipped by
/// the widget instead of starving the other columns.
const MAX_COLUMN_WIDTH: u16 = 32;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Width constraints for the grid widget: each column gets the width of its
/// longest cell (header included), capped so one verbose column cannot push
/// the rest off screen.
pub(crate) fn column_constraints(grid: &Grid) -> Vec<Constraint> {
    grid.columns
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let mut width = name.chars().count();
            for row in &grid.rows {
                if let Some(cell) = row.get(idx) {
                    width = width.max(cell.chars().count());
                }
            }
            Constraint::Length((width as u16).min(MAX_COLUMN_WIDTH))
        })
        .collect()
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}
