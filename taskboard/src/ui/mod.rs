//! Terminal UI rendering.
//!
//! Rendering only reads the store snapshot and the app's transient state;
//! every change goes through [`App`](crate::app::App) key handling.

pub mod filter_bar;
pub mod status_bar;
pub mod task_form;
pub mod task_list;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::App;
use crate::view::ViewSummary;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let snapshot = app.snapshot();
    let visible = app.visible(&snapshot);
    let summary = ViewSummary::new(visible.len(), snapshot.tasks.len());

    // Filter bar on top, status bar at bottom.
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    filter_bar::render(frame, main_chunks[0], app, summary);
    task_list::render(frame, content_chunks[0], app, &snapshot, &visible, summary);
    task_form::render(frame, content_chunks[1], app, &snapshot);
    status_bar::render(frame, main_chunks[2], app, &snapshot);
}
