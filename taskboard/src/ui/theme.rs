//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};
use taskboard_proto::task::{Priority, Status};

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Success indicator color.
pub const SUCCESS: Color = Color::Green;

/// Warning indicator color.
pub const WARNING: Color = Color::Yellow;

/// Error indicator color.
pub const ERROR: Color = Color::Red;

/// Panel title color for the task list.
pub const TASKS_TITLE: Color = Color::Green;

/// Panel title color for the form / detail panel.
pub const FORM_TITLE: Color = Color::Cyan;

/// Panel title color for the filter bar.
pub const FILTER_TITLE: Color = Color::Blue;

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (placeholders, metadata).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused panel borders and fields).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected item style (in lists).
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Style for validation and load errors.
#[must_use]
pub fn error() -> Style {
    Style::default().fg(ERROR)
}

/// Style for the status bar background (dark background with white foreground).
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Style for panel titles with a given color (bold).
#[must_use]
pub fn panel_title(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Color for a priority badge.
#[must_use]
pub const fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::Blue,
        Priority::Medium => WARNING,
        Priority::High => ERROR,
    }
}

/// Color for a status badge.
#[must_use]
pub const fn status_color(status: Status) -> Color {
    match status {
        Status::ToDo => FG_SECONDARY,
        Status::InProgress => HIGHLIGHT,
        Status::Done => SUCCESS,
    }
}
