//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, Mode};
use crate::store::{RosterStatus, Snapshot};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    let help_text = match app.mode {
        Mode::Browse => {
            "n: new | e: edit | d: delete | /: search | s/p: filters | c: clear | q: quit"
        }
        Mode::Search => "Type to search | Enter/Esc: done",
        Mode::Form => "Tab: next field | ←→: choose | Enter: save | Esc: cancel",
        Mode::ConfirmDelete(_) => "y: delete | n: cancel",
    };

    let (dot_color, roster_text) = match &snapshot.roster {
        RosterStatus::Loading => (theme::WARNING, "Loading users...".to_string()),
        RosterStatus::Ready => (theme::SUCCESS, format!("{} users", snapshot.users.len())),
        RosterStatus::Failed(message) => (theme::ERROR, message.clone()),
    };

    let mut spans = vec![
        Span::styled("Taskboard", theme::bold()),
        Span::raw(" | "),
        Span::styled("●", theme::normal().fg(dot_color)),
        Span::raw(format!(" {roster_text}")),
        Span::raw(" | "),
    ];
    if let Some(notice) = &app.notice {
        spans.push(Span::styled(notice.as_str(), theme::highlighted()));
        spans.push(Span::raw(" | "));
    }
    spans.push(Span::styled(help_text, theme::dimmed()));

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
