//! Task list rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use taskboard_proto::task::Task;

use super::theme;
use crate::app::{App, Mode};
use crate::store::Snapshot;
use crate::view::{EmptyState, ViewSummary};

/// Render the filtered task list.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    snapshot: &Snapshot,
    visible: &[&Task],
    summary: ViewSummary,
) {
    let border_style = if app.mode == Mode::Browse {
        theme::highlighted()
    } else {
        theme::normal()
    };
    let block = Block::default()
        .title(Span::styled("Tasks", theme::panel_title(theme::TASKS_TITLE)))
        .borders(Borders::ALL)
        .border_style(border_style);

    if let Some(empty) = summary.empty_state() {
        let text = match empty {
            EmptyState::NoTasks => "No tasks yet. Press n to create one.",
            EmptyState::NoMatches => "No tasks match your filters.",
        };
        let paragraph = Paragraph::new(Span::styled(text, theme::dimmed())).block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|task| ListItem::new(task_line(task, snapshot)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme::selected());
    let mut state = ListState::default().with_selected(Some(app.selected));

    frame.render_stateful_widget(list, area, &mut state);
}

fn task_line<'a>(task: &'a Task, snapshot: &'a Snapshot) -> Line<'a> {
    let status = task.status.map_or_else(
        || Span::styled("[  --  ]", theme::dimmed()),
        |s| Span::styled(format!("[{s}]"), theme::normal().fg(theme::status_color(s))),
    );
    let priority = task.priority.map_or_else(
        || Span::styled("-", theme::dimmed()),
        |p| Span::styled(p.label(), theme::normal().fg(theme::priority_color(p))),
    );

    Line::from(vec![
        status,
        Span::raw(" "),
        Span::styled(task.title.as_str(), theme::bold()),
        Span::raw("  "),
        priority,
        Span::raw("  "),
        Span::styled(snapshot.assignee_name(task), theme::dimmed()),
    ])
}
