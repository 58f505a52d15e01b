//! Task form, task detail, and delete confirmation rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::theme;
use crate::app::{App, FormField, Mode};
use crate::store::Snapshot;

/// Render the right-hand panel: the form while editing, a delete prompt
/// while confirming, otherwise the selected task's details.
pub fn render(frame: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    match &app.mode {
        Mode::Form => render_form(frame, area, app, snapshot),
        Mode::ConfirmDelete(id) => {
            let title = snapshot.task(id).map_or("this task", |t| t.title.as_str());
            let lines = vec![
                Line::from(Span::styled("Delete task?", theme::bold())),
                Line::from(""),
                Line::from(format!("\"{title}\" will be removed.")),
                Line::from(""),
                Line::from(Span::styled("y: delete | n/Esc: cancel", theme::dimmed())),
            ];
            let block = panel("Confirm").border_style(theme::error());
            frame.render_widget(Paragraph::new(lines).block(block), area);
        }
        Mode::Browse | Mode::Search => render_detail(frame, area, app, snapshot),
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(title, theme::panel_title(theme::FORM_TITLE)))
        .borders(Borders::ALL)
}

fn render_form(frame: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    let draft = &app.draft;
    let value_of = |field: FormField| -> String {
        match field {
            FormField::Title => draft.title.clone(),
            FormField::Description => draft.description.clone(),
            FormField::Priority => draft
                .priority
                .map_or_else(|| "Select Priority".to_string(), |p| p.to_string()),
            FormField::Status => draft
                .status
                .map_or_else(|| "Select Status".to_string(), |s| s.to_string()),
            FormField::Assignee => draft.assignee.map_or_else(
                || "Unassigned".to_string(),
                |id| {
                    snapshot
                        .user(id)
                        .map_or_else(|| format!("User #{id}"), |u| u.name.clone())
                },
            ),
        }
    };

    let mut lines = Vec::with_capacity(FormField::ALL.len() * 2 + 2);
    for field in FormField::ALL {
        let focused = field == app.form_field;
        let label_style = if focused {
            theme::highlighted()
        } else {
            theme::dimmed()
        };
        let marker = if focused { "> " } else { "  " };
        let choice = matches!(
            field,
            FormField::Priority | FormField::Status | FormField::Assignee
        );
        let value = if choice && focused {
            format!("< {} >", value_of(field))
        } else {
            value_of(field)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(field.label(), label_style),
        ]));
        lines.push(Line::from(Span::styled(format!("    {value}"), theme::normal())));
    }

    if let Some(err) = &app.form_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(err.as_str(), theme::error())));
    }

    let title = if draft.editing().is_some() {
        "Edit Task"
    } else {
        "Create Task"
    };
    let block = panel(title).border_style(theme::highlighted());
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_detail(frame: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    let block = panel("Details").border_style(theme::normal());
    let Some(task) = app.selected_task() else {
        let hint = Span::styled("Press n to create a task.", theme::dimmed());
        frame.render_widget(Paragraph::new(hint).block(block), area);
        return;
    };

    let unset = || "-".to_string();
    let lines = vec![
        Line::from(Span::styled(task.title.clone(), theme::bold())),
        Line::from(""),
        Line::from(Span::styled(task.description.clone(), theme::normal())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Priority: ", theme::dimmed()),
            Span::raw(task.priority.map_or_else(unset, |p| p.to_string())),
        ]),
        Line::from(vec![
            Span::styled("Status:   ", theme::dimmed()),
            Span::raw(task.status.map_or_else(unset, |s| s.to_string())),
        ]),
        Line::from(vec![
            Span::styled("Assignee: ", theme::dimmed()),
            Span::raw(snapshot.assignee_name(&task).to_string()),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}
