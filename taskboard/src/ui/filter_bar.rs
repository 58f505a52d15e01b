//! Search box and filter indicators.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, Mode};
use crate::view::ViewSummary;

/// Render the search box, active filters, and row counts.
pub fn render(frame: &mut Frame, area: Rect, app: &App, summary: ViewSummary) {
    let searching = app.mode == Mode::Search;
    let search = app.filter.search();

    let search_span = if search.is_empty() && !searching {
        Span::styled("Search by title... (/)", theme::dimmed())
    } else if searching {
        Span::styled(format!("{search}_"), theme::highlighted())
    } else {
        Span::styled(search.to_string(), theme::normal())
    };

    let line = Line::from(vec![
        search_span,
        Span::raw("  |  "),
        Span::styled("Status: ", theme::dimmed()),
        Span::styled(app.filter.status.to_string(), theme::bold()),
        Span::raw("  "),
        Span::styled("Priority: ", theme::dimmed()),
        Span::styled(app.filter.priority.to_string(), theme::bold()),
        Span::raw("  |  "),
        Span::styled(summary.to_string(), theme::dimmed()),
    ]);

    let border_style = if searching {
        theme::highlighted()
    } else {
        theme::normal()
    };
    let block = Block::default()
        .title(Span::styled("Filters", theme::panel_title(theme::FILTER_TITLE)))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
