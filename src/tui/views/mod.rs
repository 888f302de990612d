//! TUI views
//!
//! The expense table and monthly summary, with the tab bar, totals line and
//! status bar around them.

pub mod expenses;
pub mod status_bar;
pub mod summary;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Tabs,
    Frame,
};

use super::app::{ActiveView, App};
use super::dialogs;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    render_tabs(frame, app, layout.tabs);

    match app.active_view {
        ActiveView::Expenses => expenses::render(frame, app, layout.main),
        ActiveView::Summary => summary::render(frame, app, layout.main),
    }

    status_bar::render_totals(frame, app, layout.totals);
    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        dialogs::render(frame, app);
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let selected = match app.active_view {
        ActiveView::Expenses => 0,
        ActiveView::Summary => 1,
    };
    let tabs = Tabs::new(vec![Line::from(" 1 Expenses "), Line::from(" 2 Summary ")])
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}
