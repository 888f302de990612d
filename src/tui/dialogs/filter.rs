//! Filter dialog
//!
//! Date range and category filter for the expense table.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::ISO_DATE_FORMAT;
use crate::services::filter::ALL_CATEGORIES;
use crate::services::ExpenseFilter;
use crate::tui::app::App;
use crate::tui::layout::{centered_rect_fixed, dialog_inner};
use crate::tui::widgets::{render_field, TextInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterField {
    #[default]
    From,
    To,
    Category,
}

impl FilterField {
    pub fn next(self) -> Self {
        match self {
            Self::From => Self::To,
            Self::To => Self::Category,
            Self::Category => Self::From,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::From => Self::Category,
            Self::To => Self::From,
            Self::Category => Self::To,
        }
    }
}

/// State for the filter dialog
#[derive(Debug, Clone, Default)]
pub struct FilterFormState {
    pub focused_field: FilterField,
    pub from_input: TextInput,
    pub to_input: TextInput,
    /// "All" followed by the known categories
    pub categories: Vec<String>,
    pub category_index: usize,
    pub error_message: Option<String>,
}

impl FilterFormState {
    /// Form showing the current filter
    pub fn from_filter(filter: &ExpenseFilter, known: Vec<String>) -> Self {
        let date_text = |d: Option<chrono::NaiveDate>| {
            d.map(|d| d.format(ISO_DATE_FORMAT).to_string())
                .unwrap_or_default()
        };

        let mut categories = vec![ALL_CATEGORIES.to_string()];
        categories.extend(known);
        if let Some(current) = &filter.category {
            if !categories.contains(current) {
                categories.push(current.clone());
            }
        }
        let category_index = filter
            .category
            .as_ref()
            .and_then(|c| categories.iter().position(|x| x == c))
            .unwrap_or(0);

        Self {
            focused_field: FilterField::From,
            from_input: TextInput::new()
                .placeholder("any")
                .content(date_text(filter.from)),
            to_input: TextInput::new()
                .placeholder("any")
                .content(date_text(filter.to)),
            categories,
            category_index,
            error_message: None,
        }
    }

    pub fn selected_category(&self) -> &str {
        self.categories
            .get(self.category_index)
            .map(String::as_str)
            .unwrap_or(ALL_CATEGORIES)
    }

    fn cycle_category(&mut self, forward: bool) {
        let len = self.categories.len();
        if len == 0 {
            return;
        }
        self.category_index = if forward {
            (self.category_index + 1) % len
        } else {
            (self.category_index + len - 1) % len
        };
    }

    /// Parse the form into a filter
    pub fn to_filter(&self) -> Result<ExpenseFilter, String> {
        ExpenseFilter::parse(
            self.from_input.value(),
            self.to_input.value(),
            self.selected_category(),
        )
        .map_err(|e| e.to_string())
    }
}

/// Render the filter dialog
pub fn render(frame: &mut Frame, app: &App) {
    let form = &app.filter_form;
    let area = centered_rect_fixed(60, 9, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Filter ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // From
            Constraint::Length(1), // To
            Constraint::Length(1), // Category
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(dialog_inner(area));

    let focused = form.focused_field;
    render_field(
        frame,
        chunks[0],
        "From",
        form.from_input.spans(focused == FilterField::From),
        focused == FilterField::From,
    );
    render_field(
        frame,
        chunks[1],
        "To",
        form.to_input.spans(focused == FilterField::To),
        focused == FilterField::To,
    );

    let category_focused = focused == FilterField::Category;
    let category_style = if category_focused {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::Yellow)
    };
    render_field(
        frame,
        chunks[2],
        "Category",
        vec![Span::styled(form.selected_category().to_string(), category_style)],
        category_focused,
    );

    if let Some(error) = &form.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[3],
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Apply  "),
        Span::styled("[Ctrl+U]", Style::default().fg(Color::Cyan)),
        Span::raw(" Clear field  "),
        Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[4]);
}

/// Handle key input for the filter dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
            return true;
        }
        KeyCode::Enter => {
            apply(app);
            return true;
        }
        _ => {}
    }

    let form = &mut app.filter_form;
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focused_field = form.focused_field.next(),
        KeyCode::BackTab | KeyCode::Up => form.focused_field = form.focused_field.prev(),
        KeyCode::Right | KeyCode::Char(' ') if form.focused_field == FilterField::Category => {
            form.cycle_category(true)
        }
        KeyCode::Left if form.focused_field == FilterField::Category => {
            form.cycle_category(false)
        }
        _ => {
            let input = match form.focused_field {
                FilterField::From => &mut form.from_input,
                FilterField::To => &mut form.to_input,
                FilterField::Category => return false,
            };
            let consumed = input.handle_key(key);
            if consumed {
                form.error_message = None;
            }
            return consumed;
        }
    }
    true
}

fn apply(app: &mut App) {
    match app.filter_form.to_filter() {
        Ok(filter) => {
            app.filter = filter;
            app.selected_index = 0;
            app.close_dialog();
            app.refresh_view();
            let message = format!(
                "Filter: {} ({} rows)",
                app.filter.describe(),
                app.visible.len()
            );
            app.set_status(message);
        }
        Err(e) => app.filter_form.error_message = Some(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_from_filter_round_trip() {
        let filter = ExpenseFilter::new()
            .from_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
            .category("Pets");
        let form = FilterFormState::from_filter(&filter, vec!["Food".into()]);

        assert_eq!(form.from_input.value(), "2025-01-01");
        assert_eq!(form.to_input.value(), "");
        assert_eq!(form.selected_category(), "Pets");
        assert_eq!(form.to_filter().unwrap(), filter);
    }

    #[test]
    fn test_all_category_clears() {
        let mut form = FilterFormState::from_filter(&ExpenseFilter::new(), vec!["Food".into()]);
        assert_eq!(form.selected_category(), ALL_CATEGORIES);
        form.cycle_category(true);
        assert_eq!(form.to_filter().unwrap().category.as_deref(), Some("Food"));
        form.cycle_category(true);
        assert!(form.to_filter().unwrap().category.is_none());
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let mut form = FilterFormState::from_filter(&ExpenseFilter::new(), Vec::new());
        form.from_input.set("2025-02-01");
        form.to_input.set("2025-01-01");
        assert!(form.to_filter().is_err());
    }
}
