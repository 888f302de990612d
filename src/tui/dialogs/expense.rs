//! Expense entry/edit dialog
//!
//! Modal form for adding or editing an expense. Tab moves between fields,
//! the category field cycles through known categories, Enter saves.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::config::Settings;
use crate::models::{Expense, ISO_DATE_FORMAT};
use crate::services::ExpenseInput;
use crate::tui::app::{ActiveDialog, App};
use crate::tui::layout::{centered_rect_fixed, dialog_inner};
use crate::tui::widgets::{render_field, TextInput};

/// Which field is currently focused in the expense form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseField {
    #[default]
    Date,
    Category,
    Amount,
    Description,
}

impl ExpenseField {
    /// Get the next field (for Tab navigation)
    pub fn next(self) -> Self {
        match self {
            Self::Date => Self::Category,
            Self::Category => Self::Amount,
            Self::Amount => Self::Description,
            Self::Description => Self::Date,
        }
    }

    /// Get the previous field (for Shift+Tab navigation)
    pub fn prev(self) -> Self {
        match self {
            Self::Date => Self::Description,
            Self::Category => Self::Date,
            Self::Amount => Self::Category,
            Self::Description => Self::Amount,
        }
    }
}

/// State for the expense form dialog
#[derive(Debug, Clone)]
pub struct ExpenseFormState {
    pub focused_field: ExpenseField,
    pub date_input: TextInput,
    /// Choices for the category field
    pub categories: Vec<String>,
    pub category_index: usize,
    pub amount_input: TextInput,
    pub description_input: TextInput,
    pub error_message: Option<String>,
}

impl ExpenseFormState {
    /// Empty form with the default category selected
    ///
    /// The date is left blank and means today.
    pub fn new(settings: &Settings) -> Self {
        let categories = settings.category_choices();
        let category_index = categories
            .iter()
            .position(|c| c == &settings.default_category)
            .unwrap_or(0);

        Self {
            focused_field: ExpenseField::Date,
            date_input: TextInput::new().placeholder("today (YYYY-MM-DD)"),
            categories,
            category_index,
            amount_input: TextInput::new().placeholder("0.00"),
            description_input: TextInput::new().placeholder("optional"),
            error_message: None,
        }
    }

    /// Use `categories` as choices, keeping the current selection if present
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        let current = self.selected_category().map(str::to_string);
        self.categories = categories;
        self.category_index = current
            .and_then(|c| self.categories.iter().position(|x| *x == c))
            .unwrap_or(0);
        self
    }

    /// Form pre-populated from an existing expense
    pub fn from_expense(expense: &Expense, mut categories: Vec<String>) -> Self {
        if !categories.contains(&expense.category) {
            categories.push(expense.category.clone());
        }
        let category_index = categories
            .iter()
            .position(|c| *c == expense.category)
            .unwrap_or(0);

        Self {
            focused_field: ExpenseField::Date,
            date_input: TextInput::new().content(expense.date.format(ISO_DATE_FORMAT).to_string()),
            categories,
            category_index,
            amount_input: TextInput::new().content(expense.amount.to_string()),
            description_input: TextInput::new().content(expense.description.clone()),
            error_message: None,
        }
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.categories.get(self.category_index).map(String::as_str)
    }

    pub fn next_category(&mut self) {
        if !self.categories.is_empty() {
            self.category_index = (self.category_index + 1) % self.categories.len();
        }
    }

    pub fn prev_category(&mut self) {
        if !self.categories.is_empty() {
            self.category_index =
                (self.category_index + self.categories.len() - 1) % self.categories.len();
        }
    }

    /// Text input for the focused field, if it is a text field
    fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            ExpenseField::Date => Some(&mut self.date_input),
            ExpenseField::Amount => Some(&mut self.amount_input),
            ExpenseField::Description => Some(&mut self.description_input),
            ExpenseField::Category => None,
        }
    }

    /// Parse the form fields
    pub fn to_input(&self, settings: &Settings) -> Result<ExpenseInput, String> {
        ExpenseInput::parse(
            self.date_input.value(),
            self.selected_category().unwrap_or(""),
            self.amount_input.value(),
            self.description_input.value(),
            settings,
        )
        .map_err(|e| e.to_string())
    }
}

/// Render the expense dialog
pub fn render(frame: &mut Frame, app: &App) {
    let form = &app.expense_form;
    let area = centered_rect_fixed(64, 11, frame.area());
    frame.render_widget(Clear, area);

    let title = match app.active_dialog {
        ActiveDialog::EditExpense(row) => format!(" Edit Expense #{} ", row + 1),
        _ => " Add Expense ".to_string(),
    };
    let block = Block::default()
        .title(title)
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
            Constraint::Length(1), // Date
            Constraint::Length(1), // Category
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Description
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(dialog_inner(area));

    let focused = form.focused_field;
    render_field(
        frame,
        chunks[0],
        "Date",
        form.date_input.spans(focused == ExpenseField::Date),
        focused == ExpenseField::Date,
    );

    let category_focused = focused == ExpenseField::Category;
    let category = form.selected_category().unwrap_or("").to_string();
    let category_spans = if category_focused {
        vec![
            Span::styled("< ", Style::default().fg(Color::DarkGray)),
            Span::styled(category, Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::styled(" >", Style::default().fg(Color::DarkGray)),
        ]
    } else {
        vec![Span::styled(category, Style::default().fg(Color::Yellow))]
    };
    render_field(frame, chunks[1], "Category", category_spans, category_focused);

    render_field(
        frame,
        chunks[2],
        "Amount",
        form.amount_input.spans(focused == ExpenseField::Amount),
        focused == ExpenseField::Amount,
    );
    render_field(
        frame,
        chunks[3],
        "Description",
        form.description_input.spans(focused == ExpenseField::Description),
        focused == ExpenseField::Description,
    );

    if let Some(error) = &form.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[5],
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Cyan)),
        Span::raw(" Next  "),
        Span::styled("[←/→]", Style::default().fg(Color::Cyan)),
        Span::raw(" Category  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[6]);
}

/// Handle key input for the expense dialog
///
/// Returns true if the key was consumed.
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
            return true;
        }
        KeyCode::Enter => {
            submit(app);
            return true;
        }
        _ => {}
    }

    let form = &mut app.expense_form;
    match key.code {
        KeyCode::Tab => form.focused_field = form.focused_field.next(),
        KeyCode::BackTab => form.focused_field = form.focused_field.prev(),
        code if form.focused_field == ExpenseField::Category => match code {
            KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => form.next_category(),
            KeyCode::Left | KeyCode::Up => form.prev_category(),
            _ => return false,
        },
        KeyCode::Down => form.focused_field = form.focused_field.next(),
        KeyCode::Up => form.focused_field = form.focused_field.prev(),
        _ => {
            let consumed = form.focused_input().is_some_and(|input| input.handle_key(key));
            if consumed {
                form.error_message = None;
            }
            return consumed;
        }
    }
    true
}

/// Validate and apply the form; on error the dialog stays open
fn submit(app: &mut App) {
    let input = match app.expense_form.to_input(&app.settings) {
        Ok(input) => input,
        Err(e) => {
            app.expense_form.error_message = Some(e);
            return;
        }
    };

    let editing = match app.active_dialog {
        ActiveDialog::EditExpense(row) => Some(row),
        _ => None,
    };
    let result = match editing {
        Some(row) => app
            .service()
            .update(row, input)
            .map(|e| format!("Updated #{}: {}", row + 1, e)),
        None => app.service().add(input).map(|e| format!("Added {}", e)),
    };

    match result {
        Ok(message) => {
            app.close_dialog();
            app.refresh_view();
            if editing.is_none() {
                app.move_to_end();
            }
            app.set_status(message);
        }
        Err(e) => app.expense_form.error_message = Some(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExpensePaths;
    use crate::models::Money;
    use crate::storage::{Ledger, LoadMode};
    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;
    use tempfile::TempDir;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn test_app() -> (App, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let ledger = Ledger::new(paths.default_ledger_file());
        (App::new(paths, Settings::default(), ledger, LoadMode::Strict), temp_dir)
    }

    #[test]
    fn test_field_cycle() {
        assert_eq!(ExpenseField::Description.next(), ExpenseField::Date);
        assert_eq!(ExpenseField::Date.prev(), ExpenseField::Description);
    }

    #[test]
    fn test_add_through_form() {
        let (mut app, _temp) = test_app();
        app.open_dialog(ActiveDialog::AddExpense);

        type_text(&mut app, "2025-03-04");
        press(&mut app, KeyCode::Tab);
        let before = app.expense_form.selected_category().map(str::to_string);
        press(&mut app, KeyCode::Right);
        assert_ne!(app.expense_form.selected_category().map(str::to_string), before);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "12.50");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Lunch");
        press(&mut app, KeyCode::Enter);

        assert!(!app.has_dialog());
        assert_eq!(app.ledger.len(), 1);
        let expense = app.ledger.get(0).unwrap();
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
        assert_eq!(expense.amount, Money::from_cents(1250));
        assert_eq!(expense.description, "Lunch");
        assert!(app.audit.path().exists());
    }

    #[test]
    fn test_invalid_amount_keeps_dialog_open() {
        let (mut app, _temp) = test_app();
        app.open_dialog(ActiveDialog::AddExpense);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "abc");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.active_dialog, ActiveDialog::AddExpense);
        assert!(app.expense_form.error_message.is_some());
        assert!(app.ledger.is_empty());
    }

    #[test]
    fn test_failed_audit_write_adds_nothing() {
        let (mut app, _temp) = test_app();
        std::fs::create_dir(app.paths.audit_log()).unwrap();
        app.open_dialog(ActiveDialog::AddExpense);
        type_text(&mut app, "2025-03-04");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "5");

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.active_dialog, ActiveDialog::AddExpense);
        assert!(app.expense_form.error_message.is_some());
        assert!(app.ledger.is_empty());
    }

    #[test]
    fn test_edit_prefills_and_updates() {
        let (mut app, _temp) = test_app();
        app.ledger.push(Expense::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            "Pets",
            Money::from_cents(500),
            "Food",
        ));
        app.refresh_view();
        app.open_dialog(ActiveDialog::EditExpense(0));

        assert_eq!(app.expense_form.amount_input.value(), "5.00");
        assert_eq!(app.expense_form.selected_category(), Some("Pets"));

        app.expense_form.focused_field = ExpenseField::Amount;
        app.expense_form.amount_input.set("7");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.ledger.get(0).unwrap().amount, Money::from_cents(700));
        assert_eq!(app.ledger.get(0).unwrap().category, "Pets");
    }
}
