//! Application state for the TUI
//!
//! The App struct owns the ledger and everything needed for rendering and
//! handling events. Handlers receive it by `&mut`.

use std::collections::BTreeSet;

use crate::audit::AuditLogger;
use crate::config::{ExpensePaths, Settings};
use crate::reports::{CategoryTotals, MonthlySummary};
use crate::services::{ExpenseFilter, ExpenseService};
use crate::storage::{Ledger, LoadMode};

use super::dialogs::expense::ExpenseFormState;
use super::dialogs::filter::FilterFormState;
use super::dialogs::path::PathPromptState;

/// Which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Expenses,
    Summary,
}

/// Mode of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// What a path prompt does with the entered path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathAction {
    Load,
    SaveAs,
    ExportSummary,
}

/// What a confirmation dialog confirms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteSelected,
    Quit,
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    AddExpense,
    EditExpense(usize),
    Filter,
    Path(PathAction),
    Confirm(ConfirmAction),
    Help,
}

/// Main application state
pub struct App {
    pub paths: ExpensePaths,
    pub settings: Settings,
    pub ledger: Ledger,
    pub audit: AuditLogger,
    pub load_mode: LoadMode,

    /// Whether the app should quit
    pub should_quit: bool,

    pub active_view: ActiveView,
    pub input_mode: InputMode,
    pub active_dialog: ActiveDialog,

    /// Filter applied to the expense table
    pub filter: ExpenseFilter,

    /// Ledger positions of the rows currently shown
    pub visible: Vec<usize>,

    /// Cursor position within `visible`
    pub selected_index: usize,

    /// Ledger positions marked with Space
    pub marked: BTreeSet<usize>,

    /// First summary row shown
    pub summary_scroll: usize,

    /// Status message to display
    pub status_message: Option<String>,

    pub expense_form: ExpenseFormState,
    pub filter_form: FilterFormState,
    pub path_prompt: PathPromptState,
}

impl App {
    pub fn new(paths: ExpensePaths, settings: Settings, ledger: Ledger, load_mode: LoadMode) -> Self {
        let audit = AuditLogger::new(paths.audit_log());
        let expense_form = ExpenseFormState::new(&settings);
        let mut app = Self {
            paths,
            settings,
            ledger,
            audit,
            load_mode,
            should_quit: false,
            active_view: ActiveView::default(),
            input_mode: InputMode::default(),
            active_dialog: ActiveDialog::default(),
            filter: ExpenseFilter::default(),
            visible: Vec::new(),
            selected_index: 0,
            marked: BTreeSet::new(),
            summary_scroll: 0,
            status_message: None,
            expense_form,
            filter_form: FilterFormState::default(),
            path_prompt: PathPromptState::default(),
        };
        app.refresh_view();
        app
    }

    /// Service over the app's ledger, with audit logging
    pub fn service(&mut self) -> ExpenseService<'_> {
        ExpenseService::new(&mut self.ledger, &self.settings).with_audit(&self.audit)
    }

    /// Recompute the visible rows after the ledger or filter changed
    pub fn refresh_view(&mut self) {
        self.visible = self.filter.apply(self.ledger.expenses());
        self.marked.retain(|i| self.visible.contains(i));
        self.selected_index = self.selected_index.min(self.visible.len().saturating_sub(1));

        let months = MonthlySummary::generate(self.ledger.expenses()).rows().len();
        self.summary_scroll = self.summary_scroll.min(months.saturating_sub(1));
    }

    /// Ledger position of the row under the cursor
    pub fn selected_row(&self) -> Option<usize> {
        self.visible.get(self.selected_index).copied()
    }

    /// Rows a delete applies to: the marked rows, or else the cursor row
    pub fn delete_targets(&self) -> Vec<usize> {
        if self.marked.is_empty() {
            self.selected_row().into_iter().collect()
        } else {
            self.marked.iter().copied().collect()
        }
    }

    /// Mark or unmark the cursor row, then advance
    pub fn toggle_mark(&mut self) {
        if let Some(row) = self.selected_row() {
            if !self.marked.remove(&row) {
                self.marked.insert(row);
            }
            self.move_down();
        }
    }

    /// Totals of the visible rows
    pub fn totals(&self) -> CategoryTotals {
        CategoryTotals::generate(
            self.visible
                .iter()
                .filter_map(|&i| self.ledger.get(i)),
        )
    }

    /// Summary of the whole ledger
    pub fn summary(&self) -> MonthlySummary {
        MonthlySummary::generate(self.ledger.expenses())
    }

    /// Categories for forms: configured ones plus any used in the ledger
    pub fn known_categories(&self) -> Vec<String> {
        let mut categories = self.settings.category_choices();
        let used: BTreeSet<&str> = self
            .ledger
            .expenses()
            .iter()
            .map(|e| e.category.as_str())
            .collect();
        for category in used {
            if !categories.iter().any(|c| c == category) {
                categories.push(category.to_string());
            }
        }
        categories
    }

    /// Quit, asking first when there are unsaved changes
    pub fn request_quit(&mut self) {
        if self.ledger.is_dirty() {
            self.open_dialog(ActiveDialog::Confirm(ConfirmAction::Quit));
        } else {
            self.quit();
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn switch_view(&mut self, view: ActiveView) {
        self.active_view = view;
    }

    /// Open a dialog, preparing its form state
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        let categories = self.known_categories();
        match dialog {
            ActiveDialog::AddExpense => {
                self.expense_form = ExpenseFormState::new(&self.settings).with_categories(categories);
                self.input_mode = InputMode::Editing;
            }
            ActiveDialog::EditExpense(row) => match self.ledger.get(row) {
                Some(expense) => {
                    self.expense_form = ExpenseFormState::from_expense(expense, categories);
                    self.input_mode = InputMode::Editing;
                }
                None => return,
            },
            ActiveDialog::Filter => {
                self.filter_form = FilterFormState::from_filter(&self.filter, categories);
                self.input_mode = InputMode::Editing;
            }
            ActiveDialog::Path(action) => {
                self.path_prompt = PathPromptState::for_action(action, self);
                self.input_mode = InputMode::Editing;
            }
            ActiveDialog::Confirm(_) | ActiveDialog::Help | ActiveDialog::None => {}
        }
        self.active_dialog = dialog;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
        self.input_mode = InputMode::Normal;
    }

    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    pub fn move_up(&mut self) {
        match self.active_view {
            ActiveView::Expenses => self.selected_index = self.selected_index.saturating_sub(1),
            ActiveView::Summary => self.summary_scroll = self.summary_scroll.saturating_sub(1),
        }
    }

    pub fn move_down(&mut self) {
        match self.active_view {
            ActiveView::Expenses => {
                if self.selected_index + 1 < self.visible.len() {
                    self.selected_index += 1;
                }
            }
            ActiveView::Summary => {
                let months = self.summary().rows().len();
                if self.summary_scroll + 1 < months {
                    self.summary_scroll += 1;
                }
            }
        }
    }

    pub fn move_by(&mut self, delta: isize) {
        let steps = delta.unsigned_abs();
        for _ in 0..steps {
            if delta < 0 {
                self.move_up();
            } else {
                self.move_down();
            }
        }
    }

    pub fn move_to_start(&mut self) {
        self.selected_index = 0;
        self.summary_scroll = 0;
    }

    pub fn move_to_end(&mut self) {
        self.selected_index = self.visible.len().saturating_sub(1);
    }
}
