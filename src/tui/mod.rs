//! Terminal user interface
//!
//! A ratatui front end over the same services the CLI uses: an expense
//! table with filtering and multi-select, a monthly summary view, entry
//! and path dialogs, and a totals status bar.

pub mod app;
pub mod dialogs;
pub mod event;
pub mod handler;
pub mod layout;
pub mod terminal;
pub mod views;
pub mod widgets;

pub use app::App;
pub use terminal::run_tui;
