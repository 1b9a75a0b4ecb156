//! Presentation layer handling the terminal UI, user input and HTML output.
//!
//! The terminal form is drawn with ratatui and driven by crossterm key and
//! mouse events. `html` renders the same cards as markup for export.

pub mod ui;
pub mod input;
pub mod html;

pub use ui::*;
pub use input::*;
