//! Terminal output for the gate commands.
//!
//! - [`UserInterface`] trait so commands can be tested against [`MockUI`]
//! - [`TerminalUI`] for real terminals
//! - [`FsddTheme`] for colors and icons
//!
//! # Example
//!
//! ```
//! use fsdd::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.show_header("Dependencies");
//! ui.success("torch 2.1.0");
//! assert!(ui.has_success("torch 2.1.0"));
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, FsddTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every output mode.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show a hint beneath the previous line.
    fn show_hint(&mut self, hint: &str);

    /// Show a line only in verbose mode.
    fn detail(&mut self, msg: &str);

    /// Write machine-readable output verbatim, regardless of output mode.
    fn raw(&mut self, text: &str);
}
