//! Status reporter: a passive sink for user-visible feedback.
//!
//! Holds the action-panel text (default prompt, help, query output), the
//! last action result, and the terminal size. Only the focus controller
//! writes to it.

use super::state::FocusZone;

pub const DEFAULT_PANEL_TEXT: &str = "Select an action from the submenu";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A transient result line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub severity: Severity,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReporter {
    panel_text: String,
    message: Option<StatusMessage>,
    terminal_size: (u16, u16),
}

impl StatusReporter {
    pub fn new() -> Self {
        StatusReporter {
            panel_text: DEFAULT_PANEL_TEXT.to_string(),
            message: None,
            terminal_size: (0, 0),
        }
    }

    pub fn panel_text(&self) -> &str {
        &self.panel_text
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    /// Text of the last result, if any.
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.text.as_str())
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub fn set_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    pub fn size_text(&self) -> String {
        format!("Terminal size: {}x{}", self.terminal_size.0, self.terminal_size.1)
    }

    /// Replace the action-panel text.
    pub fn show_panel_text(&mut self, text: impl Into<String>) {
        self.panel_text = text.into();
    }

    pub fn report(&mut self, severity: Severity, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            severity,
            text: text.into(),
        });
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Back to the default prompt with no transient result.
    pub fn reset(&mut self) {
        self.panel_text = DEFAULT_PANEL_TEXT.to_string();
        self.message = None;
    }
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Static instructions shown on the left of the status bar.
pub fn instructions(zone: FocusZone) -> &'static str {
    match zone {
        FocusZone::Menu => "Tab or arrow keys: Move focus between menus",
        FocusZone::Submenu => "Enter: select  Tab/Left: back to menu  Esc: reset",
        FocusZone::ActionUi => "Tab: next field  Space: toggle file  Esc: cancel",
    }
}
