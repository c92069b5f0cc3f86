//! TUI color semantics and style constants.
//!
//! Color semantics:
//! - Yellow: the focused pane's border and title
//! - Gray: unfocused panes
//! - Green: success, checked files
//! - Red: errors
//! - Cyan: interactive hints, the focused form control
//! - Dark gray background: the status bar

use ratatui::style::{Color, Modifier, Style};

use super::state::Emphasis;
use super::status::Severity;

// ============================================================================
// FOCUS
// ============================================================================

/// Border and title of the pane that owns input.
pub const STYLE_FOCUSED_BORDER: Style = Style::new().fg(Color::Yellow);

/// Border and title of every other pane.
pub const STYLE_UNFOCUSED_BORDER: Style = Style::new().fg(Color::Gray);

pub fn border_style(emphasis: Emphasis) -> Style {
    match emphasis {
        Emphasis::Active => STYLE_FOCUSED_BORDER,
        Emphasis::Inactive => STYLE_UNFOCUSED_BORDER,
    }
}

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

pub const STYLE_SUCCESS: Style = Style::new().fg(Color::Green);

pub const STYLE_ERROR: Style = Style::new().fg(Color::Red);

pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

pub const STYLE_WARNING: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

pub fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Info => STYLE_INTERACTIVE,
        Severity::Success => STYLE_SUCCESS,
        Severity::Error => STYLE_ERROR,
    }
}

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Highlighted row in the focused list.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Highlighted row in an unfocused list.
pub const STYLE_CURSOR_INACTIVE: Style = Style::new().add_modifier(Modifier::BOLD);

pub const STYLE_CHECKED: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

pub const STYLE_UNCHECKED: Style = Style::new().fg(Color::DarkGray);

/// Focused form control (input or button).
pub const STYLE_CONTROL_FOCUSED: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

pub const STYLE_STATUS_BAR: Style = Style::new().fg(Color::White).bg(Color::DarkGray);
