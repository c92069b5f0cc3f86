//! Domain types for gitix.
//!
//! Menu structure, entry actions, and runtime configuration. Pure data:
//! the registry builds these once, the TUI reads them.

use std::path::PathBuf;

use serde::Deserialize;

// ============================================================================
// MENU DATA
// ============================================================================

/// What selecting a menu entry does.
///
/// Entries carry a command value, never a closure. The focus controller
/// interprets it centrally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAction {
    /// Terminate the application.
    Exit,
    /// Write the owning submenu's help text to the action panel.
    Help,
    /// Mount the commit form in the action panel.
    Commit,
    /// Run a read-only query and print its output in the action panel.
    Query(GitQuery),
}

/// Read-only external queries whose output is shown verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitQuery {
    ShowChanges,
    ViewDiff,
    ViewHistory,
    ShowBranches,
    CheckForUpdates,
}

impl GitQuery {
    /// Arguments passed to the git program.
    pub fn args(self) -> &'static [&'static str] {
        match self {
            GitQuery::ShowChanges => &["status", "--short"],
            GitQuery::ViewDiff => &["diff", "--stat"],
            GitQuery::ViewHistory => &["log", "--oneline", "-n", "20"],
            GitQuery::ShowBranches => &["branch"],
            GitQuery::CheckForUpdates => &["status", "-sb"],
        }
    }

    /// Short human label, used in status messages.
    pub fn label(self) -> &'static str {
        match self {
            GitQuery::ShowChanges => "Show Changes",
            GitQuery::ViewDiff => "View File Differences",
            GitQuery::ViewHistory => "View History",
            GitQuery::ShowBranches => "Show Branches",
            GitQuery::CheckForUpdates => "Check for Updates",
        }
    }
}

/// One selectable line in a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Unique within its list.
    pub label: &'static str,
    pub description: &'static str,
    pub shortcut: char,
    pub action: Option<EntryAction>,
}

impl MenuEntry {
    pub const fn new(
        label: &'static str,
        description: &'static str,
        shortcut: char,
        action: Option<EntryAction>,
    ) -> Self {
        MenuEntry {
            label,
            description,
            shortcut,
            action,
        }
    }
}

/// A named submenu, keyed by the main-menu label that opens it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmenuDefinition {
    pub name: &'static str,
    pub entries: Vec<MenuEntry>,
    pub help_text: &'static str,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Runtime configuration, read from `config.json` and overridden by flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Program invoked for every external action.
    pub git_program: String,
    /// Working directory for git calls (None = current directory).
    pub repo_dir: Option<PathBuf>,
    /// Below this many columns the panes are replaced by a warning.
    pub min_width: u16,
    /// Below this many rows the panes are replaced by a warning.
    pub min_height: u16,
    /// Log destination (None = platform data dir).
    pub log_file: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            git_program: "git".to_string(),
            repo_dir: None,
            min_width: 60,
            min_height: 12,
            log_file: None,
        }
    }
}
