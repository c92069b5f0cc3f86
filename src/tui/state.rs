//! TUI state algebra: the focus controller's data, zero effects.
//!
//! `App` is the single owner of the current focus zone, the mounted
//! submenu and the action host. Nothing outside the event loop mutates it.
//! Transitions live in `update`, rendering in `view`, effects in `run`.

use crossterm::event::KeyEvent;

use crate::registry::MenuRegistry;
use crate::types::{GitQuery, ShellConfig};

use super::commit::{ActionHost, CommitFailure};
use super::status::StatusReporter;

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// Two kinds of producers feed a single mpsc channel:
/// - A terminal reader thread sends `Key` and `Resize`
/// - Short-lived worker threads send the results of external calls
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize { width: u16, height: u16 },
    /// Result of listing changed paths for the commit form.
    ChangedFiles(Result<Vec<String>, String>),
    /// Result of staging and committing.
    CommitFinished(Result<(), CommitFailure>),
    /// Output of a read-only query, tagged with the id it was issued under.
    QueryFinished {
        id: u64,
        query: GitQuery,
        result: Result<String, String>,
    },
}

// ============================================================================
// FOCUS
// ============================================================================

/// The region that currently owns keyboard input.
///
/// `ActionUi` is only reachable while the action host is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusZone {
    #[default]
    Menu,
    Submenu,
    ActionUi,
}

/// Active or inactive emphasis for a bordered widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Active,
    Inactive,
}

/// Per-widget emphasis, derived from the focus zone on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusVisuals {
    pub menu: Emphasis,
    pub submenu: Emphasis,
    pub action_panel: Emphasis,
}

/// Pure mapping from focus zone to widget emphasis.
pub fn focus_visuals(zone: FocusZone) -> FocusVisuals {
    let emphasis = |z: FocusZone| {
        if z == zone {
            Emphasis::Active
        } else {
            Emphasis::Inactive
        }
    };
    FocusVisuals {
        menu: emphasis(FocusZone::Menu),
        submenu: emphasis(FocusZone::Submenu),
        action_panel: emphasis(FocusZone::ActionUi),
    }
}

/// The submenu currently attached to the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedSubmenu {
    /// Registry key (the main-menu label that opened it).
    pub name: &'static str,
    /// Highlighted entry.
    pub cursor: usize,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model and focus controller.
#[derive(Debug)]
pub struct App {
    pub registry: MenuRegistry,
    /// Zone that receives keys. Only `update` changes it.
    pub focus: FocusZone,
    /// Highlighted main-menu entry.
    pub menu_cursor: usize,
    /// At most one submenu is mounted at any time.
    pub submenu: Option<MountedSubmenu>,
    pub host: ActionHost,
    pub status: StatusReporter,
    /// Minimum usable terminal size (columns, rows).
    pub min_size: (u16, u16),
    /// Id of the query whose output may still replace the panel text.
    pub pending_query: Option<u64>,
    next_query_id: u64,
    /// Set when the app should exit on the next tick.
    pub should_quit: bool,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of routing one key event.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// No widget and no default rule wanted the key.
    Ignored,
    /// The key was consumed; state may have changed.
    Handled,
    /// Quit the application.
    Quit,
    /// The key was consumed and an external call must be started.
    Effect(Effect),
}

impl Transition {
    pub fn consumed(&self) -> bool {
        !matches!(self, Transition::Ignored)
    }
}

/// External call requested by a transition. Executed off the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// List changed paths for the commit form.
    LoadChangedFiles,
    /// Stage `paths`, then commit with `message`.
    Commit { paths: Vec<String>, message: String },
    /// Run a read-only query. `id` matches the result to its request.
    Query { id: u64, query: GitQuery },
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl App {
    /// Fresh app: menu focused, nothing mounted.
    pub fn new(registry: MenuRegistry) -> Self {
        let defaults = ShellConfig::default();
        App {
            registry,
            focus: FocusZone::Menu,
            menu_cursor: 0,
            submenu: None,
            host: ActionHost::default(),
            status: StatusReporter::new(),
            min_size: (defaults.min_width, defaults.min_height),
            pending_query: None,
            next_query_id: 0,
            should_quit: false,
        }
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        let mut app = App::new(MenuRegistry::builtin());
        app.min_size = (config.min_width, config.min_height);
        app
    }

    /// Number of submenu widgets attached to the layout (0 or 1).
    pub fn mounted_submenus(&self) -> usize {
        usize::from(self.submenu.is_some())
    }

    pub fn visuals(&self) -> FocusVisuals {
        focus_visuals(self.focus)
    }

    /// Allocate an id for a new query and make it the only pending one.
    pub fn issue_query_id(&mut self) -> u64 {
        let id = self.next_query_id;
        self.next_query_id = self.next_query_id.wrapping_add(1);
        self.pending_query = Some(id);
        id
    }
}

impl Default for App {
    fn default() -> Self {
        App::new(MenuRegistry::builtin())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_app_starts_in_menu_with_nothing_mounted() {
        let app = App::default();
        assert_eq!(app.focus, FocusZone::Menu);
        assert_eq!(app.menu_cursor, 0);
        assert_eq!(app.mounted_submenus(), 0);
        assert!(!app.host.is_active());
        assert!(!app.should_quit);
    }

    #[test]
    fn exactly_one_widget_is_active_per_zone() {
        for zone in [FocusZone::Menu, FocusZone::Submenu, FocusZone::ActionUi] {
            let v = focus_visuals(zone);
            let active = [v.menu, v.submenu, v.action_panel]
                .iter()
                .filter(|e| **e == Emphasis::Active)
                .count();
            assert_eq!(active, 1, "{:?}", zone);
        }
    }

    #[test]
    fn menu_zone_emphasizes_menu_only() {
        let v = focus_visuals(FocusZone::Menu);
        assert_eq!(v.menu, Emphasis::Active);
        assert_eq!(v.submenu, Emphasis::Inactive);
    }

    #[test]
    fn config_sets_minimum_size() {
        let config = ShellConfig {
            min_width: 100,
            min_height: 30,
            ..Default::default()
        };
        assert_eq!(App::from_config(&config).min_size, (100, 30));
    }

    #[test]
    fn only_ignored_is_not_consumed() {
        assert!(!Transition::Ignored.consumed());
        assert!(Transition::Handled.consumed());
        assert!(Transition::Quit.consumed());
        assert!(Transition::Effect(Effect::LoadChangedFiles).consumed());
    }

    #[test]
    fn query_ids_are_fresh_and_supersede() {
        let mut app = App::default();
        let first = app.issue_query_id();
        let second = app.issue_query_id();
        assert_ne!(first, second);
        assert_eq!(app.pending_query, Some(second));
    }
}
