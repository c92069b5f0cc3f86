//! Focus controller transitions: (App, event) → Transition.
//!
//! This is the core logic of the TUI. Fully testable without a terminal.
//!
//! Routing order for a key:
//! 1. Ctrl+C quits from anywhere.
//! 2. An active action host gets the key exclusively.
//! 3. The focused list widget (main menu or submenu) gets first refusal.
//! 4. Only keys the widget declines reach the controller's default rules
//!    (focus movement and Escape).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};

use crate::registry::shortcut_index;
use crate::types::{EntryAction, GitQuery, MenuEntry};

use super::commit::{ActionKind, HostResponse, COMMIT_SUCCESSFUL};
use super::state::{App, AppEvent, Effect, FocusZone, MountedSubmenu, Transition};
use super::status::Severity;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Semantic navigation key for the menu zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Up,
    Down,
    Confirm,
    /// Right arrow.
    Forward,
    /// Left arrow.
    Backward,
    /// Tab and Shift+Tab: toggle between menu and submenu.
    Cycle,
    Escape,
    Shortcut(char),
}

/// Map a key to a navigation action. Returns None for unmapped keys.
pub fn map_nav_key(key: KeyEvent) -> Option<Nav> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    match key.code {
        KeyCode::Up => Some(Nav::Up),
        KeyCode::Down => Some(Nav::Down),
        KeyCode::Enter => Some(Nav::Confirm),
        KeyCode::Right => Some(Nav::Forward),
        KeyCode::Left => Some(Nav::Backward),
        KeyCode::Tab | KeyCode::BackTab => Some(Nav::Cycle),
        KeyCode::Esc => Some(Nav::Escape),
        KeyCode::Char(c) => Some(Nav::Shortcut(c)),
        _ => None,
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

// ============================================================================
// KEY ROUTING
// ============================================================================

impl App {
    /// Route one key event. The returned transition tells the caller
    /// whether the key was consumed and what to do next.
    pub fn on_key(&mut self, key: KeyEvent) -> Transition {
        if is_ctrl_c(&key) {
            return Transition::Quit;
        }

        if self.host.is_active() {
            return self.route_to_host(key);
        }

        if self.focus == FocusZone::ActionUi {
            debug_assert!(false, "ActionUi focus without an active host");
            warn!("focus was ActionUi with no active host; returning to menu");
            self.set_focus(FocusZone::Menu);
        }

        let Some(nav) = map_nav_key(key) else {
            return Transition::Ignored;
        };

        let widget = match self.focus {
            FocusZone::Menu => self.menu_widget(nav),
            FocusZone::Submenu => self.submenu_widget(nav),
            FocusZone::ActionUi => None,
        };

        match widget {
            Some(transition) => transition,
            None => self.default_route(nav),
        }
    }

    /// Record a new terminal size.
    pub fn on_resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "terminal resized");
        self.status.set_terminal_size(width, height);
    }

    fn route_to_host(&mut self, key: KeyEvent) -> Transition {
        debug_assert_eq!(self.focus, FocusZone::ActionUi);
        match self.host.handle_key(key) {
            HostResponse::Consumed => Transition::Handled,
            HostResponse::Rejected(msg) => {
                self.status.report(Severity::Error, msg);
                Transition::Handled
            }
            HostResponse::Effect(effect) => Transition::Effect(effect),
            HostResponse::Cancelled => {
                info!("action cancelled");
                self.action_finished();
                Transition::Handled
            }
        }
    }

    /// Main menu list. Returns None to pass the key on.
    fn menu_widget(&mut self, nav: Nav) -> Option<Transition> {
        let len = self.registry.main_menu().len();
        match nav {
            Nav::Up => {
                self.menu_cursor = self.menu_cursor.saturating_sub(1);
                Some(Transition::Handled)
            }
            Nav::Down => {
                self.menu_cursor = if len == 0 { 0 } else { (self.menu_cursor + 1).min(len - 1) };
                Some(Transition::Handled)
            }
            Nav::Confirm => Some(self.confirm_main(self.menu_cursor)),
            Nav::Shortcut(c) => {
                let index = shortcut_index(self.registry.main_menu(), c)?;
                self.menu_cursor = index;
                Some(self.confirm_main(index))
            }
            _ => None,
        }
    }

    /// Mounted submenu list. Returns None to pass the key on.
    fn submenu_widget(&mut self, nav: Nav) -> Option<Transition> {
        let mounted = self.submenu.as_ref()?;
        let entries = &self.registry.lookup_submenu(mounted.name)?.entries;
        let len = entries.len();
        let cursor = mounted.cursor;

        let (index, entry) = match nav {
            Nav::Up => {
                self.set_submenu_cursor(cursor.saturating_sub(1));
                return Some(Transition::Handled);
            }
            Nav::Down => {
                let next = if len == 0 { 0 } else { (cursor + 1).min(len - 1) };
                self.set_submenu_cursor(next);
                return Some(Transition::Handled);
            }
            Nav::Confirm => (cursor, entries.get(cursor)?.clone()),
            Nav::Shortcut(c) => {
                let index = shortcut_index(entries, c)?;
                (index, entries[index].clone())
            }
            _ => return None,
        };

        self.set_submenu_cursor(index);
        Some(self.dispatch_entry(&entry))
    }

    /// Rules for keys no widget consumed.
    fn default_route(&mut self, nav: Nav) -> Transition {
        match (self.focus, nav) {
            (FocusZone::Menu, Nav::Forward | Nav::Cycle) => self.focus_submenu(),
            (FocusZone::Submenu, Nav::Backward | Nav::Cycle) => {
                self.set_focus(FocusZone::Menu);
                Transition::Handled
            }
            (_, Nav::Escape) => {
                self.set_focus(FocusZone::Menu);
                self.pending_query = None;
                self.status.reset();
                Transition::Handled
            }
            _ => Transition::Ignored,
        }
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    fn confirm_main(&mut self, index: usize) -> Transition {
        let Some(entry) = self.registry.main_menu().get(index) else {
            return Transition::Handled;
        };
        if entry.action == Some(EntryAction::Exit) {
            info!("exit selected");
            return Transition::Quit;
        }
        let label = entry.label;
        if self.mount_submenu(label) {
            self.set_focus(FocusZone::Submenu);
        }
        Transition::Handled
    }

    /// Forward navigation: mount the highlighted entry's submenu, or fall
    /// back to whatever is already mounted.
    fn focus_submenu(&mut self) -> Transition {
        let highlighted = self
            .registry
            .main_menu()
            .get(self.menu_cursor)
            .map(|e| e.label)
            .filter(|label| self.registry.lookup_submenu(label).is_some());

        if let Some(label) = highlighted {
            self.mount_submenu(label);
        }
        if self.submenu.is_some() {
            self.set_focus(FocusZone::Submenu);
        }
        Transition::Handled
    }

    /// Swap in the named submenu. The previous one is always detached
    /// first. Returns false on a lookup miss, leaving nothing mounted.
    fn mount_submenu(&mut self, name: &str) -> bool {
        if let Some(previous) = self.submenu.take() {
            if previous.name == name {
                self.submenu = Some(previous);
                return true;
            }
            debug!(submenu = previous.name, "unmounted submenu");
        }

        match self.registry.lookup_submenu(name) {
            Some(def) => {
                debug!(submenu = def.name, "mounted submenu");
                self.submenu = Some(MountedSubmenu {
                    name: def.name,
                    cursor: 0,
                });
                true
            }
            None => false,
        }
    }

    fn set_submenu_cursor(&mut self, cursor: usize) {
        if let Some(mounted) = self.submenu.as_mut() {
            mounted.cursor = cursor;
        }
    }

    /// Run an entry's bound action. Unbound entries do nothing.
    fn dispatch_entry(&mut self, entry: &MenuEntry) -> Transition {
        match entry.action {
            None => Transition::Handled,
            Some(EntryAction::Exit) => Transition::Quit,
            Some(EntryAction::Help) => {
                let help = self
                    .submenu
                    .as_ref()
                    .and_then(|m| self.registry.help_text(m.name));
                if let Some(text) = help {
                    self.pending_query = None;
                    self.status.show_panel_text(text);
                }
                Transition::Handled
            }
            Some(EntryAction::Commit) => self.activate_action(ActionKind::Commit),
            Some(EntryAction::Query(query)) => {
                let id = self.issue_query_id();
                self.status
                    .report(Severity::Info, format!("Running {}...", query.label()));
                Transition::Effect(Effect::Query { id, query })
            }
        }
    }

    fn activate_action(&mut self, kind: ActionKind) -> Transition {
        debug_assert!(!self.host.is_active(), "keys reach submenus only when no action is active");
        match self.host.activate(kind) {
            Ok(()) => {
                info!(?kind, "action activated");
                self.pending_query = None;
                self.status.clear_message();
                self.set_focus(FocusZone::ActionUi);
                Transition::Effect(Effect::LoadChangedFiles)
            }
            Err(err) => {
                warn!(%err, "activation rejected");
                Transition::Handled
            }
        }
    }

    /// Completion handling after the host unmounted, run once per surface.
    fn action_finished(&mut self) {
        self.set_focus(FocusZone::Menu);
        self.pending_query = None;
        self.status.reset();
    }

    fn set_focus(&mut self, zone: FocusZone) {
        if zone == FocusZone::ActionUi && !self.host.is_active() {
            debug_assert!(false, "ActionUi requires an active host");
            return;
        }
        if zone == FocusZone::Submenu && self.submenu.is_none() {
            return;
        }
        if self.focus != zone {
            debug!(from = ?self.focus, to = ?zone, "focus changed");
        }
        self.focus = zone;
    }

    // ------------------------------------------------------------------------
    // Background events
    // ------------------------------------------------------------------------

    /// Apply the result of an external call or a resize.
    pub fn handle_background_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(_) => {
                debug_assert!(false, "keys go through on_key");
            }
            AppEvent::Resize { width, height } => self.on_resize(width, height),
            AppEvent::ChangedFiles(result) => {
                if !self.host.is_active() {
                    debug!("dropping changed-file listing for an unmounted form");
                    return;
                }
                match result {
                    Ok(files) => {
                        debug!(count = files.len(), "changed files loaded");
                        self.host.files_loaded(files);
                    }
                    Err(e) => {
                        warn!(error = %e, "listing changed files failed");
                        self.host.files_loaded(Vec::new());
                        self.status
                            .report(Severity::Error, format!("Error getting changed files: {}", e));
                    }
                }
            }
            AppEvent::CommitFinished(result) => match result {
                Ok(()) => {
                    if self.host.cancel() {
                        info!("commit successful");
                        self.action_finished();
                        self.status.report(Severity::Success, COMMIT_SUCCESSFUL);
                    }
                }
                Err(failure) => {
                    warn!(%failure, "commit failed");
                    self.host.commit_failed();
                    self.status.report(Severity::Error, failure.to_string());
                }
            },
            AppEvent::QueryFinished { id, query, result } => {
                if self.pending_query != Some(id) {
                    debug!(id, query = query.label(), "dropping superseded query output");
                    return;
                }
                self.pending_query = None;
                self.show_query_result(query, result);
            }
        }
    }

    fn show_query_result(&mut self, query: GitQuery, result: Result<String, String>) {
        match result {
            Ok(output) if output.trim().is_empty() => {
                self.status.show_panel_text("(no output)");
                self.status.clear_message();
            }
            Ok(output) => {
                self.status.show_panel_text(output);
                self.status.clear_message();
            }
            Err(e) => {
                warn!(query = query.label(), error = %e, "query failed");
                self.status.show_panel_text(format!("Error: {}", e));
                self.status
                    .report(Severity::Error, format!("{} failed", query.label()));
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
