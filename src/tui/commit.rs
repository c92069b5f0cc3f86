//! Action host and the built-in commit form.
//!
//! The host mounts at most one interactive surface in the action panel.
//! While mounted, it receives every key; the focus controller only reacts
//! to what the host hands back. Selection and message live inside the
//! form and are dropped when it unmounts.

use std::collections::BTreeMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::{Input, Key, TextArea};

use super::state::Effect;

pub const NO_FILES_SELECTED: &str = "No files selected to commit.";
pub const EMPTY_MESSAGE: &str = "Commit message cannot be empty.";
pub const COMMIT_SUCCESSFUL: &str = "Commit successful.";

// ============================================================================
// HOST
// ============================================================================

/// Surfaces the host knows how to mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Commit,
}

/// Activation refused because a surface is already mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationError {
    AlreadyActive,
}

impl fmt::Display for ActivationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivationError::AlreadyActive => write!(f, "an action is already active"),
        }
    }
}

impl std::error::Error for ActivationError {}

/// What the host did with a key.
#[derive(Debug, PartialEq)]
pub enum HostResponse {
    /// Swallowed, possibly changing the surface's own state.
    Consumed,
    /// The surface asked to close. It is already unmounted.
    Cancelled,
    /// Rejected locally; the text goes to the status reporter.
    Rejected(&'static str),
    /// An external call must start.
    Effect(Effect),
}

/// Swappable region in the action panel.
#[derive(Debug, Default)]
pub struct ActionHost {
    surface: Option<CommitForm>,
}

impl ActionHost {
    /// Mount a fresh surface. Fails without side effects if one is mounted.
    pub fn activate(&mut self, kind: ActionKind) -> Result<(), ActivationError> {
        if self.surface.is_some() {
            return Err(ActivationError::AlreadyActive);
        }
        self.surface = Some(match kind {
            ActionKind::Commit => CommitForm::new(),
        });
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.surface.is_some()
    }

    /// True while an external call for the surface is in flight.
    pub fn is_busy(&self) -> bool {
        self.surface.as_ref().is_some_and(CommitForm::is_busy)
    }

    /// Unmount. Returns whether anything was mounted, so the caller runs
    /// its completion handling exactly once. No-op when inactive.
    pub fn cancel(&mut self) -> bool {
        self.surface.take().is_some()
    }

    pub fn form(&self) -> Option<&CommitForm> {
        self.surface.as_ref()
    }

    /// Route a key to the mounted surface.
    pub fn handle_key(&mut self, key: KeyEvent) -> HostResponse {
        let Some(form) = self.surface.as_mut() else {
            return HostResponse::Consumed;
        };
        match form.handle_key(key) {
            FormResponse::Consumed => HostResponse::Consumed,
            FormResponse::Rejected(msg) => HostResponse::Rejected(msg),
            FormResponse::Submit { paths, message } => {
                HostResponse::Effect(Effect::Commit { paths, message })
            }
            FormResponse::Cancel => {
                self.cancel();
                HostResponse::Cancelled
            }
        }
    }

    /// Deliver the changed-path listing. Ignored when nothing is mounted.
    pub fn files_loaded(&mut self, files: Vec<String>) {
        if let Some(form) = self.surface.as_mut() {
            form.set_files(files);
        }
    }

    /// Commit call failed; the form stays mounted for retry or cancel.
    pub fn commit_failed(&mut self) {
        if let Some(form) = self.surface.as_mut() {
            form.phase = FormPhase::Ready;
        }
    }
}

// ============================================================================
// COMMIT FORM
// ============================================================================

/// Which control of the form has the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Files,
    Message,
    CommitButton,
    CancelButton,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Files => FormField::Message,
            FormField::Message => FormField::CommitButton,
            FormField::CommitButton => FormField::CancelButton,
            FormField::CancelButton => FormField::Files,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormField::Files => FormField::CancelButton,
            FormField::Message => FormField::Files,
            FormField::CommitButton => FormField::Message,
            FormField::CancelButton => FormField::CommitButton,
        }
    }
}

/// Busy phases swallow every key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Loading,
    Ready,
    Committing,
}

#[derive(Debug, PartialEq)]
enum FormResponse {
    Consumed,
    Cancel,
    Rejected(&'static str),
    Submit { paths: Vec<String>, message: String },
}

/// File selection plus commit message.
#[derive(Debug, Clone)]
pub struct CommitForm {
    files: Vec<String>,
    cursor: usize,
    /// List index -> filename for every checked row.
    selected: BTreeMap<usize, String>,
    message: TextArea<'static>,
    field: FormField,
    phase: FormPhase,
}

impl PartialEq for CommitForm {
    fn eq(&self, other: &Self) -> bool {
        self.files == other.files
            && self.cursor == other.cursor
            && self.selected == other.selected
            && self.message.lines() == other.message.lines()
            && self.message.cursor() == other.message.cursor()
            && self.field == other.field
            && self.phase == other.phase
    }
}

impl Eq for CommitForm {}

impl CommitForm {
    /// Empty form waiting for the changed-path listing.
    pub fn new() -> Self {
        CommitForm {
            files: Vec::new(),
            cursor: 0,
            selected: BTreeMap::new(),
            message: TextArea::default(),
            field: FormField::Files,
            phase: FormPhase::Loading,
        }
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains_key(&index)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Message text, lines joined with `\n`.
    pub fn message(&self) -> String {
        self.message.lines().join("\n")
    }

    /// (row, column) of the editing cursor in the message.
    pub fn message_cursor(&self) -> (usize, usize) {
        self.message.cursor()
    }

    pub fn field(&self) -> FormField {
        self.field
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase != FormPhase::Ready
    }

    fn set_files(&mut self, files: Vec<String>) {
        self.files = files;
        self.cursor = 0;
        self.selected.clear();
        self.phase = FormPhase::Ready;
    }

    /// Flip selection of row `index`. Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        let Some(name) = self.files.get(index) else {
            return;
        };
        if self.selected.remove(&index).is_none() {
            self.selected.insert(index, name.clone());
        }
    }

    /// Validate and produce the commit request.
    fn submit(&mut self) -> FormResponse {
        if self.selected.is_empty() {
            return FormResponse::Rejected(NO_FILES_SELECTED);
        }
        let message = self.message();
        let message = message.trim();
        if message.is_empty() {
            return FormResponse::Rejected(EMPTY_MESSAGE);
        }
        let message = message.to_string();
        self.phase = FormPhase::Committing;
        FormResponse::Submit {
            paths: self.selected.values().cloned().collect(),
            message,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> FormResponse {
        if self.is_busy() {
            return FormResponse::Consumed;
        }

        match key.code {
            KeyCode::Esc => return FormResponse::Cancel,
            KeyCode::Tab => {
                self.field = self.field.next();
                return FormResponse::Consumed;
            }
            KeyCode::BackTab => {
                self.field = self.field.prev();
                return FormResponse::Consumed;
            }
            _ => {}
        }

        match self.field {
            FormField::Files => self.handle_files_key(key),
            FormField::Message => self.handle_message_key(key),
            FormField::CommitButton => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.submit(),
                _ => FormResponse::Consumed,
            },
            FormField::CancelButton => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => FormResponse::Cancel,
                _ => FormResponse::Consumed,
            },
        }
    }

    fn handle_files_key(&mut self, key: KeyEvent) -> FormResponse {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.files.len();
                self.cursor = if len == 0 { 0 } else { (self.cursor + 1).min(len - 1) };
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle(self.cursor),
            _ => {}
        }
        FormResponse::Consumed
    }

    fn handle_message_key(&mut self, key: KeyEvent) -> FormResponse {
        if key.code == KeyCode::Enter {
            return self.submit();
        }
        if let Some(input) = editor_input(key) {
            self.message.input(input);
        }
        FormResponse::Consumed
    }
}

/// Translate a key for the single-line message editor.
///
/// Only printable characters and line-editing keys pass through, so the
/// message never gains a newline.
fn editor_input(key: KeyEvent) -> Option<Input> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    let key = match key.code {
        KeyCode::Char(c) if !ctrl && !alt => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        _ => return None,
    };
    Some(Input {
        key,
        ctrl,
        alt,
        shift,
    })
}

impl Default for CommitForm {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// COMMIT FAILURE
// ============================================================================

/// Which half of stage-then-commit failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitFailure {
    Stage(String),
    Commit(String),
}

impl fmt::Display for CommitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitFailure::Stage(e) => write!(f, "Error staging files: {}", e),
            CommitFailure::Commit(e) => write!(f, "Error committing: {}", e),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
