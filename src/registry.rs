//! Menu registry: the static tree of one main menu and its submenus.
//!
//! Built once at startup and never mutated. Lookups by name either hit a
//! submenu or miss; a miss means "nothing to show", not an error.

use crate::types::{EntryAction, GitQuery, MenuEntry, SubmenuDefinition};

pub const SAVE_CHANGES: &str = "Save Changes";
pub const CHECK_FILES: &str = "Check Files";
pub const BRANCHES: &str = "Branches (Work Areas)";
pub const SYNC_CHANGES: &str = "Sync Changes";
pub const SETTINGS: &str = "Settings";
pub const EXIT: &str = "Exit";

const SAVE_CHANGES_HELP: &str = "Save Changes help:

\"Save Now\" means to save your current work safely.
Example: You edited files and want to save a snapshot.

\"Fix Last Save\" lets you change your last saved snapshot.
Example: You forgot to add a file, so you fix the last save.

\"Undo Changes\" lets you discard changes you made since last save.
Example: You made a mistake and want to go back to the last saved state.

\"View History\" shows all your saved snapshots.

\"Search History\" helps find a saved snapshot by keyword.";

const CHECK_FILES_HELP: &str = "Check Files help:

\"Show Changes\" lets you see what files have changed since last save.
Example: You want to know which files you edited.

\"View File Differences\" shows line-by-line changes in a file.
Example: See exactly what you changed in a file.";

const BRANCHES_HELP: &str = "Branches (Work Areas) help:

\"Show Branches\" lists all versions of your work.

\"New Branch\" starts a new version to work on.
Example: You want to try a new feature without changing main work.

\"Remove Branch\" deletes a version you no longer need.

\"Merge Branch\" combines changes from one version into another.
Example: You finished a feature in a separate branch and want to add it to your main work.

\"Rename Branch\" lets you rename a branch for clarity.

A branch is like a separate workspace for your changes.";

const SYNC_CHANGES_HELP: &str = "Sync Changes help:

\"Send Updates\" sends your saved work to the central place.

\"Get Updates\" gets work saved by others.

\"Check for Updates\" checks if others have new work.

\"Sync All\" sends your work and gets others' work to keep up to date.";

const SETTINGS_HELP: &str = "Settings help:

\"Set Name\" sets your name for saved work.

\"Set Email\" sets your email for saved work.

\"Other Options\" lets you change extra settings.";

/// The full menu tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRegistry {
    main: Vec<MenuEntry>,
    submenus: Vec<SubmenuDefinition>,
}

impl MenuRegistry {
    /// The built-in menu tree.
    pub fn builtin() -> Self {
        use EntryAction::{Commit, Exit, Help, Query};

        let main = vec![
            MenuEntry::new(SAVE_CHANGES, "Save your work safely", 'c', None),
            MenuEntry::new(CHECK_FILES, "See what changed in your files", 's', None),
            MenuEntry::new(BRANCHES, "Manage different versions of your work", 'b', None),
            MenuEntry::new(SYNC_CHANGES, "Keep your work up to date", 'y', None),
            MenuEntry::new(SETTINGS, "Set your name and options", 'o', None),
            MenuEntry::new(EXIT, "Close the program", 'q', Some(Exit)),
        ];

        let submenus = vec![
            SubmenuDefinition {
                name: SAVE_CHANGES,
                entries: vec![
                    MenuEntry::new("Save Now", "Save your current work", 'n', Some(Commit)),
                    MenuEntry::new("Fix Last Save", "Change your last saved work", 'a', None),
                    MenuEntry::new("Undo Changes", "Discard changes since last save", 'u', None),
                    MenuEntry::new(
                        "View History",
                        "See past saved work",
                        'v',
                        Some(Query(GitQuery::ViewHistory)),
                    ),
                    MenuEntry::new("Search History", "Find saved work by keyword", 's', None),
                    MenuEntry::new("Help", "What is saving?", 'h', Some(Help)),
                ],
                help_text: SAVE_CHANGES_HELP,
            },
            SubmenuDefinition {
                name: CHECK_FILES,
                entries: vec![
                    MenuEntry::new(
                        "Show Changes",
                        "See what files changed",
                        's',
                        Some(Query(GitQuery::ShowChanges)),
                    ),
                    MenuEntry::new(
                        "View File Differences",
                        "See line-by-line changes",
                        'd',
                        Some(Query(GitQuery::ViewDiff)),
                    ),
                    MenuEntry::new("Help", "What is checking files?", 'h', Some(Help)),
                ],
                help_text: CHECK_FILES_HELP,
            },
            SubmenuDefinition {
                name: BRANCHES,
                entries: vec![
                    MenuEntry::new(
                        "Show Branches",
                        "See all versions of your work",
                        'l',
                        Some(Query(GitQuery::ShowBranches)),
                    ),
                    MenuEntry::new("New Branch", "Start a new version of your work", 'c', None),
                    MenuEntry::new("Remove Branch", "Delete a version of your work", 'd', None),
                    MenuEntry::new(
                        "Merge Branch",
                        "Combine changes from one version into another",
                        'm',
                        None,
                    ),
                    MenuEntry::new("Rename Branch", "Rename a branch", 'r', None),
                    MenuEntry::new("Help", "What is a branch?", 'h', Some(Help)),
                ],
                help_text: BRANCHES_HELP,
            },
            SubmenuDefinition {
                name: SYNC_CHANGES,
                entries: vec![
                    MenuEntry::new(
                        "Send Updates",
                        "Send your work to the central place",
                        'p',
                        None,
                    ),
                    MenuEntry::new("Get Updates", "Get work from others", 'l', None),
                    MenuEntry::new(
                        "Check for Updates",
                        "See if others have new work",
                        'f',
                        Some(Query(GitQuery::CheckForUpdates)),
                    ),
                    MenuEntry::new("Sync All", "Send and get updates", 's', None),
                    MenuEntry::new("Help", "What is syncing?", 'h', Some(Help)),
                ],
                help_text: SYNC_CHANGES_HELP,
            },
            SubmenuDefinition {
                name: SETTINGS,
                entries: vec![
                    MenuEntry::new("Set Name", "Your name for saved work", 'u', None),
                    MenuEntry::new("Set Email", "Your email for saved work", 'e', None),
                    MenuEntry::new("Other Options", "Extra settings", 'c', None),
                    MenuEntry::new("Help", "Settings help", 'h', Some(Help)),
                ],
                help_text: SETTINGS_HELP,
            },
        ];

        MenuRegistry { main, submenus }
    }

    /// Main menu entries, in display order.
    pub fn main_menu(&self) -> &[MenuEntry] {
        &self.main
    }

    /// Look up a submenu by name. `None` means nothing to show.
    pub fn lookup_submenu(&self, name: &str) -> Option<&SubmenuDefinition> {
        self.submenus.iter().find(|s| s.name == name)
    }

    /// Help text for a submenu, if registered.
    pub fn help_text(&self, name: &str) -> Option<&'static str> {
        self.lookup_submenu(name).map(|s| s.help_text)
    }
}

impl Default for MenuRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Index of the entry bound to `shortcut`, if any.
pub fn shortcut_index(entries: &[MenuEntry], shortcut: char) -> Option<usize> {
    entries.iter().position(|e| e.shortcut == shortcut)
}
