//! TUI effects boundary: event loop, terminal lifecycle, git workers.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//!
//! Architecture: producer threads feed a single mpsc channel.
//! - Terminal reader thread: forwards key presses and resizes
//! - Worker threads: one per effect, each sends exactly one result
//! The event loop consumes from the channel, dispatching to pure handlers.

use std::io;
use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info};

use crate::git::GitCli;
use crate::types::ShellConfig;

use super::commit::CommitFailure;
use super::state::{App, AppEvent, Effect, Transition};
use super::view::render;

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    Terminal::new(backend)
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// TERMINAL READER
// ============================================================================

/// Translate a raw terminal event. Key releases and repeats are dropped
/// so each keystroke is routed once.
fn translate_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Resize(width, height) => Some(AppEvent::Resize { width, height }),
        _ => None,
    }
}

fn spawn_terminal_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(raw) => {
                    let Some(app_event) = translate_event(raw) else {
                        continue;
                    };
                    if tx.send(app_event).is_err() {
                        break; // receiver dropped, TUI is shutting down
                    }
                }
                Err(_) => break,
            }
        }
    });
}

// ============================================================================
// GIT WORKERS
// ============================================================================

/// Perform one effect synchronously and package its result.
fn perform_effect(effect: Effect, git: &GitCli) -> AppEvent {
    match effect {
        Effect::LoadChangedFiles => {
            AppEvent::ChangedFiles(git.list_changed_paths().map_err(|e| e.to_string()))
        }
        Effect::Commit { paths, message } => {
            let result = git
                .stage(&paths)
                .map_err(|e| CommitFailure::Stage(e.to_string()))
                .and_then(|()| {
                    git.commit(&message)
                        .map_err(|e| CommitFailure::Commit(e.to_string()))
                });
            AppEvent::CommitFinished(result)
        }
        Effect::Query { id, query } => AppEvent::QueryFinished {
            id,
            query,
            result: git.query(query).map_err(|e| e.to_string()),
        },
    }
}

/// Run an effect off the event loop. The result arrives on `tx`.
fn spawn_effect(effect: Effect, git: GitCli, tx: mpsc::Sender<AppEvent>) {
    debug!(?effect, "spawning worker");
    thread::spawn(move || {
        let event = perform_effect(effect, &git);
        // Best-effort: the loop may already have exited
        let _ = tx.send(event);
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the shell until the user quits.
pub fn run(config: &ShellConfig) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let mut app = App::from_config(config);
    let git = GitCli::from_config(config);

    let size = terminal.size()?;
    app.on_resize(size.width, size.height);
    info!(width = size.width, height = size.height, "shell started");

    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_terminal_reader(tx.clone());

    loop {
        terminal.draw(|frame| {
            render(&app, frame);
        })?;

        if app.should_quit {
            break;
        }

        // Block on next event from any producer
        let event = match rx.recv() {
            Ok(e) => e,
            Err(_) => break,
        };

        match event {
            AppEvent::Key(key) => match app.on_key(key) {
                Transition::Ignored | Transition::Handled => {}
                Transition::Quit => app.should_quit = true,
                Transition::Effect(effect) => spawn_effect(effect, git.clone(), tx.clone()),
            },
            background_event => app.handle_background_event(background_event),
        }
    }

    info!("shell exiting");
    restore_terminal()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GitQuery;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn missing_git() -> GitCli {
        GitCli::new("gitix-test-no-such-program", None)
    }

    #[test]
    fn key_presses_are_forwarded() {
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(matches!(
            translate_event(Event::Key(key)),
            Some(AppEvent::Key(k)) if k.code == KeyCode::Char('q')
        ));
    }

    #[test]
    fn key_releases_are_dropped() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Enter,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert!(translate_event(Event::Key(release)).is_none());
    }

    #[test]
    fn resizes_are_forwarded() {
        assert!(matches!(
            translate_event(Event::Resize(120, 40)),
            Some(AppEvent::Resize { width: 120, height: 40 })
        ));
        assert!(translate_event(Event::FocusGained).is_none());
    }

    #[test]
    fn listing_failure_becomes_error_event() {
        let event = perform_effect(Effect::LoadChangedFiles, &missing_git());
        assert!(matches!(event, AppEvent::ChangedFiles(Err(_))));
    }

    #[test]
    fn commit_stops_at_staging_failure() {
        let effect = Effect::Commit {
            paths: vec!["a.rs".into()],
            message: "msg".into(),
        };
        let event = perform_effect(effect, &missing_git());
        assert!(matches!(
            event,
            AppEvent::CommitFinished(Err(CommitFailure::Stage(_)))
        ));
    }

    #[test]
    fn query_result_keeps_its_query() {
        let effect = Effect::Query {
            id: 7,
            query: GitQuery::ShowBranches,
        };
        let event = perform_effect(effect, &missing_git());
        assert!(matches!(
            event,
            AppEvent::QueryFinished {
                id: 7,
                query: GitQuery::ShowBranches,
                result: Err(_)
            }
        ));
    }

    #[test]
    fn worker_sends_exactly_one_event() {
        let (tx, rx) = mpsc::channel();
        spawn_effect(Effect::LoadChangedFiles, missing_git(), tx);
        assert!(matches!(rx.recv(), Ok(AppEvent::ChangedFiles(Err(_)))));
        assert!(rx.recv().is_err());
    }
}
