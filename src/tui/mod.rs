//! Interactive terminal shell.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (App, AppEvent, Transition, Effect)
//! - `update`: Pure focus-controller transitions
//! - `commit`: The action host and its commit form
//! - `status`: Feedback sink for the action panel and status bar
//! - `view`: Pure rendering
//! - `run`: Effects (terminal, threads, git workers)

pub mod commit;
pub mod run;
pub mod state;
pub mod status;
pub mod theme;
pub mod update;
pub mod view;
