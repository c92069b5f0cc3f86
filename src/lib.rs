//! gitix: a keyboard-driven terminal shell over everyday git tasks.

pub mod config;
pub mod git;
pub mod layout;
pub mod registry;
pub mod tui;
pub mod types;
