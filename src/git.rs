//! External action executor: a thin wrapper over the git command line.
//!
//! Every call is synchronous and returns either success (with optional
//! output) or a human-readable error. The TUI never interprets error
//! content; it only prefixes and displays it. Calls are made from worker
//! threads, never from the event loop.
//!
//! Structure:
//! - Pure functions: porcelain parsing
//! - Effect functions: process spawning

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Output};

use tracing::debug;

use crate::types::{GitQuery, ShellConfig};

/// Failure of an external git call.
#[derive(Debug)]
pub enum GitError {
    /// The program could not be started.
    Spawn { program: String, source: io::Error },
    /// The program ran but exited unsuccessfully.
    Failed { code: Option<i32>, stderr: String },
}

impl fmt::Display for GitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitError::Spawn { program, source } => {
                write!(f, "could not run {}: {}", program, source)
            }
            GitError::Failed { code, stderr } => {
                let detail = stderr.trim();
                match (code, detail.is_empty()) {
                    (Some(c), true) => write!(f, "exit status {}", c),
                    (Some(c), false) => write!(f, "exit status {}: {}", c, detail),
                    (None, true) => write!(f, "terminated by signal"),
                    (None, false) => write!(f, "terminated by signal: {}", detail),
                }
            }
        }
    }
}

impl std::error::Error for GitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GitError::Spawn { source, .. } => Some(source),
            GitError::Failed { .. } => None,
        }
    }
}

// ============================================================================
// PURE FUNCTIONS (Parsing)
// ============================================================================

/// Extract changed paths from `git status --porcelain -z` output.
///
/// Entries are NUL-terminated `XY path` records with paths left unquoted.
/// A rename or copy record is followed by one extra field holding the
/// source path, which is skipped so the new path is the one reported.
pub fn parse_porcelain(output: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut fields = output.split('\0');

    while let Some(entry) = fields.next() {
        let Some(path) = entry.get(3..).filter(|p| !p.is_empty()) else {
            continue;
        };
        let status = &entry.as_bytes()[..2];
        if status.iter().any(|b| matches!(b, b'R' | b'C')) {
            fields.next();
        }
        paths.push(path.to_string());
    }
    paths
}

// ============================================================================
// EXECUTOR
// ============================================================================

/// Runs git porcelain commands in a fixed working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    workdir: Option<PathBuf>,
}

impl GitCli {
    pub fn new(program: impl Into<String>, workdir: Option<PathBuf>) -> Self {
        GitCli {
            program: program.into(),
            workdir,
        }
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self::new(config.git_program.clone(), config.repo_dir.clone())
    }

    /// Paths with staged or unstaged changes, untracked files included.
    pub fn list_changed_paths(&self) -> Result<Vec<String>, GitError> {
        let output = self.run(&["status", "--porcelain", "-z"])?;
        Ok(parse_porcelain(&output))
    }

    /// Stage the given paths.
    pub fn stage(&self, paths: &[String]) -> Result<(), GitError> {
        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.run(&args).map(|_| ())
    }

    /// Commit whatever is staged.
    pub fn commit(&self, message: &str) -> Result<(), GitError> {
        self.run(&["commit", "-m", message]).map(|_| ())
    }

    /// Run a read-only query and return its stdout.
    pub fn query(&self, query: GitQuery) -> Result<String, GitError> {
        self.run(query.args())
    }

    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        debug!(program = %self.program, ?args, "running external command");

        let output = cmd.output().map_err(|source| GitError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        into_stdout(output)
    }
}

fn into_stdout(output: Output) -> Result<String, GitError> {
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        Err(GitError::Failed {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
