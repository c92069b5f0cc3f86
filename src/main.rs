//! gitix CLI
//!
//! Launches the interactive shell. All flags are optional.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gitix::config::{default_log_path, resolve_config};
use gitix::tui;
use gitix::types::ShellConfig;

const LOG_ENV: &str = "GITIX_LOG";

#[derive(Parser)]
#[command(name = "gitix")]
#[command(about = "A keyboard-driven terminal shell for everyday git tasks")]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/gitix/config.json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Run git in this directory instead of the current one
    #[arg(short = 'C', long = "dir", value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Write logs here (default: <data dir>/gitix/gitix.log)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Flags win over the config file.
    fn apply(self, mut config: ShellConfig) -> ShellConfig {
        if let Some(dir) = self.dir {
            config.repo_dir = Some(dir);
        }
        if let Some(log_file) = self.log_file {
            config.log_file = Some(log_file);
        }
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = resolve_config(cli.config.as_deref()).map_err(|e| e.to_string())?;
    let config = cli.apply(config);

    let log_path = config.log_file.clone().unwrap_or_else(default_log_path);
    // The terminal belongs to the TUI; a log file we can't open means no logs.
    if let Ok(file) = open_log_file(&log_path) {
        init_logging(file);
    }

    tracing::info!(?config, "starting");
    tui::run::run(&config).map_err(|e| e.to_string())
}

// ============================================================================
// LOGGING
// ============================================================================

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn init_logging(file: File) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
