//! BeamNG.drive game launcher library.
//!
//! Resolves the game's per-user data directory and starts the game binary
//! for the current host, waiting on it from a background thread.
//!
//! # Architecture
//!
//! ```text
//! main -> LauncherSession::resolve_user_path (memoized)
//!      -> orchestrator::start_game --thread--> process::run_to_exit -> exit(2)
//!                                                  |
//!                                                  +-> GamePlatform (windows | linux | macos-wine)
//! ```
//!
//! # Modules
//!
//! - [`config`]: section/key=value config reader and env-var expansion
//! - [`constants`]: file names, layout segments, and lifecycle timings
//! - [`logging`]: timestamped `env_logger` setup
//! - [`orchestrator`]: launch decision and background game thread
//! - [`platform`]: per-OS discovery and spawn strategies
//! - [`probe`]: JSON setup report
//! - [`process`]: game spawn, wait, and launcher termination
//! - [`resolver`]: user-data directory resolution
//! - [`session`]: per-run launcher state
//! - [`version`]: installed game version probe

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

pub mod config;
pub mod constants;
pub mod logging;
pub mod orchestrator;
pub mod platform;
pub mod probe;
pub mod process;
pub mod resolver;
pub mod session;
pub mod version;

// ============================================================================
// CLI Types (shared between main.rs and modules)
// ============================================================================

/// BeamNG.drive launcher arguments.
#[derive(Parser, Debug)]
#[command(name = "bng_launcher", version, about = "Locate and launch BeamNG.drive")]
pub struct Args {
    /// Game installation directory (defaults to the current directory)
    #[arg(long, value_name = "PATH")]
    pub game_dir: Option<PathBuf>,

    /// User folder to use instead of the discovered one
    #[arg(long, value_name = "PATH")]
    pub user_path: Option<PathBuf>,

    /// Resolve paths without starting the game
    #[arg(long)]
    pub no_launch: bool,

    /// Launcher mode
    #[arg(long, value_enum, default_value_t = Mode::Launch)]
    pub mode: Mode,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Arguments forwarded verbatim to the game
    #[arg(last = true, value_name = "GAME_ARGS")]
    pub game_args: Vec<String>,
}

impl Args {
    /// Installation root, falling back to the working directory.
    pub fn game_dir(&self) -> Result<PathBuf> {
        match &self.game_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("failed to read current directory"),
        }
    }

    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            user_path: self.user_path.clone(),
            game_args: self.game_args.clone(),
            no_launch: self.no_launch,
        }
    }
}

/// Launcher operation mode.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum Mode {
    /// Resolve paths and print a JSON report
    Probe,
    /// Resolve paths and start the game
    Launch,
}

pub use orchestrator::{start_game, GameTask};
pub use platform::{GamePlatform, HostEnv};
pub use process::{launch, LaunchOutcome};
pub use session::{LaunchOptions, LauncherSession};
