//! Long-lived launcher state.
//!
//! One [`LauncherSession`] exists per launcher run. It owns the platform
//! strategy, the read-only options, the memoized user-data path and the
//! game's process id.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use crate::platform::{GamePlatform, HostEnv};

/// Options the launcher core consumes read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Explicit user-data directory override.
    pub user_path: Option<PathBuf>,
    /// Extra arguments forwarded verbatim to the game.
    pub game_args: Vec<String>,
    /// Resolve paths but never start the game.
    pub no_launch: bool,
}

pub struct LauncherSession {
    pub(crate) platform: Box<dyn GamePlatform>,
    pub(crate) host: HostEnv,
    pub(crate) install_dir: PathBuf,
    pub(crate) options: LaunchOptions,
    pub(crate) user_path: OnceLock<PathBuf>,
    game_pid: AtomicU32,
}

impl LauncherSession {
    pub fn new(
        platform: Box<dyn GamePlatform>,
        host: HostEnv,
        install_dir: PathBuf,
        options: LaunchOptions,
    ) -> Self {
        LauncherSession {
            platform,
            host,
            install_dir,
            options,
            user_path: OnceLock::new(),
            game_pid: AtomicU32::new(0),
        }
    }

    /// Session for the running host.
    pub fn for_host(install_dir: PathBuf, options: LaunchOptions) -> Self {
        Self::new(
            crate::platform::current(),
            HostEnv::detect(),
            install_dir,
            options,
        )
    }

    pub fn platform(&self) -> &dyn GamePlatform {
        self.platform.as_ref()
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    pub fn options(&self) -> &LaunchOptions {
        &self.options
    }

    /// Pid of the running game, or `None` before launch. Diagnostics only.
    pub fn game_pid(&self) -> Option<u32> {
        match self.game_pid.load(Ordering::SeqCst) {
            0 => None,
            pid => Some(pid),
        }
    }

    pub(crate) fn set_game_pid(&self, pid: u32) {
        self.game_pid.store(pid, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for LauncherSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LauncherSession")
            .field("platform", &self.platform.name())
            .field("install_dir", &self.install_dir)
            .field("user_path", &self.user_path.get())
            .field("game_pid", &self.game_pid())
            .finish()
    }
}
