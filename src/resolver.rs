//! User-data directory resolution.
//!
//! Sources are tried in priority order: `--user-path` override, the local
//! `startup.ini`, then the platform's default discovery. The chosen base gets
//! `current` appended once. The result is memoized on the session.

use anyhow::Result;
use log::{debug, error, warn};
use std::path::{Path, PathBuf};

use crate::config::{expand_env_vars, read_ini};
use crate::constants::{
    CURRENT_BUILD_SEGMENT, STARTUP_FILESYSTEM_SECTION, STARTUP_INI, STARTUP_USER_PATH_KEY,
};
use crate::session::LauncherSession;
use crate::version::{check_version, major_minor};

// ============================================================================
// Sources
// ============================================================================

/// The explicit override, if it exists on disk.
fn override_path(user_path: Option<&Path>) -> Option<PathBuf> {
    let path = user_path?;
    if path.exists() {
        debug!("Using custom user folder path: {}", path.display());
        Some(path.to_path_buf())
    } else {
        warn!(
            "Invalid or non-existent path ({}) specified using --user-path, skipping",
            path.display()
        );
        None
    }
}

/// Expand a path read from a config file and keep it only if it exists.
pub(crate) fn accept_config_path(source: &str, raw: &str) -> Option<PathBuf> {
    if raw.is_empty() {
        debug!("{} does not declare a user folder", source);
        return None;
    }
    let expanded = PathBuf::from(expand_env_vars(raw));
    if expanded.exists() {
        debug!(
            "Using custom user folder path from {}: {}",
            source,
            expanded.display()
        );
        Some(expanded)
    } else {
        warn!(
            "Found custom user folder path ({}) in {} but it doesn't exist, skipping",
            expanded.display(),
            source
        );
        None
    }
}

/// `[filesystem] UserPath` from the startup config beside the installation.
fn startup_ini_path(install_dir: &Path) -> Option<PathBuf> {
    let ini_path = install_dir.join(STARTUP_INI);
    if !ini_path.exists() {
        debug!("no {} at {}", STARTUP_INI, ini_path.display());
        return None;
    }

    let doc = read_ini(&ini_path);
    if doc.is_empty() {
        warn!("Failed to parse {}", STARTUP_INI);
        return None;
    }
    debug!("Successfully parsed {}", STARTUP_INI);

    let Some(raw) = doc.get(STARTUP_FILESYSTEM_SECTION, STARTUP_USER_PATH_KEY) else {
        debug!(
            "{} does not declare [{}] {}",
            STARTUP_INI, STARTUP_FILESYSTEM_SECTION, STARTUP_USER_PATH_KEY
        );
        return None;
    };
    accept_config_path(STARTUP_INI, raw)
}

/// Log the installed game's `major.minor` version. Informational only.
fn log_game_version(install_dir: &Path) {
    match check_version(install_dir) {
        Ok(version) => debug!("game version {} ({})", major_minor(&version), version),
        Err(e) => debug!("game version unavailable: {:#}", e),
    }
}

// ============================================================================
// Resolution
// ============================================================================

impl LauncherSession {
    /// Resolve the user-data directory for the active game build.
    ///
    /// Memoized: once a path is produced it is returned unchanged for the
    /// rest of the run. Fails only when the platform cannot provide a root
    /// it requires (local app-data on Windows).
    pub fn resolve_user_path(&self) -> Result<PathBuf> {
        if let Some(path) = self.user_path.get() {
            return Ok(path.clone());
        }

        let base = match override_path(self.options.user_path.as_deref())
            .or_else(|| startup_ini_path(&self.install_dir))
        {
            Some(path) => path,
            None => {
                let base = self.platform.default_user_base(&self.host)?;
                if base.degraded {
                    warn!(
                        "Could not find existing BeamNG user path, using default: {}",
                        base.path.display()
                    );
                }
                base.path
            }
        };

        log_game_version(&self.install_dir);

        let resolved = base.join(CURRENT_BUILD_SEGMENT);
        debug!("resolved user folder: {}", resolved.display());
        Ok(self.user_path.get_or_init(|| resolved).clone())
    }

    /// Resolve the user-data directory, logging a failure once at error level.
    ///
    /// `None` means the run cannot continue.
    pub fn resolve_or_report(&self) -> Option<PathBuf> {
        match self.resolve_user_path() {
            Ok(path) => Some(path),
            Err(e) => {
                error!("{:#}", e);
                None
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
