use anyhow::{anyhow, Result};
use log::{debug, info};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::{forward_args, CommandSpec, DefaultBase, GamePlatform, HostEnv};

/// Runtime binary looked up on `PATH` when no fixed location exists.
const WINE_COMMAND: &str = "wine64";

/// Fixed Wine install locations, in priority order.
const WINE_LOCATIONS: [&str; 4] = [
    "/usr/local/bin/wine64",
    "/usr/local/bin/wine",
    "/opt/homebrew/bin/wine64",
    "/opt/homebrew/bin/wine",
];

/// Windows build on macOS, run through Wine, CrossOver or Whisky.
#[derive(Debug, Clone)]
pub struct MacWine {
    pub runtime_candidates: Vec<PathBuf>,
    pub runtime_command: String,
}

impl Default for MacWine {
    fn default() -> Self {
        MacWine {
            runtime_candidates: WINE_LOCATIONS.iter().map(PathBuf::from).collect(),
            runtime_command: WINE_COMMAND.to_string(),
        }
    }
}

impl MacWine {
    /// Candidate user-data directories inside known prefixes and bottles, in priority order.
    pub fn prefix_candidates(host: &HostEnv) -> Vec<PathBuf> {
        let home = &host.home;
        let wine_user = home
            .join(".wine/drive_c/users")
            .join(&host.user_name);
        let crossover = home.join("Library/Application Support/CrossOver/Bottles");
        let whisky = home.join("Library/Containers/com.isaacmarovitz.Whisky/Bottles");

        let legacy = "Local Settings/Application Data/BeamNG/BeamNG.drive";
        let modern = "AppData/Local/BeamNG/BeamNG.drive";
        let crossover_user = "drive_c/users/crossover";

        vec![
            wine_user.join(legacy),
            wine_user.join(modern),
            crossover.join("Steam").join(crossover_user).join(legacy),
            crossover.join("Steam").join(crossover_user).join(modern),
            crossover.join("BeamNG").join(crossover_user).join(legacy),
            crossover.join("BeamNG").join(crossover_user).join(modern),
            whisky.join("BeamNG").join(crossover_user).join(modern),
            home.join(".local/share/BeamNG/BeamNG.drive"),
        ]
    }

    /// First existing fixed runtime location, else `PATH` lookup, else the bare command name.
    pub fn find_runtime(&self) -> PathBuf {
        if let Some(found) = self.runtime_candidates.iter().find(|p| p.exists()) {
            return found.clone();
        }
        match which::which(&self.runtime_command) {
            Ok(path) => path,
            Err(_) => {
                debug!(
                    "{} not found in fixed locations or PATH; relying on spawn-time lookup",
                    self.runtime_command
                );
                PathBuf::from(&self.runtime_command)
            }
        }
    }
}

impl GamePlatform for MacWine {
    fn name(&self) -> &'static str {
        "macos-wine"
    }

    fn default_user_base(&self, host: &HostEnv) -> Result<DefaultBase> {
        let candidates = Self::prefix_candidates(host);
        if let Some(found) = candidates.iter().find(|p| p.exists()) {
            info!("Found BeamNG user path: {}", found.display());
            return Ok(DefaultBase {
                path: found.clone(),
                degraded: false,
            });
        }

        let fallback = candidates
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("no compatibility-layer candidates"))?;
        Ok(DefaultBase {
            path: fallback,
            degraded: true,
        })
    }

    fn locate_executable(&self, root: &Path) -> Result<PathBuf> {
        let primary = root.join("Bin64").join("BeamNG.drive.x64.exe");
        if primary.exists() {
            return Ok(primary);
        }
        let alternative = root.join("BeamNG.drive.exe");
        if alternative.exists() {
            return Ok(alternative);
        }
        Err(anyhow!(
            "Could not find BeamNG.drive executable in: {}",
            root.display()
        ))
    }

    fn build_command(&self, exe: &Path, args: &[String]) -> CommandSpec {
        let runtime = self.find_runtime();
        info!("Launching with: {} {}", runtime.display(), exe.display());
        CommandSpec {
            program: runtime,
            args: forward_args(vec![OsString::from(exe)], args),
            cwd: None,
        }
    }

    fn spawn_hint(&self) -> Option<&'static str> {
        Some("Make sure Wine or CrossOver is installed and accessible.")
    }
}
