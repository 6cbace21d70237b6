use anyhow::Result;
use std::path::{Path, PathBuf};

use super::{forward_args, CommandSpec, DefaultBase, GamePlatform, HostEnv};
use crate::constants::{USER_DATA_DIR, VENDOR_DIR};

/// Native Linux build; only the Steam layout is supported.
#[derive(Debug, Default, Clone, Copy)]
pub struct Linux;

impl GamePlatform for Linux {
    fn name(&self) -> &'static str {
        "linux"
    }

    fn default_user_base(&self, host: &HostEnv) -> Result<DefaultBase> {
        Ok(DefaultBase {
            path: host
                .home
                .join(".local/share")
                .join(VENDOR_DIR)
                .join(USER_DATA_DIR),
            degraded: false,
        })
    }

    fn locate_executable(&self, root: &Path) -> Result<PathBuf> {
        Ok(root.join("BinLinux").join("BeamNG.drive.x64"))
    }

    fn build_command(&self, exe: &Path, args: &[String]) -> CommandSpec {
        CommandSpec {
            program: exe.to_path_buf(),
            args: forward_args(Vec::new(), args),
            cwd: None,
        }
    }
}
