use anyhow::{anyhow, Result};
use log::{debug, warn};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::{forward_args, CommandSpec, DefaultBase, GamePlatform, HostEnv};
use crate::config::read_ini;
use crate::constants::{USER_DATA_DIR, VENDOR_DIR, VENDOR_INI, VENDOR_USER_FOLDER_KEY};
use crate::resolver::accept_config_path;

/// Native Windows: app-data discovery through the vendor config.
#[derive(Debug, Default, Clone, Copy)]
pub struct Windows;

/// `userFolder` from the vendor config, if it names an existing directory.
fn vendor_user_folder(ini_path: &Path) -> Option<PathBuf> {
    if !ini_path.exists() {
        debug!("no {} at {}", VENDOR_INI, ini_path.display());
        return None;
    }

    let doc = read_ini(ini_path);
    if doc.is_empty() {
        warn!("Failed to parse {}", VENDOR_INI);
        return None;
    }
    debug!("Successfully parsed {}", VENDOR_INI);

    let Some(raw) = doc.global(VENDOR_USER_FOLDER_KEY) else {
        debug!("{} does not declare {}", VENDOR_INI, VENDOR_USER_FOLDER_KEY);
        return None;
    };
    accept_config_path(VENDOR_INI, raw.trim_start_matches([' ', '\t']))
}

impl GamePlatform for Windows {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn default_user_base(&self, host: &HostEnv) -> Result<DefaultBase> {
        let appdata = host
            .local_appdata
            .as_ref()
            .ok_or_else(|| anyhow!("Cannot get Local Appdata directory"))?;
        let vendor_root = appdata.join(VENDOR_DIR);

        let path = vendor_user_folder(&vendor_root.join(VENDOR_INI))
            .unwrap_or_else(|| vendor_root.join(USER_DATA_DIR));
        Ok(DefaultBase {
            path,
            degraded: false,
        })
    }

    fn locate_executable(&self, root: &Path) -> Result<PathBuf> {
        Ok(root.join("BeamNG.drive.exe"))
    }

    fn build_command(&self, exe: &Path, args: &[String]) -> CommandSpec {
        CommandSpec {
            program: exe.to_path_buf(),
            args: forward_args(Vec::<OsString>::new(), args),
            cwd: exe.parent().map(Path::to_path_buf),
        }
    }
}
