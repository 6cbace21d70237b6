//! Per-OS launch strategies.
//!
//! Every supported host is a [`GamePlatform`] variant: where the user-data
//! directory lives by default, where the game binary sits inside the
//! installation, and how the spawn command is shaped. All variants compile
//! on every target; [`current`] is the only place that looks at `cfg!`.

use anyhow::Result;
use log::warn;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

mod linux;
mod macos;
mod windows;

pub use linux::Linux;
pub use macos::MacWine;
pub use windows::Windows;

// ============================================================================
// Host Environment
// ============================================================================

/// Facts about the current user that the default-path discovery needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnv {
    pub home: PathBuf,
    pub user_name: String,
    /// Local application-data root (`%LOCALAPPDATA%` on Windows).
    pub local_appdata: Option<PathBuf>,
}

impl HostEnv {
    /// Gather home, user name and app-data root for the running user.
    pub fn detect() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| {
            warn!("could not determine home directory; using current directory");
            PathBuf::from(".")
        });
        HostEnv {
            home,
            user_name: current_user_name(),
            local_appdata: dirs::data_local_dir(),
        }
    }
}

/// Login name of the current user.
#[cfg(unix)]
fn current_user_name() -> String {
    // SAFETY: getpwuid returns a pointer into static storage or null; the
    // name is copied out immediately and this runs once during startup.
    let name = unsafe {
        let pw = libc::getpwuid(libc::getuid());
        if pw.is_null() || (*pw).pw_name.is_null() {
            None
        } else {
            Some(
                std::ffi::CStr::from_ptr((*pw).pw_name)
                    .to_string_lossy()
                    .into_owned(),
            )
        }
    };
    name.or_else(|| std::env::var("USER").ok())
        .unwrap_or_default()
}

/// Login name of the current user.
#[cfg(not(unix))]
fn current_user_name() -> String {
    std::env::var("USERNAME")
        .or_else(|_| std::env::var("USER"))
        .unwrap_or_default()
}

// ============================================================================
// Command Description
// ============================================================================

/// Platform-neutral description of the process to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Build the std command: stdin inherited, stdout and stderr discarded.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        command
    }

    /// Render as a single line for logs.
    pub fn display(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

// ============================================================================
// Strategy Trait
// ============================================================================

/// Base user-data directory chosen by a platform, before `current` is joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultBase {
    pub path: PathBuf,
    /// Set when nothing was found on disk and a best guess was returned.
    pub degraded: bool,
}

/// One supported host OS.
pub trait GamePlatform: Send + Sync {
    /// Short name for logs and probe output.
    fn name(&self) -> &'static str;

    /// Discover the default user-data base directory.
    ///
    /// Only fails when the host cannot provide a root the platform requires.
    fn default_user_base(&self, host: &HostEnv) -> Result<DefaultBase>;

    /// Path of the game binary inside `root`.
    fn locate_executable(&self, root: &Path) -> Result<PathBuf>;

    /// Shape the spawn command for `exe`, forwarding `args` in order.
    fn build_command(&self, exe: &Path, args: &[String]) -> CommandSpec;

    /// Spawn the command.
    fn spawn(&self, spec: &CommandSpec) -> io::Result<Child> {
        spec.to_command().spawn()
    }

    /// Extra advice appended to spawn failures.
    fn spawn_hint(&self) -> Option<&'static str> {
        None
    }
}

/// The variant for the host this binary was compiled for.
pub fn current() -> Box<dyn GamePlatform> {
    if cfg!(target_os = "windows") {
        Box::new(Windows)
    } else if cfg!(target_os = "macos") {
        Box::new(MacWine::default())
    } else {
        Box::new(Linux)
    }
}

/// Forward game arguments verbatim after any leading arguments.
fn forward_args(leading: Vec<OsString>, args: &[String]) -> Vec<OsString> {
    let mut out = leading;
    out.extend(args.iter().map(OsString::from));
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_matches_target() {
        let platform = current();
        if cfg!(target_os = "windows") {
            assert_eq!(platform.name(), "windows");
        } else if cfg!(target_os = "macos") {
            assert_eq!(platform.name(), "macos-wine");
        } else {
            assert_eq!(platform.name(), "linux");
        }
    }

    #[test]
    fn test_forward_args_keeps_order_and_duplicates() {
        let args = vec!["-a".to_string(), "-b=1".to_string(), "-a".to_string()];
        let out = forward_args(vec![OsString::from("game.exe")], &args);
        assert_eq!(out, vec!["game.exe", "-a", "-b=1", "-a"]);
    }

    #[test]
    fn test_command_spec_display() {
        let spec = CommandSpec {
            program: PathBuf::from("/usr/bin/wine64"),
            args: vec![OsString::from("/g/BeamNG.drive.exe"), OsString::from("-x")],
            cwd: None,
        };
        assert_eq!(spec.display(), "/usr/bin/wine64 /g/BeamNG.drive.exe -x");
    }

    #[test]
    fn test_host_detect_has_home() {
        let host = HostEnv::detect();
        assert!(!host.home.as_os_str().is_empty());
    }
}
