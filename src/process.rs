//! Game process lifecycle.
//!
//! Spawns the game through the session's platform strategy, waits for it to
//! exit, and ends the launcher once the game's lifecycle is over.

use log::{debug, error, info, warn};
use std::io;
use std::path::Path;
use std::process::{Child, ExitStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crate::constants::{millis_to_duration, GAME_ENDED_EXIT_CODE, GRACE_INTERVAL, WAIT_POLL_MS};
use crate::session::LauncherSession;

// ============================================================================
// Outcome
// ============================================================================

/// How a launch attempt ended.
#[derive(Debug)]
pub enum LaunchOutcome {
    /// The game ran and exited. Its status is recorded, never interpreted.
    Exited {
        pid: u32,
        status: Option<ExitStatus>,
    },
    /// The game never started.
    Failed { reason: String },
}

impl LaunchOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, LaunchOutcome::Failed { .. })
    }
}

/// Human-readable spawn error, with the OS code when there is one.
pub fn describe_spawn_error(err: &io::Error) -> String {
    match err.raw_os_error() {
        Some(code) => format!("Error {}: {}", code, err),
        None => err.to_string(),
    }
}

// ============================================================================
// Launch
// ============================================================================

/// Start the game from `install_root` and block until it exits or fails to start.
pub fn launch(
    session: &LauncherSession,
    install_root: &Path,
    args: &[String],
    cancel: &AtomicBool,
) -> LaunchOutcome {
    let platform = session.platform();

    let exe = match platform.locate_executable(install_root) {
        Ok(exe) => exe,
        Err(e) => {
            return LaunchOutcome::Failed {
                reason: format!("{:#}", e),
            }
        }
    };
    debug!("BeamNG executable path: {}", exe.display());

    let spec = platform.build_command(&exe, args);
    debug!("spawning: {}", spec.display());

    let mut child = match platform.spawn(&spec) {
        Ok(child) => child,
        Err(e) => {
            let mut reason = describe_spawn_error(&e);
            if let Some(hint) = platform.spawn_hint() {
                reason.push_str(". ");
                reason.push_str(hint);
            }
            return LaunchOutcome::Failed { reason };
        }
    };

    let pid = child.id();
    session.set_game_pid(pid);
    info!("Game Launched! (pid={})", pid);

    let status = wait_for_exit(&mut child, cancel);
    LaunchOutcome::Exited { pid, status }
}

/// Poll the child until it exits; kill it if cancellation is requested.
fn wait_for_exit(child: &mut Child, cancel: &AtomicBool) -> Option<ExitStatus> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Some(status),
            Ok(None) => {}
            Err(e) => {
                warn!("failed to poll game status: {}; blocking on wait", e);
                return child.wait().ok();
            }
        }

        if cancel.load(Ordering::SeqCst) {
            info!("shutdown requested, stopping game (pid={})", child.id());
            if let Err(e) = child.kill() {
                warn!("failed to kill game process: {}", e);
            }
            return child.wait().ok();
        }

        thread::sleep(millis_to_duration(WAIT_POLL_MS));
    }
}

/// Log a launch outcome at the matching level.
pub fn report(outcome: &LaunchOutcome) {
    match outcome {
        LaunchOutcome::Exited { pid, status } => match status {
            Some(status) => info!(
                "Game Closed! launcher closing soon (pid={}, {})",
                pid, status
            ),
            None => info!("Game Closed! launcher closing soon (pid={})", pid),
        },
        LaunchOutcome::Failed { reason } => {
            error!("Failed to Launch the game! launcher closing soon. {}", reason)
        }
    }
}

/// Launch the game, report, wait out the grace interval and terminate the launcher.
///
/// Exits with [`GAME_ENDED_EXIT_CODE`] for every outcome.
pub fn run_to_exit(session: &LauncherSession, cancel: &AtomicBool) -> ! {
    let outcome = launch(
        session,
        session.install_dir(),
        &session.options().game_args,
        cancel,
    );
    report(&outcome);
    thread::sleep(GRACE_INTERVAL);
    std::process::exit(GAME_ENDED_EXIT_CODE)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{CommandSpec, GamePlatform, HostEnv, Linux};
    use crate::session::LaunchOptions;
    use anyhow::Result;
    use std::ffi::OsString;
    use std::path::PathBuf;

    fn host() -> HostEnv {
        HostEnv {
            home: PathBuf::from("/home/tester"),
            user_name: "tester".into(),
            local_appdata: None,
        }
    }

    fn session_with(platform: Box<dyn GamePlatform>, install: &Path) -> LauncherSession {
        LauncherSession::new(platform, host(), install.to_path_buf(), LaunchOptions::default())
    }

    /// Runs a shell script in place of the game binary.
    struct ShellGame {
        script: String,
    }

    impl GamePlatform for ShellGame {
        fn name(&self) -> &'static str {
            "shell"
        }

        fn default_user_base(&self, host: &HostEnv) -> Result<crate::platform::DefaultBase> {
            Linux.default_user_base(host)
        }

        fn locate_executable(&self, root: &Path) -> Result<PathBuf> {
            Ok(root.join("game"))
        }

        fn build_command(&self, _exe: &Path, args: &[String]) -> CommandSpec {
            let mut full = vec![
                OsString::from("-c"),
                OsString::from(&self.script),
                OsString::from("sh"),
            ];
            full.extend(args.iter().map(OsString::from));
            CommandSpec {
                program: PathBuf::from("/bin/sh"),
                args: full,
                cwd: None,
            }
        }
    }

    #[test]
    fn test_describe_spawn_error_includes_code() {
        let err = io::Error::from_raw_os_error(2);
        let text = describe_spawn_error(&err);
        assert!(text.starts_with("Error 2: "), "{text}");
    }

    #[test]
    fn test_missing_executable_reports_failure() {
        let install = tempfile::tempdir().unwrap();
        let session = session_with(Box::new(Linux), &install.path().join("nope"));
        let cancel = AtomicBool::new(false);

        let outcome = launch(&session, session.install_dir(), &[], &cancel);
        match &outcome {
            LaunchOutcome::Failed { reason } => {
                assert!(reason.starts_with("Error "), "{reason}")
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(outcome.is_failure());
        assert_eq!(session.game_pid(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_arguments_forwarded_in_order() {
        let install = tempfile::tempdir().unwrap();
        let out = install.path().join("argv.txt");
        let script = format!("printf '%s\\n' \"$@\" > '{}'", out.display());
        let session = session_with(Box::new(ShellGame { script }), install.path());
        let cancel = AtomicBool::new(false);

        let args = vec!["-a".to_string(), "-b=1".to_string()];
        let outcome = launch(&session, install.path(), &args, &cancel);

        assert!(matches!(outcome, LaunchOutcome::Exited { .. }));
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "-a\n-b=1\n");
        assert!(session.game_pid().is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_child_exit_code_is_not_interpreted() {
        let install = tempfile::tempdir().unwrap();
        let session = session_with(
            Box::new(ShellGame {
                script: "exit 7".into(),
            }),
            install.path(),
        );
        let cancel = AtomicBool::new(false);

        match launch(&session, install.path(), &[], &cancel) {
            LaunchOutcome::Exited { status, .. } => {
                assert_eq!(status.and_then(|s| s.code()), Some(7))
            }
            other => panic!("expected exit, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_cancel_stops_the_game() {
        let install = tempfile::tempdir().unwrap();
        let session = session_with(
            Box::new(ShellGame {
                script: "exec sleep 30".into(),
            }),
            install.path(),
        );
        let cancel = AtomicBool::new(true);

        let started = std::time::Instant::now();
        let outcome = launch(&session, install.path(), &[], &cancel);
        assert!(matches!(outcome, LaunchOutcome::Exited { .. }));
        assert!(started.elapsed() < std::time::Duration::from_secs(10));
    }
}
