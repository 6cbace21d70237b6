//! Game launch coordination.
//!
//! Decides whether to launch at all and, if so, runs the process launcher on
//! a background thread so the caller keeps control of its own startup.

use anyhow::{Context, Result};
use log::{debug, error, info};
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crate::process::run_to_exit;
use crate::session::LauncherSession;

/// Handle to the background game thread.
///
/// The thread normally ends the whole process once the game exits; the
/// handle lets a caller request an earlier shutdown instead.
#[derive(Debug)]
pub struct GameTask {
    handle: thread::JoinHandle<()>,
    cancel: Arc<AtomicBool>,
}

impl GameTask {
    /// Ask the launcher thread to stop the game.
    pub fn cancel(&self) {
        debug!("game task cancellation requested");
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Park the caller until the launcher thread ends.
    pub fn join(self) {
        if let Err(payload) = self.handle.join() {
            error!("game launcher thread panicked: {}", panic_message(&*payload));
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}

/// Start the game unless the session's options say not to.
///
/// Returns `Ok(None)` when launching is disabled; the launcher is never
/// invoked in that case.
pub fn start_game(session: Arc<LauncherSession>) -> Result<Option<GameTask>> {
    if session.options().no_launch {
        info!("--no-launch set; not starting the game");
        return Ok(None);
    }

    let cancel = Arc::new(AtomicBool::new(false));
    let handle = {
        let cancel = cancel.clone();
        thread::Builder::new()
            .name("game".into())
            .spawn(move || {
                run_to_exit(&session, &cancel);
            })
            .context("failed to spawn game launcher thread")?
    };

    Ok(Some(GameTask { handle, cancel }))
}
