//! Setup check: resolve everything and report it as JSON without launching.

use serde::Serialize;

use crate::session::LauncherSession;
use crate::version::check_version;

#[derive(Debug, Serialize)]
pub struct ProbeReport {
    pub ok: bool,
    pub platform: &'static str,
    pub game_dir: String,
    pub game_version: Option<String>,
    pub user_path: Option<String>,
    pub executable: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Resolve paths for `session` and collect the results.
pub fn probe(session: &LauncherSession) -> ProbeReport {
    let mut errors = Vec::new();

    let user_path = match session.resolve_user_path() {
        Ok(path) => Some(path.display().to_string()),
        Err(e) => {
            errors.push(format!("{:#}", e));
            None
        }
    };

    let executable = match session.platform().locate_executable(session.install_dir()) {
        Ok(path) if path.exists() => Some(path.display().to_string()),
        Ok(path) => {
            errors.push(format!("game executable not found at {}", path.display()));
            None
        }
        Err(e) => {
            errors.push(format!("{:#}", e));
            None
        }
    };

    ProbeReport {
        ok: errors.is_empty(),
        platform: session.platform().name(),
        game_dir: session.install_dir().display().to_string(),
        game_version: check_version(session.install_dir()).ok(),
        user_path,
        executable,
        errors,
    }
}
