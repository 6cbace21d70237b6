//! Centralized constants for bng_launcher file names, layout, and timing.
//!
//! Keeps the game's on-disk conventions and the launcher's lifecycle timings
//! in one place instead of scattering literals across modules.

use std::time::Duration;

// ============================================================================
// Install & User-Data Layout
// ============================================================================

/// Local startup config that sits beside the game installation.
pub const STARTUP_INI: &str = "startup.ini";

/// Section of `startup.ini` that carries filesystem overrides.
pub const STARTUP_FILESYSTEM_SECTION: &str = "filesystem";

/// Key inside [`STARTUP_FILESYSTEM_SECTION`] naming the user folder.
pub const STARTUP_USER_PATH_KEY: &str = "UserPath";

/// Vendor config written by the game's own launcher into the app-data root.
pub const VENDOR_INI: &str = "BeamNG.Drive.ini";

/// Top-level key of [`VENDOR_INI`] naming the user folder.
pub const VENDOR_USER_FOLDER_KEY: &str = "userFolder";

/// Vendor directory under the local app-data root.
pub const VENDOR_DIR: &str = "BeamNG";

/// Conventional user-data directory name under [`VENDOR_DIR`].
pub const USER_DATA_DIR: &str = "BeamNG.drive";

/// Segment appended to the user-data base for the active game build.
pub const CURRENT_BUILD_SEGMENT: &str = "current";

/// Manifest in the installation root that carries the game version.
pub const INTEGRITY_FILE: &str = "integrity.json";

// ============================================================================
// Lifecycle Constants
// ============================================================================

/// Delay before the launcher terminates once the game lifecycle has ended.
pub const GRACE_INTERVAL: Duration = Duration::from_secs(5);

/// Exit code signalling "game process lifecycle ended".
pub const GAME_ENDED_EXIT_CODE: i32 = 2;

/// Polling interval while waiting on the game process.
pub const WAIT_POLL_MS: u64 = 100;

/// Convert milliseconds to Duration (const fn for compile-time evaluation)
pub const fn millis_to_duration(ms: u64) -> Duration {
    Duration::from_millis(ms)
}
