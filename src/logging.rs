//! Logging setup for bng_launcher.
//!
//! Provides timestamp generation and the `env_logger` backend behind the
//! `log` macros used throughout the crate.

use std::io::Write;

// ============================================================================
// Timestamp Generation
// ============================================================================

/// Generate a timestamp string in format "YYYY-MM-DD HH:MM:SS.mmm".
/// Uses libc for local time conversion to avoid heavy chrono dependency.
#[cfg(unix)]
pub fn timestamp() -> String {
    use libc::{c_char, localtime_r, strftime, time_t, tm};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    // Get epoch time for local conversion.
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| Duration::from_secs(0));
    let secs = now.as_secs() as time_t;
    let millis = now.subsec_millis();

    // SAFETY: localtime_r is thread-safe (uses caller-provided tm struct)
    let mut tm: tm = unsafe { std::mem::zeroed() };
    unsafe {
        localtime_r(&secs, &mut tm);
    }

    let mut buf = [0u8; 32];
    let fmt = b"%Y-%m-%d %H:%M:%S\0";
    // SAFETY: strftime writes to our buffer, format string is null-terminated
    let len = unsafe {
        strftime(
            buf.as_mut_ptr() as *mut c_char,
            buf.len(),
            fmt.as_ptr() as *const c_char,
            &tm,
        )
    };
    let prefix = std::str::from_utf8(&buf[..len]).unwrap_or("1970-01-01 00:00:00");
    format!("{prefix}.{millis:03}")
}

// ============================================================================
// Logger Initialization
// ============================================================================

/// Install the global logger.
///
/// Defaults to `info` (`debug` when `verbose`); `RUST_LOG` takes precedence.
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env = env_logger::Env::default().default_filter_or(default_level);

    let _ = env_logger::Builder::from_env(env)
        .format(|buf, record| {
            #[cfg(unix)]
            let ts = timestamp();
            #[cfg(not(unix))]
            let ts = buf.timestamp_millis();
            writeln!(buf, "{} [{}] {}", ts, record.level(), record.args())
        })
        .try_init();
}

// ============================================================================
// Tests
// ============================================================================
