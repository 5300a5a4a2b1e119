//! Log bridge for localshortcut.
//!
//! Routes every `log::info!()` etc. to a debug log file:
//! /tmp/localshortcut_debug.log on Unix/macOS,
//! %TEMP%\localshortcut_debug.log on Windows.
//!
//! When `RUST_LOG` is set, records are mirrored to stderr as well.
//! Level precedence: `--log-level` flag, then `RUST_LOG`, then the config
//! file's `log_level` (applied once the config is loaded), then `info`.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

struct LogBridge {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.target(), &record.args().to_string());

        if let Some(ref mut file) = *self.file.lock() {
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_stderr {
            eprint!("{}", line);
        }
    }

    fn flush(&self) {
        if let Some(ref mut file) = *self.file.lock() {
            let _ = file.flush();
        }
    }
}

impl LogBridge {
    /// Stop writing to the log file.
    fn close(&self) {
        if let Some(mut file) = self.file.lock().take() {
            let _ = file.flush();
        }
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Set when the level came from the CLI or `RUST_LOG`, so the config file
/// level must not override it.
static LEVEL_OVERRIDDEN: AtomicBool = AtomicBool::new(false);

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    {
        PathBuf::from("/tmp/localshortcut_debug.log")
    }
    #[cfg(not(unix))]
    {
        std::env::temp_dir().join("localshortcut_debug.log")
    }
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Format one log line (newline terminated).
pub fn format_line(level: log::Level, target: &str, msg: &str) -> String {
    format!("[{}] [{:<5}] [{}] {}\n", get_timestamp(), level, target, msg)
}

/// Install the log bridge. Later calls are ignored.
pub fn init_log_bridge(cli_level: Option<log::LevelFilter>) {
    let env_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| v.trim().parse::<log::LevelFilter>().ok());
    let mirror_stderr = std::env::var_os("RUST_LOG").is_some();

    let level = match cli_level.or(env_level) {
        Some(level) => {
            LEVEL_OVERRIDDEN.store(true, Ordering::SeqCst);
            level
        }
        None => log::LevelFilter::Info,
    };

    let file = if level == log::LevelFilter::Off {
        None
    } else {
        OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
            .ok()
    };

    let bridge = BRIDGE.get_or_init(|| LogBridge {
        file: Mutex::new(file),
        mirror_stderr,
    });

    if log::set_logger(bridge).is_ok() {
        log::set_max_level(level);
        log::info!(
            "localshortcut {} log session started (level={})",
            crate::VERSION,
            level
        );
    }
}

/// Apply the config file's log level unless the CLI or `RUST_LOG` set one.
///
/// `Off` also closes the log file opened at startup.
pub fn apply_config_level(level: log::LevelFilter) {
    if LEVEL_OVERRIDDEN.load(Ordering::SeqCst) {
        return;
    }
    log::set_max_level(level);
    if level == log::LevelFilter::Off
        && let Some(bridge) = BRIDGE.get()
    {
        bridge.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let line = format_line(log::Level::Warn, "localshortcut::app", "hello");
        assert!(line.ends_with("[WARN ] [localshortcut::app] hello\n"));
        assert!(line.starts_with('['));
    }

    #[test]
    fn test_close_stops_file_writes() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bridge.log");
        let bridge = LogBridge {
            file: Mutex::new(Some(File::create(&path).unwrap())),
            mirror_stderr: false,
        };

        bridge.close();
        assert!(bridge.file.lock().is_none());

        log::Log::log(
            &bridge,
            &log::Record::builder()
                .level(log::Level::Error)
                .target("localshortcut::debug")
                .args(format_args!("after close"))
                .build(),
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_log_path_file_name() {
        assert_eq!(
            log_path().file_name().and_then(|n| n.to_str()),
            Some("localshortcut_debug.log")
        );
    }
}
