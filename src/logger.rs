// A stderr logger for the `log` crate. The library half of this crate only
// emits log records. Installing a logger is the binary's job, and the level
// comes from the `RECUR_LOG` environment variable.

use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use log::{LevelFilter, Log};

/// A logger that writes every record to stderr.
///
/// This logger does no filtering of its own. Records are filtered by the
/// global max level, which [`init`] sets.
#[derive(Debug)]
struct Logger;

impl Log for Logger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        // Always UTC. Finding the system time zone can itself log.
        let now = jiff::Timestamp::now();
        let location = match (record.file(), record.line()) {
            (Some(file), Some(line)) => format!("|{}:{line}", relative(file)),
            (Some(file), None) => format!("|{}", relative(file)),
            _ => String::new(),
        };
        eprintln!("{now}|{}{location}: {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

/// Install the stderr logger with the level named by `RECUR_LOG`.
///
/// Logging is off when `RECUR_LOG` is unset or empty.
pub fn init() -> anyhow::Result<()> {
    let level = match std::env::var_os("RECUR_LOG") {
        None => LevelFilter::Off,
        Some(value) => {
            let Some(value) = value.to_str() else {
                anyhow::bail!("RECUR_LOG must be valid UTF-8")
            };
            level_from_env(value)?
        }
    };
    log::set_max_level(level);
    log::set_logger(&Logger)?;
    Ok(())
}

/// Returns the level filter named by a value of `RECUR_LOG`.
fn level_from_env(value: &str) -> anyhow::Result<LevelFilter> {
    let level = match value {
        "" | "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        unk => anyhow::bail!("unrecognized log level '{unk}'"),
    };
    Ok(level)
}

/// Strips the current directory from source paths, when possible.
fn relative(path: &str) -> &str {
    static CWD: LazyLock<Option<PathBuf>> =
        LazyLock::new(|| std::env::current_dir().ok());

    CWD.as_deref()
        .and_then(|cwd| Path::new(path).strip_prefix(cwd).ok())
        .and_then(|relative| relative.to_str())
        .unwrap_or(path)
}
