//! File logging for the catalog binary.
//!
//! `init_logging` installs a rolling `flexi_logger` backend behind the `log`
//! facade once per process. Repeating the same call is a no-op; asking for a
//! different level or directory afterwards is an error, since the backend
//! cannot be swapped once started.

use flexi_logger::{
    detailed_format, Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming,
    WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const LOG_BASENAME: &str = "catalog";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 5;
const PANIC_SUMMARY_CHARS: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    level: LevelFilter,
    dir: PathBuf,
    _handle: LoggerHandle,
}

#[derive(Debug)]
pub enum LoggingError {
    UnknownLevel(String),
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },
    Backend(FlexiLoggerError),
    AlreadyActive {
        level: LevelFilter,
        dir: PathBuf,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(raw) => write!(
                f,
                "unknown log level `{raw}`; expected off|error|warn|info|debug|trace"
            ),
            Self::CreateDir { dir, source } => {
                write!(f, "cannot create log directory `{}`: {source}", dir.display())
            }
            Self::Backend(err) => write!(f, "log backend failed to start: {err}"),
            Self::AlreadyActive { level, dir } => write!(
                f,
                "logging already active at level {level} in `{}`",
                dir.display()
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            Self::UnknownLevel(_) | Self::AlreadyActive { .. } => None,
        }
    }
}

/// Parses a case-insensitive level name such as `info` or `WARN`.
pub fn parse_level(raw: &str) -> Result<LevelFilter, LoggingError> {
    LevelFilter::from_str(raw.trim()).map_err(|_| LoggingError::UnknownLevel(raw.to_string()))
}

/// `Debug` for debug builds, `Info` for release builds.
pub fn default_log_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Starts rolling file logs under `dir`, creating it when missing.
pub fn init_logging(level: LevelFilter, dir: &Path) -> Result<(), LoggingError> {
    let active = ACTIVE.get_or_try_init(|| start_backend(level, dir))?;
    if active.level != level || active.dir.as_path() != dir {
        return Err(LoggingError::AlreadyActive {
            level: active.level,
            dir: active.dir.clone(),
        });
    }
    Ok(())
}

fn start_backend(level: LevelFilter, dir: &Path) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let handle = Logger::try_with_str(level.as_str().to_ascii_lowercase())
        .and_then(|logger| {
            logger
                .log_to_file(FileSpec::default().directory(dir).basename(LOG_BASENAME))
                .rotate(
                    Criterion::Size(ROTATE_AT_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(detailed_format)
                .start()
        })
        .map_err(LoggingError::Backend)?;

    log_panics();
    info!(
        "event=logging_start module=logging status=ok level={level} dir={} version={}",
        dir.display(),
        crate::VERSION
    );

    Ok(ActiveLogger {
        level,
        dir: dir.to_path_buf(),
        _handle: handle,
    })
}

// Runs at most once, from inside the `ACTIVE` initializer.
fn log_panics() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("<non-string payload>");
        let location = info
            .location()
            .map_or_else(|| "unknown".to_string(), |loc| format!("{}:{}", loc.file(), loc.line()));
        error!(
            "event=panic module=logging status=error location={location} payload={}",
            one_line(payload, PANIC_SUMMARY_CHARS)
        );
        previous(info);
    }));
}

fn one_line(text: &str, max_chars: usize) -> String {
    let mut flattened: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .take(max_chars)
        .collect();
    if text.chars().nth(max_chars).is_some() {
        flattened.push_str("...");
    }
    flattened
}
