// Diagnostic logging for Treat Chase
// The terminal UI owns stdout, so logs go to a file unless running headless

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;

use tracing::Level;

pub const LOG_FILE_PATH: &str = "/tmp/treat-chase-debug.log";

/// Where log lines are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    /// Truncate and append to this file
    File(&'a Path),
    Stderr,
}

/// Install the global tracing subscriber
///
/// # Arguments
/// * `debug` - DEBUG level when set (--debug flag), WARN otherwise
/// * `target` - Log file or stderr
pub fn init(debug: bool, target: LogTarget<'_>) -> io::Result<()> {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false);

    let installed = match target {
        LogTarget::File(path) => {
            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?;

            writeln!(file, "=== Treat Chase Log ===")?;
            writeln!(file, "Session started: {:?}", SystemTime::now())?;
            writeln!(file, "To monitor: tail -f {}", path.display())?;
            writeln!(file, "========================================\n")?;

            builder.with_writer(Mutex::new(file)).try_init()
        }
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
    };

    installed.map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
