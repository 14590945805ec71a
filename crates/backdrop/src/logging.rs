//! File logging.
//!
//! The terminal owns stdout while the scene is drawn, so log lines go to
//! `backdrop.log` in the platform data directory.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "BACKDROP_LOG";

const DEFAULT_DIRECTIVE: &str = "backdrop=info";

/// Build the filter from `BACKDROP_LOG`, falling back to info level.
fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber writing to the log file.
///
/// Returns the log path, or `None` when there is no data directory to
/// write to (logging stays off in that case).
pub fn init() -> color_eyre::Result<Option<PathBuf>> {
    let Some(dir) = backdrop_config::data_dir() else {
        return Ok(None);
    };
    fs::create_dir_all(&dir)?;
    let path = dir.join("backdrop.log");
    let file = File::create(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(Some(path))
}
