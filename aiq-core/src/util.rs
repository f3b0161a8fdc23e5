//! Utilities.
use chrono::Local;
use std::path::{Path, PathBuf};

/// Returns `<dir>/<name>_<timestamp>.<ext>` with a timestamp of the form `%Y_%m_%d_%H_%M_%S`.
pub fn timestamped_path(dir: impl AsRef<Path>, name: &str, ext: &str) -> PathBuf {
    let timestamp = Local::now().format("%Y_%m_%d_%H_%M_%S");
    dir.as_ref().join(format!("{}_{}.{}", name, timestamp, ext))
}
