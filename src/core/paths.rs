//! Where dataset-chat keeps its files: saved transcripts, the interactive log,
//! and the config directory shown by `dataset-chat config`.

use std::fs;
use std::path::PathBuf;

use crate::core::app;

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("io", app::VENDOR, app::NAME)
}

pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().to_path_buf())
}

pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|d| d.cache_dir().to_path_buf())
}

/// Log file for interactive chat (`<cache dir>/dataset-chat.log`). Creates the
/// cache directory; `None` when it cannot be created.
pub fn log_file() -> Option<PathBuf> {
    let dir = cache_dir()?;
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{}.log", app::NAME)))
}

/// Default directory for saved transcripts (`<data dir>/transcripts`).
/// Tests point it elsewhere with `TEST_DATA_DIR`.
pub fn transcripts_dir() -> Option<PathBuf> {
    #[cfg(test)]
    if let Some(p) = std::env::var_os("TEST_DATA_DIR") {
        return Some(PathBuf::from(p));
    }
    project_dirs().map(|d| d.data_dir().join("transcripts"))
}
