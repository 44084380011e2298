//! Configuration file discovery and reading.
//!
//! Files may be JSON5 (comments, unquoted keys, trailing commas) or plain
//! JSON; both go through the JSON5 parser. The first file found wins:
//!
//! 1. `./motion.json5`, then `./motion.json`
//! 2. `<config dir>/motion/config.json5`, then `<config dir>/motion/config.json`
//!
//! where `<config dir>` is the platform config directory (`~/.config` on
//! Linux).

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, Result};

/// File names looked up in the working directory.
const LOCAL_FILE_NAMES: &[&str] = &["motion.json5", "motion.json"];

/// Directory under the platform config directory.
const USER_CONFIG_DIR: &str = "motion";

/// File names looked up in the user config directory.
const USER_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Finds the configuration file in the working directory or the user's
/// config directory.
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    find_config_file_in(Path::new("."), user_config_dir().as_deref())
}

/// Finds the configuration file, looking in `local_dir` first and then in
/// `user_dir` (the `motion` directory itself, not its parent).
///
/// # Examples
///
/// ```
/// use motion_config::persistence::find_config_file_in;
///
/// let dir = tempfile::tempdir().unwrap();
/// assert!(find_config_file_in(dir.path(), None).is_none());
///
/// std::fs::write(dir.path().join("motion.json"), "{}").unwrap();
/// assert!(find_config_file_in(dir.path(), None).is_some());
/// ```
#[must_use]
pub fn find_config_file_in(local_dir: &Path, user_dir: Option<&Path>) -> Option<PathBuf> {
    let local = LOCAL_FILE_NAMES.iter().map(|name| local_dir.join(name));
    let user = user_dir
        .into_iter()
        .flat_map(|dir| USER_FILE_NAMES.iter().map(move |name| dir.join(name)));

    let found = local.chain(user).find(|path| path.is_file());
    if let Some(path) = &found {
        debug!(path = %path.display(), "found config file");
    }
    found
}

/// Returns the user configuration directory (`~/.config/motion` on Linux),
/// if the platform has one.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(USER_CONFIG_DIR))
}

/// Reads and parses a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON5.
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json5::from_str(&content).map_err(ConfigError::from)
}
