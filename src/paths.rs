//! Project path functions - single source of truth for all file paths.
//!
//! Every persisted collection lives directly under the data directory:
//!
//! ```text
//! <data_dir>/dictionary.json   shared dictionary (read-only to the app)
//! <data_dir>/user_words.json   private words, tagged with their owner
//! <data_dir>/users.json        accounts with credentials and stats
//! <data_dir>/app.db            SQLite session store
//! ```

use std::path::{Path, PathBuf};

/// Default base data directory when neither config.toml nor DATA_DIR is set
pub const DEFAULT_DATA_DIR: &str = "data";

pub fn dictionary_path(data_dir: &Path) -> PathBuf {
    data_dir.join("dictionary.json")
}

pub fn user_words_path(data_dir: &Path) -> PathBuf {
    data_dir.join("user_words.json")
}

pub fn users_path(data_dir: &Path) -> PathBuf {
    data_dir.join("users.json")
}

/// Session database path
pub fn auth_db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("app.db")
}
