//! Application state shared by all handlers.

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::auth::db as auth_db;
use crate::config::WordSettings;
use crate::domain::{Account, WordRecord};
use crate::paths;
use crate::services::{AccountStore, WordStore};
use crate::store::{JsonCollection, StoreError};

/// Session database connection
pub type AuthDb = Arc<Mutex<Connection>>;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Session store (Identity)
    pub auth_db: AuthDb,

    /// Shared dictionary + private words
    pub words: Arc<WordStore>,

    /// Accounts and their stats
    pub accounts: Arc<AccountStore>,

    pub settings: WordSettings,
}

impl AppState {
    /// Open every collection under `data_dir`, creating missing files
    pub fn open(data_dir: &Path, settings: WordSettings) -> Result<Self, StoreError> {
        let dictionary = JsonCollection::<WordRecord>::open(paths::dictionary_path(data_dir))?;
        let user_words = JsonCollection::<WordRecord>::open(paths::user_words_path(data_dir))?;
        let accounts = JsonCollection::<Account>::open(paths::users_path(data_dir))?;

        let conn = Connection::open(paths::auth_db_path(data_dir))?;
        auth_db::init_auth_schema(&conn)?;

        Ok(Self {
            auth_db: Arc::new(Mutex::new(conn)),
            words: Arc::new(WordStore::new(
                Arc::new(dictionary),
                Arc::new(user_words),
                settings.anonymous_visibility,
            )),
            accounts: Arc::new(AccountStore::new(Arc::new(accounts))),
            settings,
        })
    }
}
