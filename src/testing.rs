//! Test utilities.
//!
//! `TestEnv` opens a full `AppState` on a temporary data directory so tests exercise
//! the same JSON collections and session schema as production.

use std::io;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

use crate::config::WordSettings;
use crate::domain::{Account, WordRecord};
use crate::paths;
use crate::state::AppState;
use crate::store::{JsonCollection, Repository, StoreError};

pub struct TestEnv {
    /// Temporary directory (kept alive for the collection files)
    pub temp: TempDir,
    pub state: AppState,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_settings(WordSettings::default())
    }

    pub fn with_settings(settings: WordSettings) -> Self {
        let temp = TempDir::new().expect("create temp dir");
        let state = AppState::open(temp.path(), settings).expect("open app state");
        Self { temp, state }
    }

    /// Register an account with a fixed test password
    pub fn register(&self, username: &str) -> Account {
        self.state
            .accounts
            .register(username, "password123", None)
            .expect("register test account")
    }

    /// Overwrite the shared dictionary with `(id, simplified, pinyin, translation)` entries
    pub fn seed_dictionary(&self, entries: &[(&str, &str, &str, &str)]) {
        let records: Vec<WordRecord> = entries
            .iter()
            .map(|(id, simplified, pinyin, translation)| WordRecord {
                id: (*id).into(),
                user_id: None,
                simplified: simplified.to_string(),
                pinyin: pinyin.to_string(),
                translation: translation.to_string(),
                example: None,
                example_translation: None,
                created_at: None,
                extra: Default::default(),
            })
            .collect();
        JsonCollection::<WordRecord>::open(paths::dictionary_path(self.temp.path()))
            .and_then(|c| c.replace_all(&records))
            .expect("seed dictionary");
    }

    /// Overwrite the private words collection
    pub fn seed_user_words(&self, records: &[WordRecord]) {
        JsonCollection::<WordRecord>::open(paths::user_words_path(self.temp.path()))
            .and_then(|c| c.replace_all(records))
            .expect("seed user words");
    }
}

/// Repository that serves fixed records and refuses every write
pub struct FailingRepository<T> {
    records: Vec<T>,
    lock: Mutex<()>,
}

impl<T> FailingRepository<T> {
    pub fn read_only(records: Vec<T>) -> Self {
        Self {
            records,
            lock: Mutex::new(()),
        }
    }
}

impl<T: Clone + Send + Sync> Repository<T> for FailingRepository<T> {
    fn load_all(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.records.clone())
    }

    fn replace_all(&self, _records: &[T]) -> Result<(), StoreError> {
        Err(StoreError::Io(io::Error::other("write refused")))
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.lock
            .lock()
            .map_err(|_| StoreError::LockPoisoned("failing repository"))
    }
}
