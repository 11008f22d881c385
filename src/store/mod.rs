//! Whole-collection persistence.
//!
//! Every collection (dictionary, private words, accounts) is read and written as a unit.
//! Mutations go through [`modify`], which holds the collection's lock for the whole
//! load-modify-store span so concurrent requests cannot lose each other's writes.

pub mod json;

use std::sync::MutexGuard;
use thiserror::Error;

pub use json::JsonCollection;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed collection data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Session database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to replace collection file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(&'static str),
}

/// Storage for one record collection
pub trait Repository<T>: Send + Sync {
    fn load_all(&self) -> Result<Vec<T>, StoreError>;

    /// Overwrite the collection with `records`
    fn replace_all(&self, records: &[T]) -> Result<(), StoreError>;

    /// Exclusive lock over this collection's load-modify-store spans
    fn lock(&self) -> Result<MutexGuard<'_, ()>, StoreError>;
}

/// Load, mutate and store a collection under its lock.
///
/// The collection is written back only when `f` returns `Ok`.
pub fn modify<T, R, E, Repo, F>(repo: &Repo, f: F) -> Result<R, E>
where
    Repo: Repository<T> + ?Sized,
    E: From<StoreError>,
    F: FnOnce(&mut Vec<T>) -> Result<R, E>,
{
    let _guard = repo.lock()?;
    let mut records = repo.load_all()?;
    let out = f(&mut records)?;
    repo.replace_all(&records)?;
    Ok(out)
}

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
    /// Log the error at warn level and return None
    fn log_warn(self, context: &str) -> Option<T>;
}

impl<T, E: std::fmt::Display> LogOnError<T> for Result<T, E> {
    fn log_warn(self, context: &str) -> Option<T> {
        match self {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                None
            }
        }
    }
}
