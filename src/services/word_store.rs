//! Shared dictionary + private words, merged into one addressable collection.

use chrono::Utc;
use serde_json::Map;
use std::sync::Arc;

use crate::config::AnonymousVisibility;
use crate::domain::{AccountId, NewWord, StatCounter, Word, WordId, WordRecord};
use crate::error::{AppError, AppResult};
use crate::store::{modify, LogOnError, Repository};

use super::accounts::AccountStore;

pub struct WordStore {
    dictionary: Arc<dyn Repository<WordRecord>>,
    user_words: Arc<dyn Repository<WordRecord>>,
    anonymous_visibility: AnonymousVisibility,
}

impl WordStore {
    pub fn new(
        dictionary: Arc<dyn Repository<WordRecord>>,
        user_words: Arc<dyn Repository<WordRecord>>,
        anonymous_visibility: AnonymousVisibility,
    ) -> Self {
        Self {
            dictionary,
            user_words,
            anonymous_visibility,
        }
    }

    /// Every dictionary word followed by the private words visible to `caller`.
    ///
    /// A signed-in caller sees only their own private words. An anonymous caller sees
    /// all private words or none, depending on the configured visibility. Never shuffles.
    pub fn get_all(&self, caller: Option<&AccountId>) -> AppResult<Vec<Word>> {
        let mut words: Vec<Word> = self
            .dictionary
            .load_all()?
            .into_iter()
            .map(Word::shared)
            .collect();

        let private = match (caller, self.anonymous_visibility) {
            (None, AnonymousVisibility::SharedOnly) => Vec::new(),
            (None, AnonymousVisibility::AllPrivate) => self.user_words.load_all()?,
            (Some(owner), _) => self
                .user_words
                .load_all()?
                .into_iter()
                .filter(|w| w.user_id.as_ref() == Some(owner))
                .collect(),
        };
        words.extend(private.into_iter().map(Word::private));

        Ok(words)
    }

    /// Store a new private word for `caller` and bump their `words_added`.
    ///
    /// The stats bump is best-effort: its failure is logged and the word stays added.
    pub fn add_word(&self, accounts: &AccountStore, caller: &AccountId, fields: NewWord) -> AppResult<Word> {
        if accounts.find(caller)?.is_none() {
            return Err(AppError::unauthorized());
        }

        let simplified = required(&fields.simplified, "simplified")?;
        let pinyin = required(&fields.pinyin, "pinyin")?;
        let translation = required(&fields.translation, "translation")?;

        let record = modify(self.user_words.as_ref(), |words: &mut Vec<WordRecord>| {
            let record = WordRecord {
                id: fresh_word_id(words).into(),
                user_id: Some(caller.clone()),
                simplified,
                pinyin,
                translation,
                example: optional(fields.example.as_deref()),
                example_translation: optional(fields.example_translation.as_deref()),
                created_at: Some(Utc::now().timestamp_millis()),
                extra: Map::new(),
            };
            words.push(record.clone());
            Ok::<_, AppError>(record)
        })?;

        tracing::info!("Account {} added word {} ({})", caller, record.id, record.simplified);

        accounts
            .increment(caller, StatCounter::WordsAdded, 1)
            .log_warn("Failed to update words_added");

        Ok(Word::private(record))
    }

    /// Delete one of `caller`'s private words.
    ///
    /// Words owned by someone else are reported as `NotFound`, same as missing ones.
    pub fn delete_word(&self, caller: &AccountId, word_id: &str) -> AppResult<()> {
        let target = WordId::parse(word_id);
        let raw = target.raw();

        modify(self.user_words.as_ref(), |words: &mut Vec<WordRecord>| {
            let index = words
                .iter()
                .position(|w| w.id.as_str() == raw && w.user_id.as_ref() == Some(caller))
                .ok_or_else(|| AppError::not_found("Word not found"))?;
            words.remove(index);
            Ok::<_, AppError>(())
        })?;

        tracing::info!("Account {} deleted word {}", caller, raw);
        Ok(())
    }
}

fn required(value: &str, field: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("Field '{}' is required", field)));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// Random id, regenerated until it is unused within the collection
fn fresh_word_id(existing: &[WordRecord]) -> String {
    loop {
        let id = uuid::Uuid::new_v4().simple().to_string();
        if !existing.iter().any(|w| w.id.as_str() == id) {
            return id;
        }
    }
}
