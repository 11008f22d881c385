//! Answer validation against a word's canonical pinyin.
//!
//! Matching is deliberately strict: after normalization the strings must be equal.
//! Normalization only composes Unicode (NFC), lower-cases and drops whitespace, so
//! `"Ni Hao"` matches `"nihao"` but `"ni hao"` does not match `"nǐ hǎo"`.

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::domain::{AccountId, Word};
use crate::error::{AppError, AppResult};
use crate::services::AccountStore;
use crate::store::LogOnError;

// ============================================================================
// Normalization
// ============================================================================

/// NFC-compose, lower-case and strip every whitespace character
pub fn normalize_answer(input: &str) -> String {
  input
    .nfc()
    .flat_map(char::to_lowercase)
    .filter(|c| !c.is_whitespace())
    .collect()
}

pub fn is_correct(canonical: &str, answer: &str) -> bool {
  normalize_answer(canonical) == normalize_answer(answer)
}

// ============================================================================
// Judging
// ============================================================================

/// Outcome of one answer check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JudgeResult {
  pub correct: bool,
  #[serde(rename = "correct_answer")]
  pub canonical_answer: String,
  #[serde(rename = "word")]
  pub display_word: String,
  pub translation: String,
  pub example: String,
  pub example_translation: String,
  #[serde(rename = "isUserWord")]
  pub is_user_word: bool,
}

pub fn judge(word: &Word, raw_answer: &str) -> JudgeResult {
  JudgeResult {
    correct: is_correct(&word.pinyin, raw_answer),
    canonical_answer: word.pinyin.clone(),
    display_word: word.simplified.clone(),
    translation: word.translation.clone(),
    example: word.example.clone().unwrap_or_default(),
    example_translation: word.example_translation.clone().unwrap_or_default(),
    is_user_word: word.is_user_word(),
  }
}

/// Judge an answer for `word_id` within a caller-scoped word list.
///
/// `words` must come from `WordStore::get_all` with the same caller, so private words of
/// other accounts are not addressable. A signed-in caller gets `total_answers` (and
/// `correct_answers` when right) bumped; that update is best-effort.
pub fn check_answer(
  words: &[Word],
  word_id: &str,
  raw_answer: &str,
  caller: Option<&AccountId>,
  accounts: &AccountStore,
) -> AppResult<JudgeResult> {
  let word = words
    .iter()
    .find(|w| w.id.matches(word_id))
    .ok_or_else(|| AppError::not_found("Word not found"))?;

  let result = judge(word, raw_answer);

  if let Some(account_id) = caller {
    accounts
      .record_answer(account_id, result.correct)
      .log_warn("Failed to update answer stats");
  }

  Ok(result)
}
