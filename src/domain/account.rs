use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
  pub fn new(id: impl Into<String>) -> Self {
    Self(id.into())
  }

  pub fn generate() -> Self {
    Self(uuid::Uuid::new_v4().to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for AccountId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// The four progress counters kept per account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatCounter {
  WordsAdded,
  GamesPlayed,
  CorrectAnswers,
  TotalAnswers,
}

impl StatCounter {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "words_added" => Some(Self::WordsAdded),
      "games_played" => Some(Self::GamesPlayed),
      "correct_answers" => Some(Self::CorrectAnswers),
      "total_answers" => Some(Self::TotalAnswers),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::WordsAdded => "words_added",
      Self::GamesPlayed => "games_played",
      Self::CorrectAnswers => "correct_answers",
      Self::TotalAnswers => "total_answers",
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
  #[serde(default)]
  pub words_added: u64,
  #[serde(default)]
  pub games_played: u64,
  #[serde(default)]
  pub correct_answers: u64,
  #[serde(default)]
  pub total_answers: u64,
}

impl Stats {
  pub fn get(&self, counter: StatCounter) -> u64 {
    match counter {
      StatCounter::WordsAdded => self.words_added,
      StatCounter::GamesPlayed => self.games_played,
      StatCounter::CorrectAnswers => self.correct_answers,
      StatCounter::TotalAnswers => self.total_answers,
    }
  }

  fn slot_mut(&mut self, counter: StatCounter) -> &mut u64 {
    match counter {
      StatCounter::WordsAdded => &mut self.words_added,
      StatCounter::GamesPlayed => &mut self.games_played,
      StatCounter::CorrectAnswers => &mut self.correct_answers,
      StatCounter::TotalAnswers => &mut self.total_answers,
    }
  }

  /// Add a signed delta to one counter, clamping to `0..=u64::MAX`. Returns the new value.
  pub fn apply(&mut self, counter: StatCounter, delta: i64) -> u64 {
    let slot = self.slot_mut(counter);
    *slot = if delta >= 0 {
      slot.saturating_add(delta as u64)
    } else {
      slot.saturating_sub(delta.unsigned_abs())
    };
    *slot
  }
}

/// A registered account as stored in `users.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
  pub id: AccountId,
  pub username: String,
  /// Argon2 PHC string
  pub password_hash: String,
  #[serde(default)]
  pub email: Option<String>,
  /// Epoch millis
  pub created_at: i64,
  #[serde(default)]
  pub stats: Stats,
}

/// Account fields safe to hand back to clients
#[derive(Debug, Clone, Serialize)]
pub struct PublicAccount {
  pub id: AccountId,
  pub username: String,
  pub email: Option<String>,
  pub stats: Stats,
}

impl From<&Account> for PublicAccount {
  fn from(account: &Account) -> Self {
    Self {
      id: account.id.clone(),
      username: account.username.clone(),
      email: account.email.clone(),
      stats: account.stats,
    }
  }
}
