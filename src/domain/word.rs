use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::account::AccountId;

/// Wire prefix that marks an id as belonging to a private (account-owned) word
pub const PRIVATE_ID_PREFIX: &str = "user_";

/// Id of a record inside its own collection.
///
/// Stored ids may be JSON strings or numbers. `"12"` and `12` address the same record, but
/// the stored form is kept so a record serializes back exactly as it was read.
#[derive(Debug, Clone)]
pub struct RecordId {
  key: String,
  number: Option<serde_json::Number>,
}

impl RecordId {
  pub fn as_str(&self) -> &str {
    &self.key
  }
}

impl PartialEq for RecordId {
  fn eq(&self, other: &Self) -> bool {
    self.key == other.key
  }
}

impl Eq for RecordId {}

impl Hash for RecordId {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.key.hash(state);
  }
}

impl From<String> for RecordId {
  fn from(key: String) -> Self {
    Self { key, number: None }
  }
}

impl From<&str> for RecordId {
  fn from(key: &str) -> Self {
    Self::from(key.to_string())
  }
}

impl fmt::Display for RecordId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.key)
  }
}

impl Serialize for RecordId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match &self.number {
      Some(n) => n.serialize(serializer),
      None => serializer.serialize_str(&self.key),
    }
  }
}

impl<'de> Deserialize<'de> for RecordId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Ok(match LooseId::deserialize(deserializer)? {
      LooseId::Text(key) => Self { key, number: None },
      LooseId::Number(n) => Self {
        key: n.to_string(),
        number: Some(n),
      },
    })
  }
}

/// Identifier of a word inside the merged collection.
///
/// Shared-dictionary and private words live in separate id spaces, so the origin is part
/// of the id. Only the wire form of a private id carries the `user_` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WordId {
  Shared(RecordId),
  Private(RecordId),
}

impl WordId {
  /// Parse a wire id as sent by clients
  pub fn parse(wire: &str) -> Self {
    match wire.strip_prefix(PRIVATE_ID_PREFIX) {
      Some(raw) => Self::Private(raw.into()),
      None => Self::Shared(wire.into()),
    }
  }

  /// Id as stored in the owning collection
  pub fn raw(&self) -> &str {
    match self {
      Self::Shared(raw) | Self::Private(raw) => raw.as_str(),
    }
  }

  pub fn is_private(&self) -> bool {
    matches!(self, Self::Private(_))
  }

  /// Exact string comparison against a wire id, without building the wire form
  pub fn matches(&self, wire: &str) -> bool {
    match self {
      Self::Shared(raw) => raw.as_str() == wire,
      Self::Private(raw) => wire.strip_prefix(PRIVATE_ID_PREFIX) == Some(raw.as_str()),
    }
  }
}

impl fmt::Display for WordId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Shared(raw) => write!(f, "{}", raw),
      Self::Private(raw) => write!(f, "{}{}", PRIVATE_ID_PREFIX, raw),
    }
  }
}

/// Shared ids keep their stored JSON form; private ids are always prefixed strings
impl Serialize for WordId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      Self::Shared(raw) => raw.serialize(serializer),
      Self::Private(_) => serializer.collect_str(self),
    }
  }
}

/// Ids arrive as JSON strings or numbers (`"12"` and `12` address the same word)
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseId {
  Text(String),
  Number(serde_json::Number),
}

impl From<LooseId> for String {
  fn from(id: LooseId) -> Self {
    match id {
      LooseId::Text(s) => s,
      LooseId::Number(n) => n.to_string(),
    }
  }
}

pub fn deserialize_opt_loose_id<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> Result<Option<String>, D::Error> {
  Option::<LooseId>::deserialize(deserializer).map(|id| id.map(String::from))
}

/// A word as persisted in `dictionary.json` or `user_words.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
  pub id: RecordId,
  /// Owner of a private word; never set on dictionary entries
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user_id: Option<AccountId>,
  pub simplified: String,
  pub pinyin: String,
  pub translation: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub example: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub example_translation: Option<String>,
  /// Epoch millis, set on private words
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<i64>,
  /// Fields this service does not interpret, carried through untouched
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// A word as seen by callers: a dictionary or private record with its merged id
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
  pub id: WordId,
  pub user_id: Option<AccountId>,
  pub simplified: String,
  pub pinyin: String,
  pub translation: String,
  pub example: Option<String>,
  pub example_translation: Option<String>,
  pub created_at: Option<i64>,
  pub extra: Map<String, Value>,
}

impl Word {
  pub fn shared(record: WordRecord) -> Self {
    Self::from_record(WordId::Shared(record.id.clone()), record)
  }

  pub fn private(record: WordRecord) -> Self {
    Self::from_record(WordId::Private(record.id.clone()), record)
  }

  fn from_record(id: WordId, record: WordRecord) -> Self {
    Self {
      id,
      user_id: record.user_id,
      simplified: record.simplified,
      pinyin: record.pinyin,
      translation: record.translation,
      example: record.example,
      example_translation: record.example_translation,
      created_at: record.created_at,
      extra: record.extra,
    }
  }

  pub fn is_user_word(&self) -> bool {
    self.id.is_private()
  }
}

#[derive(Serialize)]
struct WordJson<'a> {
  id: &'a WordId,
  #[serde(skip_serializing_if = "Option::is_none")]
  user_id: Option<&'a AccountId>,
  simplified: &'a str,
  pinyin: &'a str,
  translation: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  example: Option<&'a str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  example_translation: Option<&'a str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  created_at: Option<i64>,
  #[serde(rename = "isUserWord")]
  is_user_word: bool,
}

impl Serialize for Word {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let known = serde_json::to_value(WordJson {
      id: &self.id,
      user_id: self.user_id.as_ref(),
      simplified: &self.simplified,
      pinyin: &self.pinyin,
      translation: &self.translation,
      example: self.example.as_deref(),
      example_translation: self.example_translation.as_deref(),
      created_at: self.created_at,
      is_user_word: self.is_user_word(),
    })
    .map_err(<S::Error as serde::ser::Error>::custom)?;

    // Known fields win over stored extras with the same name
    let mut out = self.extra.clone();
    if let Value::Object(fields) = known {
      out.extend(fields);
    }
    out.serialize(serializer)
  }
}

/// Fields submitted when adding a private word
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewWord {
  #[serde(default)]
  pub simplified: String,
  #[serde(default)]
  pub pinyin: String,
  #[serde(default)]
  pub translation: String,
  #[serde(default)]
  pub example: Option<String>,
  #[serde(default)]
  pub example_translation: Option<String>,
}
