//! Practice set selection.
//!
//! A practice set is either the words the caller picked or a random sample of the
//! merged collection. It is shuffled in both cases, so picked words do not come back in
//! request order.

use rand::seq::{index, SliceRandom};
use rand::Rng;
use std::collections::HashSet;

use crate::domain::Word;

/// Build a practice set from `words`.
///
/// - `requested_ids` non-empty: the words whose wire id is requested, in `words` order
///   before shuffling. Unknown ids are ignored.
/// - otherwise: `min(practice_size, words.len())` distinct words drawn uniformly.
pub fn select_practice<R: Rng + ?Sized>(
  words: &[Word],
  requested_ids: Option<&HashSet<String>>,
  practice_size: usize,
  rng: &mut R,
) -> Vec<Word> {
  let mut selected: Vec<Word> = match requested_ids {
    Some(ids) if !ids.is_empty() => words
      .iter()
      .filter(|w| ids.contains(w.id.to_string().as_str()))
      .cloned()
      .collect(),
    _ => {
      let amount = practice_size.min(words.len());
      index::sample(rng, words.len(), amount)
        .into_iter()
        .map(|i| words[i].clone())
        .collect()
    }
  };

  selected.shuffle(rng);
  selected
}
