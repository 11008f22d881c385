//! Per-account progress counters.
//!
//! Every update re-reads and rewrites the whole accounts collection under its lock.

use crate::domain::{Account, AccountId, StatCounter, Stats};
use crate::error::{AppError, AppResult};
use crate::store::modify;

use super::accounts::AccountStore;

fn find_mut<'a>(accounts: &'a mut [Account], id: &AccountId) -> AppResult<&'a mut Account> {
    accounts
        .iter_mut()
        .find(|a| &a.id == id)
        .ok_or_else(AppError::unauthorized)
}

impl AccountStore {
    /// Apply `delta` to a counter given by its client-facing name.
    ///
    /// The account is resolved before the name is checked, so an unknown account is
    /// `Unauthorized` even when the name is also bad. Nothing is written on error.
    pub fn increment_named(&self, account_id: &AccountId, counter_name: &str, delta: i64) -> AppResult<Stats> {
        modify(self.accounts.as_ref(), |accounts: &mut Vec<Account>| {
            let account = find_mut(accounts, account_id)?;
            let counter = StatCounter::from_str(counter_name)
                .ok_or_else(|| AppError::validation(format!("Unknown stat type: {}", counter_name)))?;
            account.stats.apply(counter, delta);
            tracing::debug!("{} {} {:+}", account_id, counter.as_str(), delta);
            Ok(account.stats)
        })
    }

    pub fn increment(&self, account_id: &AccountId, counter: StatCounter, delta: i64) -> AppResult<Stats> {
        modify(self.accounts.as_ref(), |accounts: &mut Vec<Account>| {
            let account = find_mut(accounts, account_id)?;
            account.stats.apply(counter, delta);
            tracing::debug!("{} {} {:+}", account_id, counter.as_str(), delta);
            Ok(account.stats)
        })
    }

    /// Count one judged answer: `total_answers` always, `correct_answers` when correct.
    /// Both counters move in the same write.
    pub fn record_answer(&self, account_id: &AccountId, correct: bool) -> AppResult<Stats> {
        modify(self.accounts.as_ref(), |accounts: &mut Vec<Account>| {
            let account = find_mut(accounts, account_id)?;
            if correct {
                account.stats.apply(StatCounter::CorrectAnswers, 1);
            }
            account.stats.apply(StatCounter::TotalAnswers, 1);
            Ok(account.stats)
        })
    }
}
