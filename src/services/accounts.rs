//! Account registration, login and lookup over the accounts collection.

use chrono::Utc;
use std::sync::Arc;

use crate::auth::password;
use crate::config::{MIN_PASSWORD_LEN, MIN_USERNAME_LEN};
use crate::domain::{Account, AccountId, Stats};
use crate::error::{AppError, AppResult};
use crate::store::{modify, Repository};

pub struct AccountStore {
    pub(crate) accounts: Arc<dyn Repository<Account>>,
}

impl AccountStore {
    pub fn new(accounts: Arc<dyn Repository<Account>>) -> Self {
        Self { accounts }
    }

    pub fn find(&self, id: &AccountId) -> AppResult<Option<Account>> {
        let accounts = self.accounts.load_all()?;
        Ok(accounts.into_iter().find(|a| &a.id == id))
    }

    /// Create an account. Username and password are trimmed; empty email is treated as none.
    pub fn register(&self, username: &str, password: &str, email: Option<&str>) -> AppResult<Account> {
        let username = username.trim();
        let password = password.trim();
        let email = email.map(str::trim).filter(|e| !e.is_empty());

        if username.is_empty() || password.is_empty() {
            return Err(AppError::validation("Username and password are required"));
        }
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(AppError::validation(format!(
                "Username must be at least {} characters",
                MIN_USERNAME_LEN
            )));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        // Hash outside the collection lock, Argon2 is slow on purpose
        let password_hash = password::hash_password(password)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

        let account = modify(self.accounts.as_ref(), |accounts: &mut Vec<Account>| {
            if accounts.iter().any(|a| a.username == username) {
                return Err(AppError::validation("Username already exists"));
            }

            let mut id = AccountId::generate();
            while accounts.iter().any(|a| a.id == id) {
                id = AccountId::generate();
            }

            let account = Account {
                id,
                username: username.to_string(),
                password_hash,
                email: email.map(str::to_string),
                created_at: Utc::now().timestamp_millis(),
                stats: Stats::default(),
            };
            accounts.push(account.clone());
            Ok(account)
        })?;

        tracing::info!("Registered account {} ({})", account.username, account.id);
        Ok(account)
    }

    /// Check credentials. Unknown usernames are `NotFound`, bad passwords `Unauthorized`.
    pub fn authenticate(&self, username: &str, password: &str) -> AppResult<Account> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AppError::validation("Username and password are required"));
        }

        let account = self
            .accounts
            .load_all()?
            .into_iter()
            .find(|a| a.username == username)
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !password::verify_password(password, &account.password_hash) {
            return Err(AppError::Unauthorized("Wrong password".to_string()));
        }
        Ok(account)
    }
}
