//! Core services over the persisted collections.

pub mod accounts;
pub mod stats;
pub mod word_store;

pub use accounts::AccountStore;
pub use word_store::WordStore;
