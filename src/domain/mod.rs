pub mod account;
pub mod word;

pub use account::{Account, AccountId, PublicAccount, StatCounter, Stats};
pub use word::{NewWord, Word, WordId, WordRecord};
