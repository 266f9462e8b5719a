//! Record storage
//!
//! Handlers reach storage only through the [`Storage`] trait held in
//! [`crate::AppState`], so each test can build a fresh store. The in-memory
//! implementation stands in for a future relational store; nothing survives a
//! restart.

mod memory;

pub use memory::MemStorage;

use async_trait::async_trait;
use mnu_common::{AffiliationRecord, NewAffiliation, NewUser, UserAccount};
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Identifier space exhausted for {0}")]
    IdentifierExhausted(&'static str),

    #[error("Username already taken: {0}")]
    DuplicateUsername(String),
}

#[async_trait]
pub trait Storage: Send + Sync {
    /// Assign the next identifier and creation timestamp, then store
    async fn create_affiliation(&self, new: NewAffiliation) -> Result<AffiliationRecord, StorageError>;

    /// All affiliations in identifier (insertion) order
    async fn list_affiliations(&self) -> Result<Vec<AffiliationRecord>, StorageError>;

    async fn get_affiliation(&self, id: u64) -> Result<Option<AffiliationRecord>, StorageError>;

    /// Identifiers come from a counter independent of affiliations
    async fn create_user(&self, new: NewUser) -> Result<UserAccount, StorageError>;

    async fn get_user(&self, id: u64) -> Result<Option<UserAccount>, StorageError>;

    /// Case-sensitive exact match
    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserAccount>, StorageError>;
}
