//! In-memory storage

use async_trait::async_trait;
use mnu_common::{time, AffiliationRecord, NewAffiliation, NewUser, UserAccount};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Storage, StorageError};

struct Tables {
    affiliations: BTreeMap<u64, AffiliationRecord>,
    users: BTreeMap<u64, UserAccount>,
    next_affiliation_id: u64,
    next_user_id: u64,
}

impl Tables {
    fn new() -> Self {
        Self {
            affiliations: BTreeMap::new(),
            users: BTreeMap::new(),
            next_affiliation_id: 1,
            next_user_id: 1,
        }
    }
}

/// Take the counter's value and advance it; identifiers are never reused
fn allocate(counter: &mut u64, table: &'static str) -> Result<u64, StorageError> {
    let id = *counter;
    *counter = id
        .checked_add(1)
        .ok_or(StorageError::IdentifierExhausted(table))?;
    Ok(id)
}

/// Process-lifetime store
///
/// A single write guard covers counter increment and insert, so concurrent
/// submissions never share an identifier. No guard is held across an await
/// outside this type.
pub struct MemStorage {
    tables: RwLock<Tables>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::new()),
        }
    }

    #[cfg(test)]
    fn starting_at(next_affiliation_id: u64, next_user_id: u64) -> Self {
        let mut tables = Tables::new();
        tables.next_affiliation_id = next_affiliation_id;
        tables.next_user_id = next_user_id;
        Self {
            tables: RwLock::new(tables),
        }
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn create_affiliation(&self, new: NewAffiliation) -> Result<AffiliationRecord, StorageError> {
        let mut tables = self.tables.write().await;
        let id = allocate(&mut tables.next_affiliation_id, "affiliations")?;
        let record = AffiliationRecord::new(id, new, time::now_string());
        tables.affiliations.insert(id, record.clone());
        debug!(id, "Stored affiliation");
        Ok(record)
    }

    async fn list_affiliations(&self) -> Result<Vec<AffiliationRecord>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables.affiliations.values().cloned().collect())
    }

    async fn get_affiliation(&self, id: u64) -> Result<Option<AffiliationRecord>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables.affiliations.get(&id).cloned())
    }

    async fn create_user(&self, new: NewUser) -> Result<UserAccount, StorageError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == new.username) {
            return Err(StorageError::DuplicateUsername(new.username));
        }
        let id = allocate(&mut tables.next_user_id, "users")?;
        let user = UserAccount {
            id,
            username: new.username,
            password: new.password,
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: u64) -> Result<Option<UserAccount>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserAccount>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }
}
