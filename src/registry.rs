// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Account registry.
//!
//! Owns every [`Account`] and the id counter, and mirrors the collection to an
//! optional [`AccountFile`] after each create or delete.
//!
//! # Example
//!
//! ```
//! use account_ledger_rs::{AccountId, AccountRegistry, AccountType, NewAccount};
//!
//! let registry = AccountRegistry::in_memory();
//! let account = registry
//!     .create(NewAccount {
//!         account_type: AccountType::Business,
//!         person_name: "Bob".to_string(),
//!         address: "2 Oak St".to_string(),
//!     })
//!     .unwrap();
//! assert_eq!(account.id(), AccountId(1));
//! ```

use crate::account::{Account, NewAccount};
use crate::base::AccountId;
use crate::error::RecordError;
use crate::storage::AccountFile;
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

#[derive(Debug)]
struct RegistryData {
    /// Accounts in creation order.
    accounts: Vec<Account>,
    /// Next id to hand out. Never decremented, not even on delete.
    next_id: i64,
}

impl RegistryData {
    /// Returns `None` when the highest loaded id leaves no room for another.
    fn new(accounts: Vec<Account>) -> Option<Self> {
        let next_id = accounts
            .iter()
            .map(|a| a.id().0)
            .max()
            .unwrap_or(0)
            .checked_add(1)?;
        Some(Self { accounts, next_id })
    }

    fn empty() -> Self {
        Self {
            accounts: Vec::new(),
            next_id: 1,
        }
    }

    fn position(&self, id: AccountId) -> Option<usize> {
        self.accounts.iter().position(|a| a.id() == id)
    }
}

/// Registry of accounts.
///
/// All mutations (counter increment, collection change, file rewrite) happen
/// under a single lock, so concurrent handlers never interleave writes.
#[derive(Debug)]
pub struct AccountRegistry {
    inner: Mutex<RegistryData>,
    storage: Option<AccountFile>,
}

impl AccountRegistry {
    /// Creates an empty registry that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            inner: Mutex::new(RegistryData::empty()),
            storage: None,
        }
    }

    /// Creates a registry backed by `storage`, loading any accounts already on disk.
    ///
    /// An unreadable or corrupt file, or one whose highest id is `i64::MAX`,
    /// is logged and the registry starts empty; the file is then overwritten
    /// by the next successful mutation.
    pub fn open(storage: AccountFile) -> Self {
        let data = match storage.load() {
            Ok(accounts) => {
                let count = accounts.len();
                match RegistryData::new(accounts) {
                    Some(data) => {
                        info!(path = %storage.path().display(), count, "Loaded accounts");
                        data
                    }
                    None => {
                        warn!(
                            path = %storage.path().display(),
                            "Account ids in file leave no room for new ids, starting empty"
                        );
                        RegistryData::empty()
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "Could not load accounts, starting empty");
                RegistryData::empty()
            }
        };

        Self {
            inner: Mutex::new(data),
            storage: Some(storage),
        }
    }

    /// Registers a new account under the next id.
    ///
    /// # Errors
    ///
    /// - [`RecordError::IdsExhausted`] - The counter has reached `i64::MAX`.
    /// - [`RecordError::Persistence`] - The file rewrite failed. The account is
    ///   discarded and its id is handed out again on the next attempt.
    pub fn create(&self, request: NewAccount) -> Result<Account, RecordError> {
        let mut data = self.inner.lock();
        let next_id = data.next_id.checked_add(1).ok_or(RecordError::IdsExhausted)?;
        let account = Account::from_request(AccountId(data.next_id), request);
        data.accounts.push(account.clone());

        if let Err(e) = self.persist(&data.accounts) {
            data.accounts.pop();
            return Err(e);
        }

        data.next_id = next_id;
        debug!(account_id = %account.id(), account_type = %account.account_type(), "Account created");
        Ok(account)
    }

    /// Returns every account in creation order.
    pub fn list(&self) -> Vec<Account> {
        self.inner.lock().accounts.clone()
    }

    /// Looks up an account by id.
    pub fn get(&self, id: AccountId) -> Result<Account, RecordError> {
        let data = self.inner.lock();
        data.position(id)
            .map(|i| data.accounts[i].clone())
            .ok_or(RecordError::AccountNotFound)
    }

    /// Returns `true` if an account with `id` currently exists.
    pub fn contains(&self, id: AccountId) -> bool {
        self.inner.lock().position(id).is_some()
    }

    /// Removes an account.
    ///
    /// Payments referencing the account are left untouched.
    ///
    /// # Errors
    ///
    /// - [`RecordError::AccountNotFound`] - No account has this id.
    /// - [`RecordError::Persistence`] - The file rewrite failed; the account is kept.
    pub fn delete(&self, id: AccountId) -> Result<(), RecordError> {
        let mut data = self.inner.lock();
        let index = data.position(id).ok_or(RecordError::AccountNotFound)?;
        let removed = data.accounts.remove(index);

        if let Err(e) = self.persist(&data.accounts) {
            data.accounts.insert(index, removed);
            return Err(e);
        }

        debug!(account_id = %id, "Account deleted");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rewrites the account file, if any.
    ///
    /// Called with the registry lock held. The write is synchronous, so under
    /// the HTTP server it blocks the tokio worker thread running the handler.
    fn persist(&self, accounts: &[Account]) -> Result<(), RecordError> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };
        storage.save(accounts).map_err(|e| {
            error!(error = %e, "Failed to persist accounts");
            RecordError::from(e)
        })
    }
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AccountType;
    use std::fs;
    use tempfile::tempdir;

    fn request(name: &str) -> NewAccount {
        NewAccount {
            account_type: AccountType::Personal,
            person_name: name.to_string(),
            address: "1 Main St".to_string(),
        }
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let registry = AccountRegistry::in_memory();
        assert_eq!(registry.create(request("a")).unwrap().id(), AccountId(1));
        assert_eq!(registry.create(request("b")).unwrap().id(), AccountId(2));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let registry = AccountRegistry::in_memory();
        registry.create(request("a")).unwrap();
        registry.create(request("b")).unwrap();
        registry.delete(AccountId(2)).unwrap();

        assert_eq!(registry.create(request("c")).unwrap().id(), AccountId(3));
    }

    #[test]
    fn delete_missing_is_not_found() {
        let registry = AccountRegistry::in_memory();
        assert!(matches!(
            registry.delete(AccountId(1)),
            Err(RecordError::AccountNotFound)
        ));
    }

    #[test]
    fn reopen_resumes_after_highest_id() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("account.txt");

        let registry = AccountRegistry::open(AccountFile::new(&path));
        registry.create(request("a")).unwrap();
        registry.create(request("b")).unwrap();
        registry.create(request("c")).unwrap();
        registry.delete(AccountId(1)).unwrap();
        drop(registry);

        let reopened = AccountRegistry::open(AccountFile::new(&path));
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.create(request("d")).unwrap().id(), AccountId(4));
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("account.txt");
        fs::write(&path, "{ broken").unwrap();

        let registry = AccountRegistry::open(AccountFile::new(&path));
        assert!(registry.is_empty());
        assert_eq!(registry.create(request("a")).unwrap().id(), AccountId(1));
    }

    #[test]
    fn file_with_max_id_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("account.txt");
        fs::write(
            &path,
            r#"[{"id":9223372036854775807,"type":"personal","person_name":"A","address":"B"}]"#,
        )
        .unwrap();

        let registry = AccountRegistry::open(AccountFile::new(&path));
        assert!(registry.is_empty());
        assert_eq!(registry.create(request("a")).unwrap().id(), AccountId(1));
    }

    #[test]
    fn exhausted_counter_refuses_create() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("account.txt");
        fs::write(
            &path,
            r#"[{"id":9223372036854775806,"type":"personal","person_name":"A","address":"B"}]"#,
        )
        .unwrap();

        let registry = AccountRegistry::open(AccountFile::new(&path));
        assert_eq!(registry.len(), 1);
        assert!(matches!(
            registry.create(request("a")),
            Err(RecordError::IdsExhausted)
        ));
        assert_eq!(registry.len(), 1);
        assert_eq!(AccountFile::new(&path).load().unwrap().len(), 1);
    }

    #[test]
    fn failed_write_rolls_back_create() {
        let dir = tempdir().unwrap();
        // A directory cannot be overwritten as a file.
        let registry = AccountRegistry::open(AccountFile::new(dir.path()));

        let result = registry.create(request("a"));

        assert!(matches!(result, Err(RecordError::Persistence(_))));
        assert!(registry.is_empty());
    }
}
