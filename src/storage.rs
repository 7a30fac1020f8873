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

//! Flat-file account storage.
//!
//! The file holds a single JSON array of account objects:
//!
//! ```json
//! [{"id":1,"type":"personal","person_name":"Alice","address":"1 Main St"}]
//! ```
//!
//! Every save overwrites the whole file. There is no counter metadata; the
//! registry derives the next id from the records it loads.

use crate::account::Account;
use crate::error::StorageError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default file name, relative to the working directory.
pub const DEFAULT_ACCOUNT_FILE: &str = "account.txt";

/// Handle to the account file on disk.
#[derive(Debug, Clone)]
pub struct AccountFile {
    path: PathBuf,
}

impl AccountFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every account from the file.
    ///
    /// A missing file yields an empty collection.
    ///
    /// # Errors
    ///
    /// - [`StorageError::Io`] - The file exists but could not be read.
    /// - [`StorageError::Malformed`] - The contents are not a JSON array of accounts.
    pub fn load(&self) -> Result<Vec<Account>, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| StorageError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrites the file with the given accounts.
    pub fn save(&self, accounts: &[Account]) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(accounts)?;
        fs::write(&self.path, bytes).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl Default for AccountFile {
    fn default() -> Self {
        Self::new(DEFAULT_ACCOUNT_FILE)
    }
}
