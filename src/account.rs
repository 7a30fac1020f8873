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

//! Account records.
//!
//! An [`Account`] is immutable once the registry has assigned its id.
//!
//! # Example
//!
//! ```
//! use account_ledger_rs::{Account, AccountId, AccountType, NewAccount};
//!
//! let request = NewAccount {
//!     account_type: AccountType::Personal,
//!     person_name: "Alice".to_string(),
//!     address: "1 Main St".to_string(),
//! };
//! let account = Account::from_request(AccountId(1), request);
//! assert_eq!(account.id(), AccountId(1));
//! ```

use crate::base::AccountId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of party an account represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Business,
    Personal,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Business => f.write_str("business"),
            AccountType::Personal => f.write_str("personal"),
        }
    }
}

/// Fields supplied by a client when opening an account.
///
/// Empty strings are accepted; only presence and type are checked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewAccount {
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub person_name: String,
    pub address: String,
}

/// A registered account.
///
/// Serializes as `{id, type, person_name, address}`, which is both the HTTP
/// response shape and the on-disk record shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Account {
    id: AccountId,
    #[serde(rename = "type")]
    account_type: AccountType,
    person_name: String,
    address: String,
}

impl Account {
    pub fn from_request(id: AccountId, request: NewAccount) -> Self {
        Self {
            id,
            account_type: request.account_type,
            person_name: request.person_name,
            address: request.address,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn person_name(&self) -> &str {
        &self.person_name
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}
