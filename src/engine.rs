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

//! Record-keeping engine.
//!
//! The [`Engine`] is the single service object behind the HTTP surface. It owns
//! the [`AccountRegistry`] and the [`PaymentLedger`] and is built once at
//! startup, then shared by handle.
//!
//! # Operations
//!
//! - **Accounts**: create, list, get, delete. Mirrored to the account file when
//!   persistence is enabled.
//! - **Payments**: create, list, get. Memory only; references are validated
//!   against the registry at creation time.

use crate::account::{Account, NewAccount};
use crate::base::{AccountId, PaymentId};
use crate::error::RecordError;
use crate::ledger::PaymentLedger;
use crate::payment::{NewPayment, Payment};
use crate::registry::AccountRegistry;
use crate::storage::AccountFile;

/// Record-keeping engine for accounts and payments.
///
/// # Invariants
///
/// - Account ids are unique and never reused, even after deletion.
/// - Payments are only created against accounts that exist at that moment.
/// - Deleting an account does not touch payments that reference it.
#[derive(Debug, Default)]
pub struct Engine {
    accounts: AccountRegistry,
    payments: PaymentLedger,
}

impl Engine {
    /// Creates an engine that keeps accounts in memory only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine whose accounts are loaded from and saved to `storage`.
    pub fn with_storage(storage: AccountFile) -> Self {
        Engine {
            accounts: AccountRegistry::open(storage),
            payments: PaymentLedger::new(),
        }
    }

    pub fn create_account(&self, request: NewAccount) -> Result<Account, RecordError> {
        self.accounts.create(request)
    }

    pub fn list_accounts(&self) -> Vec<Account> {
        self.accounts.list()
    }

    pub fn get_account(&self, id: AccountId) -> Result<Account, RecordError> {
        self.accounts.get(id)
    }

    pub fn delete_account(&self, id: AccountId) -> Result<(), RecordError> {
        self.accounts.delete(id)
    }

    /// Records a payment.
    ///
    /// # Errors
    ///
    /// - [`RecordError::InvalidAmount`] - Amount is zero or negative.
    /// - [`RecordError::InvalidAccountReference`] - Either account is unknown.
    pub fn create_payment(&self, request: NewPayment) -> Result<Payment, RecordError> {
        self.payments.create(&self.accounts, request)
    }

    pub fn list_payments(&self) -> Vec<Payment> {
        self.payments.list()
    }

    pub fn get_payment(&self, id: &PaymentId) -> Result<Payment, RecordError> {
        self.payments.get(id)
    }
}
