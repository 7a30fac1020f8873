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

//! In-memory payment ledger.
//!
//! Payments are indexed by id for lookup while a separate log keeps their
//! insertion order for listing. Nothing here is persisted.

use crate::base::PaymentId;
use crate::error::RecordError;
use crate::payment::{NewPayment, Payment};
use crate::registry::AccountRegistry;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::debug;

/// Ledger of recorded payments.
#[derive(Debug)]
pub struct PaymentLedger {
    /// Payments indexed by id.
    payments: DashMap<PaymentId, Payment>,

    /// Payment ids in creation order.
    order: Mutex<Vec<PaymentId>>,
}

impl PaymentLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self {
            payments: DashMap::new(),
            order: Mutex::new(Vec::new()),
        }
    }

    /// Records a payment between two existing accounts.
    ///
    /// The amount is validated before the account references. Paying an
    /// account from itself is allowed.
    ///
    /// # Errors
    ///
    /// - [`RecordError::InvalidAmount`] - `amount_in_euros` is zero or negative.
    /// - [`RecordError::InvalidAccountReference`] - Either account does not exist.
    pub fn create(
        &self,
        accounts: &AccountRegistry,
        request: NewPayment,
    ) -> Result<Payment, RecordError> {
        if request.amount_in_euros <= 0 {
            return Err(RecordError::InvalidAmount);
        }
        if !accounts.contains(request.from_account_id) || !accounts.contains(request.to_account_id)
        {
            return Err(RecordError::InvalidAccountReference);
        }

        let payment = Payment::from_request(PaymentId::new_v4(), request);
        let id = payment.id();

        // Holding the order lock across the insert keeps the index and the
        // log consistent for concurrent listers.
        let mut order = self.order.lock();
        self.payments.insert(id, payment.clone());
        order.push(id);

        debug!(
            payment_id = %id,
            from = %payment.from_account_id(),
            to = %payment.to_account_id(),
            amount = payment.amount_in_euros(),
            "Payment recorded"
        );
        Ok(payment)
    }

    /// Returns every payment in creation order.
    pub fn list(&self) -> Vec<Payment> {
        let order = self.order.lock();
        order
            .iter()
            .filter_map(|id| self.payments.get(id).map(|p| p.value().clone()))
            .collect()
    }

    /// Looks up a payment by id.
    pub fn get(&self, id: &PaymentId) -> Result<Payment, RecordError> {
        self.payments
            .get(id)
            .map(|p| p.value().clone())
            .ok_or(RecordError::PaymentNotFound)
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }
}

impl Default for PaymentLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AccountId, AccountType, NewAccount};
    use chrono::NaiveDate;

    fn registry_with(n: usize) -> AccountRegistry {
        let registry = AccountRegistry::in_memory();
        for i in 0..n {
            registry
                .create(NewAccount {
                    account_type: AccountType::Business,
                    person_name: format!("party {i}"),
                    address: String::new(),
                })
                .unwrap();
        }
        registry
    }

    fn payment(from: i64, to: i64, amount: i64) -> NewPayment {
        NewPayment {
            from_account_id: AccountId(from),
            to_account_id: AccountId(to),
            amount_in_euros: amount,
            payment_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn records_valid_payment() {
        let registry = registry_with(2);
        let ledger = PaymentLedger::new();

        let recorded = ledger.create(&registry, payment(1, 2, 50)).unwrap();

        assert_eq!(ledger.get(&recorded.id()).unwrap(), recorded);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn amount_is_checked_before_accounts() {
        let registry = registry_with(0);
        let ledger = PaymentLedger::new();

        assert!(matches!(
            ledger.create(&registry, payment(98, 99, 0)),
            Err(RecordError::InvalidAmount)
        ));
    }

    #[test]
    fn each_reference_is_checked() {
        let registry = registry_with(1);
        let ledger = PaymentLedger::new();

        assert!(matches!(
            ledger.create(&registry, payment(99, 1, 10)),
            Err(RecordError::InvalidAccountReference)
        ));
        assert!(matches!(
            ledger.create(&registry, payment(1, 99, 10)),
            Err(RecordError::InvalidAccountReference)
        ));
        assert!(ledger.is_empty());
    }

    #[test]
    fn self_payment_is_allowed() {
        let registry = registry_with(1);
        let ledger = PaymentLedger::new();
        assert!(ledger.create(&registry, payment(1, 1, 5)).is_ok());
    }

    #[test]
    fn list_preserves_creation_order() {
        let registry = registry_with(2);
        let ledger = PaymentLedger::new();
        let ids: Vec<_> = (1..=5)
            .map(|amount| ledger.create(&registry, payment(1, 2, amount)).unwrap().id())
            .collect();

        let listed: Vec<_> = ledger.list().iter().map(Payment::id).collect();
        assert_eq!(listed, ids);
    }

    #[test]
    fn unknown_payment_is_not_found() {
        let ledger = PaymentLedger::new();
        assert!(matches!(
            ledger.get(&PaymentId::new_v4()),
            Err(RecordError::PaymentNotFound)
        ));
    }
}
