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

//! Payment records.
//!
//! A payment records that an amount was directed from one account to another
//! on a given date. It does not move funds or touch any balance.

use crate::base::{AccountId, PaymentId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fields supplied by a client when recording a payment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewPayment {
    pub from_account_id: AccountId,
    pub to_account_id: AccountId,
    pub amount_in_euros: i64,
    /// Serialized as `YYYY-MM-DD`.
    pub payment_date: NaiveDate,
}

/// A recorded payment.
///
/// Account references are only checked when the payment is created; they may
/// dangle later if an account is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Payment {
    id: PaymentId,
    from_account_id: AccountId,
    to_account_id: AccountId,
    amount_in_euros: i64,
    payment_date: NaiveDate,
}

impl Payment {
    pub fn from_request(id: PaymentId, request: NewPayment) -> Self {
        Self {
            id,
            from_account_id: request.from_account_id,
            to_account_id: request.to_account_id,
            amount_in_euros: request.amount_in_euros,
            payment_date: request.payment_date,
        }
    }

    pub fn id(&self) -> PaymentId {
        self.id
    }

    pub fn from_account_id(&self) -> AccountId {
        self.from_account_id
    }

    pub fn to_account_id(&self) -> AccountId {
        self.to_account_id
    }

    pub fn amount_in_euros(&self) -> i64 {
        self.amount_in_euros
    }

    pub fn payment_date(&self) -> NaiveDate {
        self.payment_date
    }
}
