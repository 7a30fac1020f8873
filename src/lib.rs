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

//! # Account Ledger
//!
//! This library provides a small record-keeping service for business and
//! personal accounts and the payments recorded between them. A payment is a
//! validated record of intent; no balances are tracked.
//!
//! ## Core Components
//!
//! - [`Engine`]: Service object owning the registry and the ledger
//! - [`AccountRegistry`]: Accounts, the id counter, and the optional account file
//! - [`PaymentLedger`]: In-memory payments validated against the registry
//! - [`RecordError`]: Error types for record operations
//! - [`api`]: Axum router exposing the engine over HTTP
//!
//! ## Example
//!
//! ```
//! use account_ledger_rs::{AccountId, AccountType, Engine, NewAccount, NewPayment};
//! use chrono::NaiveDate;
//!
//! let engine = Engine::new();
//!
//! for (name, account_type) in [("Alice", AccountType::Personal), ("Bob", AccountType::Business)] {
//!     engine
//!         .create_account(NewAccount {
//!             account_type,
//!             person_name: name.to_string(),
//!             address: "Main St".to_string(),
//!         })
//!         .unwrap();
//! }
//!
//! let payment = engine
//!     .create_payment(NewPayment {
//!         from_account_id: AccountId(1),
//!         to_account_id: AccountId(2),
//!         amount_in_euros: 50,
//!         payment_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     })
//!     .unwrap();
//! assert_eq!(engine.get_payment(&payment.id()).unwrap(), payment);
//! ```
//!
//! ## Thread Safety
//!
//! Each collection serializes its own mutations, so the engine can be shared
//! across request handlers behind an `Arc`.

pub mod account;
pub mod api;
mod base;
pub mod config;
mod engine;
pub mod error;
mod ledger;
pub mod logging;
pub mod payment;
mod registry;
pub mod storage;

pub use account::{Account, AccountType, NewAccount};
pub use base::{AccountId, PaymentId};
pub use config::Config;
pub use engine::Engine;
pub use error::{RecordError, StorageError};
pub use ledger::PaymentLedger;
pub use payment::{NewPayment, Payment};
pub use registry::AccountRegistry;
pub use storage::AccountFile;
