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

//! Error types for record operations and account storage.

use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or writing the account file.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The file could not be read or written
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file contents are not a JSON array of accounts
    #[error("malformed account file {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory collection could not be encoded
    #[error("failed to encode accounts: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Record operation errors.
///
/// Display strings double as the `detail` text returned to HTTP clients.
#[derive(Error, Debug)]
pub enum RecordError {
    /// No account has the requested id
    #[error("Account not found")]
    AccountNotFound,

    /// No payment has the requested id
    #[error("Payment not found")]
    PaymentNotFound,

    /// Payment amount is zero or negative
    #[error("Amount must be greater than 0")]
    InvalidAmount,

    /// A payment names an account that does not exist
    #[error("Invalid account ID(s)")]
    InvalidAccountReference,

    /// The id counter cannot advance past `i64::MAX`
    #[error("Account ids exhausted")]
    IdsExhausted,

    /// The account file could not be rewritten; the mutation was rolled back
    #[error("Failed to persist accounts: {0}")]
    Persistence(#[from] StorageError),
}
