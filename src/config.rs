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

//! Server configuration from command-line flags and environment variables.

use crate::logging::LogFormat;
use crate::storage::{AccountFile, DEFAULT_ACCOUNT_FILE};
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Account Ledger - record accounts and payments over HTTP
///
/// Accounts are mirrored to a JSON file unless `--in-memory` is given.
/// Payments are never persisted.
#[derive(Parser, Debug, Clone)]
#[command(name = "account-ledger")]
#[command(about = "A record-keeping service for accounts and payments", long_about = None)]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "LEDGER_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "LEDGER_PORT", default_value_t = 8000)]
    pub port: u16,

    /// File accounts are loaded from at startup and rewritten to on every change
    #[arg(long, value_name = "FILE", env = "LEDGER_DATA_FILE", default_value = DEFAULT_ACCOUNT_FILE)]
    pub data_file: PathBuf,

    /// Keep accounts in memory only
    #[arg(long, env = "LEDGER_IN_MEMORY")]
    pub in_memory: bool,

    /// Log output format
    #[arg(long, value_enum, env = "LEDGER_LOG_FORMAT", default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Account storage to use, or `None` when persistence is disabled.
    pub fn storage(&self) -> Option<AccountFile> {
        (!self.in_memory).then(|| AccountFile::new(&self.data_file))
    }
}
