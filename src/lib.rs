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

//! # ATM Simulator
//!
//! This library implements the engine behind a single-session ATM simulator:
//! an in-memory ledger of accounts with PIN-based authentication, deposits,
//! withdrawals with overdraft and cash-dispensing rules, per-account
//! transaction history, and an idle-expiring login session.
//!
//! ## Core Components
//!
//! - [`Ledger`]: account balances, machine cash and the withdrawal rules
//! - [`Authorization`]: salted-hash PIN credentials and authentication
//! - [`Session`]: the single active login, shared with the expiry monitor
//! - [`ExpiryMonitor`]: background sweep that logs out idle sessions
//! - [`Shell`]: maps command lines onto the services above
//! - [`loader`]: reads the startup account-data CSV
//!
//! ## Example
//!
//! ```
//! use atm_sim_rs::{AccountId, Ledger};
//! use rust_decimal_macros::dec;
//! use std::collections::HashMap;
//!
//! let ledger = Ledger::new();
//! ledger.set_initial_balances(
//!     dec!(10000.00),
//!     HashMap::from([(AccountId::from("2859459814"), dec!(40.00))]),
//! );
//!
//! let result = ledger.withdraw(&AccountId::from("2859459814"), "20.00").unwrap();
//! assert_eq!(result.remaining_balance, dec!(20.00));
//! assert!(!result.was_overdrawn);
//! ```
//!
//! ## Thread Safety
//!
//! A single user session means commands never overlap, but the expiry monitor
//! runs concurrently with command dispatch. Session transitions happen under
//! one mutex, and the ledger serializes mutations defensively through
//! per-account locks plus a machine-cash lock.

mod account;
mod authorization;
mod base;
mod encryption;
mod error;
mod ledger;
pub mod loader;
mod money;
mod monitor;
mod session;
mod shell;
mod transaction;

pub use account::Account;
pub use authorization::Authorization;
pub use base::AccountId;
pub use encryption::{EncryptedPin, HASH_ITERATIONS, encrypt_pin, verify_pin};
pub use error::AtmError;
pub use ledger::{DISPENSE_UNIT, Ledger, OVERDRAFT_FEE};
pub use money::parse_money;
pub use monitor::{ExpiryMonitor, SWEEP_PERIOD};
pub use session::{IDLE_TIMEOUT, Session};
pub use shell::{Outcome, Shell};
pub use transaction::{HistoryEntry, WithdrawResult};
