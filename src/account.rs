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

//! Account state.
//!
//! Each account holds an exact-decimal balance and an append-only transaction
//! history, created empty when the account is loaded. The balance may go
//! negative; the ledger decides when that incurs a fee.

use crate::transaction::HistoryEntry;
use chrono::Utc;
use parking_lot::Mutex;
use rust_decimal::Decimal;

#[derive(Debug)]
struct AccountData {
    balance: Decimal,
    history: Vec<HistoryEntry>,
}

impl AccountData {
    fn new(balance: Decimal) -> Self {
        Self {
            balance,
            history: Vec::new(),
        }
    }

    /// Appends a history entry snapshotting the current balance.
    fn record(&mut self, amount: Decimal) {
        self.history.push(HistoryEntry {
            date: Utc::now(),
            amount,
            balance: self.balance,
        });
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.balance.scale() <= 2,
            "Invariant violated: balance precision exceeded cents: {}",
            self.balance
        );
    }
}

/// A single account's balance and history behind a mutex.
#[derive(Debug)]
pub struct Account {
    inner: Mutex<AccountData>,
}

impl Account {
    pub fn new(balance: Decimal) -> Self {
        Self {
            inner: Mutex::new(AccountData::new(balance)),
        }
    }

    pub fn balance(&self) -> Decimal {
        self.inner.lock().balance
    }

    /// Returns a snapshot of the history in insertion order.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.inner.lock().history.clone()
    }

    /// Adds `amount` to the balance and records one history entry.
    ///
    /// Returns the new balance.
    pub(crate) fn credit(&self, amount: Decimal) -> Decimal {
        let mut data = self.inner.lock();
        data.balance += amount;
        data.record(amount);
        data.assert_invariants();
        data.balance
    }

    /// Subtracts `amount` from the balance, recording one history entry, and
    /// applies `overdraft_fee` as a second entry when the balance lands below
    /// zero. Both entries are appended under one lock so they stay adjacent.
    ///
    /// Returns the new balance and whether the fee was charged.
    pub(crate) fn debit(&self, amount: Decimal, overdraft_fee: Decimal) -> (Decimal, bool) {
        let mut data = self.inner.lock();
        data.balance -= amount;
        data.record(-amount);

        let mut was_overdrawn = false;
        if data.balance < Decimal::ZERO {
            data.balance -= overdraft_fee;
            data.record(-overdraft_fee);
            was_overdrawn = true;
        }

        data.assert_invariants();
        (data.balance, was_overdrawn)
    }
}
