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

//! The ledger engine.
//!
//! The [`Ledger`] owns every account balance, each account's transaction
//! history, and the pool of cash the machine can still dispense. Deposits and
//! withdrawals enforce the machine's business rules:
//!
//! - withdrawals are blocked while the balance is at or below zero
//! - withdrawals are blocked while the machine is out of cash
//! - withdrawals must be requested in units of $20
//! - a request larger than the remaining cash is silently capped (partial
//!   fulfilment)
//! - a withdrawal that drives the balance negative incurs a flat overdraft
//!   fee, recorded as its own history entry
//!
//! Every failing branch returns before any state is mutated.
//!
//! # Invariants
//!
//! - Balances and available cash carry at most two decimal places.
//! - Per-account history is ordered by insertion.
//! - Available cash never increases after [`Ledger::set_initial_balances`];
//!   there is no re-supply operation.

use crate::account::Account;
use crate::base::AccountId;
use crate::error::AtmError;
use crate::money::parse_money;
use crate::transaction::{HistoryEntry, WithdrawResult};
use dashmap::DashMap;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use tracing::info;

/// Flat fee charged when a withdrawal drives the balance below zero.
///
/// The fee is ledger money, not dispensed currency, so it never reduces the
/// machine's available cash.
pub const OVERDRAFT_FEE: Decimal = dec!(5.00);

/// Withdrawals must be requested in multiples of this amount.
pub const DISPENSE_UNIT: Decimal = dec!(20.00);

/// In-memory ledger of accounts plus the machine's dispensable cash.
///
/// Lock order: the available-cash mutex is acquired before any account lock.
/// Only [`Ledger::withdraw`] ever holds both.
pub struct Ledger {
    /// Accounts indexed by account ID.
    accounts: DashMap<AccountId, Account>,
    /// Total currency the machine can still physically dispense.
    available_cash: Mutex<Decimal>,
}

impl Ledger {
    /// Creates an empty ledger with no accounts and no cash.
    pub fn new() -> Self {
        Ledger {
            accounts: DashMap::new(),
            available_cash: Mutex::new(Decimal::ZERO),
        }
    }

    /// Replaces all balances and sets the machine's starting cash.
    ///
    /// Called once at startup by the account-data loader. Balances are
    /// normalized to cents; histories start empty.
    pub fn set_initial_balances(
        &self,
        available_cash: Decimal,
        balances: HashMap<AccountId, Decimal>,
    ) {
        *self.available_cash.lock() = available_cash.round_dp(2);
        self.accounts.clear();
        for (account_id, balance) in balances {
            self.accounts
                .insert(account_id, Account::new(balance.round_dp(2)));
        }
        info!(accounts = self.accounts.len(), "initial balances set");
    }

    /// Returns the cash the machine can still dispense.
    pub fn available_cash(&self) -> Decimal {
        *self.available_cash.lock()
    }

    /// Returns the current balance; a missing account reads as zero.
    pub fn get_balance(&self, account_id: &AccountId) -> Decimal {
        self.accounts
            .get(account_id)
            .map(|account| account.balance())
            .unwrap_or(Decimal::ZERO)
    }

    /// Parses `amount` and adds it to the account's balance.
    ///
    /// Returns the new balance. On a parse failure the balance is unchanged
    /// and the account is not created.
    ///
    /// # Errors
    ///
    /// - [`AtmError::InvalidAmount`] when `amount` is not a valid monetary
    ///   string.
    pub fn deposit(&self, account_id: &AccountId, amount: &str) -> Result<Decimal, AtmError> {
        let amount = parse_money(amount)?;
        let account = self
            .accounts
            .entry(account_id.clone())
            .or_insert_with(|| Account::new(Decimal::ZERO));
        let new_balance = account.credit(amount);
        info!(%account_id, %amount, %new_balance, "deposit applied");
        Ok(new_balance)
    }

    /// Withdraws cash from the account.
    ///
    /// The checks run in a fixed order: overdrawn balance, empty machine,
    /// amount parse, $20 granularity. A request exceeding the remaining cash
    /// is capped, not rejected. When the resulting balance is negative the
    /// flat [`OVERDRAFT_FEE`] is applied as a follow-on history entry. The
    /// machine's cash is reduced by the dispensed amount only.
    ///
    /// # Errors
    ///
    /// - [`AtmError::Overdrawn`] when the balance is already at or below zero.
    /// - [`AtmError::NoMoneyLeft`] when the machine has no cash.
    /// - [`AtmError::InvalidAmount`] when `amount` is malformed or not a
    ///   multiple of $20.
    pub fn withdraw(
        &self,
        account_id: &AccountId,
        amount: &str,
    ) -> Result<WithdrawResult, AtmError> {
        if self.get_balance(account_id) <= Decimal::ZERO {
            return Err(AtmError::Overdrawn);
        }

        let mut cash = self.available_cash.lock();
        if cash.is_zero() {
            return Err(AtmError::NoMoneyLeft);
        }

        let requested = parse_money(amount)?;
        if !(requested % DISPENSE_UNIT).is_zero() {
            return Err(AtmError::InvalidAmount(
                "Withdrawals must be in units of $20.".to_string(),
            ));
        }

        // Partial fulfilment: dispense whatever the machine still holds.
        let dispensed = requested.min(*cash);

        let account = self
            .accounts
            .entry(account_id.clone())
            .or_insert_with(|| Account::new(Decimal::ZERO));
        let (remaining_balance, was_overdrawn) = account.debit(dispensed, OVERDRAFT_FEE);
        *cash -= dispensed;

        info!(
            %account_id,
            %dispensed,
            %remaining_balance,
            was_overdrawn,
            "withdrawal dispensed"
        );
        Ok(WithdrawResult {
            amount_withdrawn: dispensed,
            remaining_balance,
            was_overdrawn,
        })
    }

    /// Returns the account's transaction history in insertion order.
    ///
    /// A missing account yields an empty history, not an error.
    pub fn get_history(&self, account_id: &AccountId) -> Vec<HistoryEntry> {
        self.accounts
            .get(account_id)
            .map(|account| account.history())
            .unwrap_or_default()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
