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

//! Transaction value types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Immutable record of one balance-affecting event.
///
/// A withdrawal that triggers an overdraft fee produces two entries: one for
/// the dispensed amount and one for the fee, each with its own balance
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// When the event was applied.
    pub date: DateTime<Utc>,
    /// Signed amount: positive for deposits, negative for withdrawals and fees.
    pub amount: Decimal,
    /// Account balance immediately after the event.
    pub balance: Decimal,
}

/// Outcome of a successful withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawResult {
    /// Cash actually dispensed, which may be less than requested when the
    /// machine runs low.
    pub amount_withdrawn: Decimal,
    /// Account balance after the withdrawal and any overdraft fee.
    pub remaining_balance: Decimal,
    /// Whether the withdrawal drove the balance below zero and incurred the
    /// overdraft fee.
    pub was_overdrawn: bool,
}
