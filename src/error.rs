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

//! Error types for ledger and authorization operations.

use thiserror::Error;

/// Errors returned by ledger and authorization operations.
///
/// All variants are recoverable: they are surfaced to the user as a one-line
/// message and never terminate the process. Equality is structural on kind
/// plus message, so callers can match specific failures in tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AtmError {
    /// Input failed shape validation (PIN format, command parameters).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Monetary amount is malformed or not allowed for the operation.
    #[error("invalid input: {0}")]
    InvalidAmount(String),

    /// Withdrawal attempted while the balance is already at or below zero.
    #[error("Your account is overdrawn! You may not make withdrawals at this time.")]
    Overdrawn,

    /// Withdrawal attempted while the machine has no cash left to dispense.
    #[error("Unable to process your withdrawal at this time.")]
    NoMoneyLeft,
}
