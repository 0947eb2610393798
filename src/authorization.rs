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

//! Credential store and PIN authentication.

use crate::base::AccountId;
use crate::encryption::{EncryptedPin, verify_pin};
use crate::error::AtmError;
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::info;

/// Holds the salted PIN digests for every known account.
///
/// The store never sees a plaintext PIN after load time; candidates are
/// hashed and compared, never retained.
pub struct Authorization {
    accounts: Mutex<HashMap<AccountId, EncryptedPin>>,
}

impl Authorization {
    /// Creates an empty store that authenticates nobody.
    pub fn new() -> Self {
        Authorization {
            accounts: Mutex::new(HashMap::new()),
        }
    }

    /// Replaces the entire credential set. Called once at load time.
    pub fn set_auth_data(&self, accounts: HashMap<AccountId, EncryptedPin>) {
        let mut data = self.accounts.lock();
        *data = accounts;
        info!(accounts = data.len(), "auth data set");
    }

    /// Checks `pin` against the stored credential for `account_id`.
    ///
    /// The PIN shape is validated before any hashing: it must be non-empty,
    /// purely numeric, and exactly four digits. An unknown account is not an
    /// error; it yields a sentinel credential that matches no PIN, so the
    /// caller cannot distinguish a wrong PIN from a wrong account number.
    ///
    /// # Errors
    ///
    /// - [`AtmError::InvalidInput`] when the PIN shape is invalid. A wrong
    ///   but well-formed PIN returns `Ok(false)`, not an error.
    pub fn authenticate(&self, account_id: &AccountId, pin: &str) -> Result<bool, AtmError> {
        validate_pin(pin)?;

        // Clone the credential out so the 100k-round hash runs unlocked.
        let credential = self
            .accounts
            .lock()
            .get(account_id)
            .cloned()
            .unwrap_or_default();
        Ok(verify_pin(pin, &credential))
    }
}

impl Default for Authorization {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_pin(pin: &str) -> Result<(), AtmError> {
    if pin.is_empty() {
        return Err(AtmError::InvalidInput(format!("invalid pin: \"{pin}\"")));
    }
    if !pin.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AtmError::InvalidInput("pin must be numeric".to_string()));
    }
    if pin.len() != 4 {
        return Err(AtmError::InvalidInput(
            "the pin must be a 4-digit number".to_string(),
        ));
    }
    Ok(())
}
