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

//! Bulk account-data loader.
//!
//! Reads the tabular account file supplied at startup. The file is a
//! headered CSV with the required columns `ACCOUNT_ID`, `PIN` and `BALANCE`;
//! a missing column is fatal, a malformed row is skipped with a logged
//! warning. PINs are hashed as rows are read and the plaintext is dropped.

use crate::base::AccountId;
use crate::encryption::{EncryptedPin, encrypt_pin};
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Columns the account file must carry.
const REQUIRED_COLUMNS: [&str; 3] = ["ACCOUNT_ID", "PIN", "BALANCE"];

/// Fatal load-time failures.
///
/// Anything recoverable (a malformed row) is skipped with a warning instead
/// of surfacing here.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read account data: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse account data: {0}")]
    Csv(#[from] csv::Error),

    #[error("column index missing for {0}")]
    MissingColumn(&'static str),
}

/// One row of the account file.
#[derive(Debug, Deserialize)]
struct AccountRecord {
    #[serde(rename = "ACCOUNT_ID")]
    account_id: String,
    #[serde(rename = "PIN")]
    pin: String,
    #[serde(rename = "BALANCE")]
    balance: Decimal,
}

/// Everything the startup wiring needs from the account file.
#[derive(Debug)]
pub struct AccountData {
    pub credentials: HashMap<AccountId, EncryptedPin>,
    pub balances: HashMap<AccountId, Decimal>,
}

/// Loads account data from a CSV file on disk.
///
/// # Errors
///
/// Returns [`LoadError`] when the file cannot be opened or read, or when a
/// required column is absent.
pub fn load_accounts(path: &Path) -> Result<AccountData, LoadError> {
    info!(path = %path.display(), "reading account data");
    let file = File::open(path)?;
    read_accounts(BufReader::new(file))
}

/// Reads account data from any CSV source.
pub fn read_accounts<R: Read>(reader: R) -> Result<AccountData, LoadError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == required) {
            return Err(LoadError::MissingColumn(required));
        }
    }

    let mut credentials = HashMap::new();
    let mut balances = HashMap::new();
    for (row, result) in rdr.deserialize::<AccountRecord>().enumerate() {
        match result {
            Ok(record) => {
                let account_id = AccountId(record.account_id);
                credentials.insert(account_id.clone(), encrypt_pin(&record.pin));
                balances.insert(account_id, record.balance.round_dp(2));
            }
            Err(e) => {
                // Row numbers are 1-based and exclude the header line.
                warn!(row = row + 1, error = %e, "skipping malformed account record");
            }
        }
    }

    info!(accounts = balances.len(), "account data loaded");
    Ok(AccountData {
        credentials,
        balances,
    })
}
