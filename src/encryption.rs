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

//! PIN hashing.
//!
//! PINs are never stored in plaintext. Each credential carries a random
//! per-account salt and a SHA-256 digest computed over the PIN plus salt,
//! re-hashed [`HASH_ITERATIONS`] times with each round feeding on the
//! previous digest.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Salt size in bytes.
const SALT_SIZE: usize = 16;

/// Number of hash rounds applied when deriving a verification digest.
pub const HASH_ITERATIONS: u32 = 100_000;

/// A salted PIN verification digest.
///
/// The default value is the "no such credential" sentinel: an empty digest
/// that no candidate PIN can ever hash to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncryptedPin {
    hash: String,
    salt: Vec<u8>,
}

/// Derives a salted verification digest for `pin` with a fresh random salt.
pub fn encrypt_pin(pin: &str) -> EncryptedPin {
    let salt = generate_salt();
    EncryptedPin {
        hash: hash_pin(pin, &salt),
        salt: salt.to_vec(),
    }
}

/// Recomputes the digest for `candidate` with the stored salt and compares it
/// against the stored digest.
pub fn verify_pin(candidate: &str, stored: &EncryptedPin) -> bool {
    hash_pin(candidate, &stored.salt) == stored.hash
}

fn generate_salt() -> [u8; SALT_SIZE] {
    let mut salt = [0u8; SALT_SIZE];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// Iterated SHA-256 over PIN‖salt, hex-encoded.
fn hash_pin(pin: &str, salt: &[u8]) -> String {
    let mut data = Vec::with_capacity(pin.len() + salt.len());
    data.extend_from_slice(pin.as_bytes());
    data.extend_from_slice(salt);
    for _ in 0..HASH_ITERATIONS {
        data = Sha256::digest(&data).to_vec();
    }
    hex::encode(data)
}
