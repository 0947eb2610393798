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

//! Monetary input validation.
//!
//! User-supplied amounts arrive as strings and must match a deliberately
//! narrow grammar before they touch the ledger:
//!
//! - optional leading `$`
//! - a whole-dollar part whose first digit is 1-9
//! - optionally a `.` followed by exactly two fractional digits
//!
//! No thousands separators, no magnitude suffixes (`1K`), no sign, and no
//! bare `0`. Anything else is rejected with [`AtmError::InvalidAmount`].

use crate::error::AtmError;
use rust_decimal::Decimal;

/// Validates a monetary string and parses it into an exact decimal amount.
///
/// # Errors
///
/// Returns [`AtmError::InvalidAmount`] with the offending input when the
/// string does not match the accepted grammar.
pub fn parse_money(input: &str) -> Result<Decimal, AtmError> {
    let digits = input.strip_prefix('$').unwrap_or(input);
    if !is_well_formed(digits) {
        return Err(AtmError::InvalidAmount(format!(
            "invalid number format {input}"
        )));
    }
    // The scanner admits a strict subset of Decimal's own grammar.
    digits
        .parse::<Decimal>()
        .map_err(|_| AtmError::InvalidAmount(format!("invalid number format {input}")))
}

/// Checks the `$`-stripped text against the accepted grammar.
fn is_well_formed(text: &str) -> bool {
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text, None),
    };

    if !matches!(whole.as_bytes().first(), Some(b'1'..=b'9')) {
        return false;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    match fraction {
        None => true,
        Some(fraction) => fraction.len() == 2 && fraction.bytes().all(|b| b.is_ascii_digit()),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_money;
    use crate::error::AtmError;
    use rust_decimal_macros::dec;

    #[test]
    fn accepts_whole_dollars() {
        assert_eq!(parse_money("20"), Ok(dec!(20)));
        assert_eq!(parse_money("$20"), Ok(dec!(20)));
        assert_eq!(parse_money("1"), Ok(dec!(1)));
        assert_eq!(parse_money("10000"), Ok(dec!(10000)));
    }

    #[test]
    fn accepts_dollars_and_cents() {
        assert_eq!(parse_money("20.00"), Ok(dec!(20.00)));
        assert_eq!(parse_money("$25.50"), Ok(dec!(25.50)));
        assert_eq!(parse_money("199.99"), Ok(dec!(199.99)));
    }

    #[test]
    fn rejects_malformed_amounts() {
        for input in [
            "", "$", "0", "05", "0.50", "$0.50", "20.5", "20.555", "20.",
            ".50", "1,000", "20k", "-20", "+20", "20.00.00", "$ 20", "1e3",
            "twenty",
        ] {
            assert_eq!(
                parse_money(input),
                Err(AtmError::InvalidAmount(format!(
                    "invalid number format {input}"
                ))),
                "input {input:?} should be rejected"
            );
        }
    }

    #[test]
    fn parses_to_exact_value() {
        // No float round-off: 25.22 is exactly 25.22.
        assert_eq!(parse_money("25.22"), Ok(dec!(25.22)));
        assert_eq!(parse_money("25.22").unwrap().scale(), 2);
    }
}
