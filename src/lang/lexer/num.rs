// This file is part of skein, an embeddable scripting language.
// Copyright 2022 Jeffrey Sharp
//
// SPDX-License-Identifier: GPL-3.0-or-later
//
// skein is free software: you can redistribute it and/or modify it
// under the terms of the GNU General Public License as published
// by the Free Software Foundation, either version 3 of the License,
// or (at your option) any later version.
//
// skein is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See
// the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with skein.  If not, see <http://www.gnu.org/licenses/>.

//! Numeric literal sublexer.
//!
//! ### Number format:
//!
//! ```text
//! digits [. digits]
//! ───┬── ────┬────
//!    ├─ 1    └─ .5
//!    ├─ 12
//!    └─ 1_000
//! ```
//!
//! A `.` belongs to the number only if a digit follows it, so `1.foo` lexes
//! as a number, a dot, and an identifier.  Separators (`_`) are ignored.

use super::*;

// ----------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    /// Scans the remainder of a numeric literal after its first digit.
    pub(super) fn scan_number(&mut self) -> Token {
        let mut seen_dot = false;

        while let Some(b) = self.input.peek_byte() {
            match b {
                b'0'..=b'9' | b'_' => (),
                b'.' if !seen_dot && is_digit(self.input.peek_byte_at(1)) => seen_dot = true,
                _ => break,
            }
            self.input.advance_byte();
        }

        Token::Number
    }
}

#[inline]
fn is_digit(b: Option<u8>) -> bool {
    matches!(b, Some(b'0'..=b'9'))
}

/// Returns the value of a numeric literal lexeme.
pub(super) fn value(lexeme: &[u8]) -> f64 {
    let text = lexeme
        .iter()
        .filter(|&&b| b != b'_')
        .map(|&b| b as char)
        .collect::<String>();

    text.parse().unwrap_or(f64::NAN)
}
