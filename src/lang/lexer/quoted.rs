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

//! Quoted literal sublexer.
//!
//! ```text
//! "text with \"escapes\""     STRING
//! @"raw text"                 STRING
//! 'c'  '\n'                   NUMBER (code point)
//! `any text`                  IDENT
//! ```
//!
//! Recognized escapes are `\n`, `\r`, `\t`, and `\0`.  A backslash before
//! any other character yields that character.

use crate::lang::utf8;
use super::*;

// ----------------------------------------------------------------------------

/// Logical characters recognized by the string literal sublexer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
enum Char {
    Text,       // other
    Quote,      // "
    BSlash,     // \
}

/// Mapping of 7-bit ASCII to logical characters.
static CHARS: [Char; 128] = {
    use Char::*;
    const __: Char = Text;
[
//  x0      x1      x2      x3      x4      x5      x6      x7
//  x8      x9      xA      xB      xC      xD      xE      xF
    __,     __,     __,     __,     __,     __,     __,     __,     // 0x │········│
    __,     __,     __,     __,     __,     __,     __,     __,     // 0x │·tnvfr··│
    __,     __,     __,     __,     __,     __,     __,     __,     // 1x │········│
    __,     __,     __,     __,     __,     __,     __,     __,     // 1x │········│
    __,     __,     Quote,  __,     __,     __,     __,     __,     // 2x │ !"#$%&'│
    __,     __,     __,     __,     __,     __,     __,     __,     // 2x │()*+,-./│
    __,     __,     __,     __,     __,     __,     __,     __,     // 3x │01234567│
    __,     __,     __,     __,     __,     __,     __,     __,     // 3x │89:;<=>?│
    __,     __,     __,     __,     __,     __,     __,     __,     // 4x │@ABCDEFG│
    __,     __,     __,     __,     __,     __,     __,     __,     // 4x │HIJKLMNO│
    __,     __,     __,     __,     __,     __,     __,     __,     // 5x │PQRSTUVW│
    __,     __,     __,     __,     BSlash, __,     __,     __,     // 5x │XYZ[\]^_│
    __,     __,     __,     __,     __,     __,     __,     __,     // 6x │`abcdefg│
    __,     __,     __,     __,     __,     __,     __,     __,     // 6x │hijklmno│
    __,     __,     __,     __,     __,     __,     __,     __,     // 7x │pqrstuvw│
    __,     __,     __,     __,     __,     __,     __,     __,     // 7x │xyz{|}~░│
]};

#[inline]
fn classify(ch: u32) -> Char {
    if ch < 0x80 { CHARS[ch as usize] } else { Char::Text }
}

const QUOTE:    u32 = '\''  as u32;
const BACKTICK: u32 = '`'   as u32;
const BSLASH:   u32 = '\\'  as u32;

// ----------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    /// Scans the remainder of a string literal after the opening `"`.
    pub(super) fn scan_string(&mut self) -> Result<Token> {
        loop {
            let (ch, len) = self.peek()?.ok_or_else(|| self.unterminated("string literal"))?;
            self.input.advance(ch, len);

            match classify(ch) {
                Char::Quote  => return Ok(Token::String),
                Char::BSlash => if let Some((ch, len)) = self.peek()? {
                    self.input.advance(ch, len)
                },
                Char::Text   => (),
            }
        }
    }

    /// Scans the remainder of a raw string literal after the opening `@"`.
    pub(super) fn scan_raw_string(&mut self) -> Result<Token> {
        loop {
            let (ch, len) = self.peek()?.ok_or_else(|| self.unterminated("raw string literal"))?;
            self.input.advance(ch, len);

            if classify(ch) == Char::Quote {
                return Ok(Token::String);
            }
        }
    }

    /// Scans the remainder of a character literal after the opening `'`.
    pub(super) fn scan_char(&mut self) -> Result<Token> {
        let (ch, len) = match self.peek()? {
            Some((QUOTE, _)) => return Err(Error::syntax(
                self.input.location(), "empty character literal", "`'`"
            )),
            Some(c) => c,
            None    => return Err(self.unterminated("character literal")),
        };
        self.input.advance(ch, len);

        if ch == BSLASH {
            let (ch, len) = self.peek()?.ok_or_else(|| self.unterminated("character literal"))?;
            self.input.advance(ch, len);
        }

        match self.peek()? {
            Some((QUOTE, len)) => {
                self.input.advance(QUOTE, len);
                Ok(Token::Number)
            },
            other => Err(Error::syntax(
                self.input.location(),
                "expected `'` to close character literal",
                describe_char(other.map(|(ch, _)| ch)),
            )),
        }
    }

    /// Scans the remainder of a literal identifier after the opening `` ` ``.
    ///
    /// The identifier ends after a closing `` ` ``, or before whitespace, a
    /// line break, or the end of input.
    pub(super) fn scan_literal_ident(&mut self) -> Result<Token> {
        while let Some((ch, len)) = self.peek()? {
            if matches!(self.config.class_of_char(ch), Token::Whitespace | Token::BreakLine) {
                break;
            }
            self.input.advance(ch, len);
            if ch == BACKTICK {
                break;
            }
        }
        Ok(Token::Ident)
    }

    fn unterminated(&self, what: &str) -> Error {
        Error::syntax(self.input.location(), format!("unterminated {}", what), "end of file")
    }
}

// ----------------------------------------------------------------------------

/// Returns the content of a string literal lexeme with escapes replaced.
pub(super) fn string_value(lexeme: &[u8]) -> String {
    let inner = strip(lexeme, 1, b"\"");
    let text  = String::from_utf8_lossy(inner);

    let mut value = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
        } else if let Some(c) = chars.next() {
            value.push(char::from_u32(unescape(c as u32)).unwrap_or(c));
        }
    }

    value
}

/// Returns the content of a raw string literal lexeme.
pub(super) fn raw_string_value(lexeme: &[u8]) -> String {
    String::from_utf8_lossy(strip(lexeme, 2, b"\"")).into_owned()
}

/// Returns the code point of a character literal lexeme.
pub(super) fn char_value(lexeme: &[u8]) -> f64 {
    let inner = strip(lexeme, 1, b"'");
    let cp = match inner.split_first() {
        Some((b'\\', rest)) => unescape(utf8::decode(rest).0),
        _                   => utf8::decode(inner).0,
    };
    cp as f64
}

/// Returns the name of a literal identifier lexeme.
pub(super) fn literal_ident_value(lexeme: &[u8]) -> String {
    String::from_utf8_lossy(strip(lexeme, 1, b"`")).into_owned()
}

/// Removes `prefix_len` bytes from the front of `lexeme` and the given suffix,
/// if present, from its end.
fn strip<'a>(lexeme: &'a [u8], prefix_len: usize, suffix: &[u8]) -> &'a [u8] {
    let rest = lexeme.get(prefix_len..).unwrap_or_default();
    rest.strip_suffix(suffix).unwrap_or(rest)
}

/// Returns the code point denoted by an escape sequence `\ch`.
fn unescape(ch: u32) -> u32 {
    match char::from_u32(ch) {
        Some('n') => 0x0A,
        Some('r') => 0x0D,
        Some('t') => 0x09,
        Some('0') => 0x00,
        _         => ch,
    }
}

/// Describes a code point for use in an error message.
fn describe_char(ch: Option<u32>) -> String {
    match ch.map(char::from_u32) {
        None              => "end of file".into(),
        Some(Some('\n'))  => "line break".into(),
        Some(Some(c))     => format!("`{}`", c),
        Some(None)        => format!("U+{:X}", ch.unwrap_or_default()),
    }
}
