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

//! Default lexical tables.
//!
//! These are the built-in values from which a [`Config`](crate::Config)
//! starts.

use super::token::Token;

// ----------------------------------------------------------------------------

/// Token class of each byte that can begin a code point.
///
/// Code points above `U+007F` are classified as for byte `0x80`.
pub static CHARS: [Token; 256] = {
    use Token::*;
    const __: Token = Other;
[
//  x0            x1            x2            x3            x4            x5            x6            x7
//  x8            x9            xA            xB            xC            xD            xE            xF
    __,           __,           __,           __,           __,           __,           __,           __,           // 0x │········│
    __,           Whitespace,   BreakLine,    Whitespace,   Whitespace,   Whitespace,   __,           __,           // 0x │·tnvfr··│
    __,           __,           __,           __,           __,           __,           __,           __,           // 1x │········│
    __,           __,           __,           __,           __,           __,           __,           __,           // 1x │········│
    Whitespace,   OpNot,        String,       __,           __,           OpMod,        OpAnd,        Number,       // 2x │ !"#$%&'│
    ParenLeft,    ParenRight,   OpMul,        OpAdd,        Comma,        OpSub,        Dot,          OpDiv,        // 2x │()*+,-./│
    Number,       Number,       Number,       Number,       Number,       Number,       Number,       Number,       // 3x │01234567│
    Number,       Number,       Colon,        BreakLine,    OpLt,         Assign,       OpGt,         OpQuestion,   // 3x │89:;<=>?│
    __,           Ident,        Ident,        Ident,        Ident,        Ident,        Ident,        Ident,        // 4x │@ABCDEFG│
    Ident,        Ident,        Ident,        Ident,        Ident,        Ident,        Ident,        Ident,        // 4x │HIJKLMNO│
    Ident,        Ident,        Ident,        Ident,        Ident,        Ident,        Ident,        Ident,        // 5x │PQRSTUVW│
    Ident,        Ident,        Ident,        BracketLeft,  ContinueLine, BracketRight, OpXor,        Ident,        // 5x │XYZ[\]^_│
    Ident,        Ident,        Ident,        Ident,        Ident,        Ident,        Ident,        Ident,        // 6x │`abcdefg│
    Ident,        Ident,        Ident,        Ident,        Ident,        Ident,        Ident,        Ident,        // 6x │hijklmno│
    Ident,        Ident,        Ident,        Ident,        Ident,        Ident,        Ident,        Ident,        // 7x │pqrstuvw│
    Ident,        Ident,        Ident,        BraceLeft,    OpOr,         BraceRight,   OpTilde,      __,           // 7x │xyz{|}~░│
    __,           __,           __,           __,           __,           __,           __,           __,           // 8x │░░░░░░░░│
    __,           __,           __,           __,           __,           __,           __,           __,           // 8x │░░░░░░░░│
    __,           __,           __,           __,           __,           __,           __,           __,           // 9x │░░░░░░░░│
    __,           __,           __,           __,           __,           __,           __,           __,           // 9x │░░░░░░░░│
    __,           __,           __,           __,           __,           __,           __,           __,           // Ax │░░░░░░░░│
    __,           __,           __,           __,           __,           __,           __,           __,           // Ax │░░░░░░░░│
    __,           __,           __,           __,           __,           __,           __,           __,           // Bx │░░░░░░░░│
    __,           __,           __,           __,           __,           __,           __,           __,           // Bx │░░░░░░░░│
    __,           __,           __,           __,           __,           __,           __,           __,           // Cx │░░░░░░░░│
    __,           __,           __,           __,           __,           __,           __,           __,           // Cx │░░░░░░░░│
    __,           __,           __,           __,           __,           __,           __,           __,           // Dx │░░░░░░░░│
    __,           __,           __,           __,           __,           __,           __,           __,           // Dx │░░░░░░░░│
    __,           __,           __,           __,           __,           __,           __,           __,           // Ex │░░░░░░░░│
    __,           __,           __,           __,           __,           __,           __,           __,           // Ex │░░░░░░░░│
    __,           __,           __,           __,           __,           __,           __,           __,           // Fx │░░░░░░░░│
    __,           __,           __,           __,           __,           __,           __,           __,           // Fx │░░░░░░░░│
]};

// ----------------------------------------------------------------------------

/// Built-in keywords and operators.
///
/// A word or operator run whose text is not found here keeps the token class
/// of its first character.
pub static KEYWORDS: [(&str, Token); 33] = {
    use Token::*;
[
    ("let",      Let       ),
    ("fun",      Fun       ),
    ("do",       Do        ),
    ("if",       If        ),
    ("else",     Else      ),
    ("while",    While     ),
    ("return",   Return    ),
    ("break",    Break     ),
    ("continue", Continue  ),
    ("it",       It        ),
    ("self",     SelfRef   ),
    ("async",    Async     ),
    ("==",       OpEq      ),
    ("!=",       OpNe      ),
    ("<=",       OpLe      ),
    (">=",       OpGe      ),
    ("&&",       OpAnd     ),
    ("||",       OpOr      ),
    ("=",        Assign    ),
    ("+",        OpAdd     ),
    ("-",        OpSub     ),
    ("*",        OpMul     ),
    ("/",        OpDiv     ),
    ("%",        OpMod     ),
    ("<",        OpLt      ),
    (">",        OpGt      ),
    ("!",        OpNot     ),
    ("~",        OpTilde   ),
    ("?",        OpQuestion),
    ("^",        OpXor     ),
    ("|",        OpOr      ),
    ("&",        OpAnd     ),
    ("--",       Comment   ),
]};

// ----------------------------------------------------------------------------

/// Whether a line break immediately after each token is suppressed.
///
/// These are the tokens after which a statement cannot end.
pub const SKIPS_NEWLINE: [bool; Token::COUNT] = {
    use Token::*;
    let mut t = [false; Token::COUNT];

    t[ParenLeft   as usize] = true;
    t[BracketLeft as usize] = true;
    t[BraceLeft   as usize] = true;
    t[Comma       as usize] = true;
    t[Dot         as usize] = true;
    t[Colon       as usize] = true;
    t[Fun         as usize] = true;
    t[Do          as usize] = true;
    t[If          as usize] = true;
    t[Else        as usize] = true;
    t[While       as usize] = true;
    t[Async       as usize] = true;

    let mut i = Token::OP_LOW as usize;
    while i <= Token::OP_HIGH as usize {
        t[i] = true;
        i += 1;
    }

    t
};

// A line break must never swallow the next line break.
const _: () = assert!(!SKIPS_NEWLINE[Token::BreakLine as usize]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chars_ascii() {
        assert_eq!( CHARS[b' '  as usize], Token::Whitespace   );
        assert_eq!( CHARS[b'\r' as usize], Token::Whitespace   );
        assert_eq!( CHARS[b'\n' as usize], Token::BreakLine    );
        assert_eq!( CHARS[b';'  as usize], Token::BreakLine    );
        assert_eq!( CHARS[b'\\' as usize], Token::ContinueLine );
        assert_eq!( CHARS[b'_'  as usize], Token::Ident        );
        assert_eq!( CHARS[b'`'  as usize], Token::Ident        );
        assert_eq!( CHARS[b'\'' as usize], Token::Number       );
        assert_eq!( CHARS[b'"'  as usize], Token::String       );
        assert_eq!( CHARS[b'='  as usize], Token::Assign       );
        assert_eq!( CHARS[b'@'  as usize], Token::Other        );
    }

    #[test]
    fn chars_high() {
        assert!( CHARS[0x80..].iter().all(|&t| t == Token::Other) );
    }

    #[test]
    fn keywords_unique() {
        for (i, (a, _)) in KEYWORDS.iter().enumerate() {
            assert!( KEYWORDS[i + 1..].iter().all(|(b, _)| a != b), "duplicate {}", a );
        }
    }

    #[test]
    fn skips_newline() {
        assert!(  SKIPS_NEWLINE[Token::OpAdd      as usize] );
        assert!(  SKIPS_NEWLINE[Token::Assign     as usize] );
        assert!(  SKIPS_NEWLINE[Token::BraceLeft  as usize] );
        assert!( !SKIPS_NEWLINE[Token::BraceRight as usize] );
        assert!( !SKIPS_NEWLINE[Token::Ident      as usize] );
        assert!( !SKIPS_NEWLINE[Token::BreakLine  as usize] );
    }
}
