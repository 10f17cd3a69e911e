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

//! Lexical tokens.

use std::fmt::{self, Display, Formatter};
use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------

/// Lexical tokens.
///
/// The declaration order is significant: all operators lie in the contiguous
/// range [`Token::OP_LOW`]`..=`[`Token::OP_HIGH`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Token {
    // === Punctuation ===

    /// `(` - left parenthesis.
    ParenLeft,

    /// `)` - right parenthesis.
    ParenRight,

    /// `[` - left square bracket.
    BracketLeft,

    /// `]` - right square bracket.
    BracketRight,

    /// `{` - left curly brace.
    BraceLeft,

    /// `}` - right curly brace.
    BraceRight,

    /// `,` - comma.
    Comma,

    /// `.` - member access.
    Dot,

    /// `:` - colon.
    Colon,

    // === Keywords ===

    Let,
    Fun,
    Do,
    If,
    Else,
    While,
    Return,
    Break,
    Continue,
    It,
    #[serde(rename = "SELF")]
    SelfRef,
    Async,

    // === Operators ===

    /// `=` - assignment operator.
    Assign,

    /// `|`, `||` - logical OR operator.
    OpOr,

    /// `&`, `&&` - logical AND operator.
    OpAnd,

    /// `^` - logical XOR operator.
    OpXor,

    /// `==` - equal-to operator.
    OpEq,

    /// `!=` - not-equal-to operator.
    OpNe,

    /// `<` - less-than operator.
    OpLt,

    /// `>` - greater-than operator.
    OpGt,

    /// `<=` - less-than-or-equal-to operator.
    OpLe,

    /// `>=` - greater-than-or-equal-to operator.
    OpGe,

    /// `+` - addition operator.
    OpAdd,

    /// `-` - subtraction operator, negation operator.
    OpSub,

    /// `*` - multiplication operator.
    OpMul,

    /// `/` - division operator.
    OpDiv,

    /// `%` - modulo operator.
    OpMod,

    /// `!` - logical NOT operator.
    OpNot,

    /// `~` - bitwise NOT operator.
    OpTilde,

    /// `?` - conditional operator.
    OpQuestion,

    // === Identifiers & Literals ===

    /// Identifier.
    Ident,                              // value: name

    /// String literal.
    String,                             // value: content

    /// Number or character literal.
    Number,                             // value: f64

    // === Trivia & Terminators ===

    /// Run of horizontal whitespace.
    Whitespace,

    /// Comment, through the end of the line.
    Comment,

    /// Line break or `;` - statement terminator.
    BreakLine,

    /// `\` - line continuation.
    ContinueLine,

    /// End of file.
    Eof,

    /// Any character that begins no other token.
    Other,
}

impl Token {
    /// Number of distinct tokens.
    pub const COUNT: usize = Self::Other as usize + 1;

    /// Lowest operator token.
    pub const OP_LOW: Self = Self::Assign;

    /// Highest operator token.
    pub const OP_HIGH: Self = Self::OpQuestion;

    /// Returns whether the token is an operator.
    #[inline]
    pub const fn is_operator(self) -> bool {
        let n = self as u8;
        n >= Self::OP_LOW as u8 && n <= Self::OP_HIGH as u8
    }

    /// Returns whether the token is never seen by the parser.
    #[inline]
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment | Self::ContinueLine)
    }

    /// Returns whether the token opens a bracketed group.
    #[inline]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::ParenLeft | Self::BracketLeft | Self::BraceLeft)
    }

    /// Returns whether the token closes a bracketed group.
    #[inline]
    pub const fn is_close(self) -> bool {
        matches!(self, Self::ParenRight | Self::BracketRight | Self::BraceRight)
    }

    /// Returns the name of the token as used in serialized forms.
    pub const fn name(self) -> &'static str {
        use Token::*;
        match self {
            ParenLeft    => "PAREN_LEFT",
            ParenRight   => "PAREN_RIGHT",
            BracketLeft  => "BRACKET_LEFT",
            BracketRight => "BRACKET_RIGHT",
            BraceLeft    => "BRACE_LEFT",
            BraceRight   => "BRACE_RIGHT",
            Comma        => "COMMA",
            Dot          => "DOT",
            Colon        => "COLON",
            Let          => "LET",
            Fun          => "FUN",
            Do           => "DO",
            If           => "IF",
            Else         => "ELSE",
            While        => "WHILE",
            Return       => "RETURN",
            Break        => "BREAK",
            Continue     => "CONTINUE",
            It           => "IT",
            SelfRef      => "SELF",
            Async        => "ASYNC",
            Assign       => "ASSIGN",
            OpOr         => "OP_OR",
            OpAnd        => "OP_AND",
            OpXor        => "OP_XOR",
            OpEq         => "OP_EQ",
            OpNe         => "OP_NE",
            OpLt         => "OP_LT",
            OpGt         => "OP_GT",
            OpLe         => "OP_LE",
            OpGe         => "OP_GE",
            OpAdd        => "OP_ADD",
            OpSub        => "OP_SUB",
            OpMul        => "OP_MUL",
            OpDiv        => "OP_DIV",
            OpMod        => "OP_MOD",
            OpNot        => "OP_NOT",
            OpTilde      => "OP_TILDE",
            OpQuestion   => "OP_QUESTION",
            Ident        => "IDENT",
            String       => "STRING",
            Number       => "NUMBER",
            Whitespace   => "WHITESPACE",
            Comment      => "COMMENT",
            BreakLine    => "BREAK_LINE",
            ContinueLine => "CONTINUE_LINE",
            Eof          => "EOF",
            Other        => "OTHER",
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}
