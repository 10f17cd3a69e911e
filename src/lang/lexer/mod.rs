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

//! Lexical analyzer.
//!
//! The lexer is pull-based: each call to [`Lexer::next`] scans exactly one
//! significant token.  Whitespace and comments are skipped, and a line break
//! is dropped when the statement cannot end there:
//!
//! - after a `\` line continuation;
//! - after a token that expects more input, such as an operator or `(`;
//! - anywhere inside `( )` or `[ ]`.
//!
//! Inside `{ }` line breaks separate statements again.

use std::borrow::Cow;
use std::ops::Range;

use crate::asg::Literal;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::util::Location;

use super::input::Cursor;
use super::token::Token;
use super::utf8;

mod num;
mod quoted;

#[cfg(test)]
mod tests;

// ----------------------------------------------------------------------------

/// Lexical analyzer.
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    config: &'a Config,
    input:  Cursor<'a>,

    // Current token
    token:    Token,
    range:    Range<usize>,
    location: Location,

    // Line break suppression
    prev:      Token,
    continued: bool,
    groups:    Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Creates a new [`Lexer`] over the given input bytes.
    pub fn new(config: &'a Config, input: &'a [u8]) -> Self {
        Self::from_cursor(config, Cursor::new(input))
    }

    /// Creates a new [`Lexer`] over the `size` bytes of `input` beginning at
    /// `offset`.  Offsets reported by [`Self::range`] are relative to the
    /// start of `input`.
    pub fn with_window(config: &'a Config, input: &'a [u8], offset: usize, size: usize) -> Self {
        Self::from_cursor(config, Cursor::with_window(input, offset, size))
    }

    fn from_cursor(config: &'a Config, input: Cursor<'a>) -> Self {
        let pos = input.position();
        Self {
            config,
            input,
            token:     Token::Eof,
            range:     pos..pos,
            location:  input.location(),
            prev:      Token::BreakLine,
            continued: false,
            groups:    Vec::new(),
        }
    }

    /// Returns the configuration used by the lexer.
    #[inline]
    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// Returns the most recently scanned token.
    #[inline]
    pub fn token(&self) -> Token {
        self.token
    }

    /// Returns the byte range of the most recently scanned token.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Returns the location of the first character of the most recently
    /// scanned token.
    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    /// Returns the source bytes of the most recently scanned token.
    #[inline]
    pub fn lexeme_bytes(&self) -> &'a [u8] {
        self.input.slice(self.range.clone())
    }

    /// Returns the source text of the most recently scanned token.
    #[inline]
    pub fn lexeme(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.lexeme_bytes())
    }

    /// Returns the value of the most recently scanned token.
    ///
    /// The value is computed on each call.  Number literals yield a
    /// [`Literal::Number`]; all other tokens yield a [`Literal::String`] of
    /// their content.
    pub fn value(&self) -> Literal {
        let bytes = self.lexeme_bytes();
        match (self.token, bytes.first()) {
            (Token::Number, Some(b'\'')) => Literal::Number(quoted::char_value(bytes)),
            (Token::Number, _)           => Literal::Number(num::value(bytes)),
            (Token::String, Some(b'@'))  => Literal::String(quoted::raw_string_value(bytes)),
            (Token::String, _)           => Literal::String(quoted::string_value(bytes)),
            (Token::Ident,  Some(b'`'))  => Literal::String(quoted::literal_ident_value(bytes)),
            _                            => Literal::String(self.lexeme().into_owned()),
        }
    }

    /// Returns the name denoted by the most recently scanned identifier.
    pub fn name(&self) -> String {
        match self.value() {
            Literal::String(s) => s,
            _                  => self.lexeme().into_owned(),
        }
    }

    /// Describes the most recently scanned token for use in an error message.
    pub fn describe(&self) -> String {
        match self.token {
            Token::Eof => "end of file".into(),
            Token::BreakLine if self.lexeme_bytes() != b";" => "line break".into(),
            _ => format!("`{}`", self.lexeme()),
        }
    }

    /// Scans the next significant token.
    ///
    /// Whitespace, comments, line continuations, and suppressed line breaks
    /// are skipped.  At the end of input, returns [`Token::Eof`] repeatedly.
    pub fn next(&mut self) -> Result<Token> {
        loop {
            let token = self.next_with_whitespace()?;

            match token {
                Token::Whitespace | Token::Comment => continue,
                Token::ContinueLine => {
                    self.continued = true;
                    continue;
                },
                Token::BreakLine => {
                    let continued = std::mem::take(&mut self.continued);
                    if continued || self.config.skips_newline(self.prev) || self.in_group() {
                        continue;
                    }
                },
                t if t.is_open()  => self.groups.push(t),
                t if t.is_close() => { self.groups.pop(); },
                _ => (),
            }

            self.prev = token;
            return Ok(token);
        }
    }

    /// Scans the next token of any kind, including whitespace and comments.
    pub fn next_with_whitespace(&mut self) -> Result<Token> {
        let start     = self.input.position();
        self.location = self.input.location();
        self.range    = start..start;

        let token = self.scan()?;

        self.range.end = self.input.position();
        self.token     = token;
        Ok(token)
    }

    /// Returns whether line breaks are currently ignored because the
    /// innermost open group is `(` or `[`.
    #[inline]
    fn in_group(&self) -> bool {
        matches!(self.groups.last(), Some(Token::ParenLeft | Token::BracketLeft))
    }

    /// Decodes the code point at the current position.
    #[inline]
    fn peek(&self) -> Result<Option<(u32, usize)>> {
        match self.input.peek() {
            Some((utf8::DECODE_ERROR, _)) => Err(Error::Decode { location: self.input.location() }),
            c                             => Ok(c),
        }
    }

    /// Returns the bytes scanned so far for the current token.
    #[inline]
    fn pending(&self) -> &'a [u8] {
        self.input.slice(self.range.start..self.input.position())
    }

    /// Looks up the bytes scanned so far as a keyword.
    #[inline]
    fn pending_keyword(&self) -> Option<Token> {
        std::str::from_utf8(self.pending()).ok().and_then(|s| self.config.keyword(s))
    }

    fn scan(&mut self) -> Result<Token> {
        let (ch, len) = match self.peek()? {
            Some(c) => c,
            None    => return Ok(Token::Eof),
        };

        let class = self.config.class_of_char(ch);
        self.input.advance(ch, len);

        match class {
            Token::Whitespace                  => Ok(self.scan_whitespace()),
            Token::Ident  if ch == '`'  as u32 => self.scan_literal_ident(),
            Token::Ident                       => self.scan_word(),
            Token::Number if ch == '\'' as u32 => self.scan_char(),
            Token::Number                      => Ok(self.scan_number()),
            Token::String                      => self.scan_string(),
            Token::Other  if ch == '@'  as u32 && self.input.peek_byte() == Some(b'"') => {
                self.input.advance_byte();
                self.scan_raw_string()
            },
            t if t.is_operator()               => self.scan_operator(t),
            t                                  => Ok(t),
        }
    }

    fn scan_whitespace(&mut self) -> Token {
        while let Some(b) = self.input.peek_byte() {
            if self.config.class_of(b) != Token::Whitespace {
                break;
            }
            self.input.advance_byte();
        }
        Token::Whitespace
    }

    fn scan_word(&mut self) -> Result<Token> {
        while let Some((ch, len)) = self.peek()? {
            if !self.is_word_char(ch) {
                break;
            }
            self.input.advance(ch, len);
        }

        match self.pending_keyword() {
            Some(Token::Comment) => self.scan_comment(),
            Some(token)          => Ok(token),
            None                 => Ok(Token::Ident),
        }
    }

    #[inline]
    fn is_word_char(&self, ch: u32) -> bool {
        matches!(self.config.class_of_char(ch), Token::Ident | Token::Number)
            && ch != '`'  as u32
            && ch != '\'' as u32
    }

    fn scan_operator(&mut self, class: Token) -> Result<Token> {
        loop {
            if self.pending_keyword() == Some(Token::Comment) {
                return self.scan_comment();
            }
            match self.peek()? {
                Some((ch, len)) if self.config.class_of_char(ch).is_operator() => {
                    self.input.advance(ch, len)
                },
                _ => break,
            }
        }

        Ok(self.pending_keyword().unwrap_or(class))
    }

    fn scan_comment(&mut self) -> Result<Token> {
        while let Some((ch, len)) = self.peek()? {
            if ch == '\n' as u32 {
                break;
            }
            self.input.advance(ch, len);
        }
        Ok(Token::Comment)
    }
}
