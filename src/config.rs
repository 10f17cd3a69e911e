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

//! Lexer configuration.
//!
//! A [`Config`] holds the three lexical tables: byte classes, keywords, and
//! the set of tokens after which a line break is ignored.  One configuration
//! can be shared by any number of lexers.

use std::collections::BTreeMap;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::lang::table::{CHARS, KEYWORDS, SKIPS_NEWLINE};
use crate::lang::token::Token;

/// Lexer configuration.
#[derive(Clone, Debug)]
pub struct Config {
    chars:         [Token; 256],
    keywords:      FxHashMap<Box<str>, Token>,
    skips_newline: [bool; Token::COUNT],
}

/// Keyword changes read from a JSON document.
///
/// ```json
/// { "keywords": { "fn": "FUN" }, "remove": ["fun"] }
/// ```
#[derive(Clone, Default, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeywordOverrides {
    /// Keywords to add or replace, mapped to the token they produce.
    pub keywords: BTreeMap<String, Token>,

    /// Keywords to remove.  Removal happens before additions.
    pub remove: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chars:         CHARS,
            keywords:      KEYWORDS.iter().map(|&(k, t)| (k.into(), t)).collect(),
            skips_newline: SKIPS_NEWLINE,
        }
    }
}

impl Config {
    /// Creates a configuration with the built-in tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with the built-in tables changed by the given
    /// overrides.
    pub fn from_overrides(overrides: &KeywordOverrides) -> Self {
        let mut config = Self::default();
        for text in &overrides.remove {
            config.keywords.remove(text.as_str());
        }
        for (text, &token) in &overrides.keywords {
            config.keywords.insert(text.as_str().into(), token);
        }
        config
    }

    /// Creates a configuration from a JSON [`KeywordOverrides`] document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let overrides = serde_json::from_str::<KeywordOverrides>(json)?;
        Ok(Self::from_overrides(&overrides))
    }

    /// Adds or replaces a keyword.
    pub fn with_keyword(mut self, text: &str, token: Token) -> Self {
        self.keywords.insert(text.into(), token);
        self
    }

    /// Removes a keyword, so that its text lexes by its first character.
    pub fn without_keyword(mut self, text: &str) -> Self {
        self.keywords.remove(text);
        self
    }

    /// Sets whether a line break after `token` is ignored.
    ///
    /// A line break can never be set to skip a following line break; such a
    /// request is ignored.
    pub fn with_skips_newline(mut self, token: Token, skips: bool) -> Self {
        debug_assert!(token != Token::BreakLine || !skips, "BREAK_LINE cannot skip newlines");
        if token != Token::BreakLine {
            self.skips_newline[token as usize] = skips;
        }
        self
    }

    /// Returns the token class of a byte that begins a code point.
    #[inline]
    pub fn class_of(&self, byte: u8) -> Token {
        self.chars[byte as usize]
    }

    /// Returns the token class of a decoded code point.
    #[inline]
    pub fn class_of_char(&self, ch: u32) -> Token {
        self.chars[ch.min(0x80) as usize]
    }

    /// Returns the token produced by the given keyword text, if any.
    #[inline]
    pub fn keyword(&self, text: &str) -> Option<Token> {
        self.keywords.get(text).copied()
    }

    /// Returns whether a line break immediately after `token` is ignored.
    #[inline]
    pub fn skips_newline(&self, token: Token) -> bool {
        self.skips_newline[token as usize]
    }
}
