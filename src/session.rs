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

//! Parsing session.

use std::fmt::Display;
use std::fs;
use std::io::{self, Read};
use colored::*;

use crate::asg::SyntaxGraph;
use crate::config::Config;
use crate::lang::lexer::Lexer;
use crate::lang::token::Token;
use crate::message::{self, *};
use crate::util::Location;

// ----------------------------------------------------------------------------

/// Parsing session.
///
/// A session holds the lexer configuration shared by all inputs and counts
/// the diagnostics reported while processing them.
#[derive(Debug, Default)]
pub struct Session {
    config:        Config,
    warning_count: usize,
    error_count:   usize,
}

impl Session {
    /// Creates a new [`Session`] with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [`Session`] with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config, ..Self::default() }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    #[inline]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Returns whether no errors have been reported.
    #[inline]
    pub fn succeeded(&self) -> bool {
        self.error_count == 0
    }

    /// Reads the file at `path`, or standard input if `path` is `-`.
    pub fn read(&mut self, path: &str) -> Option<Vec<u8>> {
        let result = if path == "-" {
            let mut buf = Vec::with_capacity(4096);
            io::stdin().read_to_end(&mut buf).map(|_| buf)
        } else {
            fs::read(path)
        };

        match result {
            Ok(bytes) => Some(bytes),
            Err(e)    => { let _ = ReadError(path, &e).tell(self); None },
        }
    }

    /// Replaces the configuration with the default one modified by the
    /// keyword overrides in the JSON file at `path`.
    pub fn load_keywords(&mut self, path: &str) -> message::Result {
        let bytes = self.read(path).ok_or(())?;
        let json  = String::from_utf8_lossy(&bytes);

        match Config::from_json(&json) {
            Ok(config) => { self.config = config; Ok(()) },
            Err(e)     => ConfigError(path, &e).tell(self),
        }
    }

    /// Parses `source` completely.  On failure, reports the error and
    /// returns `None`.
    pub fn parse(&mut self, path: &str, source: &[u8]) -> Option<SyntaxGraph> {
        match crate::parse(&self.config, source) {
            Ok(graph) => Some(graph),
            Err(e)    => { let _ = SourceError(path, &e).tell(self); None },
        }
    }

    pub fn print_tokens(&mut self, path: &str, source: &[u8]) {
        println!("[{}:tokens]", path);

        //        0         1         2         3         4         5         6         7         8
        //        0 2 4 6 8 0 2 4 6 8 0 2 4 6 8 0 2 4 6 8 0 2 4 6 8 0 2 4 6 8 0 2 4 6 8 0 2 4 6 8 0
        println!("╭──────────┬────────┬────────┬───────────────┬──────────────────────╮");
        println!("│ LINE     │ OFFSET │ LENGTH │ TYPE          │ VALUE                │");
        println!("╞══════════╪════════╪════════╪═══════════════╪══════════════════════╡");

        let mut lexer = Lexer::new(&self.config, source);

        let result = loop {
            let token = match lexer.next() {
                Ok(token) => token,
                Err(e)    => break Err(e),
            };
            println!(
                "│ {:<8} │ {:6} │ {:6} │ {:<13} │ {:<20.20} │",
                lexer.location().to_string(),
                lexer.range().start,
                lexer.range().len(),
                token,
                lexer.value().to_string(),
            );
            if token == Token::Eof { break Ok(()) }
        };

        println!("╰──────────┴────────┴────────┴───────────────┴──────────────────────╯");

        if let Err(e) = result {
            let _ = SourceError(path, &e).tell(self);
        }
    }

    pub fn print_graph(&mut self, path: &str, graph: &SyntaxGraph, json: bool) {
        if !json {
            println!("[{}:graph]", path);
            print!("{}", graph.for_display());
            return;
        }

        match graph.to_json_pretty() {
            Ok(text) => println!("{}", text),
            Err(e)   => {
                let _ = self.log_error(Message::at(
                    path, Location::UNKNOWN, Severity::Error,
                    format_args!("cannot serialize syntax graph: {}", e)
                ));
            },
        }
    }
}

impl Log for Session {
    fn log<M: Display>(&mut self, msg: M) -> message::Result {
        eprintln!("{}", msg);
        Ok(())
    }

    fn log_warning<M: Display>(&mut self, msg: M) -> message::Result {
        self.warning_count += 1;
        eprintln!("{}", msg.to_string().yellow());
        Ok(())
    }

    fn log_error<M: Display>(&mut self, msg: M) -> message::Result {
        self.error_count += 1;
        eprintln!("{}", msg.to_string().red());
        Ok(())
    }
}
