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

//! Front end of the skein scripting language.
//!
//! Source bytes flow through the [`Lexer`], which yields tokens to the
//! incremental [`Parser`], which in turn drives an [`AsgBuilder`] to produce
//! a [`SyntaxGraph`].  The graph is serializable and is handed to a separate
//! code generator.
//!
//! ```
//! use skein::{parse, Config};
//!
//! let config = Config::default();
//! let graph  = parse(&config, b"let x = 1\nx = 2").unwrap();
//!
//! assert_eq!(graph.entry_points.len(), 1);
//! ```

pub mod asg;
pub mod config;
pub mod error;
pub mod lang;
pub mod message;
pub mod session;
pub mod util;

pub use asg::{Function, Kind, Literal, SyntaxGraph, Term};
pub use asg::builder::AsgBuilder;
pub use config::Config;
pub use error::{Error, Result};
pub use lang::lexer::Lexer;
pub use lang::parser::Parser;
pub use lang::token::Token;
pub use session::Session;
pub use util::Location;

/// Name of the program, used in messages not related to a source file.
pub const PROGRAM_NAME: &str = "skein";

/// Parses the whole of `source` and returns the finalized syntax graph.
///
/// This drives [`Parser::update`] to completion.  Hosts that must not block
/// should drive a [`Parser`] themselves instead.
pub fn parse(config: &Config, source: &[u8]) -> Result<SyntaxGraph> {
    let mut parser = Parser::new(Lexer::new(config, source));
    while parser.update()? { }
    Ok(parser.into_graph().unwrap_or_default())
}
