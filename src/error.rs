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

//! Front-end errors.
//!
//! Every error is fatal for the unit being parsed: there is no recovery or
//! resynchronization.  The location is carried by the error; the message
//! text does not repeat it, so that [`crate::message`] can place it.

use thiserror::Error;

use crate::util::Location;

/// The type returned by fallible front-end methods.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Front-end error.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum Error {
    /// The input contains a malformed UTF-8 sequence.
    #[error("malformed UTF-8 sequence")]
    Decode { location: Location },

    /// The input violates the grammar.
    #[error("{message}, got {got}")]
    Syntax { location: Location, message: String, got: String },

    /// A name is declared twice in one block, or a value is assigned to
    /// something that is not a variable.
    #[error("{message}")]
    Name { location: Location, message: String },

    /// The input uses a production that the parser does not support yet.
    #[error("{what} is not implemented")]
    NotImplemented { location: Location, what: String },
}

impl Error {
    pub(crate) fn syntax(
        location: Location,
        message:  impl Into<String>,
        got:      impl Into<String>,
    ) -> Self {
        Self::Syntax { location, message: message.into(), got: got.into() }
    }

    pub(crate) fn name(location: Location, message: impl Into<String>) -> Self {
        Self::Name { location, message: message.into() }
    }

    pub(crate) fn not_implemented(location: Location, what: impl Into<String>) -> Self {
        Self::NotImplemented { location, what: what.into() }
    }

    /// Returns the source location at which the error occurred.
    pub fn location(&self) -> Location {
        match *self {
            Self::Decode         { location, .. } => location,
            Self::Syntax         { location, .. } => location,
            Self::Name           { location, .. } => location,
            Self::NotImplemented { location, .. } => location,
        }
    }
}
