//! Diagnostic Messages
//
// This file is part of skein, an embeddable scripting language.
// Copyright 2020 Jeffrey Sharp
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

use std::fmt::{self, Arguments, Display, Formatter};
use std::io;

use crate::error::Error;
use crate::util::Location;

/// The type returned by message sinks.  Errors carry no payload; the
/// message itself has already been reported.
pub type Result<T = (), E = ()> = std::result::Result<T, E>;

// -----------------------------------------------------------------------------

/// A diagnostic message.
#[derive(Copy, Clone, Debug)]
pub struct Message<'a> {
    /// Severity of the message.
    pub severity: Severity,

    /// Path of a source file related to the message, or the program name if no
    /// source file is related.
    pub source: &'a str,

    /// Textual location within source file related to the message, or
    /// [`Location::UNKNOWN`] if no location is related.
    pub location: Location,

    /// Message content.
    content: Arguments<'a>
}

impl<'a> Message<'a> {
    /// Creates a `Message` with the given severity and format arguments,
    /// without a related source file path or textual location.
    #[inline]
    pub const fn new(sev: Severity, args: Arguments<'a>) -> Self {
        Self::at(crate::PROGRAM_NAME, Location::UNKNOWN, sev, args)
    }

    /// Creates a `Message` with the given severity and format arguments,
    /// related to the given source file path and textual location.
    #[inline]
    pub const fn at(path: &'a str, loc: Location, sev: Severity, args: Arguments<'a>) -> Self {
        Self {
            severity: sev,
            source:   path,
            location: loc,
            content:  args
        }
    }
}

impl Display for Message<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let sep = if self.location.is_known() { ":" } else { "" };
        write!(f, "{}{}{}: {}{}",
            self.source,
            sep,
            self.location,
            self.severity,
            self.content
        )
    }
}

// -----------------------------------------------------------------------------

/// Message severity levels.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Severity {
    /// For informational messages.
    Normal,

    /// For potential problems that do not prevent parsing.
    Warning,

    /// For problems that abort parsing of one input.
    /// Other inputs are still processed, but the program exits unsuccessfully.
    Error,

    /// For severe, unrecoverable problems.
    /// The program terminates immediately.
    Fatal,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match *self {
            Severity::Normal  => "",
            Severity::Warning => "warning: ",
            Severity::Error   => "error: ",
            Severity::Fatal   => "fatal: ",
        })
    }
}

// -----------------------------------------------------------------------------

/// A sink for diagnostic messages.
pub trait Log {
    /// Reports an informational message.
    fn log<M: Display>(&mut self, msg: M) -> Result;

    /// Reports a warning message.
    fn log_warning<M: Display>(&mut self, msg: M) -> Result;

    /// Reports an error message.
    fn log_error<M: Display>(&mut self, msg: M) -> Result;
}

/// A message that knows its severity and can report itself to a [`Log`].
pub trait Tell: Display {
    fn severity(&self) -> Severity;

    /// Reports the message.  Returns `Err(())` if the severity is
    /// [`Severity::Error`] or worse, so that callers can propagate with `?`.
    fn tell<L: Log>(&self, log: &mut L) -> Result {
        match self.severity() {
            Severity::Normal  => log.log(self),
            Severity::Warning => log.log_warning(self),
            _                 => log.log_error(self).and(Err(())),
        }
    }
}

// -----------------------------------------------------------------------------

/// An input could not be read.
#[derive(Clone, Copy, Debug)]
pub struct ReadError<'a>(pub &'a str, pub &'a io::Error);

impl Display for ReadError<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Message::at(self.0, Location::UNKNOWN, self.severity(), format_args!(
            "cannot read file: {}", self.1
        )).fmt(f)
    }
}

impl Tell for ReadError<'_> {
    fn severity(&self) -> Severity { Severity::Error }
}

/// A keyword override file could not be parsed.
#[derive(Clone, Copy, Debug)]
pub struct ConfigError<'a>(pub &'a str, pub &'a serde_json::Error);

impl Display for ConfigError<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let loc = Location::new(self.1.line() as u32, self.1.column() as u32);
        Message::at(self.0, loc, self.severity(), format_args!(
            "invalid keyword overrides: {}", self.1
        )).fmt(f)
    }
}

impl Tell for ConfigError<'_> {
    fn severity(&self) -> Severity { Severity::Fatal }
}

/// Parsing of a source file failed.
#[derive(Clone, Copy, Debug)]
pub struct SourceError<'a>(pub &'a str, pub &'a Error);

impl Display for SourceError<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Message::at(self.0, self.1.location(), self.severity(), format_args!(
            "{}", self.1
        )).fmt(f)
    }
}

impl Tell for SourceError<'_> {
    fn severity(&self) -> Severity { Severity::Error }
}

// -----------------------------------------------------------------------------
