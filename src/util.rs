// This file is part of skein, an embeddable scripting language.
// Copyright (C) 2020 Jeffrey Sharp
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

use std::fmt::{self, Debug, Display, Formatter};
use serde::{Deserialize, Serialize};

/// A source code location.
///
/// The 1-based line and column numbers are packed into a single word, line
/// in the upper half.  A `0` line or column indicates an unknown value.
/// Locations serve diagnostics only and never affect semantics.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(from = "LineColumn", into = "LineColumn")]
pub struct Location(u64);

/// Unpacked form of [`Location`] used for serialization.
#[derive(Clone, Copy, Serialize, Deserialize)]
struct LineColumn {
    line:   u32,
    column: u32,
}

impl Location {
    pub const UNKNOWN: Self = Self::new(0, 0);
    pub const BOF:     Self = Self::new(1, 1);

    pub const fn new(line: u32, column: u32) -> Self {
        Self((line as u64) << 32 | column as u64)
    }

    /// Returns the 1-based line number, or `0` if unknown.
    #[inline]
    pub const fn line(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Returns the 1-based column number, or `0` if unknown.
    #[inline]
    pub const fn column(self) -> u32 {
        self.0 as u32
    }

    /// Returns whether any part of the location is known.
    #[inline]
    pub const fn is_known(self) -> bool {
        self.0 != 0
    }

    /// Returns the location of the next column on the same line.
    #[inline]
    pub(crate) fn next_column(self) -> Self {
        debug_assert!(self.column() < u32::MAX, "column overflow");
        Self(self.0 + 1)
    }

    /// Returns the location of the first column of the next line.
    #[inline]
    pub(crate) fn next_line(self) -> Self {
        debug_assert!(self.line() < u32::MAX, "line overflow");
        Self::new(self.line() + 1, 1)
    }
}

impl From<LineColumn> for Location {
    fn from(lc: LineColumn) -> Self {
        Self::new(lc.line, lc.column)
    }
}

impl From<Location> for LineColumn {
    fn from(loc: Location) -> Self {
        Self { line: loc.line(), column: loc.column() }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match (self.line(), self.column()) {
            (0, 0) => Ok(()),
            (l, 0) => write!(f, "{}",    l   ),
            (l, c) => write!(f, "{}:{}", l, c),
        }
    }
}

impl Debug for Location {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Location({}, {})", self.line(), self.column())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn location_unknown() {
        assert_eq!( Location::UNKNOWN, Location::new(0, 0) );
        assert_eq!( Location::UNKNOWN, Location::default()  );
        assert!   ( !Location::UNKNOWN.is_known()           );
    }

    #[test]
    fn location_bof() {
        assert_eq!( Location::BOF, Location::new(1, 1) );
        assert!   ( Location::BOF.is_known()           );
    }

    #[test]
    fn location_packing() {
        let loc = Location::new(70_000, 12);

        assert_eq!( loc.line(),   70_000 );
        assert_eq!( loc.column(), 12     );
    }

    #[test]
    fn location_order() {
        assert!( Location::new(1, 9) < Location::new(2, 1) );
        assert!( Location::new(2, 1) < Location::new(2, 2) );
    }

    #[test]
    fn location_advance() {
        let loc = Location::BOF.next_column().next_column();
        assert_eq!( loc, Location::new(1, 3) );

        let loc = loc.next_line();
        assert_eq!( loc, Location::new(2, 1) );
    }

    #[test]
    fn location_display_fmt_0_0() {
        assert_eq!( format!("{}", Location::new(0, 0)), "" );
    }

    #[test]
    fn location_display_fmt_n_0() {
        assert_eq!( format!("{}", Location::new(1, 0)), "1" );
    }

    #[test]
    fn location_display_fmt_n_n() {
        assert_eq!( format!("{}", Location::new(1, 2)), "1:2" );
    }

    #[test]
    fn location_json() {
        let json = serde_json::to_string(&Location::new(3, 4)).unwrap();

        assert_eq!( json, r#"{"line":3,"column":4}"# );
        assert_eq!( serde_json::from_str::<Location>(&json).unwrap(), Location::new(3, 4) );
    }
}
