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

//! Input cursor.

use std::ops::Range;

use crate::util::Location;
use super::utf8;

// ----------------------------------------------------------------------------

/// Input cursor specialized for lexical analysis.
///
/// A `Cursor` provides a forward-only view of a window of a borrowed byte
/// buffer, decoding code points on demand and tracking the line and column
/// of the current position.  Positions are byte offsets into the whole
/// buffer, not the window.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
    end: usize,
    loc: Location,
}

impl<'a> Cursor<'a> {
    /// Creates a new [`Cursor`] over the whole of `buf`.
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0, end: buf.len(), loc: Location::BOF }
    }

    /// Creates a new [`Cursor`] over the `size` bytes of `buf` beginning at
    /// `offset`.  The window is clamped to the buffer.
    ///
    /// Locations are counted from the start of the window.
    pub fn with_window(buf: &'a [u8], offset: usize, size: usize) -> Self {
        debug_assert!(offset <= buf.len(), "window offset beyond end of buffer");

        let pos = offset.min(buf.len());
        let end = pos.saturating_add(size).min(buf.len());
        Self { buf, pos, end, loc: Location::BOF }
    }

    /// Returns the current byte offset of the cursor.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the location of the current position of the cursor.
    #[inline(always)]
    pub fn location(&self) -> Location {
        self.loc
    }

    /// Returns whether the cursor is at the end of its window.
    #[inline(always)]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.end
    }

    /// Returns the byte at the current position, if any.
    #[inline(always)]
    pub fn peek_byte(&self) -> Option<u8> {
        self.peek_byte_at(0)
    }

    /// Returns the byte `n` bytes after the current position, if any.
    #[inline(always)]
    pub fn peek_byte_at(&self, n: usize) -> Option<u8> {
        let i = self.pos + n;
        if i < self.end { Some(self.buf[i]) } else { None }
    }

    /// Decodes the code point at the current position.
    ///
    /// Returns `None` at the end of the window.  Otherwise, returns the code
    /// point and its length in bytes.  A malformed sequence is returned as
    /// [`utf8::DECODE_ERROR`] with a length of `1`.
    #[inline]
    pub fn peek(&self) -> Option<(u32, usize)> {
        match self.peek_byte()? {
            b if b < 0x80 => Some((b as u32, 1)),
            _             => Some(utf8::decode(&self.buf[self.pos..self.end])),
        }
    }

    /// Advances the cursor past a code point previously returned by
    /// [`Self::peek`].
    #[inline]
    pub fn advance(&mut self, ch: u32, len: usize) {
        debug_assert!(self.pos + len <= self.end, "advanced beyond end of window");

        self.pos += len;
        self.loc  = if ch == '\n' as u32 {
            self.loc.next_line()
        } else {
            self.loc.next_column()
        };
    }

    /// Advances the cursor past one byte known to be ASCII other than a line
    /// feed.
    #[inline]
    pub fn advance_byte(&mut self) {
        debug_assert!(matches!(self.peek_byte(), Some(b) if b < 0x80 && b != b'\n'));

        self.pos += 1;
        self.loc  = self.loc.next_column();
    }

    /// Returns the bytes in the given range of the underlying buffer.
    #[inline]
    pub fn slice(&self, range: Range<usize>) -> &'a [u8] {
        &self.buf[range]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_use() {
        let mut cursor = Cursor::new("Hi\n\u{ED}!".as_bytes());

        assert_eq!( cursor.position(), 0                 );
        assert_eq!( cursor.location(), Location::new(1, 1) );
        assert_eq!( cursor.peek(),     Some(('H' as u32, 1)) );

        cursor.advance_byte();
        assert_eq!( cursor.peek(),     Some(('i' as u32, 1)) );
        assert_eq!( cursor.location(), Location::new(1, 2) );

        cursor.advance_byte();
        assert_eq!( cursor.peek(),     Some(('\n' as u32, 1)) );

        cursor.advance('\n' as u32, 1);
        assert_eq!( cursor.peek(),     Some((0xED, 2))     );
        assert_eq!( cursor.location(), Location::new(2, 1) );

        cursor.advance(0xED, 2);
        assert_eq!( cursor.position(), 5                   );
        assert_eq!( cursor.location(), Location::new(2, 2) );

        cursor.advance_byte();
        assert_eq!( cursor.peek(),     None                );
        assert!   ( cursor.is_at_end()                     );
    }

    #[test]
    fn cursor_malformed() {
        let buf    = [b'a', 0xFF];
        let cursor = Cursor::new(&buf[1..]);

        assert_eq!( cursor.peek(), Some((utf8::DECODE_ERROR, 1)) );
    }

    #[test]
    fn cursor_window() {
        let buf    = b"let x = 1";
        let cursor = Cursor::with_window(buf, 4, 3);

        assert_eq!( cursor.position(),      4       );
        assert_eq!( cursor.peek_byte(),     Some(b'x') );
        assert_eq!( cursor.peek_byte_at(2), Some(b'=') );
        assert_eq!( cursor.peek_byte_at(3), None    );
        assert_eq!( cursor.slice(4..7),     b"x ="  );
    }

    #[test]
    fn cursor_window_clamped() {
        let cursor = Cursor::with_window(b"abc", 1, 100);

        assert_eq!( cursor.peek_byte_at(1), Some(b'c') );
        assert_eq!( cursor.peek_byte_at(2), None       );
    }

    #[test]
    fn cursor_window_truncates_sequence() {
        let buf    = "a\u{20AC}".as_bytes();
        let cursor = Cursor::with_window(buf, 1, 2);

        assert_eq!( cursor.peek(), Some((utf8::DECODE_ERROR, 1)) );
    }
}
