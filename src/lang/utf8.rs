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

//! UTF-8 codec.
//!
//! This is the original form of UTF-8, which permits sequences of up to six
//! bytes and code points up to `U+7FFFFFFF`.  Validation is structural only:
//! overlong forms and surrogates are not rejected.

/// Code point returned by [`decode`] for a malformed sequence.
pub const DECODE_ERROR: u32 = u32::MAX;

/// Maximum length in bytes of an encoded code point.
pub const MAX_LEN: usize = 6;

/// Returns the length of the sequence introduced by the given header byte,
/// or `0` if the byte cannot begin a sequence.
#[inline]
pub const fn sequence_len(header: u8) -> usize {
    match header.leading_ones() {
        0          => 1,
        n @ 2..=6  => n as usize,
        _          => 0, // continuation byte, 0xFE, 0xFF
    }
}

/// Decodes the code point at the start of `bytes`.
///
/// Returns the code point and the number of bytes it occupies.  A malformed
/// or truncated sequence yields [`DECODE_ERROR`] and a length of `1`.  Empty
/// input yields [`DECODE_ERROR`] and a length of `0`.
pub fn decode(bytes: &[u8]) -> (u32, usize) {
    let header = match bytes.first() {
        Some(&b) => b,
        None     => return (DECODE_ERROR, 0),
    };

    let len = sequence_len(header);
    match len {
        0 => return (DECODE_ERROR,  1),
        1 => return (header as u32, 1),
        _ if bytes.len() < len => return (DECODE_ERROR, 1),
        _ => (),
    }

    // Header carries (7 - len) payload bits
    let mut cp = (header & (0x7F >> len)) as u32;

    for &b in &bytes[1..len] {
        if b & 0xC0 != 0x80 {
            return (DECODE_ERROR, 1);
        }
        cp = cp << 6 | (b & 0x3F) as u32;
    }

    (cp, len)
}

/// Returns the number of bytes required to encode `cp`, or `0` if `cp` is
/// beyond the encodable range.
#[inline]
pub const fn encoded_len(cp: u32) -> usize {
    match cp {
        0x0000_0000..=0x0000_007F => 1,
        0x0000_0080..=0x0000_07FF => 2,
        0x0000_0800..=0x0000_FFFF => 3,
        0x0001_0000..=0x001F_FFFF => 4,
        0x0020_0000..=0x03FF_FFFF => 5,
        0x0400_0000..=0x7FFF_FFFF => 6,
        _                         => 0,
    }
}

/// Encodes `cp` into `buf` in its shortest form.
///
/// Returns the number of bytes written, or `0` if `cp` is beyond the
/// encodable range.
pub fn encode(cp: u32, buf: &mut [u8; MAX_LEN]) -> usize {
    let len = encoded_len(cp);
    match len {
        0 => return 0,
        1 => { buf[0] = cp as u8; return 1 },
        _ => (),
    }

    let mut v = cp;
    for b in buf[1..len].iter_mut().rev() {
        *b = 0x80 | (v & 0x3F) as u8;
        v >>= 6;
    }
    buf[0] = (0xFF00_u16 >> len) as u8 | v as u8;

    len
}
