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

//! Builder scopes.

use rustc_hash::FxHashMap;

use super::Term;

// ----------------------------------------------------------------------------

/// Stack of records indexed by depth.
///
/// Popped records stay allocated and are reset when pushed again, so that a
/// long-lived builder stops allocating once its deepest nesting is reached.
#[derive(Clone, Debug)]
pub(super) struct Pool<T> {
    slots: Vec<T>,
    depth: usize,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { slots: Vec::new(), depth: 0 }
    }
}

impl<T: Default> Pool<T> {
    /// Pushes a record and returns it.  The record holds whatever a previous
    /// user left in it.
    pub fn push(&mut self) -> &mut T {
        if self.depth == self.slots.len() {
            self.slots.push(T::default());
        }
        self.depth += 1;
        &mut self.slots[self.depth - 1]
    }

    /// Pops the top record and returns it.  The record remains valid until
    /// the next push.
    pub fn pop(&mut self) -> &mut T {
        debug_assert!(self.depth > 0, "pool underflow");
        self.depth -= 1;
        &mut self.slots[self.depth]
    }
}

impl<T> Pool<T> {
    /// Returns the number of records pushed.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the number of records allocated.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn top(&self) -> &T {
        &self.slots[self.depth - 1]
    }

    #[inline]
    pub fn top_mut(&mut self) -> &mut T {
        &mut self.slots[self.depth - 1]
    }

    /// Returns the pushed records, outermost first.
    #[inline]
    pub fn live(&self) -> &[T] {
        &self.slots[..self.depth]
    }

    #[inline]
    pub fn get_mut(&mut self, depth: usize) -> &mut T {
        debug_assert!(depth < self.depth, "pool index beyond top");
        &mut self.slots[depth]
    }
}

// ----------------------------------------------------------------------------

/// Builder state for one function under construction.
#[derive(Clone, Default, Debug)]
pub(super) struct FunctionScope {
    /// Depth of the function's outermost block in the block pool.
    pub first_block: usize,

    /// Next free local slot.
    pub next_local: u32,

    /// Greatest number of local slots in use at once.
    pub local_count: u32,

    /// Number of parameters.
    pub arity: u32,
}

impl FunctionScope {
    pub fn reset(&mut self, first_block: usize) {
        self.first_block = first_block;
        self.next_local  = 0;
        self.local_count = 0;
        self.arity       = 0;
    }
}

/// Builder state for one block under construction.
#[derive(Clone, Default, Debug)]
pub(super) struct BlockScope {
    /// Locals declared in the block, mapped to their slots.
    pub locals: FxHashMap<String, u32>,

    /// Statements known not to be last.
    pub stmts: Vec<Term>,

    /// Most recent statement, held back because it might be the block's value.
    pub result: Option<Term>,

    /// Whether statements other than the last belong to the parent block.
    pub inherit: bool,

    /// First local slot owned by the block.
    pub first_local: u32,
}

impl BlockScope {
    pub fn reset(&mut self, inherit: bool, first_local: u32) {
        self.locals.clear();
        self.stmts.clear();
        self.result      = None;
        self.inherit     = inherit;
        self.first_local = first_local;
    }
}
