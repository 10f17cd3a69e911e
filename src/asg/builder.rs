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

//! Abstract syntax graph builder.
//!
//! The builder tracks nested functions and blocks while the parser feeds it
//! terms in source order.  It resolves names to local slots, assigns slots
//! so that sibling blocks share them, and simplifies blocks as they close:
//!
//! - a pure statement followed by another statement is dropped;
//! - a block of one term becomes that term;
//! - an empty block becomes `undefined`;
//! - `x = x` becomes `undefined`.
//!
//! When the outermost function closes, it becomes an entry point of the
//! graph, and functions no longer reachable from any entry point are
//! removed.

use crate::error::{Error, Result};
use crate::util::Location;

use super::{Function, Kind, Literal, SyntaxGraph, Term};
use super::scope::{BlockScope, FunctionScope, Pool};

// ----------------------------------------------------------------------------

/// Abstract syntax graph builder.
#[derive(Clone, Default, Debug)]
pub struct AsgBuilder {
    functions: Pool<FunctionScope>,
    blocks:    Pool<BlockScope>,
    graph:     SyntaxGraph,
}

impl AsgBuilder {
    /// Creates a new builder with an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // === Terms ===

    /// Creates a constant term.
    pub fn create_value(&self, value: Literal, location: Location) -> Term {
        Term::new(Kind::Value { value }, Some(location))
    }

    /// Creates a read of the variable with the given name.
    ///
    /// The name resolves to the innermost local of that name in the current
    /// function.  Locals of enclosing functions are not visible; a name with
    /// no local resolves to a global.
    pub fn create_get(&self, name: &str, location: Location) -> Term {
        let kind = match self.lookup(name) {
            Some(index) => Kind::GetLocal  { index },
            None        => Kind::GetGlobal { name: name.into() },
        };
        Term::new(kind, Some(location))
    }

    /// Creates an assignment of `rhs` to the variable read by `lhs`.
    ///
    /// Assigning a variable to itself yields `undefined`.  Fails if `lhs` is
    /// not a variable read.
    pub fn create_assign(&self, lhs: Term, rhs: Term) -> Result<Term> {
        if lhs.is_same_variable(&rhs) {
            return Ok(Term::undefined(lhs.location));
        }

        lhs.promote(rhs).map_err(|lhs| Error::name(
            lhs.location.unwrap_or_default(),
            "invalid assignment target"
        ))
    }

    // === Locals ===

    /// Declares a local variable in the current block and returns a read of
    /// it.  Fails if the block already declares a local of that name.
    pub fn alloc_local(&mut self, name: &str, location: Location) -> Result<Term> {
        let function = self.functions.top_mut();
        let block    = self.blocks.top_mut();

        if block.locals.contains_key(name) {
            return Err(Error::name(location, format!("duplicate local `{}` in block", name)));
        }

        let index = function.next_local;
        function.next_local += 1;
        function.local_count = function.local_count.max(function.next_local);
        block.locals.insert(name.into(), index);

        Ok(Term::new(Kind::GetLocal { index }, Some(location)))
    }

    /// Declares a parameter of the current function.  Parameters must be
    /// declared before any other local.
    pub fn add_parameter(&mut self, name: &str, location: Location) -> Result<()> {
        debug_assert_eq!(
            self.functions.top().arity, self.functions.top().next_local,
            "parameter declared after a local"
        );

        self.alloc_local(name, location)?;
        self.functions.top_mut().arity += 1;
        Ok(())
    }

    fn lookup(&self, name: &str) -> Option<u32> {
        let first = match self.functions.depth() {
            0 => 0,
            _ => self.functions.top().first_block,
        };

        self.blocks.live()[first..]
            .iter()
            .rev()
            .find_map(|b| b.locals.get(name).copied())
    }

    // === Blocks ===

    /// Appends a statement to the current block.
    pub fn create_statement(&mut self, term: Term) {
        debug_assert!(self.blocks.depth() > 0, "statement outside of any block");

        self.append(self.blocks.depth() - 1, term);
    }

    /// Appends a statement to the block at the given depth.  The previous
    /// statement of the block is then known not to be last; in an inheriting
    /// block it moves to the parent block.
    fn append(&mut self, depth: usize, term: Term) {
        let block = self.blocks.get_mut(depth);

        let prev = match block.result.replace(term) {
            Some(prev) => prev,
            None       => return,
        };

        if block.inherit {
            self.append(depth - 1, prev)
        } else {
            block.stmts.push(prev)
        }
    }

    /// Opens a block.  The statements of an inheriting block, except the
    /// last, are placed in the enclosing block.
    pub fn push_block(&mut self, inherit: bool) {
        debug_assert!(
            !inherit || self.blocks.depth() > self.functions.top().first_block,
            "function body cannot inherit"
        );

        let first_local = self.functions.top().next_local;
        self.blocks.push().reset(inherit, first_local);
    }

    /// Closes the current block and returns its value as a term.  Local slots
    /// of the block become free for reuse by later blocks.
    pub fn pop_block(&mut self, location: Location) -> Term {
        debug_assert!(
            self.blocks.depth() > self.functions.top().first_block,
            "block popped past its function"
        );

        let first_local = self.blocks.top().first_local;
        self.functions.top_mut().next_local = first_local;

        let block = self.blocks.pop();
        let last  = block.result.take();

        if block.inherit {
            return last.unwrap_or_else(|| Term::undefined(Some(location)));
        }

        let mut terms = block.stmts
            .drain(..)
            .filter(|t| !t.is_pure())
            .collect::<Vec<_>>();

        match last {
            None if terms.is_empty() => Term::undefined(Some(location)),
            Some(last) if terms.is_empty() => last,
            last => {
                terms.extend(last);
                Term::new(Kind::Block { terms }, Some(location))
            },
        }
    }

    // === Functions ===

    /// Opens a function and its body block.
    pub fn push_function(&mut self) {
        let first_block = self.blocks.depth();
        self.functions.push().reset(first_block);
        self.blocks.push().reset(false, 0);
    }

    /// Closes the current function, adds it to the graph, and returns a
    /// reference to it.
    ///
    /// If the function is outermost, it becomes an entry point, and any
    /// function no longer reachable from an entry point is removed.
    pub fn pop_function(&mut self, location: Location) -> Term {
        let root = self.pop_block(location);

        debug_assert_eq!(
            self.blocks.depth(), self.functions.top().first_block,
            "function popped with open blocks"
        );

        let scope = self.functions.pop();
        let mut index = self.graph.add_function(Function {
            local_count: scope.local_count,
            arity:       scope.arity,
            root,
        });

        if self.functions.depth() == 0 {
            self.graph.entry_points.push(index);
            self.graph.retain_reachable();
            index = self.graph.entry_points.last().copied().unwrap_or_default();
        }

        Term::new(Kind::GetFunction { index }, Some(location))
    }

    // === Output ===

    /// Returns the number of functions currently open.
    #[inline]
    pub fn function_depth(&self) -> usize {
        self.functions.depth()
    }

    /// Returns the number of blocks currently open.
    #[inline]
    pub fn block_depth(&self) -> usize {
        self.blocks.depth()
    }

    /// Returns the graph built so far.  Every function must be closed.
    pub fn get(&self) -> &SyntaxGraph {
        debug_assert_eq!(self.functions.depth(), 0, "graph requested with open functions");
        &self.graph
    }

    /// Consumes the builder and returns the graph.  Every function must be
    /// closed.
    pub fn into_graph(self) -> SyntaxGraph {
        debug_assert_eq!(self.functions.depth(), 0, "graph requested with open functions");
        self.graph
    }
}
