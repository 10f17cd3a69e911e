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

//! Abstract syntax graphs.
//!
//! A [`SyntaxGraph`] is a flat list of [`Function`]s.  Each function owns a
//! tree of [`Term`]s; functions refer to each other only by index, through
//! [`Kind::GetFunction`] terms.  Local variables are resolved to slot indexes
//! while the graph is built, so no name lookup remains for later stages.

use std::fmt::{self, Display, Formatter};
use serde::{Deserialize, Serialize};
use serde::de::Error as _;

use crate::util::Location;

pub mod builder;
mod display;
mod scope;

// ----------------------------------------------------------------------------

/// Literal value.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// The undefined value.
    #[default]
    Undefined,

    /// Number.
    Number(f64),

    /// String.
    String(String),
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            Literal::Undefined     => f.write_str("undefined"),
            Literal::Number(n)     => write!(f, "{}",   n),
            Literal::String(ref s) => write!(f, "{:?}", s),
        }
    }
}

// ----------------------------------------------------------------------------

/// Node of an abstract syntax graph.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Term {
    /// What the term does.
    #[serde(flatten)]
    pub kind: Kind,

    /// Where the term came from, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// Kinds of [`Term`].
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Kind {
    /// Constant value.
    Value { value: Literal },

    /// Sequence of terms, evaluating to the last.
    Block { terms: Vec<Term> },

    /// Read of a local variable slot.
    GetLocal { index: u32 },

    /// Write of a local variable slot.
    SetLocal { index: u32, value: Box<Term> },

    /// Read of a global variable.
    GetGlobal { name: String },

    /// Write of a global variable.
    SetGlobal { name: String, value: Box<Term> },

    /// Reference to a function of the graph.
    GetFunction { index: u32 },
}

impl Term {
    #[inline]
    pub fn new(kind: Kind, location: Option<Location>) -> Self {
        Self { kind, location }
    }

    /// Creates a term for the undefined value.
    #[inline]
    pub fn undefined(location: Option<Location>) -> Self {
        Self::new(Kind::Value { value: Literal::Undefined }, location)
    }

    /// Returns whether evaluating the term has no effect other than producing
    /// its value.
    pub fn is_pure(&self) -> bool {
        matches!(self.kind,
            Kind::Value       { .. } |
            Kind::GetLocal    { .. } |
            Kind::GetGlobal   { .. } |
            Kind::GetFunction { .. }
        )
    }

    /// Returns whether `self` and `other` read the same variable.
    pub fn is_same_variable(&self, other: &Term) -> bool {
        match (&self.kind, &other.kind) {
            (Kind::GetLocal  { index: a }, Kind::GetLocal  { index: b }) => a == b,
            (Kind::GetGlobal { name:  a }, Kind::GetGlobal { name:  b }) => a == b,
            _ => false,
        }
    }

    /// Converts a variable read into a write of `value` to the same variable.
    ///
    /// Returns the term unchanged as the error if it is not a variable read.
    pub fn promote(self, value: Term) -> Result<Term, Term> {
        let value = Box::new(value);
        let kind = match self.kind {
            Kind::GetLocal  { index } => Kind::SetLocal  { index, value },
            Kind::GetGlobal { name  } => Kind::SetGlobal { name,  value },
            kind => return Err(Term { kind, ..self }),
        };
        Ok(Term::new(kind, self.location))
    }

    /// Calls `f` for this term and each term beneath it, in pre-order.
    pub fn walk(&self, f: &mut dyn FnMut(&Term)) {
        f(self);
        match self.kind {
            Kind::Block     { ref terms } => for t in terms { t.walk(f) },
            Kind::SetLocal  { ref value, .. } => value.walk(f),
            Kind::SetGlobal { ref value, .. } => value.walk(f),
            _ => (),
        }
    }

    /// Calls `f` for this term and each term beneath it, in pre-order,
    /// permitting modification.
    pub fn walk_mut(&mut self, f: &mut dyn FnMut(&mut Term)) {
        f(self);
        match self.kind {
            Kind::Block     { ref mut terms } => for t in terms { t.walk_mut(f) },
            Kind::SetLocal  { ref mut value, .. } => value.walk_mut(f),
            Kind::SetGlobal { ref mut value, .. } => value.walk_mut(f),
            _ => (),
        }
    }
}

// ----------------------------------------------------------------------------

/// Function of an abstract syntax graph.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Function {
    /// Number of local variable slots required.  Parameters occupy the first
    /// [`Self::arity`] slots.
    pub local_count: u32,

    /// Number of parameters.
    pub arity: u32,

    /// Body.
    pub root: Term,
}

/// Abstract syntax graph: the output of parsing.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct SyntaxGraph {
    /// Functions, referenced by index.
    pub functions: Vec<Function>,

    /// Indexes of the functions that represent whole source units.
    pub entry_points: Vec<u32>,
}

impl SyntaxGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a function and returns its index.
    pub(crate) fn add_function(&mut self, function: Function) -> u32 {
        let index = self.functions.len() as u32;
        self.functions.push(function);
        index
    }

    /// Returns the function at the given index.
    #[inline]
    pub fn function(&self, index: u32) -> Option<&Function> {
        self.functions.get(index as usize)
    }

    /// Removes functions that cannot be reached from any entry point and
    /// renumbers the rest, preserving their relative order.
    pub fn retain_reachable(&mut self) {
        let mut live = vec![false; self.functions.len()];
        let mut work = self.entry_points.clone();

        while let Some(index) = work.pop() {
            let index = index as usize;
            if index >= live.len() || live[index] {
                continue;
            }
            live[index] = true;
            self.functions[index].root.walk(&mut |t: &Term| {
                if let Kind::GetFunction { index } = t.kind {
                    work.push(index)
                }
            });
        }

        if live.iter().all(|&l| l) {
            return;
        }

        let mut map  = vec![u32::MAX; live.len()];
        let mut next = 0;
        for (i, &l) in live.iter().enumerate() {
            if l {
                map[i] = next;
                next  += 1;
            }
        }

        let functions = std::mem::take(&mut self.functions);
        self.functions = functions
            .into_iter()
            .zip(&live)
            .filter_map(|(f, &l)| l.then_some(f))
            .collect();

        for function in &mut self.functions {
            function.root.walk_mut(&mut |t: &mut Term| {
                if let Kind::GetFunction { ref mut index } = t.kind {
                    remap(&map, index)
                }
            });
        }
        for index in &mut self.entry_points {
            remap(&map, index);
        }
    }

    /// Returns the first function index, in an entry point or a
    /// [`Kind::GetFunction`] term, that does not refer to a function of the
    /// graph.
    pub fn dangling_index(&self) -> Option<u32> {
        let count = self.functions.len();

        if let Some(&index) = self.entry_points.iter().find(|&&i| i as usize >= count) {
            return Some(index);
        }

        let mut found = None;
        for function in &self.functions {
            function.root.walk(&mut |t: &Term| {
                if let Kind::GetFunction { index } = t.kind {
                    if found.is_none() && index as usize >= count {
                        found = Some(index)
                    }
                }
            });
        }
        found
    }

    /// Serializes the graph as compact JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serializes the graph as indented JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a graph from JSON.  Fails if any function index is out
    /// of range.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let graph = serde_json::from_str::<Self>(json)?;

        match graph.dangling_index() {
            Some(index) => Err(serde_json::Error::custom(format_args!(
                "function index {} out of range", index
            ))),
            None => Ok(graph),
        }
    }
}

/// Replaces `index` with its new number.  An index with no new number is
/// left unchanged.
#[inline]
fn remap(map: &[u32], index: &mut u32) {
    match map.get(*index as usize) {
        Some(&new) if new != u32::MAX => *index = new,
        _                            => (),
    }
}
