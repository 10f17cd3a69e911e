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

//! Tree display of abstract syntax graphs.
//!
//! ```text
//! Graph
//! ╰─Function(0, entry)
//!   ╰─Block
//!     ├─SetLocal(0)
//!     │ ╰─Value(1)
//!     ╰─GetLocal(0)
//! ```

use std::fmt::{self, Display, Formatter};
use colored::*;

use super::{Function, Kind, SyntaxGraph, Term};

// ----------------------------------------------------------------------------

/// Node wrapper to facilitate [`Display`] implementation.
#[derive(Clone, Copy, Debug)]
struct ForDisplay<'a, T: ?Sized> {
    node:    &'a T,
    graph:   &'a SyntaxGraph,
    nesting: Nesting<'a>,
}

#[derive(Clone, Copy, Debug)]
struct DisplayNode0<'a> {
    kind:    &'a str,
    nesting: Nesting<'a>,
}

#[derive(Clone, Copy, Debug)]
struct DisplayNode1<'a, T0: Display> {
    kind:    &'a str,
    nesting: Nesting<'a>,
    data:    T0,
}

#[derive(Clone, Copy, Debug)]
struct DisplayNode2<'a, T0: Display, T1: Display> {
    kind:    &'a str,
    nesting: Nesting<'a>,
    data:    (T0, T1),
}

#[derive(Clone, Copy, Debug)]
enum Nesting<'a> {
    Root,
    Child { more: bool, parent: &'a Self }
}

#[derive(Clone, Copy, Debug)]
struct Indent<'a> (Nesting<'a>);

/// A function paired with its index in the graph.
#[derive(Clone, Copy, Debug)]
struct Indexed<'a> (usize, &'a Function);

impl SyntaxGraph {
    /// Returns a wrapper over the graph that implements [`Display`] as an
    /// indented tree.
    pub fn for_display(&self) -> impl Display + '_ {
        ForDisplay { node: self, graph: self, nesting: Nesting::Root }
    }
}

impl<T: ?Sized> ForDisplay<'_, T> {
    fn child<'a, U: ?Sized>(&'a self, node: &'a U, more: bool) -> ForDisplay<'a, U> {
        let nesting = Nesting::Child { more, parent: &self.nesting };
        ForDisplay { node, graph: self.graph, nesting }
    }

    fn children<'a, U>(&'a self, nodes: &'a [U], f: &mut Formatter) -> fmt::Result
    where
        ForDisplay<'a, U>: Display
    {
        if let [nodes @ .., last] = nodes {
            for node in nodes {
                self.child(node, true).fmt(f)?;
            }
            self.child(last, false).fmt(f)
        } else {
            Ok(())
        }
    }

    fn node0<'a>(
        &'a self, kind: &'a str
    ) -> DisplayNode0<'a> {
        DisplayNode0 { kind, nesting: self.nesting }
    }

    fn node1<'a, T0: Display>(
        &'a self, kind: &'a str, data: T0
    ) -> DisplayNode1<'a, T0> {
        DisplayNode1 { kind, nesting: self.nesting, data }
    }

    fn node2<'a, T0: Display, T1: Display>(
        &'a self, kind: &'a str, data0: T0, data1: T1
    ) -> DisplayNode2<'a, T0, T1> {
        DisplayNode2 { kind, nesting: self.nesting, data: (data0, data1) }
    }
}

impl Display for DisplayNode0<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f,
            "{}{}",
            Indent(self.nesting),
            self.kind.green()
        )
    }
}

impl<T0: Display> Display for DisplayNode1<'_, T0> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f,
            "{}{}({})",
            Indent(self.nesting),
            self.kind.green(),
            self.data
        )
    }
}

impl<T0: Display, T1: Display> Display for DisplayNode2<'_, T0, T1> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f,
            "{}{}({}, {})",
            Indent(self.nesting),
            self.kind.green(),
            self.data.0,
            self.data.1
        )
    }
}

impl Display for Nesting<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use Nesting::*;
        match *self {
            Root => Ok(()),
            Child { more, parent } => {
                let text = if more { "│ " } else { "  " };
                write!(f, "{}{}", parent, text.white().dimmed())
            },
        }
    }
}

impl Display for Indent<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use Nesting::*;
        match self.0 {
            Root => Ok(()),
            Child { more, parent } => {
                let text = if more { "├─" } else { "╰─" };
                write!(f, "{}{}", parent, text.white().dimmed())
            },
        }
    }
}

impl Display for ForDisplay<'_, SyntaxGraph> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.node0("Graph").fmt(f)?;

        let functions = self.node.functions
            .iter()
            .enumerate()
            .map(|(i, function)| Indexed(i, function))
            .collect::<Vec<_>>();

        self.children(&functions, f)
    }
}

impl Display for ForDisplay<'_, Indexed<'_>> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Indexed(index, function) = *self.node;

        let is_entry = self.graph.entry_points.iter().any(|&e| e as usize == index);
        let mut info = format!("locals: {}", function.local_count);
        if function.arity > 0 {
            info += &format!(", arity: {}", function.arity);
        }
        if is_entry {
            info += ", entry";
        }

        self.node2("Function", index, info).fmt(f)?;
        self.child(&function.root, false).fmt(f)
    }
}

impl Display for ForDisplay<'_, Term> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        use Kind::*;
        match self.node.kind {
            Value       { ref value } => self.node1("Value",       value).fmt(f),
            GetLocal    { index     } => self.node1("GetLocal",    index).fmt(f),
            GetGlobal   { ref name  } => self.node1("GetGlobal",   name ).fmt(f),
            GetFunction { index     } => self.node1("GetFunction", index).fmt(f),

            Block { ref terms } => {
                self.node0("Block").fmt(f)?;
                self.children(terms, f)
            },
            SetLocal { index, ref value } => {
                self.node1("SetLocal", index).fmt(f)?;
                self.child(&**value, false).fmt(f)
            },
            SetGlobal { ref name, ref value } => {
                self.node1("SetGlobal", name).fmt(f)?;
                self.child(&**value, false).fmt(f)
            },
        }
    }
}
