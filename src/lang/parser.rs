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

//! Parser.
//!
//! ```text
//! unit       = BREAK* (stmt (BREAK+ stmt)*)? BREAK* EOF
//! block      = "{" BREAK* (stmt (BREAK+ stmt)*)? BREAK* "}"
//! stmt       = "let" IDENT ("=" expr)?
//!            | expr
//! expr       = binary ("=" expr)?
//! binary     = unary                      -- operators not implemented
//! unary      = call                       -- operators not implemented
//! call       = index                      -- calls not implemented
//! index      = term                       -- indexing not implemented
//! term       = NUMBER | STRING | IDENT
//!            | "(" expr ")"
//!            | "do" block
//!            | "fun" ("(" (IDENT ("," IDENT)*)? ")")? block
//! ```
//!
//! The parser is incremental: each [`Parser::update`] parses one top-level
//! statement, so a host can interleave parsing with other work.

use crate::asg::{SyntaxGraph, Term};
use crate::asg::builder::AsgBuilder;
use crate::error::{Error, Result};
use crate::util::Location;

use super::lexer::Lexer;
use super::token::Token;

/// Writes a line to stderr when the `parser-trace` feature is enabled.
macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "parser-trace")]
        eprintln!("[parser] {}", format_args!($($arg)*));
    };
}

// ----------------------------------------------------------------------------

/// Parser progress.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
enum Phase {
    /// No token has been read.
    Start,

    /// Between top-level statements.
    Parsing,

    /// The end of input has been reached, and the graph is complete.
    Done,

    /// A statement has failed to parse.  The parse is abandoned.
    Failed,
}

/// Incremental parser.
#[derive(Debug)]
pub struct Parser<'a> {
    lexer:   Lexer<'a>,
    builder: AsgBuilder,
    token:   Token,
    phase:   Phase,
}

impl<'a> Parser<'a> {
    /// Creates a parser that reads from `lexer` into a new graph.
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self::with_builder(lexer, AsgBuilder::new())
    }

    /// Creates a parser that reads from `lexer` into the graph of an existing
    /// builder.  The parsed unit becomes an additional entry point.
    pub fn with_builder(lexer: Lexer<'a>, builder: AsgBuilder) -> Self {
        Self { lexer, builder, token: Token::Eof, phase: Phase::Start }
    }

    /// Parses the next top-level statement.
    ///
    /// Returns `Ok(true)` if more input remains, and `Ok(false)` once the
    /// input is exhausted and the graph is complete.  After an error, the
    /// parse is abandoned, and later calls return `Ok(false)`.
    pub fn update(&mut self) -> Result<bool> {
        if self.phase >= Phase::Done {
            return Ok(false);
        }

        let result = self.step();

        self.phase = match result {
            Ok(true)  => Phase::Parsing,
            Ok(false) => Phase::Done,
            Err(_)    => Phase::Failed,
        };

        result
    }

    /// Returns whether the parse has completed successfully.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Returns whether the parse has been abandoned after an error.
    #[inline]
    pub fn is_failed(&self) -> bool {
        self.phase == Phase::Failed
    }

    /// Returns the lexer.
    #[inline]
    pub fn lexer(&self) -> &Lexer<'a> {
        &self.lexer
    }

    /// Returns the completed graph, or `None` if the parse is not done.
    pub fn graph(&self) -> Option<&SyntaxGraph> {
        self.is_done().then(|| self.builder.get())
    }

    /// Consumes the parser and returns the completed graph, or `None` if the
    /// parse is not done.
    pub fn into_graph(self) -> Option<SyntaxGraph> {
        self.is_done().then(|| self.builder.into_graph())
    }

    /// Consumes the parser and returns its builder, so that another unit can
    /// be parsed into the same graph.  Returns `None` if the parse is not
    /// done.
    pub fn into_builder(self) -> Option<AsgBuilder> {
        self.is_done().then_some(self.builder)
    }

    fn step(&mut self) -> Result<bool> {
        if self.phase == Phase::Start {
            self.builder.push_function();
            self.advance()?;
        }

        self.skip_breaks()?;

        if self.token == Token::Eof {
            self.builder.pop_function(Location::BOF);
            return Ok(false);
        }

        let term = self.parse_statement()?;
        self.builder.create_statement(term);
        self.end_statement(Token::Eof)?;
        Ok(true)
    }

    // === Statements ===

    fn parse_statement(&mut self) -> Result<Term> {
        trace!("statement at {}: {}", self.lexer.location(), self.lexer.describe());

        match self.token {
            Token::Let => self.parse_let(),
            _          => self.parse_expression(),
        }
    }

    fn parse_let(&mut self) -> Result<Term> {
        self.advance()?;
        let (name, location) = self.expect_ident("expected a variable name after `let`")?;

        if !self.at_assign() {
            return self.builder.alloc_local(&name, location);
        }
        self.advance()?;

        // The initializer cannot see the variable it initializes
        let value = self.parse_expression()?;
        let local = self.builder.alloc_local(&name, location)?;
        self.builder.create_assign(local, value)
    }

    /// Parses `{ statements }` into the current block.
    fn parse_block(&mut self) -> Result<()> {
        self.expect(Token::BraceLeft, "expected `{`")?;

        loop {
            self.skip_breaks()?;
            match self.token {
                Token::BraceRight => break,
                Token::Eof        => return Err(self.syntax_error("expected `}`")),
                _                 => (),
            }

            let term = self.parse_statement()?;
            self.builder.create_statement(term);
            self.end_statement(Token::BraceRight)?;
        }

        self.advance()?;
        Ok(())
    }

    /// Consumes the end of a statement, which is either a line break or the
    /// given closing token.  The closing token is not consumed.
    fn end_statement(&mut self, close: Token) -> Result<()> {
        match self.token {
            Token::BreakLine => { self.advance()?; Ok(()) },
            t if t == close  => Ok(()),
            _                => Err(self.syntax_error("expected end of statement")),
        }
    }

    // === Expressions ===

    fn parse_expression(&mut self) -> Result<Term> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Result<Term> {
        let lhs = self.parse_binary()?;

        if !self.at_assign() {
            return Ok(lhs);
        }
        self.advance()?;

        let rhs = self.parse_assignment()?;
        self.builder.create_assign(lhs, rhs)
    }

    fn parse_binary(&mut self) -> Result<Term> {
        let lhs = self.parse_unary()?;

        if self.token.is_operator() && !self.at_assign() {
            return self.not_implemented(format!("binary operator {}", self.lexer.describe()));
        }

        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Term> {
        if self.token.is_operator() {
            return self.not_implemented(format!("unary operator {}", self.lexer.describe()));
        }

        self.parse_call()
    }

    fn parse_call(&mut self) -> Result<Term> {
        let callee = self.parse_index()?;

        if self.token == Token::ParenLeft {
            return self.not_implemented("function call");
        }

        Ok(callee)
    }

    fn parse_index(&mut self) -> Result<Term> {
        let target = self.parse_term()?;

        if matches!(self.token, Token::BracketLeft | Token::Dot) {
            return self.not_implemented("indexing");
        }

        Ok(target)
    }

    fn parse_term(&mut self) -> Result<Term> {
        let location = self.lexer.location();

        match self.token {
            Token::Number | Token::String => {
                let term = self.builder.create_value(self.lexer.value(), location);
                self.advance()?;
                Ok(term)
            },
            Token::Ident => {
                let term = self.builder.create_get(&self.lexer.name(), location);
                self.advance()?;
                Ok(term)
            },
            Token::ParenLeft => {
                self.advance()?;
                let term = self.parse_expression()?;
                self.expect(Token::ParenRight, "expected `)`")?;
                Ok(term)
            },
            Token::Do          => self.parse_do(),
            Token::Fun         => self.parse_fun(),
            Token::BracketLeft => self.not_implemented("array literal"),
            Token::BraceLeft   => self.not_implemented("object literal"),

            Token::It     | Token::SelfRef  | Token::If    | Token::Else   |
            Token::While  | Token::Return   | Token::Break | Token::Continue |
            Token::Async  => self.not_implemented(self.lexer.describe()),

            _ => Err(self.syntax_error("expected an expression")),
        }
    }

    fn parse_do(&mut self) -> Result<Term> {
        let location = self.lexer.location();
        self.advance()?;

        self.builder.push_block(true);
        self.parse_block()?;
        Ok(self.builder.pop_block(location))
    }

    fn parse_fun(&mut self) -> Result<Term> {
        let location = self.lexer.location();
        self.advance()?;

        self.builder.push_function();
        if self.token == Token::ParenLeft {
            self.parse_parameters()?;
        }
        self.parse_block()?;
        Ok(self.builder.pop_function(location))
    }

    fn parse_parameters(&mut self) -> Result<()> {
        self.advance()?;

        if self.token != Token::ParenRight {
            loop {
                let (name, location) = self.expect_ident("expected a parameter name")?;
                self.builder.add_parameter(&name, location)?;

                if self.token != Token::Comma {
                    break;
                }
                self.advance()?;
            }
        }

        self.expect(Token::ParenRight, "expected `)` after parameters")
    }

    // === Helpers ===

    #[inline]
    fn advance(&mut self) -> Result<Token> {
        self.token = self.lexer.next()?;
        Ok(self.token)
    }

    fn skip_breaks(&mut self) -> Result<()> {
        while self.token == Token::BreakLine {
            self.advance()?;
        }
        Ok(())
    }

    fn expect(&mut self, token: Token, message: &str) -> Result<()> {
        if self.token != token {
            return Err(self.syntax_error(message));
        }
        self.advance()?;
        Ok(())
    }

    fn expect_ident(&mut self, message: &str) -> Result<(String, Location)> {
        if self.token != Token::Ident {
            return Err(self.syntax_error(message));
        }
        let ident = (self.lexer.name(), self.lexer.location());
        self.advance()?;
        Ok(ident)
    }

    /// Returns whether the current token is a plain `=`.  Other operator runs
    /// that begin with `=` share its token but are not assignments.
    #[inline]
    fn at_assign(&self) -> bool {
        self.token == Token::Assign && self.lexer.lexeme_bytes() == b"="
    }

    fn syntax_error(&self, message: &str) -> Error {
        Error::syntax(self.lexer.location(), message, self.lexer.describe())
    }

    fn not_implemented<T>(&self, what: impl Into<String>) -> Result<T> {
        Err(Error::not_implemented(self.lexer.location(), what))
    }
}

#[cfg(test)]
mod tests {
    use crate::asg::{Kind, Literal};
    use crate::config::Config;
    use super::*;

    fn parse(src: &str) -> Result<SyntaxGraph> {
        crate::parse(&Config::default(), src.as_bytes())
    }

    /// Returns `term` with all locations removed.
    fn bare(mut term: Term) -> Term {
        term.walk_mut(&mut |t: &mut Term| t.location = None);
        term
    }

    /// Returns the root of the single entry point, without locations.
    fn root(src: &str) -> Term {
        let graph = parse(src).unwrap();
        let entry = graph.entry_points[0];
        bare(graph.functions[entry as usize].root.clone())
    }

    fn term(kind: Kind) -> Term {
        Term::new(kind, None)
    }

    fn num(n: f64) -> Term {
        term(Kind::Value { value: Literal::Number(n) })
    }

    fn get_local(index: u32) -> Term {
        term(Kind::GetLocal { index })
    }

    fn get_global(name: &str) -> Term {
        term(Kind::GetGlobal { name: name.into() })
    }

    fn set_local(index: u32, value: Term) -> Term {
        term(Kind::SetLocal { index, value: Box::new(value) })
    }

    fn set_global(name: &str, value: Term) -> Term {
        term(Kind::SetGlobal { name: name.into(), value: Box::new(value) })
    }

    fn block(terms: Vec<Term>) -> Term {
        term(Kind::Block { terms })
    }

    #[test]
    fn parse_empty() {
        let graph = parse("").unwrap();

        assert_eq!( graph.functions.len(), 1                   );
        assert_eq!( graph.entry_points,    [0]                 );
        assert_eq!( bare(graph.functions[0].root.clone()), Term::undefined(None) );
    }

    #[test]
    fn parse_blank_lines() {
        assert_eq!( root("\n\n;;\n"), Term::undefined(None) );
    }

    #[test]
    fn parse_let_and_read() {
        let graph = parse("let x = 1\nx").unwrap();

        assert_eq!( graph.functions[0].local_count, 1 );
        assert_eq!(
            bare(graph.functions[0].root.clone()),
            block(vec![set_local(0, num(1.0)), get_local(0)])
        );
    }

    #[test]
    fn parse_let_without_value() {
        assert_eq!( root("let x"),       get_local(0) );
        assert_eq!( root("let x\nx = 2"), set_local(0, num(2.0)) );
    }

    #[test]
    fn parse_let_initializer_scope() {
        assert_eq!( root("let x = x"), set_local(0, get_global("x")) );
    }

    #[test]
    fn parse_global_assign() {
        assert_eq!( root("x = 1"), set_global("x", num(1.0)) );
    }

    #[test]
    fn parse_string_value() {
        assert_eq!(
            root("s = \"hi\\n\""),
            set_global("s", term(Kind::Value { value: Literal::String("hi\n".into()) }))
        );
    }

    #[test]
    fn parse_chained_assign() {
        assert_eq!(
            root("a = b = 1"),
            set_global("a", set_global("b", num(1.0)))
        );
    }

    #[test]
    fn parse_self_assign() {
        assert_eq!( root("x = x"),             Term::undefined(None) );
        assert_eq!( root("let y\ny = y\n0"),   num(0.0)              );
    }

    #[test]
    fn parse_grouping() {
        assert_eq!( root("x = (\n1\n)"), set_global("x", num(1.0)) );
    }

    #[test]
    fn parse_pure_statements_elided() {
        assert_eq!(
            root("1\nx\nx = 2\n\"s\"\n3"),
            block(vec![set_global("x", num(2.0)), num(3.0)])
        );
    }

    #[test]
    fn parse_semicolons() {
        assert_eq!(
            root("a = 1; b = 2"),
            block(vec![set_global("a", num(1.0)), set_global("b", num(2.0))])
        );
    }

    #[test]
    fn parse_do_block() {
        let graph = parse("do {\n let t = 1\n g = t\n}").unwrap();

        assert_eq!( graph.functions[0].local_count, 1 );
        assert_eq!(
            bare(graph.functions[0].root.clone()),
            block(vec![set_local(0, num(1.0)), set_global("g", get_local(0))])
        );
    }

    #[test]
    fn parse_do_value() {
        assert_eq!(
            root("x = do { y = 1; 2 }"),
            block(vec![set_global("y", num(1.0)), set_global("x", num(2.0))])
        );
    }

    #[test]
    fn parse_do_scope() {
        assert_eq!(
            root("do { let a = 1 }\ndo { let b = 2 }\nb"),
            block(vec![set_local(0, num(1.0)), set_local(0, num(2.0)), get_global("b")])
        );
    }

    #[test]
    fn parse_do_empty() {
        assert_eq!( root("x = do {}"), set_global("x", Term::undefined(None)) );
    }

    #[test]
    fn parse_function() {
        let graph = parse("f = fun (a, b) {\n b\n}").unwrap();

        assert_eq!( graph.functions.len(), 2   );
        assert_eq!( graph.entry_points,    [1] );

        let f = &graph.functions[0];
        assert_eq!( f.arity,                2               );
        assert_eq!( f.local_count,          2               );
        assert_eq!( bare(f.root.clone()),   get_local(1)    );
        assert_eq!(
            bare(graph.functions[1].root.clone()),
            set_global("f", term(Kind::GetFunction { index: 0 }))
        );
    }

    #[test]
    fn parse_function_without_parameters() {
        let graph = parse("f = fun { 1 }").unwrap();

        assert_eq!( graph.functions[0].arity, 0 );
        assert_eq!( bare(graph.functions[0].root.clone()), num(1.0) );
    }

    #[test]
    fn parse_function_locals_are_private() {
        let graph = parse("let x = 1\nf = fun { x }").unwrap();

        assert_eq!( bare(graph.functions[0].root.clone()), get_global("x") );
    }

    #[test]
    fn parse_unused_function_pruned() {
        let graph = parse("fun { 1 }\nf = fun { 2 }\n0").unwrap();

        assert_eq!( graph.functions.len(), 2   );
        assert_eq!( graph.entry_points,    [1] );
        assert_eq!( bare(graph.functions[0].root.clone()), num(2.0) );
    }

    #[test]
    fn parse_duplicate_local() {
        let e = parse("let a = 1\nlet a = 2").unwrap_err();

        assert_eq!( e.to_string(), "duplicate local `a` in block" );
        assert_eq!( e.location(),  Location::new(2, 5)            );
    }

    #[test]
    fn parse_duplicate_parameter() {
        assert!( matches!(parse("fun (a, a) {}"), Err(Error::Name { .. })) );
    }

    #[test]
    fn parse_invalid_assignment_target() {
        let e = parse("1 = 2").unwrap_err();

        assert_eq!( e.to_string(), "invalid assignment target" );
        assert_eq!( e.location(),  Location::new(1, 1)          );
    }

    #[test]
    fn parse_binary_not_implemented() {
        let e = parse("x = 1 + 2").unwrap_err();

        assert_eq!( e.to_string(), "binary operator `+` is not implemented" );
        assert_eq!( e.location(),  Location::new(1, 7)                      );
    }

    #[test]
    fn parse_compound_assign_not_implemented() {
        let e = parse("x += 1").unwrap_err();

        assert_eq!( e.to_string(), "binary operator `+=` is not implemented" );
    }

    #[test]
    fn parse_unary_not_implemented() {
        let e = parse("-1").unwrap_err();

        assert_eq!( e.to_string(), "unary operator `-` is not implemented" );
    }

    #[test]
    fn parse_call_not_implemented() {
        assert!( matches!(parse("f(1)"), Err(Error::NotImplemented { .. })) );
    }

    #[test]
    fn parse_index_not_implemented() {
        assert_eq!( parse("a.b") .unwrap_err().to_string(), "indexing is not implemented" );
        assert_eq!( parse("a[0]").unwrap_err().to_string(), "indexing is not implemented" );
    }

    #[test]
    fn parse_keywords_not_implemented() {
        for src in ["while x {}", "if x {}", "return 1", "break", "continue", "it", "self", "async f"] {
            assert!( matches!(parse(src), Err(Error::NotImplemented { .. })), "{}", src );
        }
    }

    #[test]
    fn parse_literals_not_implemented() {
        assert_eq!( parse("x = []").unwrap_err().to_string(), "array literal is not implemented"  );
        assert_eq!( parse("x = {}").unwrap_err().to_string(), "object literal is not implemented" );
    }

    #[test]
    fn parse_let_without_name() {
        let e = parse("let 1").unwrap_err();

        assert_eq!( e.to_string(), "expected a variable name after `let`, got `1`" );
    }

    #[test]
    fn parse_missing_end_of_statement() {
        let e = parse("x y").unwrap_err();

        assert_eq!( e.to_string(), "expected end of statement, got `y`" );
        assert_eq!( e.location(),  Location::new(1, 3)                  );
    }

    #[test]
    fn parse_unclosed_group() {
        let e = parse("x = (1").unwrap_err();

        assert_eq!( e.to_string(), "expected `)`, got end of file" );
    }

    #[test]
    fn parse_unclosed_block() {
        let e = parse("do {\nx = 1\n").unwrap_err();

        assert_eq!( e.to_string(), "expected `}`, got end of file" );
    }

    #[test]
    fn parse_missing_expression() {
        let e = parse("x = )").unwrap_err();

        assert_eq!( e.to_string(), "expected an expression, got `)`" );
    }

    #[test]
    fn parse_decode_error() {
        assert!( matches!(
            crate::parse(&Config::default(), b"x = 1\n\xFF"),
            Err(Error::Decode { .. })
        ));
    }

    #[test]
    fn parse_program_fails_at_while() {
        let e = parse("\
let count = 0
let limit = 10
while count < limit {
    count = count +
        1
}
count").unwrap_err();

        assert_eq!( e.to_string(), "`while` is not implemented" );
        assert_eq!( e.location(),  Location::new(3, 1)          );
    }

    #[test]
    fn update_incremental() {
        let config     = Config::default();
        let mut parser = Parser::new(Lexer::new(&config, b"a = 1\n\nb = 2\nc = 3\n"));

        assert_eq!( parser.update(), Ok(true)  );
        assert_eq!( parser.update(), Ok(true)  );
        assert_eq!( parser.update(), Ok(true)  );
        assert!   ( parser.graph().is_none()   );
        assert_eq!( parser.update(), Ok(false) );
        assert_eq!( parser.update(), Ok(false) );
        assert!   ( parser.is_done()           );
        assert_eq!( parser.graph().map(|g| g.functions.len()), Some(1) );
    }

    #[test]
    fn update_after_error() {
        let config     = Config::default();
        let mut parser = Parser::new(Lexer::new(&config, b"a = 1\nb c\nd = 2"));

        assert_eq!( parser.update(), Ok(true) );
        assert!   ( parser.update().is_err()  );
        assert_eq!( parser.update(), Ok(false) );
        assert!   ( parser.is_failed()         );
        assert!   ( parser.into_graph().is_none() );
    }

    #[test]
    fn update_shared_builder() {
        let config = Config::default();

        let mut parser = Parser::new(Lexer::new(&config, b"a = 1"));
        while parser.update().unwrap() { }
        let builder = parser.into_builder().unwrap();

        let mut parser = Parser::with_builder(Lexer::new(&config, b"b = 2"), builder);
        while parser.update().unwrap() { }
        let graph = parser.into_graph().unwrap();

        assert_eq!( graph.entry_points,    [0, 1] );
        assert_eq!( bare(graph.functions[1].root.clone()), set_global("b", num(2.0)) );
    }

    #[test]
    fn term_locations() {
        let graph = parse("\n  x = 1").unwrap();
        let root  = &graph.functions[0].root;

        assert_eq!( root.location, Some(Location::new(2, 3)) );
        match root.kind {
            Kind::SetGlobal { ref value, .. } => assert_eq!( value.location, Some(Location::new(2, 7)) ),
            ref kind                          => panic!("unexpected {:?}", kind),
        }
    }
}
