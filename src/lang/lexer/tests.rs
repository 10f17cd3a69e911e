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

use crate::lang::token::Token::{
    Assign, Async, BraceLeft, BraceRight, BracketLeft, BracketRight, Break, BreakLine,
    Colon, Comma, Comment, Continue, Do, Dot, Else, Eof, Fun, Ident, If, It, Let,
    Number, OpAdd, OpAnd, OpDiv, OpEq, OpGe, OpGt, OpLe, OpLt, OpMod, OpMul, OpNe,
    OpNot, OpOr, OpQuestion, OpSub, OpTilde, OpXor, Other, ParenLeft, ParenRight,
    Return, SelfRef, While, Whitespace,
};
use super::*;

/// Returns the significant tokens of `src`, through the first [`Eof`].
fn lex(src: &[u8]) -> Vec<Token> {
    let config    = Config::default();
    let mut lexer = Lexer::new(&config, src);
    let mut vec   = vec![];

    loop {
        let token = lexer.next().unwrap();
        vec.push(token);
        if token == Eof { return vec }
    }
}

/// Returns the tokens of `src` including trivia, through the first [`Eof`].
fn lex_all(src: &[u8]) -> Vec<(Token, String)> {
    let config    = Config::default();
    let mut lexer = Lexer::new(&config, src);
    let mut vec   = vec![];

    loop {
        let token = lexer.next_with_whitespace().unwrap();
        vec.push((token, lexer.lexeme().into_owned()));
        if token == Eof { return vec }
    }
}

/// Returns the value of the first token of `src`.
fn value_of(src: &[u8]) -> Literal {
    let config    = Config::default();
    let mut lexer = Lexer::new(&config, src);

    lexer.next().unwrap();
    lexer.value()
}

/// Returns the error produced while lexing `src`.
fn error_of(src: &[u8]) -> Error {
    let config    = Config::default();
    let mut lexer = Lexer::new(&config, src);

    loop {
        match lexer.next() {
            Ok(Eof) => panic!("no error"),
            Ok(_)   => continue,
            Err(e)  => return e,
        }
    }
}

#[test]
fn lexer_empty() {
    let config    = Config::default();
    let mut lexer = Lexer::new(&config, b"");

    assert_eq!( lexer.next(),     Ok(Eof) );
    assert_eq!( lexer.next(),     Ok(Eof) );
    assert_eq!( lexer.range(),    0..0    );
    assert_eq!( lexer.describe(), "end of file" );
}

#[test]
fn lexer_space() {
    assert_eq!( lex(b" \t \x0B\x0C\r "), [Eof] );
}

#[test]
fn lexer_space_run() {
    assert_eq!( lex_all(b"  \t x"), [
        (Whitespace, "  \t ".into()),
        (Ident,      "x"    .into()),
        (Eof,        ""     .into()),
    ]);
}

#[test]
fn lexer_punctuation() {
    assert_eq!(
        lex(b"{}(),.:"),
        [BraceLeft, BraceRight, ParenLeft, ParenRight, Comma, Dot, Colon, Eof]
    );
}

#[test]
fn lexer_brackets() {
    assert_eq!( lex(b"[]"), [BracketLeft, BracketRight, Eof] );
}

#[test]
fn lexer_keywords() {
    assert_eq!(
        lex(b"let fun do if else while return break continue it self async"),
        [Let, Fun, Do, If, Else, While, Return, Break, Continue, It, SelfRef, Async, Eof]
    );
}

#[test]
fn lexer_keyword_prefix() {
    assert_eq!( lex(b"lets _let let2 Let"), [Ident, Ident, Ident, Ident, Eof] );
}

#[test]
fn lexer_operators() {
    assert_eq!(
        lex(b"a = b == c != d <= e >= f && g || h"),
        [Ident, Assign, Ident, OpEq, Ident, OpNe, Ident, OpLe, Ident, OpGe, Ident, OpAnd, Ident, OpOr, Ident, Eof]
    );
}

#[test]
fn lexer_operators_single() {
    assert_eq!(
        lex(b"+ - * / % ! ~ ? < > & | ^"),
        [OpAdd, OpSub, OpMul, OpDiv, OpMod, OpNot, OpTilde, OpQuestion, OpLt, OpGt, OpAnd, OpOr, OpXor, Eof]
    );
}

#[test]
fn lexer_operator_munch() {
    let config    = Config::default();
    let mut lexer = Lexer::new(&config, b"x +=- y");

    assert_eq!( lexer.next(),   Ok(Ident) );
    assert_eq!( lexer.next(),   Ok(OpAdd) );
    assert_eq!( lexer.lexeme(), "+=-"     );
    assert_eq!( lexer.next(),   Ok(Ident) );
}

#[test]
fn lexer_comment() {
    assert_eq!( lex(b"-- this is a comment"), [Eof] );
}

#[test]
fn lexer_comment_after_code() {
    assert_eq!( lex(b"x -- note\ny"), [Ident, BreakLine, Ident, Eof] );
}

#[test]
fn lexer_comment_trivia() {
    assert_eq!( lex_all(b"--x\n"), [
        (Comment,   "--x".into()),
        (BreakLine, "\n" .into()),
        (Eof,       ""   .into()),
    ]);
}

#[test]
fn lexer_comment_long_dashes() {
    assert_eq!( lex(b"---- banner ----\nx"), [BreakLine, Ident, Eof] );
}

#[test]
fn lexer_line_breaks() {
    assert_eq!( lex(b"a\nb;c"), [Ident, BreakLine, Ident, BreakLine, Ident, Eof] );
}

#[test]
fn lexer_crlf() {
    assert_eq!( lex(b"a\r\nb"), [Ident, BreakLine, Ident, Eof] );
}

#[test]
fn lexer_continue_line() {
    assert_eq!( lex(b"a \\\n b"), [Ident, Ident, Eof] );
}

#[test]
fn lexer_continue_line_once() {
    assert_eq!( lex(b"a \\\n\nb"), [Ident, BreakLine, Ident, Eof] );
}

#[test]
fn lexer_skips_newline_after_operator() {
    assert_eq!( lex(b"a +\nb"), [Ident, OpAdd, Ident, Eof] );
}

#[test]
fn lexer_skips_newline_after_keyword() {
    assert_eq!( lex(b"fun\n{}"), [Fun, BraceLeft, BraceRight, Eof] );
}

#[test]
fn lexer_skips_blank_lines_after_operator() {
    assert_eq!( lex(b"a =\n\n\nb"), [Ident, Assign, Ident, Eof] );
}

#[test]
fn lexer_newline_in_parens() {
    assert_eq!(
        lex(b"(a\nb\n)\nc"),
        [ParenLeft, Ident, Ident, ParenRight, BreakLine, Ident, Eof]
    );
}

#[test]
fn lexer_newline_in_parens_alone() {
    assert!( !lex(b"(\n x \n)").contains(&BreakLine) );
}

#[test]
fn lexer_return_fun_fixture() {
    assert_eq!(
        lex(b"return (fun (a, b) { a + b })"),
        [
            Return, ParenLeft, Fun, ParenLeft, Ident, Comma, Ident, ParenRight,
            BraceLeft, Ident, OpAdd, Ident, BraceRight, ParenRight, Eof,
        ]
    );
}

#[test]
fn lexer_every_single_byte() {
    let config = Config::default();

    for b in 0..=255u8 {
        let src       = [b];
        let mut lexer = Lexer::new(&config, &src);
        let mut ended = false;

        for _ in 0..3 {
            match lexer.next() {
                Ok(token) => {
                    let _ = lexer.value();
                    assert!( !lexer.describe().is_empty(), "byte {:#04X}", b );
                    if token == Eof { ended = true; break }
                },
                Err(_) => { ended = true; break },
            }
        }

        assert!( ended, "byte {:#04X} did not reach end of file", b );
        let _ = crate::parse(&config, &src);
    }
}

#[test]
fn lexer_newline_in_brackets() {
    assert_eq!( lex(b"[a\n]"), [BracketLeft, Ident, BracketRight, Eof] );
}

#[test]
fn lexer_newline_in_braces_within_parens() {
    assert_eq!(
        lex(b"(do {\na\nb\n})"),
        [ParenLeft, Do, BraceLeft, Ident, BreakLine, Ident, BreakLine, BraceRight, ParenRight, Eof]
    );
}

#[test]
fn lexer_ident() {
    let config    = Config::default();
    let mut lexer = Lexer::new(&config, b"  foo_1 ");

    assert_eq!( lexer.next(),     Ok(Ident)          );
    assert_eq!( lexer.range(),    2..7               );
    assert_eq!( lexer.location(), Location::new(1, 3) );
    assert_eq!( lexer.name(),     "foo_1"            );
    assert_eq!( lexer.describe(), "`foo_1`"          );
}

#[test]
fn lexer_literal_ident() {
    let config    = Config::default();
    let mut lexer = Lexer::new(&config, b"`two words` x");

    assert_eq!( lexer.next(),   Ok(Ident)  );
    assert_eq!( lexer.lexeme(), "`two"     );
    assert_eq!( lexer.name(),   "two"      );
    assert_eq!( lexer.next(),   Ok(Ident)  );
    assert_eq!( lexer.name(),   "words"    );
    assert_eq!( lexer.next(),   Ok(Ident)  );
    assert_eq!( lexer.lexeme(), "`"        );
    assert_eq!( lexer.name(),   ""         );
    assert_eq!( lexer.next(),   Ok(Ident)  );
    assert_eq!( lexer.name(),   "x"        );
}

#[test]
fn lexer_literal_ident_closed() {
    let config    = Config::default();
    let mut lexer = Lexer::new(&config, b"`if`+");

    assert_eq!( lexer.next(), Ok(Ident) );
    assert_eq!( lexer.name(), "if"      );
    assert_eq!( lexer.next(), Ok(OpAdd) );
}

#[test]
fn lexer_number() {
    assert_eq!( value_of(b"42"),      Literal::Number(42.0)   );
    assert_eq!( value_of(b"3.5"),     Literal::Number(3.5)    );
    assert_eq!( value_of(b"1_000.5"), Literal::Number(1000.5) );
}

#[test]
fn lexer_number_dot() {
    assert_eq!( lex(b"1.x"),  [Number, Dot, Ident, Eof] );
    assert_eq!( lex(b"1.5.x"), [Number, Dot, Ident, Eof] );
}

#[test]
fn lexer_char() {
    assert_eq!( value_of(b"'a'"),          Literal::Number(97.0)    );
    assert_eq!( value_of(b"'\\n'"),        Literal::Number(10.0)    );
    assert_eq!( value_of(b"'\\''"),        Literal::Number(39.0)    );
    assert_eq!( value_of("'€'".as_bytes()), Literal::Number(8364.0) );
}

#[test]
fn lexer_char_empty() {
    assert!( matches!(error_of(b"''"), Error::Syntax { .. }) );
}

#[test]
fn lexer_char_unclosed() {
    let e = error_of(b"'ab'");

    assert_eq!( e.to_string(), "expected `'` to close character literal, got `b`" );
    assert_eq!( e.location(),  Location::new(1, 3) );
}

#[test]
fn lexer_string() {
    assert_eq!( value_of(b"\"hello\""),        Literal::String("hello".into())     );
    assert_eq!( value_of(b"\"a\\tb\\\"c\\\\\""), Literal::String("a\tb\"c\\".into()) );
    assert_eq!( value_of(b"\"\\0\\r\\n\""),    Literal::String("\0\r\n".into())    );
}

#[test]
fn lexer_string_multiline() {
    let config    = Config::default();
    let mut lexer = Lexer::new(&config, b"\"a\nb\" x");

    assert_eq!( lexer.next(),     Ok(Token::String)   );
    assert_eq!( lexer.next(),     Ok(Ident)           );
    assert_eq!( lexer.location(), Location::new(2, 4) );
}

#[test]
fn lexer_string_unterminated() {
    let e = error_of(b"x = \"abc");

    assert_eq!( e.to_string(), "unterminated string literal, got end of file" );
}

#[test]
fn lexer_raw_string() {
    assert_eq!( value_of(b"@\"a\\n\""), Literal::String("a\\n".into()) );
}

#[test]
fn lexer_at_alone() {
    assert_eq!( lex(b"@x"), [Other, Ident, Eof] );
}

#[test]
fn lexer_other() {
    assert_eq!( lex(b"#$"), [Other, Other, Eof] );
}

#[test]
fn lexer_non_ascii_other() {
    let config    = Config::default();
    let mut lexer = Lexer::new(&config, "é".as_bytes());

    assert_eq!( lexer.next(),  Ok(Other) );
    assert_eq!( lexer.range(), 0..2      );
    assert_eq!( lexer.next(),  Ok(Eof)   );
}

#[test]
fn lexer_decode_error() {
    let e = error_of(b"ab \xFF");

    assert_eq!( e, Error::Decode { location: Location::new(1, 4) } );
}

#[test]
fn lexer_decode_error_in_comment() {
    assert!( matches!(error_of(b"-- \xC3"), Error::Decode { .. }) );
}

#[test]
fn lexer_semicolon_describe() {
    let config    = Config::default();
    let mut lexer = Lexer::new(&config, b"a;\n");

    assert_eq!( lexer.next(),     Ok(Ident)     );
    assert_eq!( lexer.next(),     Ok(BreakLine) );
    assert_eq!( lexer.describe(), "`;`"         );
    assert_eq!( lexer.next(),     Ok(BreakLine) );
    assert_eq!( lexer.describe(), "line break"  );
}

#[test]
fn lexer_locations() {
    let config    = Config::default();
    let mut lexer = Lexer::new(&config, b"a\n  bc d");

    lexer.next().unwrap();
    assert_eq!( lexer.location(), Location::new(1, 1) );
    lexer.next().unwrap();
    assert_eq!( lexer.location(), Location::new(1, 2) );
    lexer.next().unwrap();
    assert_eq!( lexer.location(), Location::new(2, 3) );
    lexer.next().unwrap();
    assert_eq!( lexer.location(), Location::new(2, 6) );
}

#[test]
fn lexer_window() {
    let config    = Config::default();
    let mut lexer = Lexer::with_window(&config, b"let x = 1", 4, 3);

    assert_eq!( lexer.next(),  Ok(Ident)  );
    assert_eq!( lexer.range(), 4..5       );
    assert_eq!( lexer.next(),  Ok(Assign) );
    assert_eq!( lexer.next(),  Ok(Eof)    );
}

#[test]
fn lexer_custom_keywords() {
    let config = Config::default()
        .with_keyword("fn", Fun)
        .with_keyword("rem", Comment)
        .without_keyword("fun");
    let mut lexer = Lexer::new(&config, b"fn fun rem ignored\nx");

    assert_eq!( lexer.next(), Ok(Fun)       );
    assert_eq!( lexer.next(), Ok(Ident)     );
    assert_eq!( lexer.next(), Ok(BreakLine) );
    assert_eq!( lexer.next(), Ok(Ident)     );
}

#[test]
fn lexer_custom_skips_newline() {
    let config    = Config::default().with_skips_newline(Ident, true);
    let mut lexer = Lexer::new(&config, b"a\nb");

    assert_eq!( lexer.next(), Ok(Ident) );
    assert_eq!( lexer.next(), Ok(Ident) );
    assert_eq!( lexer.next(), Ok(Eof)   );
}

#[test]
fn lexer_program() {
    let src = b"\
let count = 0
let limit = 10
while count < limit {
    count = count +
        1
}
count";

    assert_eq!( lex(src), [
        Let, Ident, Assign, Number, BreakLine,
        Let, Ident, Assign, Number, BreakLine,
        While, Ident, OpLt, Ident, BraceLeft,
        Ident, Assign, Ident, OpAdd, Number, BreakLine,
        BraceRight, BreakLine,
        Ident, Eof,
    ]);
}
