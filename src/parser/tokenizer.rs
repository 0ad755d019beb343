// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tokenizer for tag expressions built on nom

use super::error::{ParseError, ParseResult};
use super::span::Spanned;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit1},
    combinator::{map, opt, recognize},
    error::{ErrorKind, ParseError as NomParseError},
};
use std::fmt;

/// Token types
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Integer literal
    Integer(i64),
    /// Floating point literal
    Float(f64),
    /// String literal, escapes already resolved
    String(String),
    /// Function or variable name
    Identifier(String),
    /// `true`
    True,
    /// `false`
    False,
    /// `nil`
    Nil,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `,`
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Integer(i) => write!(f, "{i}"),
            Token::Float(v) => write!(f, "{v}"),
            Token::String(s) => write!(f, "{s:?}"),
            Token::Identifier(name) => f.write_str(name),
            Token::True => f.write_str("true"),
            Token::False => f.write_str("false"),
            Token::Nil => f.write_str("nil"),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::LeftBracket => f.write_str("["),
            Token::RightBracket => f.write_str("]"),
            Token::Comma => f.write_str(","),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum LexErrorKind {
    NoMatch,
    UnclosedString,
    InvalidEscape(String),
    InvalidNumber(String),
}

/// Internal nom error carrying the remaining input length
#[derive(Debug, Clone, PartialEq)]
struct LexError {
    remaining: usize,
    kind: LexErrorKind,
}

impl LexError {
    fn new(input: &str, kind: LexErrorKind) -> Self {
        Self {
            remaining: input.len(),
            kind,
        }
    }

    fn into_parse_error(self, source: &str, token_start: usize) -> ParseError {
        let position = source.len() - self.remaining;
        match self.kind {
            LexErrorKind::NoMatch => match source[token_start..].chars().next() {
                Some(character) => ParseError::UnexpectedCharacter {
                    character,
                    position: token_start,
                },
                None => ParseError::UnexpectedEndOfInput {
                    position: token_start,
                },
            },
            LexErrorKind::UnclosedString => ParseError::UnclosedString { position },
            LexErrorKind::InvalidEscape(sequence) => {
                ParseError::InvalidEscape { sequence, position }
            }
            LexErrorKind::InvalidNumber(value) => ParseError::InvalidLiteral {
                literal_type: "number".to_string(),
                value,
                position,
            },
        }
    }
}

impl<'a> NomParseError<&'a str> for LexError {
    fn from_error_kind(input: &'a str, _kind: ErrorKind) -> Self {
        LexError::new(input, LexErrorKind::NoMatch)
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

type LexResult<'a, T> = IResult<&'a str, T, LexError>;

/// Split an expression into tokens with byte offsets
pub fn tokenize(source: &str) -> ParseResult<Vec<Spanned<Token>>> {
    let mut tokens = Vec::new();
    let mut rest = source.trim_start();

    while !rest.is_empty() {
        let start = source.len() - rest.len();
        match token(rest) {
            Ok((next, token)) => {
                let end = source.len() - next.len();
                tokens.push(Spanned::new(token, start, end));
                rest = next.trim_start();
            }
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                return Err(e.into_parse_error(source, start));
            }
            Err(nom::Err::Incomplete(_)) => {
                return Err(ParseError::UnexpectedEndOfInput {
                    position: source.len(),
                });
            }
        }
    }

    Ok(tokens)
}

fn token(input: &str) -> LexResult<'_, Token> {
    alt((number, string_literal, identifier_or_keyword, punctuation)).parse(input)
}

fn punctuation(input: &str) -> LexResult<'_, Token> {
    alt((
        map(char('('), |_| Token::LeftParen),
        map(char(')'), |_| Token::RightParen),
        map(char('['), |_| Token::LeftBracket),
        map(char(']'), |_| Token::RightBracket),
        map(char(','), |_| Token::Comma),
    ))
    .parse(input)
}

fn identifier(input: &str) -> LexResult<'_, &str> {
    recognize((
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))
    .parse(input)
}

fn identifier_or_keyword(input: &str) -> LexResult<'_, Token> {
    let (rest, ident) = identifier(input)?;
    let token = match ident {
        "true" => Token::True,
        "false" => Token::False,
        "nil" => Token::Nil,
        _ => Token::Identifier(ident.to_string()),
    };
    Ok((rest, token))
}

fn digits(input: &str) -> LexResult<'_, &str> {
    digit1(input)
}

fn number_text(input: &str) -> LexResult<'_, &str> {
    recognize((
        opt(char('-')),
        digits,
        opt((char('.'), digits)),
        opt((
            alt((char('e'), char('E'))),
            opt(alt((char('+'), char('-')))),
            digits,
        )),
    ))
    .parse(input)
}

fn number(input: &str) -> LexResult<'_, Token> {
    let (rest, text) = number_text(input)?;
    let is_float = text.contains(['.', 'e', 'E']);
    let token = if is_float {
        text.parse::<f64>().ok().map(Token::Float)
    } else {
        text.parse::<i64>().ok().map(Token::Integer)
    };
    match token {
        Some(token) => Ok((rest, token)),
        None => Err(nom::Err::Failure(LexError::new(
            input,
            LexErrorKind::InvalidNumber(text.to_string()),
        ))),
    }
}

fn string_literal(input: &str) -> LexResult<'_, Token> {
    let quote = match input.chars().next() {
        Some(q @ ('\'' | '"')) => q,
        _ => {
            return Err(nom::Err::Error(LexError::new(
                input,
                LexErrorKind::NoMatch,
            )));
        }
    };

    let body = &input[1..];
    let mut value = String::new();
    let mut chars = body.char_indices();
    while let Some((offset, c)) = chars.next() {
        match c {
            c if c == quote => return Ok((&body[offset + 1..], Token::String(value))),
            '\\' => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, 'r')) => value.push('\r'),
                Some((_, 't')) => value.push('\t'),
                Some((_, '\\')) => value.push('\\'),
                Some((_, '\'')) => value.push('\''),
                Some((_, '"')) => value.push('"'),
                Some((_, other)) => {
                    return Err(nom::Err::Failure(LexError::new(
                        &body[offset..],
                        LexErrorKind::InvalidEscape(format!("\\{other}")),
                    )));
                }
                None => break,
            },
            c => value.push(c),
        }
    }

    Err(nom::Err::Failure(LexError::new(
        input,
        LexErrorKind::UnclosedString,
    )))
}
