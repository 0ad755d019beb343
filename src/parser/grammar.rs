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

//! Recursive descent parser for tag expressions
//!
//! ```text
//! expression := literal | name | name '(' items? ')' | '[' items? ']' | '(' expression ')'
//! items      := expression (',' expression)*
//! ```

use super::error::{ParseError, ParseResult};
use super::span::Spanned;
use super::tokenizer::{Token, tokenize};
use crate::ast::{ExpressionNode, LiteralValue};

/// Maximum nesting of calls, lists and parentheses
pub const MAX_NESTING_DEPTH: usize = 64;

/// Parse an expression into its AST
pub fn parse_expression(source: &str) -> ParseResult<ExpressionNode> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(ParseError::EmptyExpression);
    }

    let mut parser = ExpressionParser {
        tokens: &tokens,
        pos: 0,
        end: source.len(),
    };
    let expr = parser.expression(0)?;

    if let Some(extra) = parser.peek() {
        return Err(unexpected(extra));
    }
    Ok(expr)
}

struct ExpressionParser<'t> {
    tokens: &'t [Spanned<Token>],
    pos: usize,
    end: usize,
}

impl<'t> ExpressionParser<'t> {
    fn peek(&self) -> Option<&'t Spanned<Token>> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> ParseResult<&'t Spanned<Token>> {
        let token = self
            .tokens
            .get(self.pos)
            .ok_or(ParseError::UnexpectedEndOfInput { position: self.end })?;
        self.pos += 1;
        Ok(token)
    }

    fn expression(&mut self, depth: usize) -> ParseResult<ExpressionNode> {
        let token = self.advance()?;
        if depth > MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                position: token.start,
            });
        }

        match &token.value {
            Token::Integer(i) => Ok(ExpressionNode::Literal(LiteralValue::Integer(*i))),
            Token::Float(f) => Ok(ExpressionNode::Literal(LiteralValue::Float(*f))),
            Token::String(s) => Ok(ExpressionNode::Literal(LiteralValue::String(s.clone()))),
            Token::True => Ok(ExpressionNode::Literal(LiteralValue::Boolean(true))),
            Token::False => Ok(ExpressionNode::Literal(LiteralValue::Boolean(false))),
            Token::Nil => Ok(ExpressionNode::Literal(LiteralValue::Nil)),
            Token::Identifier(name) => {
                if matches!(self.peek(), Some(t) if t.value == Token::LeftParen) {
                    self.pos += 1;
                    let args = self.items(&Token::RightParen, depth)?;
                    Ok(ExpressionNode::FunctionCall {
                        name: name.clone(),
                        args,
                    })
                } else {
                    Ok(ExpressionNode::Variable(name.clone()))
                }
            }
            Token::LeftBracket => {
                let items = self.items(&Token::RightBracket, depth)?;
                Ok(ExpressionNode::List(items))
            }
            Token::LeftParen => {
                let inner = self.expression(depth + 1)?;
                self.expect(&Token::RightParen)?;
                Ok(inner)
            }
            _ => Err(unexpected(token)),
        }
    }

    /// Comma separated expressions up to and including `close`
    fn items(&mut self, close: &Token, depth: usize) -> ParseResult<Vec<ExpressionNode>> {
        let mut items = Vec::new();
        if matches!(self.peek(), Some(t) if &t.value == close) {
            self.pos += 1;
            return Ok(items);
        }

        loop {
            items.push(self.expression(depth + 1)?);
            let token = self.advance()?;
            match &token.value {
                Token::Comma => continue,
                t if t == close => return Ok(items),
                _ => return Err(unexpected(token)),
            }
        }
    }

    fn expect(&mut self, expected: &Token) -> ParseResult<()> {
        let token = self.advance()?;
        if &token.value == expected {
            Ok(())
        } else {
            Err(unexpected(token))
        }
    }
}

fn unexpected(token: &Spanned<Token>) -> ParseError {
    ParseError::UnexpectedToken {
        token: token.value.to_string(),
        position: token.start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_call() {
        let expr = parse_expression("get(db, 'table')").unwrap();
        assert_eq!(
            expr,
            ExpressionNode::call(
                "get",
                vec![ExpressionNode::variable("db"), ExpressionNode::string("table")]
            )
        );
    }

    #[test]
    fn test_nested_call() {
        let expr = parse_expression("default(get(x, 'k'), 'fallback')").unwrap();
        assert_eq!(expr.to_string(), "default(get(x, 'k'), 'fallback')");
    }

    #[test]
    fn test_bare_variable_and_literal() {
        assert_eq!(
            parse_expression("name").unwrap(),
            ExpressionNode::variable("name")
        );
        assert_eq!(
            parse_expression("42").unwrap(),
            ExpressionNode::Literal(LiteralValue::Integer(42))
        );
    }

    #[test]
    fn test_list_and_parens() {
        let expr = parse_expression("(['a', 'b', x])").unwrap();
        assert_eq!(
            expr,
            ExpressionNode::List(vec![
                ExpressionNode::string("a"),
                ExpressionNode::string("b"),
                ExpressionNode::variable("x"),
            ])
        );
        assert_eq!(parse_expression("[]").unwrap(), ExpressionNode::List(vec![]));
    }

    #[test]
    fn test_zero_arg_call() {
        assert_eq!(
            parse_expression("f()").unwrap(),
            ExpressionNode::call("f", vec![])
        );
    }

    #[test]
    fn test_unterminated_call() {
        let err = parse_expression("invalid(((").unwrap_err();
        assert_eq!(err, ParseError::UnexpectedEndOfInput { position: 10 });
    }

    #[test]
    fn test_trailing_tokens() {
        let err = parse_expression("a b").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                token: "b".into(),
                position: 2,
            }
        );
    }

    #[test]
    fn test_missing_comma() {
        let err = parse_expression("get(a 'b')").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { position: 6, .. }));
    }

    #[test]
    fn test_empty() {
        assert_eq!(parse_expression("   ").unwrap_err(), ParseError::EmptyExpression);
    }

    #[test]
    fn test_nesting_limit() {
        let deep = "(".repeat(MAX_NESTING_DEPTH + 2) + "1" + &")".repeat(MAX_NESTING_DEPTH + 2);
        let err = parse_expression(&deep).unwrap_err();
        assert!(matches!(err, ParseError::NestingTooDeep { .. }));
    }
}
