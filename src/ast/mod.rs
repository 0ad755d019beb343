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

//! Abstract Syntax Tree for tag expressions
//!
//! The language has no operators: an expression is a literal, a context
//! variable, a function call or a list literal.

use std::fmt;

/// Literal values that can appear in expressions
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// `nil`
    Nil,
    /// `true` / `false`
    Boolean(bool),
    /// Integer literal
    Integer(i64),
    /// Floating point literal
    Float(f64),
    /// Quoted string literal, escapes already resolved
    String(String),
}

/// Expression node
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionNode {
    /// Literal value
    Literal(LiteralValue),
    /// Context variable reference
    Variable(String),
    /// Call of a registered function
    FunctionCall {
        /// Function name
        name: String,
        /// Argument expressions
        args: Vec<ExpressionNode>,
    },
    /// List literal `[a, b]`
    List(Vec<ExpressionNode>),
}

impl ExpressionNode {
    /// Create a string literal
    pub fn string(value: impl Into<String>) -> Self {
        ExpressionNode::Literal(LiteralValue::String(value.into()))
    }

    /// Create a variable reference
    pub fn variable(name: impl Into<String>) -> Self {
        ExpressionNode::Variable(name.into())
    }

    /// Create a function call
    pub fn call(name: impl Into<String>, args: Vec<ExpressionNode>) -> Self {
        ExpressionNode::FunctionCall {
            name: name.into(),
            args,
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Nil => f.write_str("nil"),
            LiteralValue::Boolean(b) => write!(f, "{b}"),
            LiteralValue::Integer(i) => write!(f, "{i}"),
            LiteralValue::Float(x) => write!(f, "{x:?}"),
            LiteralValue::String(s) => {
                f.write_str("'")?;
                for c in s.chars() {
                    match c {
                        '\'' => f.write_str("\\'")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\r' => f.write_str("\\r")?,
                        '\t' => f.write_str("\\t")?,
                        c => write!(f, "{c}")?,
                    }
                }
                f.write_str("'")
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[ExpressionNode]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionNode::Literal(literal) => write!(f, "{literal}"),
            ExpressionNode::Variable(name) => f.write_str(name),
            ExpressionNode::FunctionCall { name, args } => {
                write!(f, "{name}(")?;
                write_list(f, args)?;
                f.write_str(")")
            }
            ExpressionNode::List(items) => {
                f.write_str("[")?;
                write_list(f, items)?;
                f.write_str("]")
            }
        }
    }
}
