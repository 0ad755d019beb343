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

//! Tag expression parser
//!
//! Expressions are tokenized with nom and assembled into an
//! [`ExpressionNode`](crate::ast::ExpressionNode) by a small recursive
//! descent parser.

pub mod error;
pub mod grammar;
pub mod span;
pub mod tokenizer;

pub use error::{ParseError, ParseResult};
pub use grammar::{MAX_NESTING_DEPTH, parse_expression};
pub use span::Spanned;
pub use tokenizer::{Token, tokenize};
