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

//! Expression compiler for tag expressions
//!
//! Parses the expression text and lowers the AST into a [`Program`]. Function
//! names and argument counts are checked against the registry here, so a
//! program that compiles only fails at runtime on argument types.

use crate::ast::{ExpressionNode, LiteralValue};
use crate::compiler::bytecode::{Instruction, Program};
use crate::model::Value;
use crate::parser::{ParseError, parse_expression};
use crate::registry::{FunctionError, FunctionRegistry};
use std::sync::Arc;
use thiserror::Error;

/// Result type for compilation operations
pub type CompileResult<T> = Result<T, CompileError>;

/// Compilation error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// Expression text is not syntactically valid
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Unknown function name
    #[error("unknown function {name}()")]
    UnknownFunction {
        /// Function name
        name: String,
    },

    /// Call with the wrong number of arguments
    #[error("{0}")]
    InvalidArity(FunctionError),

    /// A pool or operand overflowed its index type
    #[error("expression too large: {0}")]
    ProgramTooLarge(&'static str),
}

/// Expression compiler that converts AST to bytecode
#[derive(Debug, Clone)]
pub struct ExpressionCompiler {
    functions: Arc<FunctionRegistry>,
}

impl ExpressionCompiler {
    /// Create a new expression compiler
    pub fn new(functions: Arc<FunctionRegistry>) -> Self {
        Self { functions }
    }

    /// Parse and compile an expression
    pub fn compile(&self, source: &str) -> CompileResult<Program> {
        let ast = parse_expression(source)?;
        self.compile_ast(&ast, source)
    }

    /// Compile an already parsed expression
    pub fn compile_ast(&self, expr: &ExpressionNode, source: &str) -> CompileResult<Program> {
        let mut program = Program::new(source);
        self.compile_node(expr, &mut program)?;
        program.calculate_max_stack_depth();

        log::trace!(
            "compiled {:?} into [{}]",
            source,
            program
                .instructions
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(program)
    }

    fn compile_node(&self, expr: &ExpressionNode, program: &mut Program) -> CompileResult<()> {
        match expr {
            ExpressionNode::Literal(literal) => {
                let index = program
                    .add_constant(literal_value(literal))
                    .ok_or(CompileError::ProgramTooLarge("too many constants"))?;
                program.emit(Instruction::PushConstant(index));
            }
            ExpressionNode::Variable(name) => {
                let index = program
                    .add_name(name)
                    .ok_or(CompileError::ProgramTooLarge("too many variables"))?;
                program.emit(Instruction::LoadVariable(index));
            }
            ExpressionNode::FunctionCall { name, args } => {
                let function = self
                    .functions
                    .get(name)
                    .ok_or_else(|| CompileError::UnknownFunction { name: name.clone() })?;

                let sig = function.signature();
                if !sig.accepts_arity(args.len()) {
                    return Err(CompileError::InvalidArity(FunctionError::InvalidArity {
                        name: name.clone(),
                        min: sig.min_arity,
                        max: sig.max_arity,
                        actual: args.len(),
                    }));
                }
                let arity = u8::try_from(args.len())
                    .map_err(|_| CompileError::ProgramTooLarge("too many arguments"))?;

                for arg in args {
                    self.compile_node(arg, program)?;
                }
                let index = program
                    .add_function(function)
                    .ok_or(CompileError::ProgramTooLarge("too many functions"))?;
                program.emit(Instruction::CallFunction(index, arity));
            }
            ExpressionNode::List(items) => {
                let count = u16::try_from(items.len())
                    .map_err(|_| CompileError::ProgramTooLarge("list literal too long"))?;
                for item in items {
                    self.compile_node(item, program)?;
                }
                program.emit(Instruction::MakeCollection(count));
            }
        }
        Ok(())
    }
}

fn literal_value(literal: &LiteralValue) -> Value {
    match literal {
        LiteralValue::Nil => Value::Nil,
        LiteralValue::Boolean(b) => Value::Bool(*b),
        LiteralValue::Integer(i) => Value::Int(*i),
        LiteralValue::Float(f) => Value::Float(*f),
        LiteralValue::String(s) => Value::String(s.clone()),
    }
}
