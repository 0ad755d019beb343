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

//! Stack virtual machine executing compiled tag programs

use crate::compiler::bytecode::{Instruction, Program};
use crate::model::Value;
use crate::registry::FunctionError;
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use thiserror::Error;

/// Result type for program execution
pub type EvaluationResult<T> = Result<T, EvaluationError>;

/// Runtime errors raised while executing a program
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// A function rejected its arguments
    #[error("{0}")]
    Function(#[from] FunctionError),

    /// An instruction popped more values than the stack holds
    #[error("stack underflow at instruction {instruction}")]
    StackUnderflow {
        /// Instruction offset
        instruction: usize,
    },

    /// An instruction referenced a pool entry that does not exist
    #[error("invalid operand at instruction {instruction}")]
    InvalidOperand {
        /// Instruction offset
        instruction: usize,
    },

    /// The program did not leave exactly one value on the stack
    #[error("program finished with {depth} values on the stack")]
    InvalidStackState {
        /// Stack height at the end of execution
        depth: usize,
    },
}

/// Read-only source of variable values for program execution
pub trait VariableSource {
    /// Value of the variable `name`, if defined
    fn lookup(&self, name: &str) -> Option<&str>;
}

impl<K, V, S> VariableSource for HashMap<K, V, S>
where
    K: Borrow<str> + Eq + Hash,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(AsRef::as_ref)
    }
}

impl<K, V> VariableSource for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(AsRef::as_ref)
    }
}

impl<K, V, S> VariableSource for IndexMap<K, V, S>
where
    K: Borrow<str> + Eq + Hash,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(AsRef::as_ref)
    }
}

type Arguments = SmallVec<[Value; 4]>;

/// Execute a program against a set of variables
pub fn execute<V>(program: &Program, variables: &V) -> EvaluationResult<Value>
where
    V: VariableSource + ?Sized,
{
    let mut stack: Vec<Value> = Vec::with_capacity(program.max_stack_depth);

    for (pc, instruction) in program.instructions.iter().enumerate() {
        match *instruction {
            Instruction::PushConstant(idx) => {
                let value = program
                    .constants
                    .get(usize::from(idx))
                    .ok_or(EvaluationError::InvalidOperand { instruction: pc })?;
                stack.push(value.clone());
            }
            Instruction::LoadVariable(idx) => {
                let name = program
                    .names
                    .get(usize::from(idx))
                    .ok_or(EvaluationError::InvalidOperand { instruction: pc })?;
                stack.push(variables.lookup(name).map_or(Value::Nil, Value::from));
            }
            Instruction::CallFunction(idx, arity) => {
                let function = program
                    .functions
                    .get(usize::from(idx))
                    .ok_or(EvaluationError::InvalidOperand { instruction: pc })?;
                let args = pop_n(&mut stack, usize::from(arity), pc)?;
                stack.push(function.evaluate(&args)?);
            }
            Instruction::MakeCollection(count) => {
                let items = pop_n(&mut stack, usize::from(count), pc)?;
                stack.push(Value::List(items.into_vec()));
            }
        }
    }

    if stack.len() != 1 {
        return Err(EvaluationError::InvalidStackState { depth: stack.len() });
    }
    stack
        .pop()
        .ok_or(EvaluationError::InvalidStackState { depth: 0 })
}

fn pop_n(stack: &mut Vec<Value>, count: usize, pc: usize) -> EvaluationResult<Arguments> {
    let start = stack
        .len()
        .checked_sub(count)
        .ok_or(EvaluationError::StackUnderflow { instruction: pc })?;
    Ok(stack.drain(start..).collect())
}
