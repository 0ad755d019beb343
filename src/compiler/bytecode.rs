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

//! Bytecode instruction set for tag expressions
//!
//! A [`Program`] is a flat instruction list over a value stack. Function calls
//! are resolved at compile time, so executing a program never looks a name up
//! in the registry.

use crate::model::Value;
use crate::registry::TagFunction;
use std::fmt;
use std::sync::Arc;

/// Index into the constant pool
pub type ConstantIndex = u16;

/// Index into the variable name pool
pub type NameIndex = u16;

/// Index into the resolved function table
pub type FunctionIndex = u16;

/// Bytecode instruction set for tag expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Push a constant value onto the stack
    PushConstant(ConstantIndex),

    /// Push the context value of a variable, or nil when it is undefined
    LoadVariable(NameIndex),

    /// Call a function with the given argument count
    /// Stack: [arg1, ..., argN] -> [result]
    CallFunction(FunctionIndex, u8),

    /// Create a list from the top N stack values
    /// Stack: [elem1, ..., elemN] -> [list]
    MakeCollection(u16),
}

impl Instruction {
    /// Net change of the stack height
    pub fn stack_effect(&self) -> i32 {
        match self {
            Self::PushConstant(_) | Self::LoadVariable(_) => 1,
            Self::CallFunction(_, arity) => 1 - i32::from(*arity),
            Self::MakeCollection(count) => 1 - i32::from(*count),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PushConstant(idx) => write!(f, "PUSH_CONST {idx}"),
            Self::LoadVariable(idx) => write!(f, "LOAD_VAR {idx}"),
            Self::CallFunction(func_idx, arity) => write!(f, "CALL {func_idx} {arity}"),
            Self::MakeCollection(count) => write!(f, "MAKE_COLLECTION {count}"),
        }
    }
}

/// A compiled tag expression
#[derive(Clone)]
pub struct Program {
    /// Instructions in execution order
    pub instructions: Vec<Instruction>,
    /// Constant pool
    pub constants: Vec<Value>,
    /// Variable names referenced by `LoadVariable`
    pub names: Vec<String>,
    /// Functions referenced by `CallFunction`
    pub functions: Vec<Arc<dyn TagFunction>>,
    /// Maximum stack depth reached during execution
    pub max_stack_depth: usize,
    /// Expression text the program was compiled from
    pub source: String,
}

impl Program {
    /// Create an empty program for `source`
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            instructions: Vec::new(),
            constants: Vec::new(),
            names: Vec::new(),
            functions: Vec::new(),
            max_stack_depth: 0,
            source: source.into(),
        }
    }

    /// Expression text the program was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Add a constant to the pool and return its index
    pub fn add_constant(&mut self, value: Value) -> Option<ConstantIndex> {
        if let Some(index) = self.constants.iter().position(|v| v == &value) {
            return ConstantIndex::try_from(index).ok();
        }

        let index = ConstantIndex::try_from(self.constants.len()).ok()?;
        self.constants.push(value);
        Some(index)
    }

    /// Add a variable name to the pool and return its index
    pub fn add_name(&mut self, name: &str) -> Option<NameIndex> {
        if let Some(index) = self.names.iter().position(|n| n == name) {
            return NameIndex::try_from(index).ok();
        }

        let index = NameIndex::try_from(self.names.len()).ok()?;
        self.names.push(name.to_string());
        Some(index)
    }

    /// Add a resolved function and return its index
    pub fn add_function(&mut self, function: Arc<dyn TagFunction>) -> Option<FunctionIndex> {
        if let Some(index) = self
            .functions
            .iter()
            .position(|f| f.name() == function.name())
        {
            return FunctionIndex::try_from(index).ok();
        }

        let index = FunctionIndex::try_from(self.functions.len()).ok()?;
        self.functions.push(function);
        Some(index)
    }

    /// Add an instruction
    pub fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// Calculate the maximum stack depth required
    pub fn calculate_max_stack_depth(&mut self) {
        let mut current_depth = 0i32;
        let mut max_depth = 0i32;

        for instruction in &self.instructions {
            current_depth += instruction.stack_effect();
            max_depth = max_depth.max(current_depth);
        }

        self.max_stack_depth = usize::try_from(max_depth).unwrap_or(0);
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let functions: Vec<&str> = self.functions.iter().map(|func| func.name()).collect();
        f.debug_struct("Program")
            .field("source", &self.source)
            .field("instructions", &self.instructions)
            .field("constants", &self.constants)
            .field("names", &self.names)
            .field("functions", &functions)
            .finish()
    }
}
