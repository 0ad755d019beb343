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

//! Compiler module for tag expressions
//!
//! Compiles expression text to bytecode once and executes the program against
//! any [`VariableSource`].

pub mod bytecode;
pub mod cache;
pub mod compiler;
pub mod vm;

pub use bytecode::{ConstantIndex, FunctionIndex, Instruction, NameIndex, Program};
pub use cache::ProgramCache;
pub use compiler::{CompileError, CompileResult, ExpressionCompiler};
pub use vm::{EvaluationError, EvaluationResult, VariableSource, execute};
