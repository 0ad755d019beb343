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

//! Function trait and errors for tag functions

use crate::model::Value;
use crate::registry::signature::{FunctionSignature, ValueType};
use thiserror::Error;

/// Result type for function operations
pub type FunctionResult<T> = Result<T, FunctionError>;

/// Function evaluation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FunctionError {
    /// Invalid number of arguments
    #[error("{name}() requires {}, got {actual}", arity_text(.min, .max))]
    InvalidArity {
        /// Function name
        name: String,
        /// Minimum arguments
        min: usize,
        /// Maximum arguments (None for unlimited)
        max: Option<usize>,
        /// Actual arguments provided
        actual: usize,
    },

    /// Invalid argument type
    #[error("{name}() {} argument must be {expected}, got {actual}", ordinal(.index))]
    InvalidArgumentType {
        /// Function name
        name: String,
        /// Argument index
        index: usize,
        /// Expected type description
        expected: String,
        /// Actual type found
        actual: String,
    },
}

fn arity_text(min: &usize, max: &Option<usize>) -> String {
    let plural = |n: usize| if n == 1 { "argument" } else { "arguments" };
    match max {
        Some(max) if max == min => format!("exactly {min} {}", plural(*min)),
        Some(max) => format!("between {min} and {max} arguments"),
        None => format!("at least {min} {}", plural(*min)),
    }
}

fn ordinal(index: &usize) -> String {
    match index {
        0 => "first".to_string(),
        1 => "second".to_string(),
        2 => "third".to_string(),
        n => format!("#{}", n + 1),
    }
}

/// A native function callable from tag expressions
pub trait TagFunction: Send + Sync {
    /// Get the function name
    fn name(&self) -> &str;

    /// Get the function signature
    fn signature(&self) -> &FunctionSignature;

    /// Evaluate the function
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value>;

    /// Validate the argument count against the signature
    fn validate_args(&self, args: &[Value]) -> FunctionResult<()> {
        let sig = self.signature();
        if !sig.accepts_arity(args.len()) {
            return Err(FunctionError::InvalidArity {
                name: self.name().to_string(),
                min: sig.min_arity,
                max: sig.max_arity,
                actual: args.len(),
            });
        }
        Ok(())
    }

    /// Get a string argument or report a type error
    fn string_arg<'a>(&self, args: &'a [Value], index: usize) -> FunctionResult<&'a str> {
        match args.get(index) {
            Some(Value::String(s)) => Ok(s),
            other => Err(self.type_error(index, ValueType::String, other)),
        }
    }

    /// Get an integer argument or report a type error
    fn int_arg(&self, args: &[Value], index: usize) -> FunctionResult<i64> {
        match args.get(index) {
            Some(Value::Int(i)) => Ok(*i),
            other => Err(self.type_error(index, ValueType::Integer, other)),
        }
    }

    /// Build a type error for argument `index`
    fn type_error(&self, index: usize, expected: ValueType, actual: Option<&Value>) -> FunctionError {
        FunctionError::InvalidArgumentType {
            name: self.name().to_string(),
            index,
            expected: expected.description().to_string(),
            actual: actual.map_or("nothing", Value::type_name).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_messages() {
        let err = FunctionError::InvalidArity {
            name: "get".into(),
            min: 2,
            max: Some(2),
            actual: 1,
        };
        assert_eq!(err.to_string(), "get() requires exactly 2 arguments, got 1");

        let err = FunctionError::InvalidArity {
            name: "first".into(),
            min: 1,
            max: Some(1),
            actual: 0,
        };
        assert_eq!(err.to_string(), "first() requires exactly 1 argument, got 0");
    }

    #[test]
    fn test_type_message() {
        let err = FunctionError::InvalidArgumentType {
            name: "nth".into(),
            index: 1,
            expected: "an integer".into(),
            actual: "string".into(),
        };
        assert_eq!(
            err.to_string(),
            "nth() second argument must be an integer, got string"
        );
    }
}
