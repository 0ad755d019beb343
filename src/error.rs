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

//! Error types for tag resolution
//!
//! Each layer has its own error enum ([`ParseError`](crate::parser::ParseError),
//! [`CompileError`], [`EvaluationError`], [`FunctionError`], [`CoercionError`]);
//! [`TiqError`] is what the public API returns.

use crate::compiler::{CompileError, EvaluationError};
use crate::model::CoercionError;
use crate::registry::FunctionError;
use thiserror::Error;

/// Result type alias for tag resolution operations
pub type Result<T> = std::result::Result<T, TiqError>;

/// Errors returned by resolution, inspection and field assignment
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TiqError {
    /// The destination is an absent optional or nil reference
    #[error("nil reference")]
    NilReference,

    /// The destination is not a record type
    #[error("type {type_name} is not a record")]
    NotARecord {
        /// Name of the inspected type
        type_name: String,
    },

    /// No field with the requested name
    #[error("field {name} not found")]
    FieldNotFound {
        /// Requested field name
        name: String,
    },

    /// The field was reached through a read-only view
    #[error("field {name} cannot be set")]
    NotSettable {
        /// Field name
        name: String,
    },

    /// A value could not be converted to the field's type
    #[error("cannot convert {from} to {to}: {source}")]
    CannotConvert {
        /// Kind of the source value
        from: String,
        /// Destination type
        to: String,
        /// Underlying conversion failure
        source: CoercionError,
    },

    /// A resolution expression failed to compile
    #[error("cannot compile tag: failed to compile expression \"{expression}\": {source}")]
    CompileFailure {
        /// Expression text
        expression: String,
        /// Compiler diagnostic
        source: CompileError,
    },

    /// An accessor function rejected its arguments (strict evaluation)
    #[error("error evaluating tag for field {field}: {source}")]
    Accessor {
        /// Field being resolved
        field: String,
        /// Function failure
        source: FunctionError,
    },

    /// Program execution failed (strict evaluation)
    #[error("error evaluating tag for field {field}: {source}")]
    Evaluation {
        /// Field being resolved
        field: String,
        /// Runtime failure
        source: EvaluationError,
    },
}

impl TiqError {
    /// Wrap a runtime failure for `field`, surfacing function errors directly
    pub fn evaluation(field: impl Into<String>, error: EvaluationError) -> Self {
        let field = field.into();
        match error {
            EvaluationError::Function(source) => TiqError::Accessor { field, source },
            source => TiqError::Evaluation { field, source },
        }
    }

    /// Wrap a conversion failure of `value_kind` into `target`
    pub fn cannot_convert(
        value_kind: impl Into<String>,
        target: impl ToString,
        source: CoercionError,
    ) -> Self {
        TiqError::CannotConvert {
            from: value_kind.into(),
            to: target.to_string(),
            source,
        }
    }
}
