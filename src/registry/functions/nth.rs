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

//! nth() function - value or key of the entry at an index

use crate::model::Value;
use crate::registry::function::{FunctionResult, TagFunction};
use crate::registry::functions::entries::entries;
use crate::registry::signature::{FunctionSignature, ParameterInfo, ValueType};

/// nth() function - value or key of the entry at an index
pub struct NthFunction;

impl TagFunction for NthFunction {
    fn name(&self) -> &str {
        "nth"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "nth",
                vec![
                    ParameterInfo::required("list", ValueType::String),
                    ParameterInfo::required("index", ValueType::Integer),
                ],
                ValueType::String,
            )
        });
        &SIG
    }

    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let list = self.string_arg(args, 0)?;
        let index = self.int_arg(args, 1)?;

        let Ok(index) = usize::try_from(index) else {
            return Ok(Value::Nil);
        };

        Ok(entries(list)
            .nth(index)
            .map_or(Value::Nil, |entry| Value::String(entry.value_or_key().to_string())))
    }
}
