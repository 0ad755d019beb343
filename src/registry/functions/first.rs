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

//! first() function - value or key of the first entry

use crate::model::Value;
use crate::registry::function::{FunctionResult, TagFunction};
use crate::registry::functions::entries::entries;
use crate::registry::signature::{FunctionSignature, ParameterInfo, ValueType};

/// first() function - value or key of the first entry
pub struct FirstFunction;

impl TagFunction for FirstFunction {
    fn name(&self) -> &str {
        "first"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "first",
                vec![ParameterInfo::required("list", ValueType::String)],
                ValueType::String,
            )
        });
        &SIG
    }

    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let list = self.string_arg(args, 0)?;

        Ok(entries(list)
            .next()
            .map_or(Value::Nil, |entry| Value::String(entry.value_or_key().to_string())))
    }
}
