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

//! last() function - value or key of the last entry

use crate::model::Value;
use crate::registry::function::{FunctionResult, TagFunction};
use crate::registry::functions::entries::entries;
use crate::registry::signature::{FunctionSignature, ParameterInfo, ValueType};

/// last() function - value or key of the last entry
pub struct LastFunction;

impl TagFunction for LastFunction {
    fn name(&self) -> &str {
        "last"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "last",
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
            .last()
            .map_or(Value::Nil, |entry| Value::String(entry.value_or_key().to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_value() {
        let result = LastFunction
            .evaluate(&["key1=value1,key2=value2".into()])
            .unwrap();
        assert_eq!(result, Value::from("value2"));
    }

    #[test]
    fn test_key_when_last_has_no_value() {
        let result = LastFunction.evaluate(&["key1=value1,key2".into()]).unwrap();
        assert_eq!(result, Value::from("key2"));
    }

    #[test]
    fn test_argument_not_string() {
        let err = LastFunction.evaluate(&[Value::Bool(true)]).unwrap_err();
        assert!(err.to_string().contains("argument must be a string"));
    }
}
