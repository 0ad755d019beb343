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

//! has() function - whether a key is present

use crate::model::Value;
use crate::registry::function::{FunctionResult, TagFunction};
use crate::registry::functions::entries::entries;
use crate::registry::signature::{FunctionSignature, ParameterInfo, ValueType};

/// has() function - whether a key is present
pub struct HasFunction;

impl TagFunction for HasFunction {
    fn name(&self) -> &str {
        "has"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "has",
                vec![
                    ParameterInfo::required("list", ValueType::String),
                    ParameterInfo::required("key", ValueType::String),
                ],
                ValueType::Boolean,
            )
        });
        &SIG
    }

    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let list = self.string_arg(args, 0)?;
        let key = self.string_arg(args, 1)?;

        Ok(Value::Bool(entries(list).any(|entry| entry.key == key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_exists() {
        let result = HasFunction
            .evaluate(&["key1=value1,key2=value2".into(), "key1".into()])
            .unwrap();
        assert_eq!(result, Value::Bool(true));
    }

    #[test]
    fn test_valueless_key_exists() {
        let result = HasFunction
            .evaluate(&["required,min=5".into(), "required".into()])
            .unwrap();
        assert_eq!(result, Value::Bool(true));
    }

    #[test]
    fn test_key_missing() {
        let result = HasFunction
            .evaluate(&["key1=value1,key2=value2".into(), "key3".into()])
            .unwrap();
        assert_eq!(result, Value::Bool(false));
    }

    #[test]
    fn test_second_argument_not_string() {
        let err = HasFunction
            .evaluate(&["key=value".into(), Value::Int(123)])
            .unwrap_err();
        assert!(err.to_string().contains("second argument must be a string"));
    }
}
