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

//! split() function - splits string by separator

use crate::model::Value;
use crate::registry::function::{FunctionResult, TagFunction};
use crate::registry::signature::{FunctionSignature, ParameterInfo, ValueType};

/// split() function - splits string by separator
pub struct SplitFunction;

impl TagFunction for SplitFunction {
    fn name(&self) -> &str {
        "split"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "split",
                vec![
                    ParameterInfo::required("string", ValueType::String),
                    ParameterInfo::required("separator", ValueType::String),
                ],
                ValueType::StringList,
            )
        });
        &SIG
    }

    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let s = self.string_arg(args, 0)?;
        let separator = self.string_arg(args, 1)?;

        if separator.is_empty() {
            // An empty separator splits into single characters
            return Ok(Value::string_list(
                s.chars().map(|c| c.to_string().trim().to_string()),
            ));
        }
        Ok(Value::string_list(s.split(separator).map(str::trim)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split() {
        let result = SplitFunction.evaluate(&["a,b,c".into(), ",".into()]).unwrap();
        assert_eq!(result, Value::string_list(["a", "b", "c"]));
    }

    #[test]
    fn test_trims_parts() {
        let result = SplitFunction
            .evaluate(&[" a | b | c ".into(), "|".into()])
            .unwrap();
        assert_eq!(result, Value::string_list(["a", "b", "c"]));
    }

    #[test]
    fn test_ignores_key_value_encoding() {
        let result = SplitFunction
            .evaluate(&["k=v; x".into(), ";".into()])
            .unwrap();
        assert_eq!(result, Value::string_list(["k=v", "x"]));
    }

    #[test]
    fn test_empty_separator_splits_characters() {
        let result = SplitFunction.evaluate(&["abc".into(), "".into()]).unwrap();
        assert_eq!(result, Value::string_list(["a", "b", "c"]));

        let result = SplitFunction.evaluate(&["".into(), "".into()]).unwrap();
        assert_eq!(result, Value::List(vec![]));
    }

    #[test]
    fn test_first_argument_not_string() {
        let err = SplitFunction
            .evaluate(&[Value::Int(123), ",".into()])
            .unwrap_err();
        assert!(err.to_string().contains("first argument must be a string"));
    }
}
