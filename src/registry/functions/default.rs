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

//! default() function - fallback for nil values

use crate::model::Value;
use crate::registry::function::{FunctionResult, TagFunction};
use crate::registry::signature::{FunctionSignature, ParameterInfo, ValueType};

/// default() function - fallback for nil values
pub struct DefaultFunction;

impl TagFunction for DefaultFunction {
    fn name(&self) -> &str {
        "default"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "default",
                vec![
                    ParameterInfo::required("value", ValueType::Any),
                    ParameterInfo::required("fallback", ValueType::Any),
                ],
                ValueType::Any,
            )
        });
        &SIG
    }

    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;

        match &args[0] {
            Value::Nil => Ok(args[1].clone()),
            value => Ok(value.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_when_present() {
        let result = DefaultFunction
            .evaluate(&["value".into(), "default".into()])
            .unwrap();
        assert_eq!(result, Value::from("value"));
    }

    #[test]
    fn test_empty_string_is_present() {
        let result = DefaultFunction.evaluate(&["".into(), "default".into()]).unwrap();
        assert_eq!(result, Value::from(""));
    }

    #[test]
    fn test_fallback_when_nil() {
        let result = DefaultFunction
            .evaluate(&[Value::Nil, Value::Int(8080)])
            .unwrap();
        assert_eq!(result, Value::Int(8080));
    }

    #[test]
    fn test_wrong_arity() {
        assert!(DefaultFunction.evaluate(&[Value::Nil]).is_err());
    }
}
