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

//! Type coercion from dynamic expression results to field types

use thiserror::Error;

use super::types::{FloatWidth, TypeInfo, TypeKind};
use super::value::Value;

/// Result type for type coercion operations
pub type CoercionResult<T> = Result<T, CoercionError>;

/// Errors that can occur during type coercion
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    /// Cannot coerce between the specified types
    #[error("cannot convert {from} to {to}")]
    IncompatibleTypes {
        /// Source value kind
        from: String,
        /// Target type
        to: String,
    },

    /// The value format is invalid for the target type
    #[error("invalid {target_type} syntax: {value:?}")]
    InvalidFormat {
        /// Offending text
        value: String,
        /// Target type
        target_type: String,
    },

    /// The value does not fit the target type
    #[error("value {value} out of range for {target_type}")]
    OutOfRange {
        /// Offending value
        value: String,
        /// Target type
        target_type: String,
    },

    /// One element of a sequence failed to convert
    #[error("error converting element {index}: {source}")]
    Element {
        /// Index of the failing element
        index: usize,
        /// Element failure
        #[source]
        source: Box<CoercionError>,
    },

    /// The target type is not a supported destination
    #[error("unsupported target type: {0}")]
    UnsupportedTarget(String),
}

impl CoercionError {
    pub(crate) fn incompatible(value: &Value, target: &TypeInfo) -> Self {
        Self::IncompatibleTypes {
            from: value.type_name().to_string(),
            to: target.to_string(),
        }
    }

    pub(crate) fn out_of_range(value: impl ToString, target: &TypeInfo) -> Self {
        Self::OutOfRange {
            value: value.to_string(),
            target_type: target.to_string(),
        }
    }
}

/// Type coercion utility for tag values
pub struct TypeCoercion;

impl TypeCoercion {
    /// Coerce `value` into the shape required by `target`.
    ///
    /// Values that already match the target kind are returned unchanged; widths are
    /// checked later when the value is written into its field.
    pub fn coerce(target: &TypeInfo, value: Value) -> CoercionResult<Value> {
        if target.matches(&value) {
            return Ok(value);
        }

        match target.kind() {
            TypeKind::String => Self::coerce_to_string(value),
            TypeKind::Bool => Self::coerce_to_bool(value),
            TypeKind::Int | TypeKind::Uint => Self::coerce_to_integer(target, value),
            TypeKind::Float => Self::coerce_to_float(target, value),
            TypeKind::Optional => match target {
                TypeInfo::Optional(_) if value.is_nil() => Ok(Value::Nil),
                TypeInfo::Optional(inner) => Self::coerce(inner, value),
                _ => Err(CoercionError::UnsupportedTarget(target.to_string())),
            },
            TypeKind::Collection => match target {
                TypeInfo::Collection(element) => Self::coerce_to_collection(element, value),
                _ => Err(CoercionError::UnsupportedTarget(target.to_string())),
            },
            TypeKind::Other => Err(CoercionError::UnsupportedTarget(target.to_string())),
        }
    }

    /// Coerce value to string
    pub fn coerce_to_string(value: Value) -> CoercionResult<Value> {
        match value {
            Value::String(s) => Ok(Value::String(s)),
            Value::Bool(b) => Ok(Value::String(b.to_string())),
            Value::Int(i) => Ok(Value::String(i.to_string())),
            Value::Uint(u) => Ok(Value::String(u.to_string())),
            Value::Float(x) => Ok(Value::String(x.to_string())),
            other => Err(CoercionError::incompatible(&other, &TypeInfo::String)),
        }
    }

    /// Coerce value to boolean
    pub fn coerce_to_bool(value: Value) -> CoercionResult<Value> {
        match value {
            Value::Bool(b) => Ok(Value::Bool(b)),
            Value::Int(i) => Ok(Value::Bool(i != 0)),
            Value::Uint(u) => Ok(Value::Bool(u != 0)),
            Value::Float(x) => Ok(Value::Bool(x != 0.0)),
            Value::String(s) => match s.trim() {
                "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(Value::Bool(true)),
                "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(Value::Bool(false)),
                _ => Err(CoercionError::InvalidFormat {
                    value: s,
                    target_type: TypeInfo::Bool.to_string(),
                }),
            },
            other => Err(CoercionError::incompatible(&other, &TypeInfo::Bool)),
        }
    }

    /// Coerce value to a signed or unsigned integer of the target width
    pub fn coerce_to_integer(target: &TypeInfo, value: Value) -> CoercionResult<Value> {
        let wide = match &value {
            Value::Int(i) => *i as i128,
            Value::Uint(u) => *u as i128,
            Value::Bool(b) => *b as i128,
            Value::Float(x) => {
                if !x.is_finite() || x.fract() != 0.0 {
                    return Err(CoercionError::InvalidFormat {
                        value: x.to_string(),
                        target_type: target.to_string(),
                    });
                }
                if x.abs() > u64::MAX as f64 {
                    return Err(CoercionError::out_of_range(x, target));
                }
                *x as i128
            }
            Value::String(s) => s.trim().parse::<i128>().map_err(|_| CoercionError::InvalidFormat {
                value: s.clone(),
                target_type: target.to_string(),
            })?,
            other => return Err(CoercionError::incompatible(other, target)),
        };

        integer_value(target, wide)
    }

    /// Coerce value to a floating point number of the target width
    pub fn coerce_to_float(target: &TypeInfo, value: Value) -> CoercionResult<Value> {
        let x = match &value {
            Value::Float(x) => *x,
            Value::Int(i) => *i as f64,
            Value::Uint(u) => *u as f64,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::String(s) => s.trim().parse::<f64>().map_err(|_| CoercionError::InvalidFormat {
                value: s.clone(),
                target_type: target.to_string(),
            })?,
            other => return Err(CoercionError::incompatible(other, target)),
        };

        if matches!(target, TypeInfo::Float(FloatWidth::F32)) && x.is_finite() && x.abs() > f32::MAX as f64
        {
            return Err(CoercionError::out_of_range(x, target));
        }
        Ok(Value::Float(x))
    }

    /// Coerce value to a collection, wrapping scalars as a single element
    pub fn coerce_to_collection(element: &TypeInfo, value: Value) -> CoercionResult<Value> {
        let items = match value {
            Value::List(items) => items,
            other => vec![other],
        };

        let mut converted = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let item = Self::coerce(element, item).map_err(|source| CoercionError::Element {
                index,
                source: Box::new(source),
            })?;
            converted.push(item);
        }
        Ok(Value::List(converted))
    }
}

/// Build an integer value of the target kind after a range check
pub(crate) fn integer_value(target: &TypeInfo, wide: i128) -> CoercionResult<Value> {
    let (width, signed) = match target {
        TypeInfo::Int(width) => (*width, true),
        TypeInfo::Uint(width) => (*width, false),
        _ => return Err(CoercionError::UnsupportedTarget(target.to_string())),
    };
    let (min, max) = if signed {
        width.signed_range()
    } else {
        width.unsigned_range()
    };
    if wide < min || wide > max {
        return Err(CoercionError::out_of_range(wide, target));
    }
    Ok(if signed {
        Value::Int(wide as i64)
    } else {
        Value::Uint(wide as u64)
    })
}

/// Convert an integer-like value to `i128` without parsing strings.
pub(crate) fn numeric_to_i128(value: &Value, target: &TypeInfo) -> CoercionResult<i128> {
    match value {
        Value::Int(i) => Ok(*i as i128),
        Value::Uint(u) => Ok(*u as i128),
        Value::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() <= u64::MAX as f64 => {
            Ok(*x as i128)
        }
        Value::Float(x) => Err(CoercionError::out_of_range(x, target)),
        other => Err(CoercionError::incompatible(other, target)),
    }
}
