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

//! Bridge between Rust field types and dynamic values

use super::type_coercion::{CoercionError, CoercionResult, numeric_to_i128};
use super::types::{FloatWidth, IntWidth, TypeInfo};
use super::value::Value;

/// A Rust type that can be stored in a record field
///
/// `from_value` performs a direct conversion only: numbers convert between
/// numeric types when they fit, everything else must already have the right
/// kind. Parsing and formatting belong to [`TypeCoercion`](super::TypeCoercion).
pub trait FieldType: Sized {
    /// Static type descriptor
    fn type_info() -> TypeInfo;

    /// Convert a dynamic value into this type
    fn from_value(value: Value) -> CoercionResult<Self>;

    /// Convert this value into a dynamic value
    fn to_value(&self) -> Value;
}

impl FieldType for String {
    fn type_info() -> TypeInfo {
        TypeInfo::String
    }

    fn from_value(value: Value) -> CoercionResult<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(CoercionError::incompatible(&other, &Self::type_info())),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FieldType for bool {
    fn type_info() -> TypeInfo {
        TypeInfo::Bool
    }

    fn from_value(value: Value) -> CoercionResult<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(CoercionError::incompatible(&other, &Self::type_info())),
        }
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! impl_integer_field {
    ($variant:ident, $width:ident, $($ty:ty),*) => {
        $(
            impl FieldType for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::$variant(IntWidth::$width)
                }

                fn from_value(value: Value) -> CoercionResult<Self> {
                    let target = Self::type_info();
                    let wide = numeric_to_i128(&value, &target)?;
                    <$ty>::try_from(wide).map_err(|_| CoercionError::out_of_range(wide, &target))
                }

                fn to_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

impl_integer_field!(Int, W8, i8);
impl_integer_field!(Int, W16, i16);
impl_integer_field!(Int, W32, i32);
impl_integer_field!(Int, W64, i64);
impl_integer_field!(Int, Size, isize);
impl_integer_field!(Uint, W8, u8);
impl_integer_field!(Uint, W16, u16);
impl_integer_field!(Uint, W32, u32);
impl_integer_field!(Uint, W64, u64);
impl_integer_field!(Uint, Size, usize);

fn float_from_value(value: Value, target: &TypeInfo) -> CoercionResult<f64> {
    match value {
        Value::Float(x) => Ok(x),
        Value::Int(i) => Ok(i as f64),
        Value::Uint(u) => Ok(u as f64),
        other => Err(CoercionError::incompatible(&other, target)),
    }
}

impl FieldType for f64 {
    fn type_info() -> TypeInfo {
        TypeInfo::Float(FloatWidth::F64)
    }

    fn from_value(value: Value) -> CoercionResult<Self> {
        float_from_value(value, &Self::type_info())
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl FieldType for f32 {
    fn type_info() -> TypeInfo {
        TypeInfo::Float(FloatWidth::F32)
    }

    fn from_value(value: Value) -> CoercionResult<Self> {
        let target = Self::type_info();
        let x = float_from_value(value, &target)?;
        if x.is_finite() && x.abs() > f32::MAX as f64 {
            return Err(CoercionError::out_of_range(x, &target));
        }
        Ok(x as f32)
    }

    fn to_value(&self) -> Value {
        Value::Float(*self as f64)
    }
}

impl<T: FieldType> FieldType for Option<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::optional(T::type_info())
    }

    fn from_value(value: Value) -> CoercionResult<Self> {
        match value {
            Value::Nil => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Nil, FieldType::to_value)
    }
}

impl<T: FieldType> FieldType for Vec<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::collection(T::type_info())
    }

    fn from_value(value: Value) -> CoercionResult<Self> {
        match value {
            Value::List(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    T::from_value(item).map_err(|source| CoercionError::Element {
                        index,
                        source: Box::new(source),
                    })
                })
                .collect(),
            other => Err(CoercionError::incompatible(&other, &Self::type_info())),
        }
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldType::to_value).collect())
    }
}
