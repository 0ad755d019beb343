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

//! Static type descriptors for record fields

use serde::{Deserialize, Serialize};
use std::fmt;

use super::value::Value;

/// Bit width of an integer type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntWidth {
    /// 8 bits
    W8,
    /// 16 bits
    W16,
    /// 32 bits
    W32,
    /// 64 bits
    W64,
    /// Pointer sized
    Size,
}

impl IntWidth {
    fn bits(self) -> u32 {
        match self {
            IntWidth::W8 => 8,
            IntWidth::W16 => 16,
            IntWidth::W32 => 32,
            IntWidth::W64 => 64,
            IntWidth::Size => usize::BITS,
        }
    }

    /// Inclusive range of a signed integer of this width
    pub fn signed_range(self) -> (i128, i128) {
        let bits = self.bits();
        (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
    }

    /// Inclusive range of an unsigned integer of this width
    pub fn unsigned_range(self) -> (i128, i128) {
        (0, (1i128 << self.bits()) - 1)
    }
}

/// Width of a floating point type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloatWidth {
    /// `f32`
    F32,
    /// `f64`
    F64,
}

/// Type information for a record field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeInfo {
    /// `String`
    String,
    /// `bool`
    Bool,
    /// Signed integer of the given width
    Int(IntWidth),
    /// Unsigned integer of the given width
    Uint(IntWidth),
    /// Floating point number of the given width
    Float(FloatWidth),
    /// Optional value, the pointer analogue (`Option<T>`)
    Optional(Box<TypeInfo>),
    /// Sequence of values (`Vec<T>`)
    Collection(Box<TypeInfo>),
    /// Any other type, identified by name
    Other(String),
}

/// Kind of a type descriptor, ignoring widths and element types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// String
    String,
    /// Boolean
    Bool,
    /// Signed integer
    Int,
    /// Unsigned integer
    Uint,
    /// Floating point
    Float,
    /// Optional value
    Optional,
    /// Sequence
    Collection,
    /// Anything else
    Other,
}

impl TypeInfo {
    /// Create an optional type
    pub fn optional(inner: TypeInfo) -> Self {
        TypeInfo::Optional(Box::new(inner))
    }

    /// Create a collection type
    pub fn collection(element: TypeInfo) -> Self {
        TypeInfo::Collection(Box::new(element))
    }

    /// Get the kind of this type
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeInfo::String => TypeKind::String,
            TypeInfo::Bool => TypeKind::Bool,
            TypeInfo::Int(_) => TypeKind::Int,
            TypeInfo::Uint(_) => TypeKind::Uint,
            TypeInfo::Float(_) => TypeKind::Float,
            TypeInfo::Optional(_) => TypeKind::Optional,
            TypeInfo::Collection(_) => TypeKind::Collection,
            TypeInfo::Other(_) => TypeKind::Other,
        }
    }

    /// Check whether `value` already has the shape of this type.
    ///
    /// Widths are ignored, so any integer matches any signed integer type.
    /// Lists match a collection only when every element matches the element type.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (TypeInfo::String, Value::String(_))
            | (TypeInfo::Bool, Value::Bool(_))
            | (TypeInfo::Int(_), Value::Int(_))
            | (TypeInfo::Uint(_), Value::Uint(_))
            | (TypeInfo::Float(_), Value::Float(_)) => true,
            (TypeInfo::Collection(element), Value::List(items)) => {
                items.iter().all(|item| element.matches(item))
            }
            _ => false,
        }
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeInfo::String => f.write_str("String"),
            TypeInfo::Bool => f.write_str("bool"),
            TypeInfo::Int(IntWidth::Size) => f.write_str("isize"),
            TypeInfo::Int(width) => write!(f, "i{}", width.bits()),
            TypeInfo::Uint(IntWidth::Size) => f.write_str("usize"),
            TypeInfo::Uint(width) => write!(f, "u{}", width.bits()),
            TypeInfo::Float(FloatWidth::F32) => f.write_str("f32"),
            TypeInfo::Float(FloatWidth::F64) => f.write_str("f64"),
            TypeInfo::Optional(inner) => write!(f, "Option<{inner}>"),
            TypeInfo::Collection(element) => write!(f, "Vec<{element}>"),
            TypeInfo::Other(name) => f.write_str(name),
        }
    }
}
