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

//! Record introspection
//!
//! Rust has no runtime reflection, so records describe themselves through the
//! [`Record`] trait, normally implemented with `#[derive(Record)]`. Each field
//! is exposed as a [`Slot`] that can be read and written as a [`Value`].

pub mod annotations;
pub mod field;
pub mod inspector;

pub use field::Field;
pub use inspector::Inspector;

use crate::model::{CoercionResult, FieldType, TypeInfo, Value};

/// Static description of one record field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    /// Field name
    pub name: &'static str,
    /// Declared type
    pub type_info: TypeInfo,
    /// Raw annotation string, `name:"value"` pairs
    pub annotations: &'static str,
}

impl FieldInfo {
    /// Create a field description
    pub fn new(name: &'static str, type_info: TypeInfo, annotations: &'static str) -> Self {
        Self {
            name,
            type_info,
            annotations,
        }
    }
}

/// A record type whose fields can be enumerated and assigned
///
/// All three field methods return fields in declaration order and agree on
/// their length.
pub trait Record {
    /// Name of the record type
    fn record_name(&self) -> &'static str;

    /// Descriptions of all fields
    fn field_infos(&self) -> Vec<FieldInfo>;

    /// Read-only handles to all fields
    fn field_slots(&self) -> Vec<&dyn Slot>;

    /// Settable handles to all fields
    fn field_slots_mut(&mut self) -> Vec<&mut dyn Slot>;
}

/// Storage for a single field value
pub trait Slot {
    /// Declared type of the stored value
    fn value_type(&self) -> TypeInfo;

    /// Current value
    fn get_value(&self) -> Value;

    /// Replace the value using a direct conversion
    fn set_value(&mut self, value: Value) -> CoercionResult<()>;
}

impl<T: FieldType> Slot for T {
    fn value_type(&self) -> TypeInfo {
        <T as FieldType>::type_info()
    }

    fn get_value(&self) -> Value {
        self.to_value()
    }

    fn set_value(&mut self, value: Value) -> CoercionResult<()> {
        *self = T::from_value(value)?;
        Ok(())
    }
}

/// Result of looking through a value for a record
pub enum Inspected<'a> {
    /// The value is a record
    Record(&'a dyn Record),
    /// The value is an absent optional
    Nil,
    /// The value is not a record; carries its type name
    NotARecord(&'static str),
}

/// Mutable counterpart of [`Inspected`]
pub enum InspectedMut<'a> {
    /// The value is a record
    Record(&'a mut dyn Record),
    /// The value is an absent optional
    Nil,
    /// The value is not a record; carries its type name
    NotARecord(&'static str),
}

/// Types that may or may not hold a record
pub trait Inspect {
    /// Look through the value for a record
    fn inspect_ref(&self) -> Inspected<'_>;

    /// Look through the value for a settable record
    fn inspect_mut(&mut self) -> InspectedMut<'_>;
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn inspect_ref(&self) -> Inspected<'_> {
        (**self).inspect_ref()
    }

    fn inspect_mut(&mut self) -> InspectedMut<'_> {
        (**self).inspect_mut()
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn inspect_ref(&self) -> Inspected<'_> {
        match self {
            Some(inner) => inner.inspect_ref(),
            None => Inspected::Nil,
        }
    }

    fn inspect_mut(&mut self) -> InspectedMut<'_> {
        match self {
            Some(inner) => inner.inspect_mut(),
            None => InspectedMut::Nil,
        }
    }
}

impl<T> Inspect for Vec<T> {
    fn inspect_ref(&self) -> Inspected<'_> {
        Inspected::NotARecord(std::any::type_name::<Self>())
    }

    fn inspect_mut(&mut self) -> InspectedMut<'_> {
        InspectedMut::NotARecord(std::any::type_name::<Self>())
    }
}

macro_rules! impl_not_a_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn inspect_ref(&self) -> Inspected<'_> {
                    Inspected::NotARecord(stringify!($ty))
                }

                fn inspect_mut(&mut self) -> InspectedMut<'_> {
                    InspectedMut::NotARecord(stringify!($ty))
                }
            }
        )*
    };
}

impl_not_a_record!(
    String, str, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
    f32, f64,
);
