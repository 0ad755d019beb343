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

//! Accessor for a single record field

use super::annotations;
use super::{FieldInfo, Slot};
use crate::error::{Result, TiqError};
use crate::model::{TypeCoercion, TypeInfo, Value};
use indexmap::IndexMap;
use std::fmt;

enum SlotRef<'a> {
    Shared(&'a dyn Slot),
    Exclusive(&'a mut dyn Slot),
}

/// One field of an inspected record
///
/// A field obtained through a read-only [`Inspector`](super::Inspector) can be
/// read but not set.
pub struct Field<'a> {
    info: FieldInfo,
    slot: SlotRef<'a>,
}

impl<'a> Field<'a> {
    pub(crate) fn shared(info: FieldInfo, slot: &'a dyn Slot) -> Self {
        Self {
            info,
            slot: SlotRef::Shared(slot),
        }
    }

    pub(crate) fn exclusive(info: FieldInfo, slot: &'a mut dyn Slot) -> Self {
        Self {
            info,
            slot: SlotRef::Exclusive(slot),
        }
    }

    /// Field name
    pub fn name(&self) -> &'static str {
        self.info.name
    }

    /// Declared type
    pub fn type_info(&self) -> &TypeInfo {
        &self.info.type_info
    }

    /// Static field description
    pub fn info(&self) -> &FieldInfo {
        &self.info
    }

    /// Raw annotation string
    pub fn raw_annotations(&self) -> &'static str {
        self.info.annotations
    }

    /// All annotations, in declaration order
    pub fn annotations(&self) -> IndexMap<String, String> {
        annotations::parse_annotations(self.info.annotations)
    }

    /// Value of one annotation, if present
    pub fn annotation(&self, name: &str) -> Option<String> {
        annotations::lookup(self.info.annotations, name)
    }

    /// Current value of the field
    pub fn value(&self) -> Value {
        match &self.slot {
            SlotRef::Shared(slot) => slot.get_value(),
            SlotRef::Exclusive(slot) => slot.get_value(),
        }
    }

    /// Whether [`set`](Self::set) can succeed
    pub fn is_settable(&self) -> bool {
        matches!(self.slot, SlotRef::Exclusive(_))
    }

    /// Assign a value that already has a compatible kind
    ///
    /// Numbers convert between numeric types when they fit; nothing is parsed
    /// or formatted.
    pub fn set(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let name = self.info.name;
        let SlotRef::Exclusive(slot) = &mut self.slot else {
            return Err(TiqError::NotSettable {
                name: name.to_string(),
            });
        };

        let from = value.type_name();
        slot.set_value(value)
            .map_err(|source| TiqError::cannot_convert(from, &self.info.type_info, source))
    }

    /// Coerce a value to the field's type and assign it
    pub fn set_from(&mut self, value: impl Into<Value>) -> Result<()> {
        if !self.is_settable() {
            return Err(TiqError::NotSettable {
                name: self.info.name.to_string(),
            });
        }

        let value = value.into();
        let from = value.type_name();
        let coerced = TypeCoercion::coerce(&self.info.type_info, value)
            .map_err(|source| TiqError::cannot_convert(from, &self.info.type_info, source))?;
        self.set(coerced)
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.info.name)
            .field("type", &self.info.type_info)
            .field("annotations", &self.info.annotations)
            .field("settable", &self.is_settable())
            .finish()
    }
}
