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

//! Inspector over a record value

use super::field::Field;
use super::{FieldInfo, Inspect, Inspected, InspectedMut, Record};
use crate::error::{Result, TiqError};

enum RecordRef<'a> {
    Shared(&'a dyn Record),
    Exclusive(&'a mut dyn Record),
}

/// Introspection view over a record
///
/// Created read-only with [`Inspector::new`] or settable with
/// [`Inspector::new_mut`].
pub struct Inspector<'a> {
    record: RecordRef<'a>,
}

impl<'a> Inspector<'a> {
    /// Inspect a value without the ability to set fields
    pub fn new<T: Inspect + ?Sized>(value: &'a T) -> Result<Self> {
        match value.inspect_ref() {
            Inspected::Record(record) => Ok(Self::from_record(record)),
            Inspected::Nil => Err(TiqError::NilReference),
            Inspected::NotARecord(type_name) => Err(TiqError::NotARecord {
                type_name: type_name.to_string(),
            }),
        }
    }

    /// Inspect a value with settable fields
    pub fn new_mut<T: Inspect + ?Sized>(value: &'a mut T) -> Result<Self> {
        match value.inspect_mut() {
            InspectedMut::Record(record) => Ok(Self::from_record_mut(record)),
            InspectedMut::Nil => Err(TiqError::NilReference),
            InspectedMut::NotARecord(type_name) => Err(TiqError::NotARecord {
                type_name: type_name.to_string(),
            }),
        }
    }

    /// Read-only view over a record
    pub fn from_record(record: &'a dyn Record) -> Self {
        Self {
            record: RecordRef::Shared(record),
        }
    }

    /// Settable view over a record
    pub fn from_record_mut(record: &'a mut dyn Record) -> Self {
        Self {
            record: RecordRef::Exclusive(record),
        }
    }

    fn record(&self) -> &dyn Record {
        match &self.record {
            RecordRef::Shared(record) => *record,
            RecordRef::Exclusive(record) => &**record,
        }
    }

    /// Name of the inspected record type
    pub fn record_name(&self) -> &'static str {
        self.record().record_name()
    }

    /// Whether fields obtained from this inspector can be set
    pub fn is_settable(&self) -> bool {
        matches!(self.record, RecordRef::Exclusive(_))
    }

    /// Field descriptions in declaration order
    pub fn field_infos(&self) -> Vec<FieldInfo> {
        self.record().field_infos()
    }

    /// Read-only fields in declaration order
    pub fn fields(&self) -> Vec<Field<'_>> {
        let record = self.record();
        record
            .field_infos()
            .into_iter()
            .zip(record.field_slots())
            .map(|(info, slot)| Field::shared(info, slot))
            .collect()
    }

    /// Fields in declaration order, settable when the inspector is
    pub fn fields_mut(&mut self) -> Vec<Field<'_>> {
        match &mut self.record {
            RecordRef::Shared(record) => record
                .field_infos()
                .into_iter()
                .zip(record.field_slots())
                .map(|(info, slot)| Field::shared(info, slot))
                .collect(),
            RecordRef::Exclusive(record) => {
                let infos = record.field_infos();
                infos
                    .into_iter()
                    .zip(record.field_slots_mut())
                    .map(|(info, slot)| Field::exclusive(info, slot))
                    .collect()
            }
        }
    }

    /// Read-only field by name
    pub fn field(&self, name: &str) -> Result<Field<'_>> {
        self.fields()
            .into_iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| TiqError::FieldNotFound {
                name: name.to_string(),
            })
    }

    /// Field by name, settable when the inspector is
    pub fn field_mut(&mut self, name: &str) -> Result<Field<'_>> {
        self.fields_mut()
            .into_iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| TiqError::FieldNotFound {
                name: name.to_string(),
            })
    }
}
