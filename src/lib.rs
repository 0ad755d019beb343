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

//! Expression-driven tag resolution
//!
//! Record fields carry small expressions in their annotations. Resolving a
//! record evaluates every expression against a map of named annotation strings
//! and writes the coerced results into the fields.
//!
//! ```
//! use std::collections::HashMap;
//! use tiq::Record;
//!
//! #[derive(Debug, Default, Record)]
//! struct Column {
//!     #[tiq(tag = "get(db, 'table')")]
//!     table: String,
//!     #[tiq(tag = "has(validate, 'required')")]
//!     required: bool,
//! }
//!
//! let ctx = HashMap::from([("db", "table=users,column=name")]);
//! let column: Column = tiq::resolve(&ctx).unwrap();
//! assert_eq!(column.table, "users");
//! assert!(!column.required);
//! ```

extern crate self as tiq;

pub mod ast;
pub mod compiler;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod reflect;
pub mod registry;

pub use compiler::{CompileError, EvaluationError, Program, VariableSource};
pub use config::EngineConfig;
pub use engine::{TagEngine, default_engine};
pub use error::{Result, TiqError};
pub use model::{CoercionError, FieldType, TypeCoercion, TypeInfo, Value};
pub use parser::ParseError;
pub use reflect::{Field, FieldInfo, Inspect, Inspected, InspectedMut, Inspector, Record, Slot};
pub use registry::{FunctionError, FunctionRegistry, TagFunction};
pub use tiq_derive::Record;

/// Build a record from a variable source using the default engine
pub fn resolve<S, V>(variables: &V) -> Result<S>
where
    S: Record + Default,
    V: VariableSource + ?Sized,
{
    default_engine().resolve(variables)
}

/// Build a record using a field's own annotations as the variable source
pub fn parse<S: Record + Default>(field: &Field<'_>) -> Result<S> {
    let annotations = field.annotations();
    default_engine().resolve(&annotations)
}

/// Read-only inspector over a value
pub fn inspect<T: Inspect + ?Sized>(value: &T) -> Result<Inspector<'_>> {
    Inspector::new(value)
}

/// Settable inspector over a value
pub fn inspect_mut<T: Inspect + ?Sized>(value: &mut T) -> Result<Inspector<'_>> {
    Inspector::new_mut(value)
}

/// Annotation `name` of `field`, or `None` when the value is not a record,
/// the field does not exist or the annotation is absent
pub fn get_annotation<T: Inspect + ?Sized>(value: &T, field: &str, name: &str) -> Option<String> {
    let inspector = Inspector::new(value).ok()?;
    let field = inspector.field(field).ok()?;
    field.annotation(name)
}

/// Assign a field by name using a direct conversion
pub fn set_field<T: Inspect + ?Sized>(
    value: &mut T,
    field: &str,
    new_value: impl Into<Value>,
) -> Result<()> {
    let mut inspector = Inspector::new_mut(value)?;
    let mut field = inspector.field_mut(field)?;
    field.set(new_value)
}
