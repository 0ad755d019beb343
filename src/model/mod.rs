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

//! Value model for tag expressions
//!
//! [`Value`] is what the expression VM produces, [`TypeInfo`] describes what a
//! record field stores, and [`TypeCoercion`] converts between the two.

pub mod field_type;
pub mod type_coercion;
pub mod types;
pub mod value;

pub use field_type::FieldType;
pub use type_coercion::{CoercionError, CoercionResult, TypeCoercion};
pub use types::{FloatWidth, IntWidth, TypeInfo, TypeKind};
pub use value::{Value, ValueKind};
