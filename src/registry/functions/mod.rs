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

//! Built-in accessor functions over `key[=value]` lists
//!
//! Lists are comma separated entries, each `key` or `key=value`, with every
//! token trimmed. Parsing never fails: an empty segment is an entry with an
//! empty key.

pub mod default;
pub mod entries;
pub mod first;
pub mod get;
pub mod has;
pub mod last;
pub mod nth;
pub mod split;

pub use default::DefaultFunction;
pub use entries::{Entry, entries};
pub use first::FirstFunction;
pub use get::GetFunction;
pub use has::HasFunction;
pub use last::LastFunction;
pub use nth::NthFunction;
pub use split::SplitFunction;
