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

//! Shared test utilities: logging setup, records and contexts

#![allow(dead_code)]

use std::collections::HashMap;
use tiq::Record;

/// Install a test logger once per test binary
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a context from string pairs
pub fn context(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Column description resolved from database annotations
#[derive(Debug, Default, Clone, PartialEq, Record)]
pub struct Column {
    #[tiq(tag = "get(db, 'table')")]
    pub table: String,
    #[tiq(tag = "get(db, 'column')")]
    pub column: String,
    #[tiq(tag = "has(validate, 'required')")]
    pub required: bool,
    #[tiq(tag = "get(validate, 'max')")]
    pub max_length: Option<u32>,
    #[tiq(json = "comment")]
    pub comment: String,
}

/// Record whose numeric field is fed straight from a variable
#[derive(Debug, Default, Record)]
pub struct Numbered {
    #[tiq(tag = "json")]
    pub id: i64,
}

/// Record with a broken resolution expression after a valid one
#[derive(Debug, Default, Record)]
pub struct Broken {
    #[tiq(tag = "get(db, 'table')")]
    pub table: String,
    #[tiq(tag = "invalid(((")]
    pub other: String,
}
