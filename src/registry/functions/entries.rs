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

//! Comma separated `key[=value]` lists

/// One entry of a `key=value,key2` list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    /// Trimmed key
    pub key: &'a str,
    /// Trimmed value, empty when the entry has none
    pub value: &'a str,
}

impl<'a> Entry<'a> {
    /// Split an entry at its first `=`
    pub fn parse(raw: &'a str) -> Self {
        match raw.split_once('=') {
            Some((key, value)) => Entry {
                key: key.trim(),
                value: value.trim(),
            },
            None => Entry {
                key: raw.trim(),
                value: "",
            },
        }
    }

    /// The value, or the key when the value is empty
    pub fn value_or_key(&self) -> &'a str {
        if self.value.is_empty() {
            self.key
        } else {
            self.value
        }
    }
}

/// Iterate over the entries of a list. Always yields at least one entry.
pub fn entries(list: &str) -> impl Iterator<Item = Entry<'_>> + '_ {
    list.split(',').map(Entry::parse)
}
