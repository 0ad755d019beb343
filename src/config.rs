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

//! Engine configuration

use serde::{Deserialize, Serialize};

/// Default annotation holding resolution expressions
pub const DEFAULT_TAG_NAME: &str = "tag";

/// Default number of cached programs
pub const DEFAULT_MAX_CACHE_SIZE: usize = 1000;

/// Configuration for a [`TagEngine`](crate::TagEngine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Annotation whose value is the field's resolution expression
    pub tag_name: String,
    /// Fail resolution on runtime evaluation errors instead of skipping the field
    pub strict_evaluation: bool,
    /// Cache compiled programs by expression text
    pub cache_programs: bool,
    /// Maximum number of cached programs before the cache is cleared
    pub max_cache_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tag_name: DEFAULT_TAG_NAME.to_string(),
            strict_evaluation: false,
            cache_programs: true,
            max_cache_size: DEFAULT_MAX_CACHE_SIZE,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Read resolution expressions from a different annotation
    pub fn with_tag_name(mut self, tag_name: impl Into<String>) -> Self {
        self.tag_name = tag_name.into();
        self
    }

    /// Enable or disable strict evaluation
    pub fn with_strict_evaluation(mut self, strict: bool) -> Self {
        self.strict_evaluation = strict;
        self
    }

    /// Enable or disable the program cache
    pub fn with_cache_programs(mut self, enabled: bool) -> Self {
        self.cache_programs = enabled;
        self
    }

    /// Set the maximum number of cached programs
    pub fn with_max_cache_size(mut self, size: usize) -> Self {
        self.max_cache_size = size;
        self
    }
}
