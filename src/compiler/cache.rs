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

//! Compiled program cache
//!
//! Thread-safe cache of compiled programs keyed by expression text. When the
//! cache is full it is cleared before the next insert.

use crate::compiler::bytecode::Program;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

/// Thread-safe cache of compiled programs
#[derive(Debug)]
pub struct ProgramCache {
    programs: DashMap<String, Arc<Program>>,
    max_size: usize,
}

impl ProgramCache {
    /// Create a cache holding at most `max_size` programs
    pub fn new(max_size: usize) -> Self {
        Self {
            programs: DashMap::new(),
            max_size,
        }
    }

    /// Look up a compiled program
    pub fn get(&self, expression: &str) -> Option<Arc<Program>> {
        self.programs
            .get(expression)
            .map(|program| Arc::clone(&program))
    }

    /// Insert a program, returning the cached one if another thread won the race
    pub fn insert(&self, expression: &str, program: Arc<Program>) -> Arc<Program> {
        if self.max_size == 0 {
            return program;
        }
        if self.programs.len() >= self.max_size {
            log::debug!("program cache full ({} entries), clearing", self.max_size);
            self.programs.clear();
        }

        match self.programs.entry(expression.to_string()) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                entry.insert(Arc::clone(&program));
                program
            }
        }
    }

    /// Get a cached program or compile and cache it
    pub fn get_or_try_insert<E>(
        &self,
        expression: &str,
        compile: impl FnOnce() -> Result<Program, E>,
    ) -> Result<Arc<Program>, E> {
        if let Some(program) = self.get(expression) {
            return Ok(program);
        }

        log::debug!("program cache miss for {expression:?}");
        let program = Arc::new(compile()?);
        Ok(self.insert(expression, program))
    }

    /// Number of cached programs
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Remove all cached programs
    pub fn clear(&self) {
        self.programs.clear();
    }
}
