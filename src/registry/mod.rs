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

//! Function registry for tag expressions
//!
//! The registry is the only source of callable names in an expression. The
//! standard registry holds the seven accessor functions and is built once per
//! process.

pub mod function;
pub mod functions;
pub mod signature;

pub use function::{FunctionError, FunctionResult, TagFunction};
pub use signature::{FunctionSignature, ParameterInfo, ValueType};

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Registry of functions callable from tag expressions
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: FxHashMap<String, Arc<dyn TagFunction>>,
}

impl FunctionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function, replacing any function with the same name
    pub fn register<F: TagFunction + 'static>(&mut self, function: F) {
        self.functions
            .insert(function.name().to_string(), Arc::new(function));
    }

    /// Look up a function by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn TagFunction>> {
        self.functions.get(name).cloned()
    }

    /// Names of all registered functions, sorted
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.function_names())
            .finish()
    }
}

/// Register the accessor functions
pub fn register_builtin_functions(registry: &mut FunctionRegistry) {
    use functions::*;

    registry.register(GetFunction);
    registry.register(FirstFunction);
    registry.register(LastFunction);
    registry.register(NthFunction);
    registry.register(HasFunction);
    registry.register(SplitFunction);
    registry.register(DefaultFunction);
}

static STANDARD_REGISTRY: Lazy<Arc<FunctionRegistry>> = Lazy::new(|| {
    let mut registry = FunctionRegistry::new();
    register_builtin_functions(&mut registry);
    Arc::new(registry)
});

/// Shared registry with the accessor functions
pub fn standard_registry() -> Arc<FunctionRegistry> {
    Arc::clone(&STANDARD_REGISTRY)
}
