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

//! Tag engine - the main entry point for tag resolution

use crate::compiler::{
    EvaluationResult, ExpressionCompiler, Program, ProgramCache, VariableSource, execute,
};
use crate::config::EngineConfig;
use crate::error::{Result, TiqError};
use crate::model::Value;
use crate::reflect::{Inspector, Record, annotations};
use crate::registry::{FunctionRegistry, standard_registry};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Engine that compiles resolution expressions and fills records from them
///
/// The engine is `Send + Sync`; share one instance to reuse its program cache.
#[derive(Debug)]
pub struct TagEngine {
    config: EngineConfig,
    compiler: ExpressionCompiler,
    registry: Arc<FunctionRegistry>,
    cache: ProgramCache,
}

impl Default for TagEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TagEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with a custom configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_registry(config, standard_registry())
    }

    /// Create an engine with a custom function registry
    pub fn with_registry(config: EngineConfig, registry: Arc<FunctionRegistry>) -> Self {
        let max_cache_size = if config.cache_programs {
            config.max_cache_size
        } else {
            0
        };

        Self {
            compiler: ExpressionCompiler::new(Arc::clone(&registry)),
            cache: ProgramCache::new(max_cache_size),
            registry,
            config,
        }
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Functions available to expressions
    pub fn registry(&self) -> &Arc<FunctionRegistry> {
        &self.registry
    }

    /// Number of programs currently cached
    pub fn cached_programs(&self) -> usize {
        self.cache.len()
    }

    /// Compile an expression, reusing a cached program when possible
    pub fn compile(&self, expression: &str) -> Result<Arc<Program>> {
        self.cache
            .get_or_try_insert(expression, || self.compiler.compile(expression))
            .map_err(|source| TiqError::CompileFailure {
                expression: expression.to_string(),
                source,
            })
    }

    /// Execute a compiled program
    pub fn evaluate<V>(&self, program: &Program, variables: &V) -> EvaluationResult<Value>
    where
        V: VariableSource + ?Sized,
    {
        execute(program, variables)
    }

    /// Compile and execute an expression
    ///
    /// Runtime failures are reported with the expression text in place of a
    /// field name.
    pub fn evaluate_expression<V>(&self, expression: &str, variables: &V) -> Result<Value>
    where
        V: VariableSource + ?Sized,
    {
        let program = self.compile(expression)?;
        self.evaluate(&program, variables)
            .map_err(|e| TiqError::evaluation(expression, e))
    }

    /// Build a new record from a variable source
    pub fn resolve<S, V>(&self, variables: &V) -> Result<S>
    where
        S: Record + Default,
        V: VariableSource + ?Sized,
    {
        let mut record = S::default();
        self.resolve_into(&mut record, variables)?;
        Ok(record)
    }

    /// Fill the tagged fields of an existing record
    ///
    /// Every expression is compiled before any field is evaluated, so a
    /// compile failure leaves the record untouched. Fields are then assigned
    /// in declaration order; a nil result or a runtime error leaves the field
    /// unchanged unless strict evaluation is enabled.
    pub fn resolve_into<V>(&self, record: &mut dyn Record, variables: &V) -> Result<()>
    where
        V: VariableSource + ?Sized,
    {
        let mut inspector = Inspector::from_record_mut(record);

        let mut programs = Vec::new();
        for (index, info) in inspector.field_infos().iter().enumerate() {
            if let Some(expression) = annotations::lookup(info.annotations, &self.config.tag_name) {
                programs.push((index, self.compile(&expression)?));
            }
        }

        if programs.is_empty() {
            return Ok(());
        }
        log::debug!(
            "resolving {} tagged fields of {}",
            programs.len(),
            inspector.record_name()
        );

        let mut fields = inspector.fields_mut();
        for (index, program) in programs {
            let Some(field) = fields.get_mut(index) else {
                continue;
            };

            let value = match self.evaluate(&program, variables) {
                Ok(Value::Nil) => {
                    log::trace!("field {} resolved to nil, skipping", field.name());
                    continue;
                }
                Ok(value) => value,
                Err(e) if self.config.strict_evaluation => {
                    log::debug!("field {} failed to evaluate: {}", field.name(), e);
                    return Err(TiqError::evaluation(field.name(), e));
                }
                Err(e) => {
                    log::debug!("skipping field {}: {}", field.name(), e);
                    continue;
                }
            };

            log::trace!("field {} = {}", field.name(), value);
            field.set_from(value)?;
        }

        Ok(())
    }
}

static DEFAULT_ENGINE: Lazy<TagEngine> = Lazy::new(TagEngine::new);

/// Process-wide engine with the default configuration
pub fn default_engine() -> &'static TagEngine {
    &DEFAULT_ENGINE
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_compile_is_cached() {
        let engine = TagEngine::new();
        let first = engine.compile("get(db, 'table')").unwrap();
        let second = engine.compile("get(db, 'table')").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(engine.cached_programs(), 1);
    }

    #[test]
    fn test_cache_disabled() {
        let engine = TagEngine::with_config(EngineConfig::new().with_cache_programs(false));
        engine.compile("first(x)").unwrap();
        assert_eq!(engine.cached_programs(), 0);
    }

    #[test]
    fn test_compile_failure_is_not_cached() {
        let engine = TagEngine::new();
        let err = engine.compile("invalid(((").unwrap_err();
        assert!(matches!(err, TiqError::CompileFailure { ref expression, .. } if expression == "invalid((("));
        assert_eq!(engine.cached_programs(), 0);
    }

    #[test]
    fn test_evaluate_expression() {
        let engine = TagEngine::new();
        let ctx = HashMap::from([("db", "table=users,column=name")]);
        assert_eq!(
            engine.evaluate_expression("get(db, 'column')", &ctx).unwrap(),
            Value::from("name")
        );
        let err = engine.evaluate_expression("nth(db, 'x')", &ctx).unwrap_err();
        assert!(matches!(err, TiqError::Accessor { .. }));
    }

    #[test]
    fn test_default_engine_is_shared() {
        assert!(std::ptr::eq(default_engine(), default_engine()));
        assert_eq!(default_engine().config(), &EngineConfig::default());
    }
}
