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

//! Integration tests for engine configuration

use pretty_assertions::assert_eq;
use tiq::{EngineConfig, Record, TagEngine};

mod utils;
use utils::context;

#[test]
fn test_config_serde_roundtrip() {
    let config = EngineConfig::new()
        .with_tag_name("resolve")
        .with_strict_evaluation(true)
        .with_max_cache_size(16);

    let json = serde_json::to_string(&config).unwrap();
    let back: EngineConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_config_missing_fields_use_defaults() {
    let config: EngineConfig = serde_json::from_str(r#"{"strict_evaluation": true}"#).unwrap();
    assert_eq!(config.tag_name, "tag");
    assert!(config.strict_evaluation);
    assert!(config.cache_programs);
    assert_eq!(config.max_cache_size, 1000);
}

#[test]
fn test_deserialized_config_drives_engine() {
    #[derive(Debug, Default, Record)]
    struct Renamed {
        #[tiq(resolve = "get(db, 'table')")]
        table: String,
    }

    let config: EngineConfig =
        serde_json::from_str(r#"{"tag_name": "resolve", "cache_programs": false}"#).unwrap();
    let engine = TagEngine::with_config(config);

    let renamed: Renamed = engine.resolve(&context(&[("db", "table=users")])).unwrap();
    assert_eq!(renamed.table, "users");
    assert_eq!(engine.cached_programs(), 0);
}
