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

//! Integration tests for sharing an engine across threads

use std::sync::Arc;
use std::thread;
use tiq::{EngineConfig, TagEngine};

mod utils;
use utils::{Column, context, init_logging};

#[test]
fn test_engine_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TagEngine>();
    assert_send_sync::<tiq::Program>();
}

#[test]
fn test_concurrent_resolution_shares_cache() {
    init_logging();
    let engine = Arc::new(TagEngine::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let table = format!("table_{i}");
                let db = format!("table={table},column=id");
                let ctx = context(&[("db", db.as_str()), ("validate", "required")]);
                for _ in 0..50 {
                    let column: Column = engine.resolve(&ctx).unwrap();
                    assert_eq!(column.table, table);
                    assert!(column.required);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(engine.cached_programs(), 4);
}

#[test]
fn test_default_engine_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            thread::spawn(move || {
                let db = format!("table=t{i}");
                let ctx = context(&[("db", db.as_str())]);
                let column: Column = tiq::resolve(&ctx).unwrap();
                column.table
            })
        })
        .collect();

    let mut tables: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    tables.sort();
    assert_eq!(tables, vec!["t0", "t1", "t2", "t3"]);
}

#[test]
fn test_small_cache_under_contention() {
    let engine = Arc::new(TagEngine::with_config(
        EngineConfig::new().with_max_cache_size(2),
    ));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let ctx = context(&[("db", "table=users")]);
                for _ in 0..25 {
                    let column: Column = engine.resolve(&ctx).unwrap();
                    assert_eq!(column.table, "users");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert!(engine.cached_programs() <= 2);
}
