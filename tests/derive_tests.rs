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

//! Integration tests for `#[derive(Record)]`

use pretty_assertions::assert_eq;
use tiq::{FieldType, Record, TypeInfo};

mod utils;
use utils::context;

#[derive(Debug, Default, Record)]
struct Empty;

#[derive(Debug, Default, Record)]
struct Wrapper<T> {
    #[tiq(tag = "first(items)")]
    inner: T,
}

#[derive(Debug, Default, Record)]
struct Listing<T> {
    #[tiq(tag = "split(items, ',')")]
    items: Vec<T>,
    #[tiq(tag = "nth(items, 1)")]
    second: Option<T>,
}

#[derive(Debug, Default, Record)]
struct Keywords {
    #[tiq(r#type = "kind", tag = "get(meta, 'type')")]
    r#type: String,
    #[tiq(tag = "split(get(meta, 'path'), '/')")]
    r#path: Vec<String>,
}

#[test]
fn test_unit_struct_has_no_fields() {
    let empty = Empty;
    assert_eq!(empty.record_name(), "Empty");
    assert!(empty.field_infos().is_empty());
    let resolved: Empty = tiq::resolve(&context(&[])).unwrap();
    assert!(resolved.field_slots().is_empty());
}

#[test]
fn test_generic_record() {
    let wrapper: Wrapper<u16> = tiq::resolve(&context(&[("items", "443,80")])).unwrap();
    assert_eq!(wrapper.inner, 443);

    let infos = wrapper.field_infos();
    assert_eq!(infos[0].type_info, TypeInfo::Uint(tiq::model::IntWidth::W16));
}

#[test]
fn test_generic_bounds_follow_field_types() {
    let listing: Listing<i32> = tiq::resolve(&context(&[("items", "1, 2, 3")])).unwrap();
    assert_eq!(listing.items, vec![1, 2, 3]);
    assert_eq!(listing.second, Some(2));
}

#[test]
fn test_raw_identifiers_are_unescaped() {
    let keywords: Keywords =
        tiq::resolve(&context(&[("meta", "type=table,path=a/b/c")])).unwrap();
    assert_eq!(keywords.r#type, "table");
    assert_eq!(keywords.r#path, vec!["a", "b", "c"]);

    let names: Vec<&str> = keywords.field_infos().iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["type", "path"]);
    assert_eq!(
        tiq::get_annotation(&keywords, "type", "type").as_deref(),
        Some("kind")
    );
}

#[test]
fn test_annotation_values_are_escaped() {
    #[derive(Debug, Default, Record)]
    struct Quoted {
        #[tiq(tag = "default(get(x, 'k'), \"it's\")")]
        value: String,
    }

    let quoted = Quoted::default();
    assert_eq!(
        quoted.field_infos()[0].annotations,
        r#"tag:"default(get(x, 'k'), \"it's\")""#
    );

    let quoted: Quoted = tiq::resolve(&context(&[])).unwrap();
    assert_eq!(quoted.value, "");

    let quoted: Quoted = tiq::resolve(&context(&[("x", "j=1")])).unwrap();
    assert_eq!(quoted.value, "it's");
}
