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

//! Integration tests for record inspection and field access

use pretty_assertions::assert_eq;
use tiq::{Inspector, Record, TiqError, TypeInfo, Value};

mod utils;
use utils::Column;

#[derive(Debug, Default, Record)]
struct User {
    #[tiq(json = "id", db = "primary_key")]
    id: u64,
    #[tiq(json = "name,omitempty")]
    #[tiq(r#"xml:"name" json:"ignored""#)]
    name: String,
    #[tiq(r#type = "nickname")]
    nickname: Option<String>,
    #[tiq(skip)]
    #[allow(dead_code)]
    scratch: std::collections::HashMap<String, String>,
    scores: Vec<f64>,
}

#[test]
fn test_fields_follow_declaration_order() {
    let user = User::default();
    let inspector = tiq::inspect(&user).unwrap();

    assert_eq!(inspector.record_name(), "User");
    let names: Vec<&str> = inspector.fields().iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["id", "name", "nickname", "scores"]);

    let types: Vec<String> = inspector
        .field_infos()
        .iter()
        .map(|info| info.type_info.to_string())
        .collect();
    assert_eq!(types, vec!["u64", "String", "Option<String>", "Vec<f64>"]);
}

#[test]
fn test_annotations_parsing() {
    let user = User::default();
    let inspector = tiq::inspect(&user).unwrap();

    let name = inspector.field("name").unwrap();
    assert_eq!(
        name.raw_annotations(),
        r#"json:"name,omitempty" xml:"name" json:"ignored""#
    );
    let annotations = name.annotations();
    assert_eq!(annotations.len(), 2);
    assert_eq!(annotations["json"], "name,omitempty");
    assert_eq!(annotations["xml"], "name");

    let nickname = inspector.field("nickname").unwrap();
    assert_eq!(nickname.annotation("type").as_deref(), Some("nickname"));

    let scores = inspector.field("scores").unwrap();
    assert!(scores.annotations().is_empty());
    assert_eq!(scores.annotation("json"), None);
}

#[test]
fn test_get_annotation() {
    let user = User::default();
    assert_eq!(
        tiq::get_annotation(&user, "id", "db").as_deref(),
        Some("primary_key")
    );
    assert_eq!(tiq::get_annotation(&user, "id", "xml"), None);
    assert_eq!(tiq::get_annotation(&user, "missing", "json"), None);
    assert_eq!(tiq::get_annotation(&user, "scratch", "json"), None);
    assert_eq!(tiq::get_annotation(&42u8, "id", "json"), None);
}

#[test]
fn test_set_field() {
    let mut user = User::default();

    tiq::set_field(&mut user, "id", 7i32).unwrap();
    tiq::set_field(&mut user, "name", "ada").unwrap();
    tiq::set_field(&mut user, "nickname", Some("countess")).unwrap();
    tiq::set_field(&mut user, "scores", vec![1.5, 2.0]).unwrap();

    assert_eq!(user.id, 7);
    assert_eq!(user.name, "ada");
    assert_eq!(user.nickname.as_deref(), Some("countess"));
    assert_eq!(user.scores, vec![1.5, 2.0]);

    tiq::set_field(&mut user, "nickname", Value::Nil).unwrap();
    assert_eq!(user.nickname, None);
}

#[test]
fn test_set_field_errors() {
    let mut user = User::default();

    assert_eq!(
        tiq::set_field(&mut user, "missing", 1).unwrap_err(),
        TiqError::FieldNotFound {
            name: "missing".to_string()
        }
    );

    let err = tiq::set_field(&mut user, "id", "7").unwrap_err();
    assert!(matches!(
        &err,
        TiqError::CannotConvert { from, to, .. } if from == "string" && to == "u64"
    ));

    let err = tiq::set_field(&mut user, "id", -1).unwrap_err();
    assert!(matches!(err, TiqError::CannotConvert { .. }));
    assert_eq!(user.id, 0);

    let mut number = 3i32;
    assert_eq!(
        tiq::set_field(&mut number, "x", 1).unwrap_err(),
        TiqError::NotARecord {
            type_name: "i32".to_string()
        }
    );
}

#[test]
fn test_set_from_coerces() {
    let mut user = User::default();
    let mut inspector = tiq::inspect_mut(&mut user).unwrap();
    assert!(inspector.is_settable());

    inspector.field_mut("id").unwrap().set_from("  99 ").unwrap();
    inspector.field_mut("scores").unwrap().set_from("3.25").unwrap();
    inspector.field_mut("nickname").unwrap().set_from(12).unwrap();
    let values: Vec<Value> = inspector.fields().iter().map(|f| f.value()).collect();
    drop(inspector);

    assert_eq!(user.id, 99);
    assert_eq!(user.scores, vec![3.25]);
    assert_eq!(user.nickname.as_deref(), Some("12"));
    assert_eq!(values[0], Value::Uint(99));
}

#[test]
fn test_read_only_inspector_cannot_set() {
    let user = User::default();
    let inspector = Inspector::new(&user).unwrap();
    let mut field = inspector.field("name").unwrap();

    assert!(!field.is_settable());
    assert_eq!(
        field.set("x").unwrap_err(),
        TiqError::NotSettable {
            name: "name".to_string()
        }
    );
}

#[test]
fn test_nil_and_boxed_records() {
    let missing: Option<User> = None;
    assert!(matches!(tiq::inspect(&missing), Err(TiqError::NilReference)));

    let mut boxed: Option<Box<Column>> = Some(Box::default());
    tiq::set_field(&mut boxed, "table", "users").unwrap();
    assert_eq!(boxed.map(|c| c.table), Some("users".to_string()));
}

#[test]
fn test_field_type_info() {
    let user = User::default();
    let inspector = tiq::inspect(&user).unwrap();
    let field = inspector.field("nickname").unwrap();
    assert_eq!(field.type_info(), &TypeInfo::optional(TypeInfo::String));
    assert_eq!(field.value(), Value::Nil);
}
