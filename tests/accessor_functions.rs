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

//! Accessor function behavior through the expression engine

use pretty_assertions::assert_eq;
use rstest::rstest;
use tiq::{TagEngine, TiqError, Value};

mod utils;
use utils::context;

fn eval(expression: &str, list: &str) -> Value {
    let engine = TagEngine::new();
    let ctx = context(&[("s", list)]);
    engine.evaluate_expression(expression, &ctx).unwrap()
}

fn string(value: &str) -> Value {
    Value::from(value)
}

#[rstest]
#[case("key1=value1,key2=value2", "key2", Value::from("value2"))]
#[case("key1=value1,key2=value2", "key3", Value::Nil)]
#[case("required,min=5", "required", Value::from(""))]
#[case(" a = 1 , b = 2 ", "b", Value::from("2"))]
#[case("a=1,a=2", "a", Value::from("1"))]
#[case("k=v=w", "k", Value::from("v=w"))]
#[case("", "", Value::from(""))]
fn test_get(#[case] list: &str, #[case] key: &str, #[case] expected: Value) {
    assert_eq!(eval(&format!("get(s, '{key}')"), list), expected);
}

#[rstest]
#[case("key1=value1,key2=value2", "value1", "value2")]
#[case("alpha,beta", "alpha", "beta")]
#[case("key=,other", "key", "other")]
#[case("only", "only", "only")]
#[case("", "", "")]
fn test_first_and_last(#[case] list: &str, #[case] first: &str, #[case] last: &str) {
    assert_eq!(eval("first(s)", list), string(first));
    assert_eq!(eval("last(s)", list), string(last));
}

#[rstest]
#[case(0, Value::from("1"))]
#[case(1, Value::from("b"))]
#[case(2, Value::from("3"))]
#[case(3, Value::Nil)]
#[case(-1, Value::Nil)]
fn test_nth(#[case] index: i64, #[case] expected: Value) {
    assert_eq!(eval(&format!("nth(s, {index})"), "a=1,b,c=3"), expected);
}

#[rstest]
#[case("required,min=5", "required", true)]
#[case("required,min=5", "min", true)]
#[case("required,min=5", "max", false)]
#[case("", "", true)]
fn test_has(#[case] list: &str, #[case] key: &str, #[case] expected: bool) {
    assert_eq!(eval(&format!("has(s, '{key}')"), list), Value::Bool(expected));
}

#[rstest]
#[case("a, b ,c", ",", &["a", "b", "c"])]
#[case("x::y", "::", &["x", "y"])]
#[case("solo", ",", &["solo"])]
#[case("a,,b", ",", &["a", "", "b"])]
#[case("abc", "", &["a", "b", "c"])]
fn test_split(#[case] input: &str, #[case] sep: &str, #[case] expected: &[&str]) {
    assert_eq!(
        eval(&format!("split(s, '{sep}')"), input),
        Value::string_list(expected.iter().copied())
    );
}

#[rstest]
#[case("default(missing, 'fallback')", Value::from("fallback"))]
#[case("default(s, 'fallback')", Value::from("set"))]
#[case("default(nil, 3)", Value::Int(3))]
#[case("default(false, true)", Value::Bool(false))]
fn test_default(#[case] expression: &str, #[case] expected: Value) {
    assert_eq!(eval(expression, "set"), expected);
}

#[test]
fn test_positional_accessors_agree_with_get_on_valued_entries() {
    let list = "a=1,b=2,c=3";
    for (index, key) in ["a", "b", "c"].iter().enumerate() {
        let by_key = eval(&format!("get(s, '{key}')"), list);
        assert_eq!(eval(&format!("nth(s, {index})"), list), by_key);
        assert_eq!(eval(&format!("has(s, '{key}')"), list), Value::Bool(true));
    }
    assert_eq!(eval("first(s)", list), eval("get(s, 'a')", list));
    assert_eq!(eval("last(s)", list), eval("get(s, 'c')", list));
}

#[rstest]
#[case("get(s, 1)", "get() second argument must be a string, got int")]
#[case("first(1)", "first() first argument must be a string, got int")]
#[case("nth(s, '0')", "nth() second argument must be an integer, got string")]
#[case("split(s, nil)", "split() second argument must be a string, got nil")]
fn test_argument_type_errors(#[case] expression: &str, #[case] message: &str) {
    let engine = TagEngine::new();
    let ctx = context(&[("s", "a=1")]);
    let err = engine.evaluate_expression(expression, &ctx).unwrap_err();
    match err {
        TiqError::Accessor { source, .. } => assert_eq!(source.to_string(), message),
        other => panic!("expected Accessor, got {other:?}"),
    }
}
