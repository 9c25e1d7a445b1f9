#![cfg(feature = "serde")]

//! Integration tests for serde support.
//!
//! An Array serializes as a plain sequence of its elements.

use lambars_query::prelude::*;
use rstest::rstest;

#[rstest]
fn test_array_json_roundtrip() {
    let array = Array::from(vec![3, 1, 2]);
    let json = serde_json::to_string(&array).unwrap();
    assert_eq!(json, "[3,1,2]");
    let restored: Array<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(array, restored);
}

#[rstest]
fn test_query_result_serializes_like_vec() {
    let words = Array::from(vec!["pear", "fig", "apple"]);
    let sorted = words.sorted();
    assert_eq!(
        serde_json::to_string(&sorted).unwrap(),
        serde_json::to_string(&vec!["apple", "fig", "pear"]).unwrap()
    );
}

#[rstest]
fn test_nested_arrays_roundtrip() {
    let chunks = Array::from(vec![1, 2, 3, 4, 5]).chunk(2).unwrap();
    let json = serde_json::to_string(&chunks).unwrap();
    assert_eq!(json, "[[1,2],[3,4],[5]]");
    let restored: Array<Vec<i32>> = serde_json::from_str(&json).unwrap();
    assert_eq!(chunks, restored);
}

#[rstest]
fn test_deserialized_array_supports_queries() {
    let array: Array<Option<i32>> = serde_json::from_str("[1,null,3]").unwrap();
    assert_eq!(array.index_of_nullable(None), Some(1));
    assert_eq!(array.non_null().as_slice(), &[1, 3]);
}

#[rstest]
fn test_invalid_json_is_rejected() {
    let result: Result<Array<i32>, _> = serde_json::from_str("[1,\"two\"]");
    assert!(result.is_err());
}
