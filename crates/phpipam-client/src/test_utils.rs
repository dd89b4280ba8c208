//! Test utilities for unit testing controllers
//!
//! Strategies shared by the per-resource property tests.

use proptest::prelude::*;
use serde_json::Value;
use std::collections::BTreeMap;

/// A scalar JSON value as found in custom field and gateway maps
pub fn arb_json_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 .:/-]{0,12}".prop_map(Value::from),
    ]
}

/// An optional free-form map (`custom_fields`, `nameservers`, `gateway`)
pub fn arb_json_map() -> impl Strategy<Value = Option<BTreeMap<String, Value>>> {
    prop::option::of(prop::collection::btree_map("[a-z_]{1,10}", arb_json_scalar(), 0..4))
}
