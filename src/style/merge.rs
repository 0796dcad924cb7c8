//! Deep merge of style data.
//!
//! Policy: when both sides hold an object under the same key the objects merge
//! recursively; in every other case the source value replaces the target
//! value wholesale. Arrays are values like any other, so they are replaced,
//! never concatenated or merged by index.

use serde_json::{Map, Value};

use crate::style::fragment::StyleFragment;

/// Merge `source` into `target`, source winning on conflicts.
pub fn merge_map(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        match (target.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_map(existing, incoming);
            }
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Merge every block of `source` into `target`.
pub fn merge_fragment(target: &mut StyleFragment, source: &StyleFragment) {
    for (name, block) in source {
        merge_map(target.entry(name.clone()).or_default(), block);
    }
}
