//! Style fragments and the composite style they merge into.
//!
//! Property values are free-form JSON values: the resolver never interprets
//! them beyond "objects merge, everything else is replaced".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::style::merge::merge_fragment;

/// Properties of one named style block, e.g. `{"padding": 12, "color": "red"}`.
pub type StyleBlock = Map<String, Value>;

/// Block name to properties: the style half of a layer.
pub type StyleFragment = BTreeMap<String, StyleBlock>;

/// Build a [`StyleFragment`] from a JSON object of objects.
///
/// Returns `None` if `value` is not an object or any block is not an object.
pub fn fragment_from_value(value: Value) -> Option<StyleFragment> {
    let Value::Object(blocks) = value else {
        return None;
    };
    blocks
        .into_iter()
        .map(|(name, block)| match block {
            Value::Object(props) => Some((name, props)),
            _ => None,
        })
        .collect()
}

/// The merged result of a resolution.
///
/// Owns its data; nothing in it refers back to the input layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompositeStyle {
    blocks: StyleFragment,
}

impl CompositeStyle {
    /// An empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `fragment` on top of this composite.
    pub fn merge(&mut self, fragment: &StyleFragment) {
        merge_fragment(&mut self.blocks, fragment);
    }

    /// Look up one block.
    pub fn block(&self, name: &str) -> Option<&StyleBlock> {
        self.blocks.get(name)
    }

    /// Look up one property of one block.
    pub fn property(&self, block: &str, property: &str) -> Option<&Value> {
        self.blocks.get(block).and_then(|b| b.get(property))
    }

    /// Block names in sorted order.
    pub fn block_names(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StyleBlock)> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Convert into a single JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.blocks
                .iter()
                .map(|(name, block)| (name.clone(), Value::Object(block.clone())))
                .collect(),
        )
    }

    pub fn into_inner(self) -> StyleFragment {
        self.blocks
    }
}

impl From<StyleFragment> for CompositeStyle {
    fn from(blocks: StyleFragment) -> Self {
        Self { blocks }
    }
}
