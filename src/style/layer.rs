//! Style layers and the shapes a caller may hand them over in.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::metrics::MetricsSnapshot;
use crate::query::Condition;
use crate::style::fragment::{StyleBlock, StyleFragment};
use crate::style::units::ResponsiveUnits;

/// One unit of conditional styling: a condition and the fragment it guards.
///
/// Deserializes from the `{ "query": {...}, "style": {...} }` shape; a missing
/// `query` is the empty condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleLayer {
    #[serde(default, rename = "query", skip_serializing_if = "Condition::is_empty")]
    pub condition: Condition,
    #[serde(rename = "style")]
    pub fragment: StyleFragment,
}

impl StyleLayer {
    /// A layer applied only when `condition` matches.
    pub fn new(condition: Condition, fragment: StyleFragment) -> Self {
        Self {
            condition,
            fragment,
        }
    }

    /// A layer with the empty condition: always applies.
    pub fn always(fragment: StyleFragment) -> Self {
        Self::new(Condition::new(), fragment)
    }

    /// Add or replace one block (builder).
    pub fn with_block(mut self, name: impl Into<String>, block: StyleBlock) -> Self {
        self.fragment.insert(name.into(), block);
        self
    }
}

/// A pure function from responsive units to layers.
#[derive(Clone)]
pub struct LayerBuilder(Arc<dyn Fn(&ResponsiveUnits) -> LayerInput + Send + Sync>);

impl LayerBuilder {
    pub fn new<F>(build: F) -> Self
    where
        F: Fn(&ResponsiveUnits) -> LayerInput + Send + Sync + 'static,
    {
        Self(Arc::new(build))
    }

    pub fn build(&self, units: &ResponsiveUnits) -> LayerInput {
        (self.0)(units)
    }
}

impl fmt::Debug for LayerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LayerBuilder(..)")
    }
}

/// Everything a caller may pass to the resolver.
#[derive(Debug, Clone)]
pub enum LayerInput {
    Single(StyleLayer),
    Many(Vec<StyleLayer>),
    /// Layers computed from the current viewport.
    Builder(LayerBuilder),
}

impl LayerInput {
    /// Wrap a builder closure.
    pub fn builder<F>(build: F) -> Self
    where
        F: Fn(&ResponsiveUnits) -> LayerInput + Send + Sync + 'static,
    {
        Self::Builder(LayerBuilder::new(build))
    }

    /// Flatten into an ordered layer sequence for `snapshot`.
    ///
    /// Literal layers are borrowed; a builder is invoked with units derived
    /// from `snapshot` and its output normalized in turn.
    pub fn normalize(&self, snapshot: &MetricsSnapshot) -> Cow<'_, [StyleLayer]> {
        match self {
            Self::Single(layer) => Cow::Borrowed(std::slice::from_ref(layer)),
            Self::Many(layers) => Cow::Borrowed(layers.as_slice()),
            Self::Builder(builder) => {
                let built = builder.build(&ResponsiveUnits::from_snapshot(snapshot));
                Cow::Owned(built.normalize(snapshot).into_owned())
            }
        }
    }
}

impl From<StyleLayer> for LayerInput {
    fn from(layer: StyleLayer) -> Self {
        Self::Single(layer)
    }
}

impl From<Vec<StyleLayer>> for LayerInput {
    fn from(layers: Vec<StyleLayer>) -> Self {
        Self::Many(layers)
    }
}

impl From<LayerBuilder> for LayerInput {
    fn from(builder: LayerBuilder) -> Self {
        Self::Builder(builder)
    }
}
