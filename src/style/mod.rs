//! Layered style resolver: fragments, deep merge, layers, responsive units.

pub mod fragment;
pub mod layer;
pub mod merge;
pub mod resolver;
pub mod units;

pub use fragment::{fragment_from_value, CompositeStyle, StyleBlock, StyleFragment};
pub use layer::{LayerBuilder, LayerInput, StyleLayer};
pub use resolver::{resolve, resolve_input, Stylesheet};
pub use units::{length_value, Percent, PercentError, ResponsiveUnits};
