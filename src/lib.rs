//! # viewport-style
//!
//! Media-query matching and layered style resolution over live device metrics.
//!
//! A UI author declares several candidate style layers, each guarded by a
//! condition over the viewport (width, height, short side, aspect ratio,
//! pixel density, orientation, platform). Given a [`MetricsSnapshot`], exactly
//! the matching layers are deep-merged in declaration order, later layers
//! overriding earlier ones per field.
//!
//! ## Core Systems
//!
//! - **[`query`]**: Predicate engine: conditions, breakpoints, media-query text
//! - **[`style`]**: Layered resolver: fragments, deep merge, responsive units
//! - **[`metrics`]**: Metrics snapshot and the provider trait hosts implement
//! - **[`gate`]**: Conditional rendering of a payload
//! - **[`watch`]**: Re-resolution when the host publishes new metrics
//! - **[`config`]**: JSON stylesheet files
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use viewport_style::prelude::*;
//!
//! let sheet = Stylesheet::new(vec![
//!     StyleLayer::always(fragment_from_value(json!({ "card": { "padding": 24 } })).unwrap()),
//!     StyleLayer::new(
//!         breakpoints::at_most(Breakpoint::Sm),
//!         fragment_from_value(json!({ "card": { "padding": 12 } })).unwrap(),
//!     ),
//! ]);
//!
//! let phone = MetricsSnapshot::new(375.0, 812.0, 3.0, Platform::Ios);
//! assert_eq!(sheet.resolve(&phone).property("card", "padding"), Some(&json!(12)));
//! ```

// Foundation
pub mod error;
pub mod metrics;

// Core systems
pub mod query;
pub mod style;

// Adapters
pub mod config;
pub mod gate;
pub mod watch;

pub use error::{Error, Result};
pub use metrics::{MetricsProvider, MetricsSnapshot, Orientation, Platform};
pub use query::{matches, Condition};
pub use style::{resolve, CompositeStyle, StyleLayer, Stylesheet};

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use viewport_style_macros::media;

/// Everything needed to declare and resolve a stylesheet.
pub mod prelude {
    pub use crate::gate::{gate, Gate};
    pub use crate::metrics::{
        FixedMetrics, MetricsProvider, MetricsSnapshot, Orientation, Platform,
    };
    pub use crate::query::breakpoints;
    pub use crate::query::{matches, parse_query, Breakpoint, BreakpointTable, Condition};
    pub use crate::style::{
        fragment_from_value, resolve, CompositeStyle, LayerInput, Percent, ResponsiveUnits,
        StyleFragment, StyleLayer, Stylesheet,
    };
}
