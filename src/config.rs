//! Stylesheet files: layer declarations and breakpoint overrides in JSON.
//!
//! ```json
//! {
//!   "breakpoints": { "sm": 640 },
//!   "layers": [
//!     { "style": { "card": { "padding": 24 } } },
//!     { "query": "(max-short-side: 600)", "style": { "card": { "padding": 12 } } },
//!     { "query": { "above": "sm" }, "style": { "card": { "flexDirection": "row" } } },
//!     { "query": { "minWidth": 1000 }, "style": { "card": { "maxWidth": 960 } } }
//!   ]
//! }
//! ```
//!
//! A `query` may be media-query text, a breakpoint helper (`atMost`, `below`,
//! `above`, `between`) or a condition object. Every query is validated when
//! the file is loaded, so resolution itself never fails.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::query::{
    parse_query, Breakpoint, BreakpointError, BreakpointTable, Condition, ConditionError,
    ParseError,
};
use crate::style::{StyleFragment, StyleLayer, Stylesheet};

/// Errors that can occur while loading a stylesheet file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read stylesheet at {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid stylesheet JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("layer {index}: invalid query: {source}")]
    Query {
        index: usize,
        #[source]
        source: ParseError,
    },

    #[error("layer {index}: {source}")]
    Condition {
        index: usize,
        #[source]
        source: ConditionError,
    },

    #[error("invalid breakpoint table: {0}")]
    Breakpoints(#[from] BreakpointError),
}

/// Thresholds overriding the built-in [`BreakpointTable`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BreakpointOverrides {
    #[serde(default)]
    pub xs: Option<u32>,
    #[serde(default)]
    pub sm: Option<u32>,
}

impl BreakpointOverrides {
    /// Apply the overrides to the default table.
    pub fn table(&self) -> Result<BreakpointTable, BreakpointError> {
        let thresholds = Breakpoint::ALL.map(|bp| {
            let overridden = match bp {
                Breakpoint::Xs => self.xs,
                Breakpoint::Sm => self.sm,
            };
            overridden.unwrap_or(BreakpointTable::DEFAULT.threshold(bp))
        });
        BreakpointTable::new(thresholds)
    }
}

/// A breakpoint helper written as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BreakpointQuery {
    AtMost(Breakpoint),
    Below(Breakpoint),
    Above(Breakpoint),
    Between(Breakpoint, Breakpoint),
}

impl BreakpointQuery {
    pub fn condition(&self, table: &BreakpointTable) -> Condition {
        match *self {
            Self::AtMost(bp) => table.at_most(bp),
            Self::Below(bp) => table.below(bp),
            Self::Above(bp) => table.above(bp),
            Self::Between(a, b) => table.between(a, b),
        }
    }
}

/// The three ways a layer's query may be written.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum QuerySpec {
    Text(String),
    Breakpoint(BreakpointQuery),
    Fields(Condition),
}

/// One layer as written in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerConfig {
    #[serde(default)]
    pub query: Option<QuerySpec>,
    pub style: StyleFragment,
}

/// A whole stylesheet file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StylesheetConfig {
    #[serde(default)]
    pub breakpoints: BreakpointOverrides,
    pub layers: Vec<LayerConfig>,
}

impl StylesheetConfig {
    /// Parse a stylesheet from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a stylesheet file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        debug!(path = %path.display(), layers = config.layers.len(), "loaded stylesheet file");
        Ok(config)
    }

    /// Build validated layers, in file order.
    pub fn layers(&self) -> Result<Vec<StyleLayer>, ConfigError> {
        let table = self.breakpoints.table()?;
        self.layers
            .iter()
            .enumerate()
            .map(|(index, layer)| {
                let condition = match &layer.query {
                    None => Condition::new(),
                    Some(QuerySpec::Text(text)) => parse_query(text)
                        .map_err(|source| ConfigError::Query { index, source })?,
                    Some(QuerySpec::Breakpoint(query)) => query.condition(&table),
                    Some(QuerySpec::Fields(condition)) => condition
                        .clone()
                        .validated()
                        .map_err(|source| ConfigError::Condition { index, source })?,
                };
                Ok(StyleLayer::new(condition, layer.style.clone()))
            })
            .collect()
    }

    /// Build a [`Stylesheet`] from the validated layers.
    pub fn into_stylesheet(self) -> Result<Stylesheet, ConfigError> {
        Ok(Stylesheet::new(self.layers()?))
    }
}

/// Read a stylesheet file straight into a [`Stylesheet`].
pub fn load_stylesheet(path: &Path) -> Result<Stylesheet, ConfigError> {
    StylesheetConfig::from_path(path)?.into_stylesheet()
}
