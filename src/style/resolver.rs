//! Layered style resolution: filter layers by condition, merge in order.
//!
//! Unlike a CSS cascade there is no specificity: the only precedence rule is
//! list order, later layers overriding earlier ones field by field.

use tracing::{debug, trace};

use crate::metrics::{MetricsProvider, MetricsSnapshot};
use crate::query::matches;
use crate::style::fragment::CompositeStyle;
use crate::style::layer::{LayerInput, StyleLayer};

/// Merge the fragments of every layer whose condition matches `snapshot`.
///
/// Pure: the same layers and snapshot always produce equal composites. No
/// matching layer (or no layer at all) produces an empty composite.
pub fn resolve(layers: &[StyleLayer], snapshot: &MetricsSnapshot) -> CompositeStyle {
    let mut composite = CompositeStyle::new();
    let mut matched = 0usize;

    for (index, layer) in layers.iter().enumerate() {
        let hit = matches(&layer.condition, snapshot);
        trace!(index, matched = hit, "evaluated style layer");
        if hit {
            composite.merge(&layer.fragment);
            matched += 1;
        }
    }

    debug!(
        layers = layers.len(),
        matched,
        blocks = composite.len(),
        "resolved style layers"
    );
    composite
}

/// Normalize `input` for `snapshot`, then [`resolve`] it.
pub fn resolve_input(input: &LayerInput, snapshot: &MetricsSnapshot) -> CompositeStyle {
    resolve(&input.normalize(snapshot), snapshot)
}

/// A reusable layer declaration, resolved against successive snapshots.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    input: LayerInput,
}

impl Stylesheet {
    pub fn new(input: impl Into<LayerInput>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// A stylesheet whose layers depend on the viewport size.
    pub fn from_builder<F>(build: F) -> Self
    where
        F: Fn(&crate::style::units::ResponsiveUnits) -> LayerInput + Send + Sync + 'static,
    {
        Self::new(LayerInput::builder(build))
    }

    pub fn input(&self) -> &LayerInput {
        &self.input
    }

    /// Resolve against an explicit snapshot.
    pub fn resolve(&self, snapshot: &MetricsSnapshot) -> CompositeStyle {
        resolve_input(&self.input, snapshot)
    }

    /// Resolve against whatever `provider` reports now.
    pub fn resolve_current(&self, provider: &impl MetricsProvider) -> CompositeStyle {
        self.resolve(&provider.snapshot())
    }
}

impl From<Vec<StyleLayer>> for Stylesheet {
    fn from(layers: Vec<StyleLayer>) -> Self {
        Self::new(layers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{FixedMetrics, Orientation, Platform};
    use crate::query::breakpoints::{above, at_most, Breakpoint};
    use crate::query::Condition;
    use crate::style::fragment::fragment_from_value;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tracing_test::traced_test;

    fn snapshot(width: f64, height: f64) -> MetricsSnapshot {
        MetricsSnapshot::new(width, height, 2.0, Platform::Ios)
    }

    fn layer(condition: Condition, style: Value) -> StyleLayer {
        StyleLayer::new(condition, fragment_from_value(style).unwrap())
    }

    fn composite(value: Value) -> CompositeStyle {
        fragment_from_value(value).unwrap().into()
    }

    #[test]
    fn later_layer_wins_per_field() {
        let layers = vec![
            layer(Condition::new(), json!({ "a": { "x": 1 } })),
            layer(Condition::new(), json!({ "a": { "x": 2, "y": 3 } })),
        ];
        assert_eq!(
            resolve(&layers, &snapshot(400.0, 800.0)),
            composite(json!({ "a": { "x": 2, "y": 3 } }))
        );
    }

    #[test]
    fn reversed_order_reverses_precedence() {
        let layers = vec![
            layer(Condition::new(), json!({ "a": { "x": 2, "y": 3 } })),
            layer(Condition::new(), json!({ "a": { "x": 1 } })),
        ];
        assert_eq!(
            resolve(&layers, &snapshot(400.0, 800.0)),
            composite(json!({ "a": { "x": 1, "y": 3 } }))
        );
    }

    #[test]
    fn non_matching_layers_are_inert_anywhere() {
        let never = Condition::new().guard(false);
        let base = json!({ "a": { "x": 1 } });
        for position in 0..3 {
            let mut layers = vec![
                layer(Condition::new(), base.clone()),
                layer(Condition::new(), json!({ "b": { "y": 2 } })),
            ];
            layers.insert(position, layer(never.clone(), json!({ "a": { "x": 99 }, "c": {} })));
            assert_eq!(
                resolve(&layers, &snapshot(400.0, 800.0)),
                composite(json!({ "a": { "x": 1 }, "b": { "y": 2 } }))
            );
        }
    }

    #[test]
    fn empty_input_resolves_to_empty() {
        assert!(resolve(&[], &snapshot(400.0, 800.0)).is_empty());
    }

    #[test]
    fn no_match_resolves_to_empty() {
        let layers = vec![layer(above(Breakpoint::Sm), json!({ "a": { "x": 1 } }))];
        assert!(resolve(&layers, &snapshot(400.0, 800.0)).is_empty());
    }

    #[test]
    fn breakpoint_layers_override_base() {
        let layers = vec![
            layer(Condition::new(), json!({ "card": { "padding": 24, "flexDirection": "row" } })),
            layer(at_most(Breakpoint::Sm), json!({ "card": { "padding": 12 } })),
            layer(at_most(Breakpoint::Xs), json!({ "card": { "flexDirection": "column" } })),
        ];

        let tablet = resolve(&layers, &snapshot(768.0, 1024.0));
        assert_eq!(tablet, composite(json!({ "card": { "padding": 24, "flexDirection": "row" } })));

        let phone = resolve(&layers, &snapshot(375.0, 812.0));
        assert_eq!(phone, composite(json!({ "card": { "padding": 12, "flexDirection": "row" } })));

        let small = resolve(&layers, &snapshot(320.0, 568.0));
        assert_eq!(small, composite(json!({ "card": { "padding": 12, "flexDirection": "column" } })));
    }

    #[test]
    fn orientation_selects_layer() {
        let layers = vec![layer(
            Condition::new().orientation(Orientation::Landscape),
            json!({ "row": { "flexDirection": "row" } }),
        )];
        assert!(!resolve(&layers, &snapshot(800.0, 400.0)).is_empty());
        assert!(resolve(&layers, &snapshot(400.0, 800.0)).is_empty());
    }

    #[test]
    fn builder_matches_precomputed_literal() {
        let sheet = Stylesheet::from_builder(|units| {
            layer(Condition::new(), json!({ "panel": { "width": units.vw_value(50) } })).into()
        });
        let literal = Stylesheet::new(layer(Condition::new(), json!({ "panel": { "width": 500 } })));

        let s = snapshot(1000.0, 600.0);
        assert_eq!(sheet.resolve(&s), literal.resolve(&s));
        assert_eq!(
            serde_json::to_string(&sheet.resolve(&s)).unwrap(),
            r#"{"panel":{"width":500}}"#
        );
    }

    #[test]
    fn stylesheet_resolves_against_provider() {
        let sheet = Stylesheet::from(vec![layer(
            Condition::new().platform(Platform::Ios),
            json!({ "text": { "fontFamily": "System" } }),
        )]);
        let provider = FixedMetrics(snapshot(400.0, 800.0));
        assert_eq!(
            sheet.resolve_current(&provider).property("text", "fontFamily"),
            Some(&json!("System"))
        );
    }

    #[test]
    fn resolution_is_idempotent() {
        let sheet = Stylesheet::new(vec![
            layer(Condition::new(), json!({ "a": { "x": [1, 2], "n": { "k": 1 } } })),
            layer(at_most(Breakpoint::Sm), json!({ "a": { "n": { "j": 2 } } })),
        ]);
        let s = snapshot(375.0, 812.0);
        assert_eq!(sheet.resolve(&s), sheet.resolve(&s));
    }

    #[traced_test]
    #[test]
    fn logs_match_counts() {
        let layers = vec![
            layer(Condition::new(), json!({ "a": {} })),
            layer(Condition::new().guard(false), json!({ "b": {} })),
        ];
        resolve(&layers, &snapshot(400.0, 800.0));
        assert!(logs_contain("resolved style layers"));
        assert!(logs_contain("matched=1"));
    }
}
