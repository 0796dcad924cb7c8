//! Predicate evaluation: does a [`Condition`] hold for a [`MetricsSnapshot`]?

use crate::metrics::MetricsSnapshot;
use crate::query::condition::Condition;

/// Inclusive interval check; an absent bound is open.
#[inline]
fn in_interval(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
}

/// Evaluate `condition` against `snapshot`.
///
/// True iff every specified bound holds. Numeric bounds are inclusive on
/// both sides, `orientation` and `platform` must be equal when set, and a
/// `Some(false)` guard never matches. Total: no input makes this fail, though
/// a NaN bound or an inverted pair can never be satisfied.
pub fn matches(condition: &Condition, snapshot: &MetricsSnapshot) -> bool {
    let c = condition;
    in_interval(snapshot.width, c.min_width, c.max_width)
        && in_interval(snapshot.height, c.min_height, c.max_height)
        && in_interval(snapshot.short_side(), c.min_short_side, c.max_short_side)
        && in_interval(snapshot.aspect_ratio(), c.min_aspect_ratio, c.max_aspect_ratio)
        && in_interval(snapshot.pixel_density, c.min_pixel_density, c.max_pixel_density)
        && c.orientation.is_none_or(|o| o == snapshot.orientation())
        && c.platform.is_none_or(|p| p == snapshot.platform)
        && c.guard.unwrap_or(true)
}

impl Condition {
    /// Shorthand for [`matches`].
    pub fn matches(&self, snapshot: &MetricsSnapshot) -> bool {
        matches(self, snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{Orientation, Platform};
    use proptest::prelude::*;

    fn snap(width: f64, height: f64) -> MetricsSnapshot {
        MetricsSnapshot::new(width, height, 2.0, Platform::Android)
    }

    #[test]
    fn empty_condition_matches() {
        assert!(matches(&Condition::new(), &snap(1.0, 1.0)));
        assert!(matches(&Condition::new(), &snap(4000.0, 20.0)));
    }

    #[test]
    fn width_bounds_are_inclusive() {
        let c = Condition::new().min_width(300.0).max_width(500.0);
        assert!(!c.matches(&snap(299.0, 900.0)));
        assert!(c.matches(&snap(300.0, 900.0)));
        assert!(c.matches(&snap(500.0, 900.0)));
        assert!(!c.matches(&snap(501.0, 900.0)));
    }

    #[test]
    fn height_bounds() {
        let c = Condition::new().max_height(400.0);
        assert!(c.matches(&snap(800.0, 400.0)));
        assert!(!c.matches(&snap(800.0, 401.0)));
    }

    #[test]
    fn short_side_uses_smaller_dimension() {
        let c = Condition::new().max_short_side(600.0);
        assert!(c.matches(&snap(1200.0, 600.0)));
        assert!(c.matches(&snap(600.0, 1200.0)));
        assert!(!c.matches(&snap(1200.0, 601.0)));
    }

    #[test]
    fn aspect_ratio_bounds() {
        let c = Condition::new().min_aspect_ratio(16.0 / 9.0);
        assert!(c.matches(&snap(1920.0, 1080.0)));
        assert!(!c.matches(&snap(1024.0, 768.0)));
    }

    #[test]
    fn pixel_density_bounds() {
        let c = Condition::new().min_pixel_density(3.0);
        assert!(!c.matches(&snap(400.0, 800.0)));
        assert!(c.matches(&snap(400.0, 800.0).with_pixel_density(3.0)));
    }

    #[test]
    fn orientation_must_equal_derived_value() {
        let c = Condition::new().orientation(Orientation::Landscape);
        assert!(c.matches(&snap(800.0, 400.0)));
        assert!(!c.matches(&snap(400.0, 800.0)));
    }

    #[test]
    fn platform_must_equal() {
        let c = Condition::new().platform(Platform::Ios);
        assert!(!c.matches(&snap(400.0, 800.0)));
        assert!(c.matches(&snap(400.0, 800.0).with_platform(Platform::Ios)));
    }

    #[test]
    fn guard_false_never_matches() {
        assert!(!Condition::new().guard(false).matches(&snap(400.0, 800.0)));
        assert!(Condition::new().guard(true).matches(&snap(400.0, 800.0)));
    }

    #[test]
    fn inverted_bounds_never_match() {
        let c = Condition::new().min_width(500.0).max_width(400.0);
        assert!(!c.matches(&snap(450.0, 100.0)));
    }

    fn dimension() -> impl Strategy<Value = f64> {
        (1u32..4000).prop_map(f64::from)
    }

    /// A condition with only the `index`-th pair of [`Condition::bounds`] set.
    fn with_bounds(index: usize, min: Option<f64>, max: Option<f64>) -> Condition {
        let mut c = Condition::new();
        match index {
            0 => (c.min_width, c.max_width) = (min, max),
            1 => (c.min_height, c.max_height) = (min, max),
            2 => (c.min_short_side, c.max_short_side) = (min, max),
            3 => (c.min_aspect_ratio, c.max_aspect_ratio) = (min, max),
            _ => (c.min_pixel_density, c.max_pixel_density) = (min, max),
        }
        c
    }

    /// The snapshot measurement compared against the `index`-th bound pair.
    fn measured(index: usize, s: &MetricsSnapshot) -> f64 {
        [s.width, s.height, s.short_side(), s.aspect_ratio(), s.pixel_density][index]
    }

    fn bound() -> impl Strategy<Value = Option<f64>> {
        prop::option::of((0u32..4000).prop_map(f64::from))
    }

    proptest! {
        #[test]
        fn every_interval_agrees_with_direct_comparison(
            feature in 0usize..5,
            width in dimension(),
            height in dimension(),
            density in (500u32..4000).prop_map(|d| f64::from(d) / 1000.0),
            min in bound(),
            max in bound(),
        ) {
            // Aspect ratio and pixel ratio bounds sit on a 0..4 scale.
            let scale = if feature >= 3 { 1000.0 } else { 1.0 };
            let (min, max) = (min.map(|m| m / scale), max.map(|m| m / scale));
            let c = with_bounds(feature, min, max);

            for (i, (_, lo, hi)) in c.bounds().into_iter().enumerate() {
                let expected_pair = if i == feature { (min, max) } else { (None, None) };
                prop_assert_eq!((lo, hi), expected_pair);
            }

            let s = snap(width, height).with_pixel_density(density);
            let value = measured(feature, &s);
            let expected = min.is_none_or(|m| value >= m) && max.is_none_or(|m| value <= m);
            prop_assert_eq!(matches(&c, &s), expected);
        }

        #[test]
        fn empty_condition_matches_every_snapshot(
            width in dimension(),
            height in dimension(),
            density in 1u32..5,
        ) {
            let s = snap(width, height).with_pixel_density(f64::from(density));
            prop_assert!(matches(&Condition::new(), &s));
        }
    }
}
