//! Condition: a media query over device metrics, as a record of optional bounds.
//!
//! Every field is `Option<T>`. `None` means "no constraint", so
//! `Condition::default()` matches every snapshot. Conditions are plain data:
//! they compare structurally and carry no identity.

use serde::{Deserialize, Serialize};

use crate::metrics::{Orientation, Platform};

/// Errors from [`Condition::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConditionError {
    #[error("`{feature}` must be a finite number, got {value}")]
    NonFinite { feature: &'static str, value: f64 },
    #[error("`{feature}` has min {min} greater than max {max}")]
    InvertedBounds {
        feature: &'static str,
        min: f64,
        max: f64,
    },
}

/// A declarative predicate over a [`MetricsSnapshot`](crate::metrics::MetricsSnapshot).
///
/// Numeric bounds are inclusive. See [`crate::query::matches`] for evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Condition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_short_side: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_short_side: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_aspect_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_aspect_ratio: Option<f64>,
    #[serde(default, alias = "minPixelRatio", skip_serializing_if = "Option::is_none")]
    pub min_pixel_density: Option<f64>,
    #[serde(default, alias = "maxPixelRatio", skip_serializing_if = "Option::is_none")]
    pub max_pixel_density: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    /// Externally computed flag (a feature toggle, a user setting). `Some(false)`
    /// never matches.
    #[serde(default, alias = "condition", skip_serializing_if = "Option::is_none")]
    pub guard: Option<bool>,
}

impl Condition {
    /// The empty condition: matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_width(mut self, px: f64) -> Self {
        self.min_width = Some(px);
        self
    }

    pub fn max_width(mut self, px: f64) -> Self {
        self.max_width = Some(px);
        self
    }

    pub fn min_height(mut self, px: f64) -> Self {
        self.min_height = Some(px);
        self
    }

    pub fn max_height(mut self, px: f64) -> Self {
        self.max_height = Some(px);
        self
    }

    pub fn min_short_side(mut self, px: f64) -> Self {
        self.min_short_side = Some(px);
        self
    }

    pub fn max_short_side(mut self, px: f64) -> Self {
        self.max_short_side = Some(px);
        self
    }

    pub fn min_aspect_ratio(mut self, ratio: f64) -> Self {
        self.min_aspect_ratio = Some(ratio);
        self
    }

    pub fn max_aspect_ratio(mut self, ratio: f64) -> Self {
        self.max_aspect_ratio = Some(ratio);
        self
    }

    pub fn min_pixel_density(mut self, density: f64) -> Self {
        self.min_pixel_density = Some(density);
        self
    }

    pub fn max_pixel_density(mut self, density: f64) -> Self {
        self.max_pixel_density = Some(density);
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn guard(mut self, flag: bool) -> Self {
        self.guard = Some(flag);
        self
    }

    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Combine two conditions into one that requires both.
    ///
    /// Lower bounds take the larger value and upper bounds the smaller one.
    /// Conflicting orientations, platforms or guards produce an unsatisfiable
    /// condition (a `false` guard).
    pub fn and(self, other: &Condition) -> Condition {
        fn tighter(a: Option<f64>, b: Option<f64>, pick: fn(f64, f64) -> f64) -> Option<f64> {
            match (a, b) {
                (Some(x), Some(y)) => Some(pick(x, y)),
                (x, None) => x,
                (None, y) => y,
            }
        }

        fn same<T: PartialEq + Copy>(a: Option<T>, b: Option<T>, conflict: &mut bool) -> Option<T> {
            match (a, b) {
                (Some(x), Some(y)) if x != y => {
                    *conflict = true;
                    Some(x)
                }
                (x, None) => x,
                (None, y) => y,
                (x, Some(_)) => x,
            }
        }

        let mut conflict = false;
        let orientation = same(self.orientation, other.orientation, &mut conflict);
        let platform = same(self.platform, other.platform, &mut conflict);
        let guard = match (self.guard, other.guard) {
            (Some(a), Some(b)) => Some(a && b),
            (a, b) => a.or(b),
        };

        Condition {
            min_width: tighter(self.min_width, other.min_width, f64::max),
            max_width: tighter(self.max_width, other.max_width, f64::min),
            min_height: tighter(self.min_height, other.min_height, f64::max),
            max_height: tighter(self.max_height, other.max_height, f64::min),
            min_short_side: tighter(self.min_short_side, other.min_short_side, f64::max),
            max_short_side: tighter(self.max_short_side, other.max_short_side, f64::min),
            min_aspect_ratio: tighter(self.min_aspect_ratio, other.min_aspect_ratio, f64::max),
            max_aspect_ratio: tighter(self.max_aspect_ratio, other.max_aspect_ratio, f64::min),
            min_pixel_density: tighter(self.min_pixel_density, other.min_pixel_density, f64::max),
            max_pixel_density: tighter(self.max_pixel_density, other.max_pixel_density, f64::min),
            orientation,
            platform,
            guard: if conflict { Some(false) } else { guard },
        }
    }

    /// The five numeric `(feature, min, max)` bound pairs.
    pub(crate) fn bounds(&self) -> [(&'static str, Option<f64>, Option<f64>); 5] {
        [
            ("width", self.min_width, self.max_width),
            ("height", self.min_height, self.max_height),
            ("short-side", self.min_short_side, self.max_short_side),
            ("aspect-ratio", self.min_aspect_ratio, self.max_aspect_ratio),
            ("pixel-ratio", self.min_pixel_density, self.max_pixel_density),
        ]
    }

    /// Check that every bound is finite and that no `min` exceeds its `max`.
    pub fn validate(&self) -> Result<(), ConditionError> {
        for (feature, min, max) in self.bounds() {
            for value in [min, max].into_iter().flatten() {
                if !value.is_finite() {
                    return Err(ConditionError::NonFinite { feature, value });
                }
            }
            if let (Some(min), Some(max)) = (min, max) {
                if min > max {
                    return Err(ConditionError::InvertedBounds { feature, min, max });
                }
            }
        }
        Ok(())
    }

    /// [`validate`](Self::validate), returning the condition on success.
    pub fn validated(self) -> Result<Self, ConditionError> {
        self.validate()?;
        Ok(self)
    }
}
