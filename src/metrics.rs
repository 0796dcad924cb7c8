//! Device metrics: the snapshot every query is evaluated against.
//!
//! A [`MetricsSnapshot`] is an immutable value captured from the host at
//! evaluation time. Orientation, short side and aspect ratio are derived on
//! demand rather than stored, so a snapshot can never disagree with itself.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

/// Viewport orientation, derived from width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    /// Parse the lowercase keyword used in media-query text.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "landscape" => Some(Self::Landscape),
            "portrait" => Some(Self::Portrait),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landscape => "landscape",
            Self::Portrait => "portrait",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// Host platform identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    Macos,
    Windows,
    Web,
}

impl Platform {
    /// Every platform, in declaration order.
    pub const ALL: [Platform; 5] = [
        Platform::Ios,
        Platform::Android,
        Platform::Macos,
        Platform::Windows,
        Platform::Web,
    ];

    /// Parse the lowercase keyword used in media-query text.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == keyword)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Macos => "macos",
            Self::Windows => "windows",
            Self::Web => "web",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MetricsSnapshot
// ---------------------------------------------------------------------------

/// Device metrics at one point in time.
///
/// `width` and `height` are device-independent pixels and `pixel_density` is
/// the physical-to-logical pixel ratio. All three are expected to be positive
/// and finite; the snapshot does not check this, the metrics provider owns it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub width: f64,
    pub height: f64,
    pub pixel_density: f64,
    pub platform: Platform,
}

impl MetricsSnapshot {
    /// Create a snapshot.
    pub const fn new(width: f64, height: f64, pixel_density: f64, platform: Platform) -> Self {
        Self {
            width,
            height,
            pixel_density,
            platform,
        }
    }

    /// Replace the viewport size, keeping density and platform (builder).
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Replace the pixel density (builder).
    pub fn with_pixel_density(mut self, pixel_density: f64) -> Self {
        self.pixel_density = pixel_density;
        self
    }

    /// Replace the platform (builder).
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// `Landscape` when strictly wider than tall, `Portrait` otherwise.
    ///
    /// A square viewport is portrait.
    #[inline]
    pub fn orientation(&self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    /// The smaller of width and height.
    #[inline]
    pub fn short_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// `width / height`.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

// ---------------------------------------------------------------------------
// MetricsProvider
// ---------------------------------------------------------------------------

/// Source of live device metrics.
///
/// Implemented by the host integration. The resolver calls it once per
/// resolution and never subscribes or polls.
pub trait MetricsProvider {
    /// The current metrics.
    fn snapshot(&self) -> MetricsSnapshot;
}

impl<P: MetricsProvider + ?Sized> MetricsProvider for &P {
    fn snapshot(&self) -> MetricsSnapshot {
        (**self).snapshot()
    }
}

/// A provider that always reports the same snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetrics(pub MetricsSnapshot);

impl MetricsProvider for FixedMetrics {
    fn snapshot(&self) -> MetricsSnapshot {
        self.0
    }
}

impl From<MetricsSnapshot> for FixedMetrics {
    fn from(snapshot: MetricsSnapshot) -> Self {
        Self(snapshot)
    }
}
