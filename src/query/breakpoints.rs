//! Named breakpoints and the helpers that turn them into [`Condition`]s.
//!
//! All helpers constrain the viewport's short side, so the same breakpoint
//! applies in either orientation. Thresholds are integer device pixels, which
//! is why "strictly greater than" is written as `threshold + 1`:
//!
//! ```text
//! at_most(Sm)       => [0, 600]
//! below(Sm)         => [0, 600]
//! above(Sm)         => [601, inf)
//! between(Xs, Sm)   => [341, 600]
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::query::condition::Condition;

/// A breakpoint symbol. Declaration order is ascending threshold order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Xs,
    Sm,
}

impl Breakpoint {
    /// Every breakpoint, smallest first.
    pub const ALL: [Breakpoint; Self::COUNT] = [Breakpoint::Xs, Breakpoint::Sm];

    /// Number of breakpoints.
    pub const COUNT: usize = 2;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from building a custom [`BreakpointTable`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BreakpointError {
    #[error("breakpoint `{larger}` ({larger_px}px) must be above `{smaller}` ({smaller_px}px)")]
    OutOfOrder {
        smaller: Breakpoint,
        smaller_px: u32,
        larger: Breakpoint,
        larger_px: u32,
    },
}

/// Thresholds for every [`Breakpoint`], strictly ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BreakpointTable {
    thresholds: [u32; Breakpoint::COUNT],
}

impl BreakpointTable {
    /// The built-in table: `xs = 340`, `sm = 600`.
    pub const DEFAULT: BreakpointTable = BreakpointTable {
        thresholds: [340, 600],
    };

    /// Build a table from explicit thresholds, indexed like [`Breakpoint::ALL`].
    pub fn new(thresholds: [u32; Breakpoint::COUNT]) -> Result<Self, BreakpointError> {
        let table = Self { thresholds };
        table.check_order()?;
        Ok(table)
    }

    /// Replace one threshold (builder). Fails if the order would break.
    pub fn with_threshold(mut self, bp: Breakpoint, px: u32) -> Result<Self, BreakpointError> {
        self.thresholds[bp.index()] = px;
        self.check_order()?;
        Ok(self)
    }

    fn check_order(&self) -> Result<(), BreakpointError> {
        for pair in Breakpoint::ALL.windows(2) {
            let (smaller, larger) = (pair[0], pair[1]);
            let (smaller_px, larger_px) = (self.threshold(smaller), self.threshold(larger));
            if larger_px <= smaller_px {
                return Err(BreakpointError::OutOfOrder {
                    smaller,
                    smaller_px,
                    larger,
                    larger_px,
                });
            }
        }
        Ok(())
    }

    /// The threshold for `bp`, in device pixels.
    #[inline]
    pub fn threshold(&self, bp: Breakpoint) -> u32 {
        self.thresholds[bp.index()]
    }

    /// Short side in `[0, threshold]`.
    pub fn at_most(&self, bp: Breakpoint) -> Condition {
        Condition::new().max_short_side(f64::from(self.threshold(bp)))
    }

    /// Short side strictly greater than the threshold.
    pub fn above(&self, bp: Breakpoint) -> Condition {
        Condition::new().min_short_side(f64::from(self.threshold(bp)) + 1.0)
    }

    /// Same condition as [`at_most`](Self::at_most); both names are kept.
    pub fn below(&self, bp: Breakpoint) -> Condition {
        self.at_most(bp)
    }

    /// Short side above the smaller threshold and up to the larger one.
    /// Argument order does not matter.
    pub fn between(&self, a: Breakpoint, b: Breakpoint) -> Condition {
        let (lo, hi) = {
            let (ta, tb) = (self.threshold(a), self.threshold(b));
            if ta < tb { (ta, tb) } else { (tb, ta) }
        };
        Condition::new()
            .min_short_side(f64::from(lo) + 1.0)
            .max_short_side(f64::from(hi))
    }
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// [`BreakpointTable::at_most`] on the default table.
pub fn at_most(bp: Breakpoint) -> Condition {
    BreakpointTable::DEFAULT.at_most(bp)
}

/// [`BreakpointTable::above`] on the default table.
pub fn above(bp: Breakpoint) -> Condition {
    BreakpointTable::DEFAULT.above(bp)
}

/// [`BreakpointTable::below`] on the default table.
pub fn below(bp: Breakpoint) -> Condition {
    BreakpointTable::DEFAULT.below(bp)
}

/// [`BreakpointTable::between`] on the default table.
pub fn between(a: Breakpoint, b: Breakpoint) -> Condition {
    BreakpointTable::DEFAULT.between(a, b)
}

/// Phone-sized short side: `at_most(Xs)`.
pub fn xs() -> Condition {
    at_most(Breakpoint::Xs)
}

/// Up to small-tablet short side: `at_most(Sm)`.
pub fn sm() -> Condition {
    at_most(Breakpoint::Sm)
}
