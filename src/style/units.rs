//! Responsive units: viewport percentages converted to device-independent pixels.
//!
//! `vw(50)` on a 1000-wide viewport is `500`. Results are snapped to the
//! nearest physical pixel for the snapshot's pixel density, so `vw(33.3)` on
//! a 100-wide, 3x viewport is `33.333...` (100 physical pixels / 3).

use std::fmt;

use serde_json::{Number, Value};

use crate::metrics::MetricsSnapshot;

/// Errors from [`Percent::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PercentError {
    #[error("`{0}` does not start with a number")]
    NotANumber(String),
}

/// A percentage, given either as a number or as text like `"50%"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percent(pub f64);

impl Percent {
    /// Parse the leading number of `text`, ignoring whatever follows it.
    ///
    /// `"50%"`, `"50"`, `" 12.5 percent"`, `"-10%"` and `"1e2%"` all parse. An
    /// `e` not followed by exponent digits ends the number.
    pub fn parse(text: &str) -> Result<Self, PercentError> {
        let trimmed = text.trim_start();
        let bytes = trimmed.as_bytes();
        let digits = |from: usize| {
            bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count()
        };

        let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
        let int_digits = digits(end);
        end += int_digits;
        let mut frac_digits = 0;
        if bytes.get(end) == Some(&b'.') {
            frac_digits = digits(end + 1);
            end += 1 + frac_digits;
        }
        if int_digits + frac_digits == 0 {
            return Err(PercentError::NotANumber(text.to_string()));
        }
        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
            let exp_digits = digits(end + 1 + sign);
            if exp_digits > 0 {
                end += 1 + sign + exp_digits;
            }
        }

        trimmed[..end]
            .parse()
            .map(Percent)
            .map_err(|_| PercentError::NotANumber(text.to_string()))
    }
}

impl From<f64> for Percent {
    fn from(value: f64) -> Self {
        Percent(value)
    }
}

impl From<i32> for Percent {
    fn from(value: i32) -> Self {
        Percent(f64::from(value))
    }
}

impl std::str::FromStr for Percent {
    type Err = PercentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Percent::parse(s)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Round a layout size to the nearest value that lands on a physical pixel.
pub fn round_to_nearest_pixel(layout_size: f64, pixel_density: f64) -> f64 {
    (layout_size * pixel_density).round() / pixel_density
}

/// A pixel length as a style value.
///
/// Whole values become JSON integers so `length_value(500.0)` equals
/// `json!(500)`; fractional values stay floats. Non-finite input is `null`.
pub fn length_value(px: f64) -> Value {
    const EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
    if px.fract() == 0.0 && px.abs() < EXACT {
        Value::Number(Number::from(px as i64))
    } else {
        Number::from_f64(px).map_or(Value::Null, Value::Number)
    }
}

/// Viewport-relative measurement helpers handed to layer builders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponsiveUnits {
    width: f64,
    height: f64,
    pixel_density: f64,
}

impl ResponsiveUnits {
    /// Units for the given snapshot.
    pub fn from_snapshot(snapshot: &MetricsSnapshot) -> Self {
        Self {
            width: snapshot.width,
            height: snapshot.height,
            pixel_density: snapshot.pixel_density,
        }
    }

    /// `percent` of the viewport width, in device-independent pixels.
    pub fn vw(&self, percent: impl Into<Percent>) -> f64 {
        round_to_nearest_pixel(self.width * percent.into().0 / 100.0, self.pixel_density)
    }

    /// `percent` of the viewport height, in device-independent pixels.
    pub fn vh(&self, percent: impl Into<Percent>) -> f64 {
        round_to_nearest_pixel(self.height * percent.into().0 / 100.0, self.pixel_density)
    }

    /// [`vw`](Self::vw) as a style value, ready to drop into a fragment.
    pub fn vw_value(&self, percent: impl Into<Percent>) -> Value {
        length_value(self.vw(percent))
    }

    /// [`vh`](Self::vh) as a style value.
    pub fn vh_value(&self, percent: impl Into<Percent>) -> Value {
        length_value(self.vh(percent))
    }
}

impl From<&MetricsSnapshot> for ResponsiveUnits {
    fn from(snapshot: &MetricsSnapshot) -> Self {
        Self::from_snapshot(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Platform;
    use serde_json::json;

    fn units(width: f64, height: f64, density: f64) -> ResponsiveUnits {
        ResponsiveUnits::from_snapshot(&MetricsSnapshot::new(width, height, density, Platform::Ios))
    }

    #[test]
    fn vw_and_vh_scale_by_percent() {
        let u = units(1000.0, 800.0, 1.0);
        assert_eq!(u.vw(50), 500.0);
        assert_eq!(u.vh(25), 200.0);
        assert_eq!(u.vw(100), 1000.0);
    }

    #[test]
    fn results_snap_to_physical_pixels() {
        // 33.3% of 100 = 33.3dp = 99.9 physical px at 3x, rounds to 100px.
        let u = units(100.0, 100.0, 3.0);
        assert_eq!(u.vw(33.3), 100.0 / 3.0);
        // At 1x the same value rounds to a whole dp.
        assert_eq!(units(100.0, 100.0, 1.0).vw(33.3), 33.0);
    }

    #[test]
    fn percent_parses_text() {
        assert_eq!(Percent::parse("50%"), Ok(Percent(50.0)));
        assert_eq!(Percent::parse("12.5"), Ok(Percent(12.5)));
        assert_eq!(Percent::parse("  -10%"), Ok(Percent(-10.0)));
        assert_eq!("75 percent".parse::<Percent>(), Ok(Percent(75.0)));
        assert_eq!(Percent::parse(".5%"), Ok(Percent(0.5)));
        assert_eq!(Percent::parse("50.%"), Ok(Percent(50.0)));
    }

    #[test]
    fn percent_accepts_exponents() {
        assert_eq!(Percent::parse("1e2%"), Ok(Percent(100.0)));
        assert_eq!(Percent::parse("2.5E-1"), Ok(Percent(0.25)));
        assert_eq!(Percent::parse("+3e+1%"), Ok(Percent(30.0)));
        // A dangling exponent marker is not part of the number.
        assert_eq!(Percent::parse("4em"), Ok(Percent(4.0)));
        assert_eq!(Percent::parse("4e-"), Ok(Percent(4.0)));
    }

    #[test]
    fn percent_rejects_non_numeric_text() {
        assert_eq!(
            Percent::parse("half"),
            Err(PercentError::NotANumber("half".into()))
        );
        assert!(Percent::parse("%").is_err());
        assert!(Percent::parse("-").is_err());
    }

    #[test]
    fn text_and_number_agree() {
        let u = units(1000.0, 500.0, 2.0);
        assert_eq!(u.vw(Percent::parse("40%").unwrap()), u.vw(40));
        assert_eq!(u.vh(Percent::parse("10").unwrap()), u.vh(10.0));
    }

    #[test]
    fn whole_lengths_compare_equal_to_integer_literals() {
        let u = units(1000.0, 800.0, 1.0);
        assert_eq!(u.vw_value(50), json!(500));
        assert_eq!(u.vh_value("12.5%".parse::<Percent>().unwrap()), json!(100));
        assert_eq!(u.vw_value(50).to_string(), "500");
    }

    #[test]
    fn fractional_and_non_finite_lengths() {
        assert_eq!(units(100.0, 100.0, 2.0).vw_value(33.3), json!(33.5));
        assert_eq!(length_value(-0.0), json!(0));
        assert_eq!(length_value(f64::NAN), Value::Null);
        assert_eq!(length_value(f64::INFINITY), Value::Null);
    }

    #[test]
    fn display_appends_percent_sign() {
        assert_eq!(Percent(12.5).to_string(), "12.5%");
    }
}
