//! Recursive descent media-query parser.
//!
//! Parses text like `(min-short-side: 341px) and (orientation: landscape)` into
//! a validated [`Condition`]. Uses the logos-based tokenizer from
//! [`crate::query::tokenizer`].

use crate::metrics::{Orientation, Platform};
use crate::query::condition::{Condition, ConditionError};
use crate::query::tokenizer::{tokenize_spanned, Token};

/// Errors from media-query parsing. Positions are byte offsets into the query.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error("unknown media feature `{0}`")]
    UnknownFeature(String),
    #[error("invalid value for `{feature}`: {message}")]
    InvalidValue { feature: String, message: String },
    #[error(transparent)]
    Condition(#[from] ConditionError),
}

/// Parse a media query into a validated [`Condition`].
///
/// The empty string and the keyword `all` yield the empty condition.
pub fn parse_query(input: &str) -> Result<Condition, ParseError> {
    let tokens = tokenize_spanned(input).map_err(|offset| ParseError::UnexpectedToken {
        position: offset,
        message: format!("unrecognized input '{}'", &input[offset..]),
    })?;

    let mut parser = Parser { tokens, cursor: 0 };
    let condition = parser.parse_query()?;
    Ok(condition.validated()?)
}

impl std::str::FromStr for Condition {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_query(s)
    }
}

/// A numeric feature value as written, before it is assigned to a field.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Value {
    Number(f64),
    Ratio(f64, f64),
    Keyword,
}

/// Recursive descent parser state: `(token, text, byte offset)` triples.
struct Parser {
    tokens: Vec<(Token, String, usize)>,
    cursor: usize,
}

impl Parser {
    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<&(Token, String, usize)> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<(Token, String, usize)> {
        let tok = self.tokens.get(self.cursor).cloned();
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    fn expect(&mut self, expected: Token) -> Result<String, ParseError> {
        match self.advance() {
            Some((token, text, _)) if token == expected => Ok(text),
            Some((token, text, position)) => Err(ParseError::UnexpectedToken {
                position,
                message: format!("expected {expected:?}, got {token:?} '{text}'"),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {expected:?}"))),
        }
    }

    /// `query := "all" | feature ("and" feature)*`
    fn parse_query(&mut self) -> Result<Condition, ParseError> {
        if self.is_eof() {
            return Ok(Condition::new());
        }
        if matches!(self.peek(), Some((Token::Ident, text, _)) if text == "all") {
            self.advance();
            if self.is_eof() {
                return Ok(Condition::new());
            }
            self.expect(Token::And)?;
        }

        let mut condition = self.parse_feature()?;
        while !self.is_eof() {
            self.expect(Token::And)?;
            condition = condition.and(&self.parse_feature()?);
        }
        Ok(condition)
    }

    /// `feature := "(" name ":" value ")"`
    fn parse_feature(&mut self) -> Result<Condition, ParseError> {
        self.expect(Token::ParenOpen)?;
        let name = self.expect(Token::Ident)?;
        self.expect(Token::Colon)?;
        let condition = self.parse_value(&name)?;
        self.expect(Token::ParenClose)?;
        Ok(condition)
    }

    fn parse_value(&mut self, feature: &str) -> Result<Condition, ParseError> {
        let c = Condition::new();
        let condition = match feature {
            "min-width" => c.min_width(self.length(feature)?),
            "max-width" => c.max_width(self.length(feature)?),
            "min-height" => c.min_height(self.length(feature)?),
            "max-height" => c.max_height(self.length(feature)?),
            "min-short-side" => c.min_short_side(self.length(feature)?),
            "max-short-side" => c.max_short_side(self.length(feature)?),
            "min-aspect-ratio" => c.min_aspect_ratio(self.ratio(feature)?),
            "max-aspect-ratio" => c.max_aspect_ratio(self.ratio(feature)?),
            "min-pixel-ratio" => c.min_pixel_density(self.density(feature)?),
            "max-pixel-ratio" => c.max_pixel_density(self.density(feature)?),
            "orientation" => {
                let word = self.keyword(feature)?;
                c.orientation(Orientation::from_keyword(&word).ok_or_else(|| invalid(
                    feature,
                    format!("expected landscape or portrait, got '{word}'"),
                ))?)
            }
            "platform" => {
                let word = self.keyword(feature)?;
                c.platform(Platform::from_keyword(&word).ok_or_else(|| {
                    invalid(feature, format!("unknown platform '{word}'"))
                })?)
            }
            "guard" => match self.keyword(feature)?.as_str() {
                "true" => c.guard(true),
                "false" => c.guard(false),
                other => return Err(invalid(feature, format!("expected true or false, got '{other}'"))),
            },
            other => return Err(ParseError::UnknownFeature(other.to_string())),
        };
        Ok(condition)
    }

    /// A single value: a number (optionally with a unit), `N/M`, or a keyword.
    /// Returns the unit suffix for dimensions.
    fn value(&mut self, feature: &str) -> Result<(Value, &'static str), ParseError> {
        let (token, text, position) = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof(format!("expected value for `{feature}`")))?;

        match token {
            Token::Number => {
                let n = parse_number(feature, &text)?;
                if matches!(self.peek(), Some((Token::Slash, _, _))) {
                    self.advance();
                    let denom = self.expect(Token::Number)?;
                    return Ok((Value::Ratio(n, parse_number(feature, &denom)?), ""));
                }
                Ok((Value::Number(n), ""))
            }
            Token::Dimension => {
                let (num, unit) = split_dimension(&text)
                    .ok_or_else(|| invalid(feature, format!("invalid dimension '{text}'")))?;
                Ok((Value::Number(parse_number(feature, num)?), unit))
            }
            Token::Ident => {
                self.cursor -= 1;
                Ok((Value::Keyword, ""))
            }
            other => Err(ParseError::UnexpectedToken {
                position,
                message: format!("unexpected {other:?} '{text}' in value for `{feature}`"),
            }),
        }
    }

    /// A length in device pixels: `N` or `Npx`.
    fn length(&mut self, feature: &str) -> Result<f64, ParseError> {
        match self.value(feature)? {
            (Value::Number(n), "" | "px") => Ok(n),
            (Value::Number(_), unit) => Err(invalid(feature, format!("unit '{unit}' is not a length"))),
            _ => Err(invalid(feature, "expected a length".into())),
        }
    }

    /// An aspect ratio: `N` or `N/M`.
    fn ratio(&mut self, feature: &str) -> Result<f64, ParseError> {
        match self.value(feature)? {
            (Value::Number(n), "") => Ok(n),
            (Value::Ratio(_, d), _) if d == 0.0 => {
                Err(invalid(feature, "ratio denominator is zero".into()))
            }
            (Value::Ratio(n, d), _) => Ok(n / d),
            _ => Err(invalid(feature, "expected a ratio".into())),
        }
    }

    /// A pixel density: `N`, `Nx` or `Ndppx`.
    fn density(&mut self, feature: &str) -> Result<f64, ParseError> {
        match self.value(feature)? {
            (Value::Number(n), "" | "x" | "dppx") => Ok(n),
            (Value::Number(_), unit) => {
                Err(invalid(feature, format!("unit '{unit}' is not a resolution")))
            }
            _ => Err(invalid(feature, "expected a pixel ratio".into())),
        }
    }

    fn keyword(&mut self, feature: &str) -> Result<String, ParseError> {
        match self.advance() {
            Some((Token::Ident, text, _)) => Ok(text),
            Some((_, text, _)) => Err(invalid(feature, format!("expected a keyword, got '{text}'"))),
            None => Err(ParseError::UnexpectedEof(format!("expected value for `{feature}`"))),
        }
    }
}

fn invalid(feature: &str, message: String) -> ParseError {
    ParseError::InvalidValue {
        feature: feature.to_string(),
        message,
    }
}

fn parse_number(feature: &str, text: &str) -> Result<f64, ParseError> {
    text.parse()
        .map_err(|_| invalid(feature, format!("invalid number '{text}'")))
}

/// Split a dimension like "600px" or "2dppx" into (number_part, unit_part).
fn split_dimension(s: &str) -> Option<(&str, &'static str)> {
    ["dppx", "px", "x"]
        .into_iter()
        .find_map(|unit| s.strip_suffix(unit).map(|num| (num, unit)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> Condition {
        parse_query(input).unwrap_or_else(|e| panic!("parse failed: {e}"))
    }

    #[test]
    fn empty_and_all_are_unconstrained() {
        assert_eq!(parse(""), Condition::new());
        assert_eq!(parse("   "), Condition::new());
        assert_eq!(parse("all"), Condition::new());
    }

    #[test]
    fn single_length_feature() {
        assert_eq!(parse("(min-width: 600)"), Condition::new().min_width(600.0));
        assert_eq!(parse("(max-height: 480px)"), Condition::new().max_height(480.0));
    }

    #[test]
    fn conjunction_of_features() {
        assert_eq!(
            parse("(min-short-side: 341px) and (max-short-side: 600px) and (orientation: landscape)"),
            Condition::new()
                .min_short_side(341.0)
                .max_short_side(600.0)
                .orientation(Orientation::Landscape)
        );
    }

    #[test]
    fn all_prefix_is_accepted() {
        assert_eq!(
            parse("all and (platform: android)"),
            Condition::new().platform(Platform::Android)
        );
    }

    #[test]
    fn aspect_ratio_fraction() {
        assert_eq!(
            parse("(min-aspect-ratio: 16/9)"),
            Condition::new().min_aspect_ratio(16.0 / 9.0)
        );
        assert_eq!(parse("(max-aspect-ratio: 1.5)"), Condition::new().max_aspect_ratio(1.5));
    }

    #[test]
    fn pixel_ratio_units() {
        assert_eq!(parse("(min-pixel-ratio: 2)"), Condition::new().min_pixel_density(2.0));
        assert_eq!(parse("(min-pixel-ratio: 2x)"), Condition::new().min_pixel_density(2.0));
        assert_eq!(parse("(max-pixel-ratio: 3dppx)"), Condition::new().max_pixel_density(3.0));
    }

    #[test]
    fn guard_keyword() {
        assert_eq!(parse("(guard: false)"), Condition::new().guard(false));
    }

    #[test]
    fn repeated_feature_keeps_tighter_bound() {
        assert_eq!(
            parse("(min-width: 100) and (min-width: 300)"),
            Condition::new().min_width(300.0)
        );
    }

    #[test]
    fn unknown_feature_is_an_error() {
        assert_eq!(
            parse_query("(min-depth: 3)"),
            Err(ParseError::UnknownFeature("min-depth".into()))
        );
    }

    #[test]
    fn bad_keyword_is_an_error() {
        assert!(matches!(
            parse_query("(orientation: sideways)"),
            Err(ParseError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_query("(platform: beos)"),
            Err(ParseError::InvalidValue { .. })
        ));
    }

    #[test]
    fn wrong_unit_is_an_error() {
        assert!(matches!(
            parse_query("(min-width: 2dppx)"),
            Err(ParseError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_query("(min-pixel-ratio: 2px)"),
            Err(ParseError::InvalidValue { .. })
        ));
    }

    #[test]
    fn zero_denominator_is_an_error() {
        assert!(matches!(
            parse_query("(min-aspect-ratio: 4/0)"),
            Err(ParseError::InvalidValue { .. })
        ));
    }

    #[test]
    fn missing_and_is_an_error() {
        assert!(matches!(
            parse_query("(min-width: 1) (max-width: 2)"),
            Err(ParseError::UnexpectedToken { position: 15, .. })
        ));
    }

    #[test]
    fn error_positions_are_byte_offsets() {
        let err = parse_query("(min-width: 1) and (platform ios)").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                position: 29,
                message: "expected Colon, got Ident 'ios'".into(),
            }
        );
        assert!(matches!(
            parse_query("(min-width: /)"),
            Err(ParseError::UnexpectedToken { position: 12, .. })
        ));
    }

    #[test]
    fn truncated_query_is_eof() {
        assert!(matches!(
            parse_query("(min-width: 600"),
            Err(ParseError::UnexpectedEof(_))
        ));
        assert!(matches!(
            parse_query("(min-width:"),
            Err(ParseError::UnexpectedEof(_))
        ));
    }

    #[test]
    fn unlexable_input_is_an_error() {
        assert!(matches!(
            parse_query("(min-width: 600@)"),
            Err(ParseError::UnexpectedToken { position: 15, .. })
        ));
    }

    #[test]
    fn inverted_bounds_fail_validation() {
        assert!(matches!(
            parse_query("(min-width: 800) and (max-width: 400)"),
            Err(ParseError::Condition(ConditionError::InvertedBounds { feature: "width", .. }))
        ));
    }
}
