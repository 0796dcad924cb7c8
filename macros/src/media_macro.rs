//! media! macro: parse media features at compile time and generate a Condition.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{Error, Expr, Ident, LitFloat, LitInt, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// A single parsed feature value.
#[derive(Debug, Clone)]
pub(crate) enum MediaValue {
    /// A number with an optional unit suffix (`600`, `600px`, `2x`, `3dppx`).
    Number(f64, String, Span),
    /// A ratio written as `N / M`.
    Ratio(f64, f64, Span),
    /// A bare keyword like `landscape` or `ios`.
    Ident(String, Span),
    /// A runtime expression (only for `guard`).
    Expr(Box<Expr>),
}

impl MediaValue {
    fn span(&self) -> Span {
        match self {
            MediaValue::Number(_, _, s) | MediaValue::Ratio(_, _, s) | MediaValue::Ident(_, s) => *s,
            MediaValue::Expr(expr) => syn::spanned::Spanned::span(expr.as_ref()),
        }
    }
}

/// A single media feature: `feature-name: value;`
#[derive(Debug, Clone)]
pub(crate) struct MediaFeature {
    /// The feature name in kebab-case (e.g. "min-short-side").
    pub name: String,
    pub name_span: Span,
    pub value: MediaValue,
}

/// The top-level input to the media! macro.
#[derive(Debug)]
struct MediaInput {
    features: Vec<MediaFeature>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for MediaInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut features = Vec::new();
        while !input.is_empty() {
            features.push(parse_feature(input)?);
        }
        Ok(MediaInput { features })
    }
}

/// Parse a single feature: `feature-name: value;`
pub(crate) fn parse_feature(input: ParseStream) -> Result<MediaFeature> {
    // Feature name (kebab-case: ident - ident - ident ...).
    let first_ident: Ident = input.parse()?;
    let mut name = first_ident.to_string();
    let name_span = first_ident.span();

    while input.peek(Token![-]) {
        input.parse::<Token![-]>()?;
        let next: Ident = input.parse()?;
        name.push('-');
        name.push_str(&next.to_string());
    }

    input.parse::<Token![:]>()?;

    let value = if name == "guard" {
        MediaValue::Expr(Box::new(input.parse()?))
    } else {
        parse_media_value(input)?
    };
    input.parse::<Token![;]>()?;

    Ok(MediaFeature {
        name,
        name_span,
        value,
    })
}

/// Parse a number (with optional sign, unit suffix and `/ denominator`) or a keyword.
pub(crate) fn parse_media_value(input: ParseStream) -> Result<MediaValue> {
    if input.peek(Ident) {
        let ident: Ident = input.parse()?;
        return Ok(MediaValue::Ident(ident.to_string(), ident.span()));
    }

    let negative = if input.peek(Token![-]) {
        input.parse::<Token![-]>()?;
        true
    } else {
        false
    };

    let (mut value, suffix, span) = parse_number(input)?;
    if negative {
        value = -value;
    }

    if suffix.is_empty() && input.peek(Token![/]) {
        input.parse::<Token![/]>()?;
        let (denom, denom_suffix, denom_span) = parse_number(input)?;
        if !denom_suffix.is_empty() {
            return Err(Error::new(denom_span, "ratio denominator cannot have a unit"));
        }
        if denom == 0.0 {
            return Err(Error::new(denom_span, "ratio denominator is zero"));
        }
        return Ok(MediaValue::Ratio(value, denom, span));
    }

    Ok(MediaValue::Number(value, suffix, span))
}

fn parse_number(input: ParseStream) -> Result<(f64, String, Span)> {
    if input.peek(LitFloat) {
        let lit: LitFloat = input.parse()?;
        let value: f64 = lit.base10_parse()?;
        return Ok((value, lit.suffix().to_string(), lit.span()));
    }
    if input.peek(LitInt) {
        let lit: LitInt = input.parse()?;
        let value: f64 = lit
            .base10_digits()
            .parse()
            .map_err(|_| Error::new(lit.span(), "invalid number"))?;
        return Ok((value, lit.suffix().to_string(), lit.span()));
    }
    Err(input.error("expected a number or a keyword"))
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

/// What kind of value a feature takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeatureKind {
    Length,
    Ratio,
    Density,
    Orientation,
    Platform,
    Guard,
}

/// All known features (kebab-case) and the kind of value each takes.
const KNOWN_FEATURES: &[(&str, FeatureKind)] = &[
    ("min-width", FeatureKind::Length),
    ("max-width", FeatureKind::Length),
    ("min-height", FeatureKind::Length),
    ("max-height", FeatureKind::Length),
    ("min-short-side", FeatureKind::Length),
    ("max-short-side", FeatureKind::Length),
    ("min-aspect-ratio", FeatureKind::Ratio),
    ("max-aspect-ratio", FeatureKind::Ratio),
    ("min-pixel-ratio", FeatureKind::Density),
    ("max-pixel-ratio", FeatureKind::Density),
    ("orientation", FeatureKind::Orientation),
    ("platform", FeatureKind::Platform),
    ("guard", FeatureKind::Guard),
];

/// Condition field for a feature name.
fn field_name(feature: &str) -> &str {
    match feature {
        "min-pixel-ratio" => "min_pixel_density",
        "max-pixel-ratio" => "max_pixel_density",
        "min-width" => "min_width",
        "max-width" => "max_width",
        "min-height" => "min_height",
        "max-height" => "max_height",
        "min-short-side" => "min_short_side",
        "max-short-side" => "max_short_side",
        "min-aspect-ratio" => "min_aspect_ratio",
        "max-aspect-ratio" => "max_aspect_ratio",
        other => other,
    }
}

/// The numeric value of a feature, after unit checks.
fn numeric_value(feature: &MediaFeature, kind: FeatureKind) -> Result<f64> {
    let unit_ok = |unit: &str| match kind {
        FeatureKind::Length => matches!(unit, "" | "px"),
        FeatureKind::Density => matches!(unit, "" | "x" | "dppx"),
        _ => unit.is_empty(),
    };
    match &feature.value {
        MediaValue::Number(n, unit, span) => {
            if !unit_ok(unit) {
                return Err(Error::new(
                    *span,
                    format!("unit `{}` is not valid for `{}`", unit, feature.name),
                ));
            }
            if !n.is_finite() {
                return Err(Error::new(*span, "number must be finite"));
            }
            Ok(*n)
        }
        MediaValue::Ratio(n, d, span) if kind == FeatureKind::Ratio => {
            let ratio = n / d;
            if !ratio.is_finite() {
                return Err(Error::new(*span, "ratio must be finite"));
            }
            Ok(ratio)
        }
        other => Err(Error::new(
            other.span(),
            format!("`{}` expects a number", feature.name),
        )),
    }
}

fn keyword_value(feature: &MediaFeature, allowed: &[&str]) -> Result<String> {
    match &feature.value {
        MediaValue::Ident(word, span) => {
            if allowed.contains(&word.as_str()) {
                Ok(word.clone())
            } else {
                Err(Error::new(
                    *span,
                    format!(
                        "invalid {} value `{}`; expected one of: {}",
                        feature.name,
                        word,
                        allowed.join(", ")
                    ),
                ))
            }
        }
        other => Err(Error::new(
            other.span(),
            format!("`{}` expects a keyword", feature.name),
        )),
    }
}

/// Uppercase the first letter: `landscape` -> `Landscape`.
fn variant_name(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Generate the struct field initializer for one feature.
fn generate_feature(feature: &MediaFeature) -> Result<(TokenStream, Option<f64>)> {
    let kind = KNOWN_FEATURES
        .iter()
        .find(|(name, _)| *name == feature.name)
        .map(|(_, kind)| *kind)
        .ok_or_else(|| {
            Error::new(
                feature.name_span,
                format!("unknown media feature `{}`", feature.name),
            )
        })?;

    let field = Ident::new(field_name(&feature.name), feature.name_span);

    match kind {
        FeatureKind::Length | FeatureKind::Ratio | FeatureKind::Density => {
            let n = numeric_value(feature, kind)?;
            Ok((quote! { #field: ::core::option::Option::Some(#n) }, Some(n)))
        }
        FeatureKind::Orientation => {
            let word = keyword_value(feature, &["landscape", "portrait"])?;
            let variant = Ident::new(&variant_name(&word), feature.value.span());
            Ok((
                quote! {
                    #field: ::core::option::Option::Some(
                        ::viewport_style::metrics::Orientation::#variant
                    )
                },
                None,
            ))
        }
        FeatureKind::Platform => {
            let word = keyword_value(feature, &["ios", "android", "macos", "windows", "web"])?;
            let variant = Ident::new(&variant_name(&word), feature.value.span());
            Ok((
                quote! {
                    #field: ::core::option::Option::Some(
                        ::viewport_style::metrics::Platform::#variant
                    )
                },
                None,
            ))
        }
        FeatureKind::Guard => match &feature.value {
            MediaValue::Expr(expr) => Ok((
                quote! { #field: ::core::option::Option::Some(#expr) },
                None,
            )),
            other => Err(Error::new(other.span(), "`guard` expects a boolean expression")),
        },
    }
}

/// Reject `min-x` greater than `max-x` for the same feature.
fn check_bounds(features: &[MediaFeature], values: &[Option<f64>]) -> Result<()> {
    for (i, feature) in features.iter().enumerate() {
        let Some(base) = feature.name.strip_prefix("min-") else {
            continue;
        };
        let max_name = format!("max-{}", base);
        let max = features
            .iter()
            .zip(values)
            .find(|(f, _)| f.name == max_name)
            .and_then(|(_, v)| *v);
        if let (Some(min), Some(max)) = (values[i], max) {
            if min > max {
                return Err(Error::new(
                    feature.name_span,
                    format!("`{}` ({}) is greater than `{}` ({})", feature.name, min, max_name, max),
                ));
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Entry point: generate code for the entire media! macro.
pub(crate) fn media_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: MediaInput = syn::parse2(input)?;

    for (i, feature) in parsed.features.iter().enumerate() {
        if parsed.features[..i].iter().any(|f| f.name == feature.name) {
            return Err(Error::new(
                feature.name_span,
                format!("duplicate media feature `{}`", feature.name),
            ));
        }
    }

    let mut fields = Vec::new();
    let mut values = Vec::new();
    for feature in &parsed.features {
        let (field, value) = generate_feature(feature)?;
        fields.push(field);
        values.push(value);
    }
    check_bounds(&parsed.features, &values)?;

    Ok(quote! {
        ::viewport_style::query::Condition {
            #(#fields,)*
            ..::core::default::Default::default()
        }
    })
}

// ===========================================================================
// Tests
// ===========================================================================
