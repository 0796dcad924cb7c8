//! Proc macros for viewport-style: compile-time `media!` conditions.
//!
//! This crate is not meant to be used directly. Enable the `macros` feature on `viewport-style`.

use proc_macro::TokenStream;

mod media_macro;

/// Compile-time media query macro.
///
/// Parses media features at compile time and produces a
/// `viewport_style::query::Condition` struct literal.
///
/// # Syntax
///
/// ```ignore
/// let tablet_landscape = media! {
///     min-short-side: 601px;
///     orientation: landscape;
///     min-aspect-ratio: 4 / 3;
///     min-pixel-ratio: 2x;
///     platform: ios;
///     guard: settings.wide_layout;
/// };
/// ```
///
/// Feature names use kebab-case. Unknown features, wrong units or keywords,
/// duplicate features and `min-*` values above their `max-*` are compile
/// errors. `guard` takes any boolean expression, evaluated at runtime.
#[proc_macro]
pub fn media(input: TokenStream) -> TokenStream {
    media_macro::media_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
