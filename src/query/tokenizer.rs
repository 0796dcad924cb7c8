//! logos-based media-query tokenizer.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `600px` as Dimension beats `600` as Number)
//! 2. For equal length matches, literal tokens beat regexes
//!
//! Our ordering ensures:
//! - `2dppx` matches [`Token::Dimension`], not `Number` + `Ident`
//! - `and` matches [`Token::And`], while `android` stays an [`Token::Ident`]

use logos::Logos;

/// Media-query token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// Number with a unit suffix: `600px`, `2dppx`, `3x`.
    #[regex(r"-?[0-9]+(\.[0-9]+)?(px|dppx|x)")]
    Dimension,

    /// Number: integer or float, possibly negative.
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,

    /// The `and` conjunction.
    #[token("and")]
    And,

    /// Feature names and keyword values: `min-width`, `landscape`, `ios`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    /// `(`
    #[token("(")]
    ParenOpen,

    /// `)`
    #[token(")")]
    ParenClose,

    /// `:`
    #[token(":")]
    Colon,

    /// `/`
    #[token("/")]
    Slash,
}

/// Tokenize a media query into `(Token, text)` pairs.
///
/// Fails with the byte offset of the first input that does not lex.
pub fn tokenize(input: &str) -> Result<Vec<(Token, String)>, usize> {
    Ok(tokenize_spanned(input)?
        .into_iter()
        .map(|(token, text, _)| (token, text))
        .collect())
}

/// Like [`tokenize`], also returning the byte offset each token starts at.
pub fn tokenize_spanned(input: &str) -> Result<Vec<(Token, String, usize)>, usize> {
    Token::lexer(input)
        .spanned()
        .map(|(result, span)| match result {
            Ok(token) => Ok((token, input[span.clone()].to_string(), span.start)),
            Err(()) => Err(span.start),
        })
        .collect()
}
