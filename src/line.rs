//! Tokenization of spec-line text.

use logos::{Lexer, Logos};

use crate::Token;

/// A single lexeme of a spec line.
///
/// Whitespace separates tokens and is skipped. Commas are tokens of their
/// own so that grammars can split clause lists without touching raw text.
/// Everything that is neither a comma, a number, nor the `to` connector is
/// a [`Word`](TokenKind::Word): keywords, object names, wildcard patterns.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum TokenKind {
    /// A pixel amount: digits with an optional `px` suffix and an optional
    /// `~` approximation marker, e.g. `25`, `25px`, `~30px`.
    ///
    /// The marker and the suffix must be adjacent to the digits; a spaced
    /// `~ 30px` is a word followed by a number.
    #[regex(r"~?[0-9]+(px)?", number, priority = 5)]
    Number(PixelNumber),

    /// The range connector in `10 to 20px`.
    #[token("to", priority = 4)]
    To,

    #[token(",")]
    Comma,

    #[regex(r"[^ \t\r\n\f,]+", priority = 2)]
    Word,
}

/// The payload of a [`TokenKind::Number`] token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PixelNumber {
    pub(crate) value: i32,
    pub(crate) approx: bool,
}

/// Parse the matched number slice, failing on `i32` overflow.
fn number(lex: &mut Lexer<TokenKind>) -> Option<PixelNumber> {
    let slice = lex.slice();
    let approx = slice.starts_with('~');
    let digits = slice.trim_start_matches('~').trim_end_matches("px");
    let value = digits.parse::<i32>().ok()?;
    Some(PixelNumber { value, approx })
}

/// Tokenize a spec line.
///
/// Number-shaped lexemes whose magnitude does not fit an `i32` are demoted
/// to [`TokenKind::Word`], so grammars report them in range terms instead
/// of surfacing a lexer failure.
pub(crate) fn tokenize(text: &str) -> Vec<Token> {
    TokenKind::lexer(text)
        .spanned()
        .map(|(kind, span)| match kind {
            Ok(kind) => (kind, span),
            Err(()) => (TokenKind::Word, span),
        })
        .collect()
}

/// Collapse internal whitespace runs to single spaces and trim the ends.
///
/// Spec lines are echoed back in reports and test output; the echoed form
/// keeps the author's wording but not their alignment spaces.
pub(crate) fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
