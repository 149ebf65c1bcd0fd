//! A reader for the one-line layout assertions used by visual UI tests.
//!
//! A layout spec states where an element should sit relative to another
//! element, or what size it should have:
//!
//! ```text
//! inside main-container 25px top left, 10 to 20px bottom
//! contains menu, search, login-*
//! width 50 to 100px
//! ```
//!
//! [`read`] turns one such line into a typed [`Spec`] that a layout
//! verification engine can evaluate against measured element geometry:
//!
//! ```
//! use layspec::{read, ReaderConfig, Side, SpecKind};
//!
//! # fn main() -> Result<(), layspec::SyntaxError> {
//! let config = ReaderConfig::default();
//! let spec = read("inside  main-container   25px top left", &config)?;
//!
//! assert_eq!(spec.original_text(), "inside main-container 25px top left");
//!
//! let SpecKind::Inside { object, partly, locations } = spec.kind() else {
//!     panic!("expected an `inside` spec");
//! };
//! assert_eq!(object, "main-container");
//! assert!(!partly);
//! assert_eq!(locations[0].sides(), [Side::Top, Side::Left]);
//! # Ok(())
//! # }
//! ```
//!
//! Approximate distances (`~30px`) are resolved into plain ranges while
//! reading, using the tolerance configured under
//! [`RANGE_APPROXIMATION_KEY`]; see [`ReaderConfig`] for details.
//!
//! Reading is all-or-nothing: a malformed line yields a [`SyntaxError`]
//! with a fixed, testable message and no partial spec.

pub mod config;
pub mod specs;

mod line;

pub use config::{ReaderConfig, DEFAULT_RANGE_APPROXIMATION, RANGE_APPROXIMATION_KEY};
pub use specs::{read, Location, Range, Side, Spec, SpecKind, SyntaxError};

// Common private helper types
// ===========================

use crate::line::TokenKind;

type Token = (TokenKind, logos::Span);

/// Project the `kind` component of a `token`.
#[inline(always)]
fn kind(token: &Token) -> &TokenKind {
    &token.0
}

/// Project the `span` component of a `token`.
#[inline(always)]
fn span(token: &Token) -> &logos::Span {
    &token.1
}

/// Print a token sequence for debugging purposes.
#[allow(unused)]
pub(crate) fn debug(tag: &str, source: &str, tokens: &[Token]) {
    println!("<{tag}>");
    for (i, (kind, span)) in tokens.iter().enumerate() {
        let text = &source[span.clone()];
        println!("{i:03} at: span={span:03?} - kind={kind:?} - text={text:?}");
    }
    println!("</{tag}>");
}
