use thiserror::Error;

use crate::config::ReaderConfig;
use crate::line::{tokenize, PixelNumber, TokenKind};
use crate::{kind, span, Token};

use super::{Location, Range, Side, SpecKind};

// Keyword dispatch
// ================

/// A keyword grammar: consumes the tokens after the keyword and produces
/// the typed spec.
type Grammar = fn(&mut Stream<'_>, &ReaderConfig) -> Result<SpecKind, SyntaxError>;

/// Spec keywords and their grammars.
///
/// The dispatcher holds no per-spec-type knowledge; adding a spec type
/// means adding one row here.
const GRAMMARS: &[(&str, Grammar)] = &[
    ("inside", inside),
    ("contains", contains),
    ("near", near),
    ("above", above),
    ("below", below),
    ("width", width),
    ("height", height),
    ("visible", visible),
    ("absent", absent),
];

/// Parse the typed form of a spec line.
///
/// The first token selects the grammar; the grammar consumes the rest.
pub(super) fn spec_kind(text: &str, config: &ReaderConfig) -> Result<SpecKind, SyntaxError> {
    let tokens = tokenize(text);
    let mut stream = Stream::new(&tokens, text);

    let Some(token) = stream.bump() else {
        return Err(SyntaxError::MissingKeyword);
    };
    let keyword = stream.text(&token);

    let Some((_, grammar)) = GRAMMARS.iter().find(|(name, _)| *name == keyword) else {
        return Err(SyntaxError::UnknownKeyword(keyword.to_string()));
    };

    grammar(&mut stream, config)
}

// Token stream
// ============

/// A cursor over the tokens of one spec line (or one clause of it).
struct Stream<'a> {
    tokens: &'a [Token],
    source: &'a str,
    pos: usize,
}

impl<'a> Stream<'a> {
    fn new(tokens: &'a [Token], source: &'a str) -> Self {
        Self {
            tokens,
            source,
            pos: 0,
        }
    }

    /// The next token, without consuming it.
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    /// Consume and return the next token.
    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos)?.clone();
        self.pos += 1;
        Some(token)
    }

    /// Consume the next token iff its source text is exactly `word`.
    fn eat(&mut self, word: &str) -> bool {
        let matched = self.peek().is_some_and(|token| self.text(token) == word);
        if matched {
            self.pos += 1;
        }
        matched
    }

    /// Consume and return all remaining tokens.
    fn take_rest(&mut self) -> &'a [Token] {
        let rest = &self.tokens[self.pos..];
        self.pos = self.tokens.len();
        rest
    }

    /// The source text under a token.
    fn text(&self, token: &Token) -> &'a str {
        &self.source[span(token).clone()]
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

// Keyword grammars
// ================

/// `inside [partly] OBJECT [location (, location)*]`
fn inside(stream: &mut Stream<'_>, config: &ReaderConfig) -> Result<SpecKind, SyntaxError> {
    let partly = stream.eat("partly");
    let object = expect::object_name(stream)?;
    let locations = expect::locations(stream, config)?;

    Ok(SpecKind::Inside {
        object,
        partly,
        locations,
    })
}

/// `contains [partly] OBJECT (, OBJECT)*`
fn contains(stream: &mut Stream<'_>, _config: &ReaderConfig) -> Result<SpecKind, SyntaxError> {
    let partly = stream.eat("partly");

    if stream.is_empty() {
        return Err(SyntaxError::MissingObjectName);
    }

    let mut objects = Vec::new();
    for segment in stream.take_rest().split(util::is_comma) {
        match segment {
            [] => return Err(SyntaxError::MissingObjectName),
            [token] => objects.push(stream.text(token).to_string()),
            tokens => {
                // Object references are single tokens.
                let text = util::enclosing_text(stream.source, tokens);
                return Err(SyntaxError::InvalidObjectName(text.to_string()));
            }
        }
    }

    Ok(SpecKind::Contains { partly, objects })
}

/// `near OBJECT location (, location)*`
fn near(stream: &mut Stream<'_>, config: &ReaderConfig) -> Result<SpecKind, SyntaxError> {
    let object = expect::object_name(stream)?;
    let locations = expect::locations(stream, config)?;

    if locations.is_empty() {
        return Err(SyntaxError::MissingLocationClause);
    }

    Ok(SpecKind::Near { object, locations })
}

/// `above OBJECT [range]`
fn above(stream: &mut Stream<'_>, config: &ReaderConfig) -> Result<SpecKind, SyntaxError> {
    let (object, range) = expect::object_and_range(stream, config)?;
    Ok(SpecKind::Above { object, range })
}

/// `below OBJECT [range]`
fn below(stream: &mut Stream<'_>, config: &ReaderConfig) -> Result<SpecKind, SyntaxError> {
    let (object, range) = expect::object_and_range(stream, config)?;
    Ok(SpecKind::Below { object, range })
}

/// `width range`
fn width(stream: &mut Stream<'_>, config: &ReaderConfig) -> Result<SpecKind, SyntaxError> {
    let range = expect::range(stream, config)?;
    expect::end(stream)?;
    Ok(SpecKind::Width { range })
}

/// `height range`
fn height(stream: &mut Stream<'_>, config: &ReaderConfig) -> Result<SpecKind, SyntaxError> {
    let range = expect::range(stream, config)?;
    expect::end(stream)?;
    Ok(SpecKind::Height { range })
}

/// `visible`
fn visible(stream: &mut Stream<'_>, _config: &ReaderConfig) -> Result<SpecKind, SyntaxError> {
    expect::end(stream)?;
    Ok(SpecKind::Visible)
}

/// `absent`
fn absent(stream: &mut Stream<'_>, _config: &ReaderConfig) -> Result<SpecKind, SyntaxError> {
    expect::end(stream)?;
    Ok(SpecKind::Absent)
}

mod expect {
    use super::*;

    /// Consume the mandatory object-name token.
    ///
    /// Any token but a comma can name an object; `25px` and `to` are odd
    /// but legal element names, so the raw slice is taken verbatim.
    pub(super) fn object_name(stream: &mut Stream<'_>) -> Result<String, SyntaxError> {
        match stream.peek() {
            Some(token) if !matches!(kind(token), TokenKind::Comma) => {
                let name = stream.text(token).to_string();
                stream.bump();
                Ok(name)
            }
            _ => Err(SyntaxError::MissingObjectName),
        }
    }

    /// Consume all remaining tokens as comma-separated location clauses.
    ///
    /// Returns an empty vector when the stream is already exhausted; an
    /// empty clause between commas is an error.
    pub(super) fn locations(
        stream: &mut Stream<'_>,
        config: &ReaderConfig,
    ) -> Result<Vec<Location>, SyntaxError> {
        if stream.is_empty() {
            return Ok(Vec::new());
        }

        let mut locations = Vec::new();
        for segment in stream.take_rest().split(util::is_comma) {
            // Debug detected clause:
            // crate::debug("clause", stream.source, segment);

            let mut clause = Stream::new(segment, stream.source);
            locations.push(location(&mut clause, config)?);
        }

        Ok(locations)
    }

    /// One location clause: a range followed by one or more sides.
    fn location(clause: &mut Stream<'_>, config: &ReaderConfig) -> Result<Location, SyntaxError> {
        if clause.is_empty() {
            return Err(SyntaxError::MissingLocationClause);
        }

        let range = range(clause, config)?;
        let sides = sides(clause)?;

        Ok(Location::new(range, sides))
    }

    /// A range: `N`, `N to M`, or `~N`, each with an optional `px` unit.
    ///
    /// `~N` resolves immediately into `[N - tol, N + tol]` using the
    /// configured tolerance; the second bound of `N to M` must be a plain
    /// number and must not undercut the first.
    pub(super) fn range(
        stream: &mut Stream<'_>,
        config: &ReaderConfig,
    ) -> Result<Range, SyntaxError> {
        let Some(first) = stream.bump() else {
            return Err(SyntaxError::MissingRange);
        };
        let TokenKind::Number(PixelNumber { value, approx }) = *kind(&first) else {
            return Err(SyntaxError::InvalidRange(stream.text(&first).to_string()));
        };

        if approx {
            let tolerance = config.range_approximation();
            return Ok(Range::between(
                value.saturating_sub(tolerance),
                value.saturating_add(tolerance),
            ));
        }

        if !stream.eat("to") {
            return Ok(Range::exact(value));
        }

        let Some(second) = stream.bump() else {
            return Err(SyntaxError::MissingRange);
        };
        let TokenKind::Number(PixelNumber { value: max, approx }) = *kind(&second) else {
            return Err(SyntaxError::InvalidRange(stream.text(&second).to_string()));
        };
        if approx {
            return Err(SyntaxError::InvalidRange(stream.text(&second).to_string()));
        }
        if value > max {
            let text = &stream.source[span(&first).start..span(&second).end];
            return Err(SyntaxError::InvalidRange(text.to_string()));
        }

        Ok(Range::between(value, max))
    }

    /// One or more side names; order kept, duplicates rejected.
    fn sides(stream: &mut Stream<'_>) -> Result<Vec<Side>, SyntaxError> {
        let mut sides = Vec::new();
        while let Some(token) = stream.peek() {
            let text = stream.text(token);
            let Some(side) = Side::from_name(text) else {
                return Err(SyntaxError::UnknownSide(text.to_string()));
            };
            if sides.contains(&side) {
                return Err(SyntaxError::DuplicateSide(text.to_string()));
            }
            sides.push(side);
            stream.bump();
        }

        if sides.is_empty() {
            return Err(SyntaxError::MissingSide);
        }

        Ok(sides)
    }

    /// The shared `OBJECT [range]` tail of the vertical-adjacency specs.
    pub(super) fn object_and_range(
        stream: &mut Stream<'_>,
        config: &ReaderConfig,
    ) -> Result<(String, Option<Range>), SyntaxError> {
        let object = object_name(stream)?;
        if stream.is_empty() {
            return Ok((object, None));
        }

        let range = range(stream, config)?;
        end(stream)?;

        Ok((object, Some(range)))
    }

    /// Reject trailing tokens after a completed grammar.
    pub(super) fn end(stream: &mut Stream<'_>) -> Result<(), SyntaxError> {
        match stream.peek() {
            None => Ok(()),
            Some(token) => Err(SyntaxError::UnexpectedToken(stream.text(token).to_string())),
        }
    }
}

mod util {
    use super::*;

    /// Predicate for splitting a token slice at clause boundaries.
    pub(super) fn is_comma(token: &Token) -> bool {
        matches!(kind(token), TokenKind::Comma)
    }

    /// The verbatim source text covering `tokens`, first to last span.
    pub(super) fn enclosing_text<'a>(source: &'a str, tokens: &[Token]) -> &'a str {
        match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => &source[span(first).start..span(last).end],
            _ => "",
        }
    }
}

// Errors
// ======

/// A malformed spec line.
///
/// The messages are part of the public contract: tools and tests match on
/// them, so each condition keeps a fixed wording with the offending source
/// text as the only moving part.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum SyntaxError {
    #[error("Missing spec keyword")]
    MissingKeyword,
    #[error("Unknown spec keyword: {0}")]
    UnknownKeyword(String),
    #[error("Missing object name")]
    MissingObjectName,
    #[error("Invalid object name: {0}")]
    InvalidObjectName(String),
    #[error("Missing range")]
    MissingRange,
    #[error("Invalid range: {0}")]
    InvalidRange(String),
    #[error("Unknown side: {0}")]
    UnknownSide(String),
    #[error("Duplicate side: {0}")]
    DuplicateSide(String),
    #[error("Missing side for location")]
    MissingSide,
    #[error("Missing location clause")]
    MissingLocationClause,
    #[error("Unexpected token: {0}")]
    UnexpectedToken(String),
}
