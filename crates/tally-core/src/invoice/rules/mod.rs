//! Rule-based field extractors for voice transcripts.
//!
//! Each extractor walks an ordered rule list and keeps the first rule that
//! produces a value, so list order is extraction priority.

pub mod customer;
pub mod dates;
pub mod description;
pub mod patterns;
pub mod prices;
pub mod quantity;

pub use customer::CustomerExtractor;
pub use dates::DateExtractor;
pub use description::DescriptionExtractor;
pub use prices::{TotalPriceExtractor, UnitPriceExtractor};
pub use quantity::QuantityExtractor;

use regex::{Captures, Regex};

use super::segment::Transcript;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from a transcript.
    fn extract(&self, transcript: &Transcript) -> Option<ExtractionMatch<Self::Output>>;
}

/// A resolved field and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the rule that fired.
    pub rule: &'static str,
    /// Position in the transcript text, for pattern rules.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: &'static str, source: impl Into<String>) -> Self {
        Self {
            value,
            rule,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// A named pattern and the handler that turns its captures into a value.
///
/// The handler may reject a match (for example a numeral worth zero); the
/// rule then yields nothing and the next rule is tried.
pub struct PatternRule<T> {
    pub name: &'static str,
    pub pattern: &'static Regex,
    pub handler: fn(&Captures<'_>) -> Option<T>,
}

impl<T> PatternRule<T> {
    /// Apply the rule to the first match of its pattern.
    pub fn apply(&self, text: &str) -> Option<ExtractionMatch<T>> {
        let caps = self.pattern.captures(text)?;
        let value = (self.handler)(&caps)?;
        let whole = caps.get(0)?;

        Some(
            ExtractionMatch::new(value, self.name, whole.as_str())
                .with_position(whole.start(), whole.end()),
        )
    }
}

/// First value produced by `rules`, in order.
pub fn first_match<T>(rules: &[PatternRule<T>], text: &str) -> Option<ExtractionMatch<T>> {
    rules.iter().find_map(|rule| rule.apply(text))
}

/// Trim `span` and drop one leading filler word. Empty results are rejected.
pub(crate) fn strip_filler(span: &str, fillers: &[&str]) -> Option<String> {
    let span = span.trim();
    let span = fillers
        .iter()
        .find_map(|filler| span.strip_prefix(filler))
        .unwrap_or(span)
        .trim();

    (!span.is_empty()).then(|| span.to_string())
}
