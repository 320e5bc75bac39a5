//! Transcript normalization and tokenization.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::error::ExtractionError;

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(
        r#"[\s，。！？；：、,!?;:"'“”‘’]+"#
    ).unwrap();
}

/// Splits normalized transcript text into tokens.
///
/// Plug in a dictionary-based Chinese segmenter here; extraction only
/// relies on tokens being joined back with single spaces.
pub trait Segmenter: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str {
        "custom"
    }

    fn segment(&self, text: &str) -> Result<Vec<String>, ExtractionError>;
}

/// Splits on whitespace only.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceSegmenter;

impl Segmenter for WhitespaceSegmenter {
    fn name(&self) -> &str {
        "whitespace"
    }

    fn segment(&self, text: &str) -> Result<Vec<String>, ExtractionError> {
        Ok(split_whitespace(text))
    }
}

fn split_whitespace(text: &str) -> Vec<String> {
    text.split_whitespace().map(String::from).collect()
}

/// Collapse punctuation and whitespace runs into single spaces.
///
/// The ASCII period survives for decimals and the hyphen for ISO dates.
pub fn preprocess(text: &str) -> String {
    SEPARATORS.replace_all(text, " ").trim().to_string()
}

/// A normalized, tokenized transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    tokens: Vec<String>,
    text: String,
}

impl Transcript {
    /// Normalize `raw` and split it with `segmenter`.
    ///
    /// A failing segmenter falls back to whitespace splitting.
    pub fn new(raw: &str, segmenter: &dyn Segmenter) -> Self {
        let cleaned = preprocess(raw);

        let mut tokens = segmenter.segment(&cleaned).unwrap_or_else(|e| {
            warn!("{} segmenter failed, using whitespace split: {}", segmenter.name(), e);
            split_whitespace(&cleaned)
        });
        tokens.retain(|t| !t.trim().is_empty());

        let text = tokens.join(" ");
        Self { tokens, text }
    }

    /// Tokens joined with single spaces.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
