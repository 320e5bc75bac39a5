//! Error types for the tally-core library.

use thiserror::Error;

use crate::models::invoice::ParsedInvoice;

/// Main error type for the tally library.
#[derive(Error, Debug)]
pub enum TallyError {
    /// Transcript extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Transcript was rejected before an invoice draft could be built.
    #[error("intake error: {0}")]
    Intake(#[from] IntakeError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while running the extraction pipeline.
///
/// Unresolved fields are not errors; they fall back to sentinel defaults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// A segmenter could not split the transcript.
    #[error("segmentation failed: {0}")]
    Segmentation(String),

    /// A relative date reached outside the representable calendar.
    #[error("date {days_back} day(s) before the reference date is out of range")]
    DateOutOfRange { days_back: u64 },
}

/// Reasons a transcript is turned away at intake.
#[derive(Error, Debug, Clone)]
pub enum IntakeError {
    /// Nothing but whitespace was submitted.
    #[error("transcript is empty")]
    EmptyTranscript,

    /// The speech engine reported a failure instead of a transcript.
    #[error("speech recognition failed (transcript contains {marker:?})")]
    RecognitionFailed { marker: String },

    /// The parser hit an internal fault.
    #[error("transcript could not be parsed")]
    Unparseable,

    /// The parse succeeded but is not trustworthy enough to draft.
    #[error("confidence {confidence:.2} is below the threshold {threshold:.2}")]
    LowConfidence {
        confidence: f32,
        threshold: f32,
        parsed: Box<ParsedInvoice>,
    },
}

/// Result type for the tally library.
pub type Result<T> = std::result::Result<T, TallyError>;
