//! Voice transcript invoice extraction.

mod parser;
pub mod reconcile;
pub mod rules;
pub mod segment;

pub use parser::VoiceInvoiceParser;
pub use reconcile::{reconcile, score_confidence};
pub use segment::{Segmenter, Transcript, WhitespaceSegmenter};

use crate::error::ExtractionError;
use crate::models::invoice::ParsedInvoice;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for invoice parsing.
pub trait InvoiceParser {
    /// Parse one transcript into an invoice.
    ///
    /// Unrecognized fields take their defaults; only internal faults are errors.
    fn parse(&self, text: &str) -> Result<ParsedInvoice>;
}
