//! Core library for turning Chinese voice transcripts into invoices.
//!
//! This crate provides:
//! - Chinese numeral and currency conversion (两百三十五, 二十元三角)
//! - Rule-based extraction of date, customer, description, quantity and prices
//! - Cross-field reconciliation and confidence scoring
//! - An intake gate that screens transcripts and drafts invoices

#[macro_use]
mod macros;

pub mod error;
pub mod intake;
pub mod invoice;
pub mod models;
pub mod numerals;

pub use error::{ExtractionError, IntakeError, Result, TallyError};
pub use intake::{CustomerDirectory, InvoiceIntake};
pub use invoice::{InvoiceParser, Segmenter, VoiceInvoiceParser, WhitespaceSegmenter};
pub use models::config::TallyConfig;
pub use models::invoice::{CustomerMatch, DraftStatus, InvoiceDraft, LineAmounts, ParsedInvoice};
pub use numerals::{convert, convert_money, extract_amounts, extract_numbers, AmountMention};
