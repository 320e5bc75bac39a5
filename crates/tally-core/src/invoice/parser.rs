//! Voice transcript invoice parser.

use std::sync::Once;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use tracing::{debug, error, info};

use crate::models::config::ParserConfig;
use crate::models::invoice::{LineAmounts, ParsedInvoice, DEFAULT_DESCRIPTION, UNKNOWN_CUSTOMER};

use super::reconcile::{reconcile, score_confidence};
use super::rules::{
    CustomerExtractor, DateExtractor, DescriptionExtractor, ExtractionMatch, FieldExtractor,
    QuantityExtractor, TotalPriceExtractor, UnitPriceExtractor,
};
use super::segment::{Segmenter, Transcript, WhitespaceSegmenter};
use super::{InvoiceParser, Result};

static INIT: Once = Once::new();

/// Rule-based parser turning one transcript into one [`ParsedInvoice`].
pub struct VoiceInvoiceParser {
    /// Tokenizer for preprocessed text.
    segmenter: Box<dyn Segmenter>,
    /// Date that relative keywords resolve against. `None` reads the clock.
    reference_date: Option<NaiveDate>,
}

impl VoiceInvoiceParser {
    /// Create a parser with whitespace tokenization and the local date.
    pub fn new() -> Self {
        Self {
            segmenter: Box::new(WhitespaceSegmenter),
            reference_date: None,
        }
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &ParserConfig) -> Self {
        let parser = Self::new();
        match config.reference_date {
            Some(date) => parser.with_reference_date(date),
            None => parser,
        }
    }

    /// Use a different tokenizer.
    pub fn with_segmenter(mut self, segmenter: Box<dyn Segmenter>) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Pin "today" to a fixed date.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// One-time setup hook. Safe to call any number of times.
    pub fn initialize(&self) {
        INIT.call_once(|| debug!("voice parser ready ({} segmenter)", self.segmenter.name()));
    }

    /// The date relative keywords and missing dates resolve to.
    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Parse a transcript, logging and swallowing internal faults.
    pub fn parse_voice_input(&self, text: &str) -> Option<ParsedInvoice> {
        match self.parse(text) {
            Ok(invoice) => Some(invoice),
            Err(e) => {
                error!("Failed to parse transcript {:?}: {}", text, e);
                None
            }
        }
    }
}

impl Default for VoiceInvoiceParser {
    fn default() -> Self {
        Self::new()
    }
}

fn resolved<T>(field: &str, found: Option<ExtractionMatch<T>>) -> Option<T>
where
    T: std::fmt::Debug,
{
    match found {
        Some(m) => {
            debug!("{} = {:?} via {} ({:?})", field, m.value, m.rule, m.source);
            Some(m.value)
        }
        None => {
            debug!("{} not found, using default", field);
            None
        }
    }
}

impl InvoiceParser for VoiceInvoiceParser {
    fn parse(&self, text: &str) -> Result<ParsedInvoice> {
        let transcript = Transcript::new(text, &*self.segmenter);
        let today = self.today();

        let date = resolved("date", DateExtractor::new(today).extract(&transcript)?).unwrap_or(today);
        let customer_name = resolved("customer", CustomerExtractor::new().extract(&transcript))
            .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string());
        let description = resolved("description", DescriptionExtractor::new().extract(&transcript))
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());
        let quantity = resolved("quantity", QuantityExtractor::new().extract(&transcript))
            .unwrap_or(Decimal::ONE);
        let unit_price = resolved("unit_price", UnitPriceExtractor::new().extract(&transcript))
            .unwrap_or(Decimal::ZERO);
        let total_price = resolved("total_price", TotalPriceExtractor::new().extract(&transcript))
            .unwrap_or(Decimal::ZERO);

        let amounts = reconcile(LineAmounts::new(quantity, unit_price, total_price));
        let confidence = score_confidence(&customer_name, &description, &amounts);

        let quantity = if amounts.quantity.is_zero() {
            Decimal::ONE
        } else {
            amounts.quantity.normalize()
        };

        info!(
            "Parsed transcript: customer={} description={} total={} confidence={:.2}",
            customer_name, description, amounts.total_price, confidence
        );

        Ok(ParsedInvoice {
            date,
            customer_name,
            description,
            quantity,
            unit_price: amounts.unit_price.normalize(),
            total_price: amounts.total_price.normalize(),
            confidence,
        })
    }
}
