//! Unit price and total price extraction.

use regex::Captures;
use rust_decimal::Decimal;

use super::patterns::{
    TOTAL_ALTOGETHER, TOTAL_LABELED, TOTAL_SUMMED, TOTAL_TRAILING, UNIT_PRICE_LABELED,
    UNIT_PRICE_LABELED_CN, UNIT_PRICE_PER_ITEM, UNIT_PRICE_PER_ITEM_CN, UNIT_PRICE_PRICED,
    UNIT_PRICE_PRICED_CN,
};
use super::{first_match, ExtractionMatch, FieldExtractor, PatternRule};
use crate::invoice::segment::Transcript;
use crate::numerals::{convert, extract_amounts};

/// Fallback amounts at or above this are assumed to be totals.
const UNIT_PRICE_CEILING: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

fn amount(caps: &Captures<'_>) -> Option<Decimal> {
    Some(convert(caps.get(1)?.as_str()))
}

fn positive_amount(caps: &Captures<'_>) -> Option<Decimal> {
    amount(caps).filter(|a| *a > Decimal::ZERO)
}

lazy_static::lazy_static! {
    static ref UNIT_PRICE_RULES: Vec<PatternRule<Decimal>> = vec![
        PatternRule { name: "labeled", pattern: &UNIT_PRICE_LABELED, handler: amount },
        PatternRule { name: "priced", pattern: &UNIT_PRICE_PRICED, handler: amount },
        PatternRule { name: "per_item", pattern: &UNIT_PRICE_PER_ITEM, handler: amount },
        PatternRule { name: "labeled_cn", pattern: &UNIT_PRICE_LABELED_CN, handler: positive_amount },
        PatternRule { name: "priced_cn", pattern: &UNIT_PRICE_PRICED_CN, handler: positive_amount },
        PatternRule { name: "per_item_cn", pattern: &UNIT_PRICE_PER_ITEM_CN, handler: positive_amount },
    ];

    static ref TOTAL_RULES: Vec<PatternRule<Decimal>> = vec![
        PatternRule { name: "labeled", pattern: &TOTAL_LABELED, handler: amount },
        PatternRule { name: "summed", pattern: &TOTAL_SUMMED, handler: amount },
        PatternRule { name: "altogether", pattern: &TOTAL_ALTOGETHER, handler: amount },
        PatternRule { name: "trailing", pattern: &TOTAL_TRAILING, handler: amount },
    ];
}

/// Unit price extractor.
///
/// After the keyword rules, takes the first money amount in text that is
/// plausible as a unit price.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnitPriceExtractor;

impl UnitPriceExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for UnitPriceExtractor {
    type Output = Decimal;

    fn extract(&self, transcript: &Transcript) -> Option<ExtractionMatch<Decimal>> {
        let text = transcript.text();

        first_match(&UNIT_PRICE_RULES, text).or_else(|| {
            extract_amounts(text)
                .iter()
                .find(|m| m.amount > Decimal::ZERO && m.amount < UNIT_PRICE_CEILING)
                .map(|m| ExtractionMatch::new(m.amount, "first_amount", m.context))
        })
    }
}

/// Total price extractor. Arabic numerals only.
#[derive(Debug, Default, Clone, Copy)]
pub struct TotalPriceExtractor;

impl TotalPriceExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for TotalPriceExtractor {
    type Output = Decimal;

    fn extract(&self, transcript: &Transcript) -> Option<ExtractionMatch<Decimal>> {
        first_match(&TOTAL_RULES, transcript.text())
    }
}
