//! Quantity extraction.

use regex::Captures;
use rust_decimal::Decimal;

use super::patterns::{
    QUANTITY_LABELED, QUANTITY_LABELED_CN, QUANTITY_WITH_UNIT, QUANTITY_WITH_UNIT_CN,
};
use super::{first_match, ExtractionMatch, FieldExtractor, PatternRule};
use crate::invoice::segment::Transcript;
use crate::numerals::{convert, extract_numbers, tables::quantity_factor};

/// Fallback numbers at or above this are assumed to be prices.
const FALLBACK_CEILING: Decimal = Decimal::ONE_THOUSAND;

/// Value in group 1, scaled by the unit in group 2 when present.
fn scaled(caps: &Captures<'_>) -> Option<Decimal> {
    let value = convert(caps.get(1)?.as_str());
    match caps.get(2) {
        Some(unit) => value.checked_mul(quantity_factor(unit.as_str())),
        None => Some(value),
    }
}

fn scaled_positive(caps: &Captures<'_>) -> Option<Decimal> {
    scaled(caps).filter(|q| *q > Decimal::ZERO)
}

lazy_static::lazy_static! {
    static ref RULES: Vec<PatternRule<Decimal>> = vec![
        PatternRule { name: "labeled", pattern: &QUANTITY_LABELED, handler: scaled },
        PatternRule { name: "with_unit", pattern: &QUANTITY_WITH_UNIT, handler: scaled },
        PatternRule { name: "labeled_cn", pattern: &QUANTITY_LABELED_CN, handler: scaled_positive },
        PatternRule { name: "with_unit_cn", pattern: &QUANTITY_WITH_UNIT_CN, handler: scaled_positive },
    ];
}

/// Quantity extractor.
///
/// Falls back to the smallest number below 1000 anywhere in the text.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuantityExtractor;

impl QuantityExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for QuantityExtractor {
    type Output = Decimal;

    fn extract(&self, transcript: &Transcript) -> Option<ExtractionMatch<Decimal>> {
        let text = transcript.text();

        first_match(&RULES, text).or_else(|| {
            extract_numbers(text)
                .iter()
                .filter(|n| *n < FALLBACK_CEILING)
                .min()
                .map(|n| ExtractionMatch::new(n, "smallest_number", text))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::segment::WhitespaceSegmenter;
    use rust_decimal_macros::dec;

    fn extract(text: &str) -> Option<ExtractionMatch<Decimal>> {
        QuantityExtractor::new().extract(&Transcript::new(text, &WhitespaceSegmenter))
    }

    fn quantity(text: &str) -> Option<Decimal> {
        extract(text).map(|m| m.value)
    }

    #[test]
    fn test_labeled_arabic() {
        let m = extract("数量 12 单价5元").unwrap();
        assert_eq!(m.value, dec!(12));
        assert_eq!(m.rule, "labeled");
    }

    #[test]
    fn test_unit_factors() {
        assert_eq!(quantity("买了3斤苹果"), Some(dec!(1.5)));
        assert_eq!(quantity("2吨钢材"), Some(dec!(2000)));
        assert_eq!(quantity("电线50厘米"), Some(dec!(0.50)));
        assert_eq!(quantity("水管3.5米"), Some(dec!(3.5)));
    }

    #[test]
    fn test_chinese_quantities() {
        let m = extract("数量两个 单价一百元").unwrap();
        assert_eq!(m.value, dec!(2));
        assert_eq!(m.rule, "labeled_cn");

        assert_eq!(quantity("装了三台空调"), Some(dec!(3)));
        assert_eq!(quantity("数量十五"), Some(dec!(15)));
    }

    #[test]
    fn test_zero_chinese_quantity_is_skipped() {
        // 零个 is rejected and the number fallback finds 五
        assert_eq!(quantity("零个 五件"), Some(dec!(5)));
    }

    #[test]
    fn test_fallback_smallest_number_below_ceiling() {
        let m = extract("单价1200 另外 30 还有 8").unwrap();
        assert_eq!(m.value, dec!(8));
        assert_eq!(m.rule, "smallest_number");

        assert_eq!(quantity("5000"), None);
        assert_eq!(quantity("你好"), None);
    }
}
