//! Scalar conversion of numeral and money text.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

use super::tables::{digit_value, large_unit, money_unit, small_unit};

lazy_static! {
    pub(crate) static ref ARABIC_NUMBER: Regex = Regex::new(decimal_literal!()).unwrap();
}

const TEN: Decimal = Decimal::TEN;

/// Convert numeral text to a number.
///
/// An Arabic literal anywhere in `text` wins over Chinese numerals. Otherwise
/// the Chinese digits and units are evaluated and every other character is
/// skipped. Malformed or empty input gives zero.
pub fn convert(text: &str) -> Decimal {
    if let Some(m) = ARABIC_NUMBER.find(text) {
        return parse_arabic(m.as_str());
    }

    evaluate(text).unwrap_or(Decimal::ZERO)
}

/// Convert a money expression such as "五元三角" or "12块5毛" to yuan.
///
/// Every currency unit closes a segment; the numeral text of the segment is
/// converted and scaled by the unit. Text without a unit gives zero.
pub fn convert_money(text: &str) -> Decimal {
    let mut total = Decimal::ZERO;
    let mut segment_start = 0;

    for (i, c) in text.char_indices() {
        let Some(unit) = money_unit(c) else {
            continue;
        };

        let value = convert(&text[segment_start..i]);
        match value.checked_mul(unit).and_then(|v| total.checked_add(v)) {
            Some(sum) => total = sum,
            None => return Decimal::ZERO,
        }
        segment_start = i + c.len_utf8();
    }

    total
}

pub(crate) fn parse_arabic(literal: &str) -> Decimal {
    Decimal::from_str(literal).unwrap_or(Decimal::ZERO)
}

/// Positional evaluation. `None` on overflow.
fn evaluate(text: &str) -> Option<Decimal> {
    // Settled 万/亿 groups.
    let mut total = Decimal::ZERO;
    // Value below the next 万.
    let mut section = Decimal::ZERO;
    // Digits not yet scaled by a unit.
    let mut pending: Option<Decimal> = None;

    for c in text.chars() {
        if let Some(d) = digit_value(c) {
            let d = Decimal::from(d);
            pending = Some(match pending {
                // 二零二四: digits read one by one.
                Some(run) => run.checked_mul(TEN)?.checked_add(d)?,
                None => d,
            });
        } else if let Some(unit) = small_unit(c) {
            let n = pending.take().unwrap_or(Decimal::ONE);
            section = section.checked_add(n.checked_mul(Decimal::from(unit))?)?;
        } else if let Some(unit) = large_unit(c) {
            let unit = Decimal::from(unit);
            let group = section.checked_add(pending.take().unwrap_or_default())?;
            section = Decimal::ZERO;

            if unit > Decimal::from(10_000) {
                // 亿 scales the settled total as well (一万亿).
                let base = total.checked_add(group)?;
                let base = if base.is_zero() { Decimal::ONE } else { base };
                total = base.checked_mul(unit)?;
            } else {
                let group = if group.is_zero() && total.is_zero() {
                    Decimal::ONE
                } else {
                    group
                };
                total = total.checked_add(group.checked_mul(unit)?)?;
            }
        }
    }

    total
        .checked_add(section)?
        .checked_add(pending.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_convert_units() {
        assert_eq!(convert("十"), dec!(10));
        assert_eq!(convert("十五"), dec!(15));
        assert_eq!(convert("二十五"), dec!(25));
        assert_eq!(convert("一百二十三"), dec!(123));
        assert_eq!(convert("两千"), dec!(2000));
        assert_eq!(convert("一万五千"), dec!(15000));
    }

    #[test]
    fn test_convert_zero_and_positional() {
        assert_eq!(convert("一百零五"), dec!(105));
        assert_eq!(convert("二零二四"), dec!(2024));
        assert_eq!(convert("零"), dec!(0));
    }

    #[test]
    fn test_convert_large_units() {
        assert_eq!(convert("万"), dec!(10000));
        assert_eq!(convert("十万"), dec!(100000));
        assert_eq!(convert("一亿五千万"), dec!(150000000));
        assert_eq!(convert("三亿二万"), dec!(300020000));
        assert_eq!(convert("一万亿"), dec!(1000000000000));
    }

    #[test]
    fn test_convert_formal_numerals() {
        assert_eq!(convert("壹仟贰佰"), dec!(1200));
        assert_eq!(convert("叁拾伍"), dec!(35));
    }

    #[test]
    fn test_convert_prefers_arabic() {
        assert_eq!(convert("大概3.5个"), dec!(3.5));
        assert_eq!(convert("一百20"), dec!(20));
        assert_eq!(convert("单价 12"), dec!(12));
    }

    #[test]
    fn test_convert_skips_noise() {
        assert_eq!(convert("两，个"), dec!(2));
        assert_eq!(convert(""), dec!(0));
        assert_eq!(convert("你好"), dec!(0));
    }

    #[test]
    fn test_convert_overflow_is_zero() {
        assert_eq!(convert("亿亿亿亿亿"), dec!(0));
    }

    #[test]
    fn test_convert_money() {
        assert_eq!(convert_money("五元三角"), dec!(5.3));
        assert_eq!(convert_money("十元"), dec!(10));
        assert_eq!(convert_money("五分"), dec!(0.05));
        assert_eq!(convert_money("十二块五毛"), dec!(12.5));
        assert_eq!(convert_money("3元2角1分"), dec!(3.21));
    }

    #[test]
    fn test_convert_money_without_unit() {
        assert_eq!(convert_money("一百"), dec!(0));
        assert_eq!(convert_money(""), dec!(0));
    }

    proptest! {
        #[test]
        fn prop_arabic_literal_wins_in_han_text(
            prefix in "[给张三焊支架客户服务]{0,6}",
            literal in "[0-9]{1,9}(\\.[0-9]{1,4})?",
            suffix in "[个元块米给学校]{0,6}",
        ) {
            let text = format!("{prefix}{literal}{suffix}");
            prop_assert_eq!(convert(&text), Decimal::from_str(&literal).unwrap());
        }
    }
}
