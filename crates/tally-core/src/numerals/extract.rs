//! Scanning free text for number and money mentions.

use lazy_static::lazy_static;
use regex::{Match, Regex};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::convert::{convert, convert_money, parse_arabic, ARABIC_NUMBER};
use super::tables::MEASURE_SUFFIXES;

lazy_static! {
    static ref CHINESE_NUMERAL_RUN: Regex = Regex::new(concat!(
        r"(?:", price_keyword!(), r"\s*)?(", numeral_class!(), "+)"
    ))
    .unwrap();

    static ref ARABIC_AMOUNT: Regex = Regex::new(concat!(
        r"(?:", price_keyword!(), r"\s*)?(?:", decimal_literal!(), r"\s*", money_unit_class!(), ")+"
    ))
    .unwrap();

    static ref CHINESE_AMOUNT: Regex = Regex::new(concat!(
        r"(?:", price_keyword!(), r"\s*)?(?:", numeral_class!(), r"+\s*", money_unit_class!(), ")+"
    ))
    .unwrap();
}

/// Characters of surrounding text kept on each side of an amount.
const CONTEXT_CHARS: usize = 10;

/// A money amount found in text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountMention {
    /// Value in yuan.
    pub amount: Decimal,
    /// Text around the match.
    pub context: String,
}

/// Every number mentioned in a text, Arabic literals first.
///
/// Iteration is lazy and may be repeated.
#[derive(Debug, Clone, Copy)]
pub struct NumberMentions<'t> {
    text: &'t str,
}

impl<'t> NumberMentions<'t> {
    pub fn iter(self) -> impl Iterator<Item = Decimal> + 't {
        let text = self.text;

        let arabic = ARABIC_NUMBER
            .find_iter(text)
            .map(|m| parse_arabic(m.as_str()));

        let chinese = CHINESE_NUMERAL_RUN
            .captures_iter(text)
            .map(|caps| convert(&caps[1]))
            .filter(|n| *n > Decimal::ZERO);

        arabic.chain(chinese)
    }
}

impl<'t> IntoIterator for NumberMentions<'t> {
    type Item = Decimal;
    type IntoIter = Box<dyn Iterator<Item = Decimal> + 't>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Every money amount mentioned in a text, Arabic amounts first.
///
/// Iteration is lazy and may be repeated.
#[derive(Debug, Clone, Copy)]
pub struct AmountMentions<'t> {
    text: &'t str,
}

impl<'t> AmountMentions<'t> {
    pub fn iter(self) -> impl Iterator<Item = AmountMention> + 't {
        let text = self.text;

        ARABIC_AMOUNT
            .find_iter(text)
            .chain(CHINESE_AMOUNT.find_iter(text))
            .filter(move |m| !ends_in_measure(text, m))
            .map(move |m| AmountMention {
                amount: convert_money(m.as_str()),
                context: context_around(text, m.start(), m.end()),
            })
    }
}

impl<'t> IntoIterator for AmountMentions<'t> {
    type Item = AmountMention;
    type IntoIter = Box<dyn Iterator<Item = AmountMention> + 't>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Numbers mentioned in `text`: Arabic literals, then Chinese numeral runs
/// (optionally after a price keyword). Chinese runs worth zero are dropped.
pub fn extract_numbers(text: &str) -> NumberMentions<'_> {
    NumberMentions { text }
}

/// Numerals directly followed by one or more currency units, with context.
pub fn extract_amounts(text: &str) -> AmountMentions<'_> {
    AmountMentions { text }
}

/// 分/厘/毫 followed by 米, 升 ... is a measure, not money.
fn ends_in_measure(text: &str, m: &Match<'_>) -> bool {
    let last = m.as_str().chars().next_back();
    let next = text[m.end()..].chars().next();

    matches!(
        (last, next),
        (Some('分' | '厘' | '毫'), Some(c)) if MEASURE_SUFFIXES.contains(&c)
    )
}

fn context_around(text: &str, start: usize, end: usize) -> String {
    let before: usize = text[..start]
        .chars()
        .rev()
        .take(CONTEXT_CHARS)
        .map(char::len_utf8)
        .sum();
    let after: usize = text[end..]
        .chars()
        .take(CONTEXT_CHARS)
        .map(char::len_utf8)
        .sum();

    text[start - before..end + after].trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_extract_numbers_order() {
        let numbers: Vec<Decimal> = extract_numbers("买了三个，单价12元，再加两个和5个").iter().collect();
        assert_eq!(numbers, vec![dec!(12), dec!(5), dec!(3), dec!(2)]);
    }

    #[test]
    fn test_extract_numbers_keyword_prefixed() {
        let numbers: Vec<Decimal> = extract_numbers("单价一百 总价二百").iter().collect();
        assert_eq!(numbers, vec![dec!(100), dec!(200)]);
    }

    #[test]
    fn test_extract_numbers_is_restartable() {
        let mentions = extract_numbers("两个 3.5斤");
        let first: Vec<Decimal> = mentions.iter().collect();
        let second: Vec<Decimal> = mentions.into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![dec!(3.5), dec!(2)]);
    }

    #[test]
    fn test_extract_numbers_empty() {
        assert_eq!(extract_numbers("你好").iter().count(), 0);
        assert_eq!(extract_numbers("零").iter().count(), 0);
    }

    #[test]
    fn test_extract_amounts_compound() {
        let amounts: Vec<AmountMention> = extract_amounts("单价五元三角，总共十五元").iter().collect();
        let values: Vec<Decimal> = amounts.iter().map(|a| a.amount).collect();

        assert_eq!(values, vec![dec!(5.3), dec!(15)]);
        assert_eq!(amounts[0].context, "单价五元三角，总共十五元");
    }

    #[test]
    fn test_extract_amounts_arabic_first() {
        let values: Vec<Decimal> = extract_amounts("十元加上20块和3毛")
            .iter()
            .map(|a| a.amount)
            .collect();
        assert_eq!(values, vec![dec!(20), dec!(0.3), dec!(10)]);
    }

    #[test]
    fn test_extract_amounts_context_window() {
        let text = "今天上午去了很远的地方干活收了一百元然后下午回家休息了一会儿";
        let amounts: Vec<AmountMention> = extract_amounts(text).iter().collect();

        assert_eq!(amounts.len(), 1);
        assert_eq!(amounts[0].amount, dec!(100));
        assert_eq!(amounts[0].context, "了很远的地方干活收了一百元然后下午回家休息了一");
    }

    #[test]
    fn test_extract_amounts_skips_measures() {
        let values: Vec<Decimal> = extract_amounts("管子五十分米，水300毫升，花了8元")
            .iter()
            .map(|a| a.amount)
            .collect();
        assert_eq!(values, vec![dec!(8)]);
    }

    #[test]
    fn test_extract_amounts_none() {
        assert_eq!(extract_amounts("数量两个").iter().count(), 0);
    }
}
