//! Lookup tables for Chinese numerals, currency units and quantity units.

use rust_decimal::Decimal;

/// Digit characters, including formal (banking) forms and 两.
pub const DIGITS: &[(char, u32)] = &[
    ('零', 0),
    ('〇', 0),
    ('一', 1),
    ('壹', 1),
    ('二', 2),
    ('两', 2),
    ('贰', 2),
    ('三', 3),
    ('叁', 3),
    ('四', 4),
    ('肆', 4),
    ('五', 5),
    ('伍', 5),
    ('六', 6),
    ('陆', 6),
    ('七', 7),
    ('柒', 7),
    ('八', 8),
    ('捌', 8),
    ('九', 9),
    ('玖', 9),
];

/// Units below ten thousand; they scale the digit before them.
pub const SMALL_UNITS: &[(char, u32)] = &[
    ('十', 10),
    ('拾', 10),
    ('百', 100),
    ('佰', 100),
    ('千', 1_000),
    ('仟', 1_000),
];

/// Section units; they scale everything accumulated since the last section.
pub const LARGE_UNITS: &[(char, u32)] = &[('万', 10_000), ('亿', 100_000_000)];

/// Currency units relative to one yuan.
pub const MONEY_UNITS: &[(char, Decimal)] = &[
    ('元', Decimal::ONE),
    ('块', Decimal::ONE),
    ('圆', Decimal::ONE),
    ('角', Decimal::from_parts(1, 0, 0, false, 1)),
    ('毛', Decimal::from_parts(1, 0, 0, false, 1)),
    ('分', Decimal::from_parts(1, 0, 0, false, 2)),
    ('厘', Decimal::from_parts(1, 0, 0, false, 3)),
    ('毫', Decimal::from_parts(1, 0, 0, false, 4)),
];

/// Quantity units and the factor applied to the counted value.
pub const QUANTITY_UNITS: &[(&str, Decimal)] = &[
    ("个", Decimal::ONE),
    ("件", Decimal::ONE),
    ("台", Decimal::ONE),
    ("套", Decimal::ONE),
    ("只", Decimal::ONE),
    ("支", Decimal::ONE),
    ("瓶", Decimal::ONE),
    ("盒", Decimal::ONE),
    ("箱", Decimal::ONE),
    ("斤", Decimal::from_parts(5, 0, 0, false, 1)),
    ("公斤", Decimal::ONE),
    ("千克", Decimal::ONE),
    ("克", Decimal::from_parts(1, 0, 0, false, 3)),
    ("吨", Decimal::from_parts(1_000, 0, 0, false, 0)),
    ("米", Decimal::ONE),
    ("厘米", Decimal::from_parts(1, 0, 0, false, 2)),
    ("分米", Decimal::from_parts(1, 0, 0, false, 1)),
    ("千米", Decimal::from_parts(1_000, 0, 0, false, 0)),
    ("升", Decimal::ONE),
    ("毫升", Decimal::from_parts(1, 0, 0, false, 3)),
    ("平方米", Decimal::ONE),
    ("立方米", Decimal::ONE),
];

/// Characters that turn a preceding 分/厘/毫 into a measure (分米, 毫升, 分钟 ...).
pub const MEASURE_SUFFIXES: &[char] = &['米', '升', '克', '钟'];

fn lookup<K: PartialEq + Copy, V: Copy>(table: &[(K, V)], key: K) -> Option<V> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

pub fn digit_value(c: char) -> Option<u32> {
    lookup(DIGITS, c)
}

pub fn small_unit(c: char) -> Option<u32> {
    lookup(SMALL_UNITS, c)
}

pub fn large_unit(c: char) -> Option<u32> {
    lookup(LARGE_UNITS, c)
}

pub fn money_unit(c: char) -> Option<Decimal> {
    lookup(MONEY_UNITS, c)
}

/// Factor for a quantity unit; unknown units count as 1.
pub fn quantity_factor(unit: &str) -> Decimal {
    lookup(QUANTITY_UNITS, unit).unwrap_or(Decimal::ONE)
}

/// Whether `c` is a digit or unit character understood by [`super::convert`].
pub fn is_numeral_char(c: char) -> bool {
    digit_value(c).is_some() || small_unit(c).is_some() || large_unit(c).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_formal_variants_match_plain_digits() {
        assert_eq!(digit_value('贰'), digit_value('二'));
        assert_eq!(digit_value('两'), Some(2));
        assert_eq!(small_unit('佰'), Some(100));
        assert_eq!(large_unit('亿'), Some(100_000_000));
    }

    #[test]
    fn test_money_units() {
        assert_eq!(money_unit('块'), Some(dec!(1)));
        assert_eq!(money_unit('毛'), Some(dec!(0.1)));
        assert_eq!(money_unit('毫'), Some(dec!(0.0001)));
        assert_eq!(money_unit('个'), None);
    }

    #[test]
    fn test_quantity_factors() {
        assert_eq!(quantity_factor("斤"), dec!(0.5));
        assert_eq!(quantity_factor("吨"), dec!(1000));
        assert_eq!(quantity_factor("毫升"), dec!(0.001));
        assert_eq!(quantity_factor("打"), dec!(1));
    }

    #[test]
    fn test_numeral_chars() {
        assert!(is_numeral_char('〇'));
        assert!(is_numeral_char('万'));
        assert!(!is_numeral_char('元'));
    }
}
