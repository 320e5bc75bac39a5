//! Regex patterns for transcript field extraction.
//!
//! Patterns run against the preprocessed transcript, where punctuation has
//! already collapsed into single spaces.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Absolute dates
    pub static ref DATE_FULL_YEAR: Regex = Regex::new(
        r"([0-9]{4})年([0-9]{1,2})月([0-9]{1,2})日"
    ).unwrap();

    pub static ref DATE_SHORT_YEAR: Regex = Regex::new(
        r"(?:^|[^0-9])([0-9]{2})年([0-9]{1,2})月([0-9]{1,2})日"
    ).unwrap();

    pub static ref DATE_ISO: Regex = Regex::new(
        r"([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})"
    ).unwrap();

    pub static ref DATE_MONTH_DAY: Regex = Regex::new(
        r"(?:^|[^0-9年])([0-9]{1,2})月([0-9]{1,2})日"
    ).unwrap();

    pub static ref DATE_MONTH_DAY_CN: Regex = Regex::new(concat!(
        "(", numeral_class!(), "{1,3})月(", numeral_class!(), "{1,3})[日号]"
    )).unwrap();

    // Customer names
    pub static ref CUSTOMER_SERVED: Regex = Regex::new(
        r"给\s*(.+?)\s*(?:做|干|搞|提供|服务|焊|安装|维修|施工|购买|买了|要)"
    ).unwrap();

    pub static ref CUSTOMER_BOUGHT: Regex = Regex::new(
        r"(.+?)(?:购买|买了)\s*[0-9]"
    ).unwrap();

    pub static ref CUSTOMER_ORDERED: Regex = Regex::new(
        r"(.+?)(?:要了|要)\s*[0-9]"
    ).unwrap();

    pub static ref CUSTOMER_LABELED: Regex = Regex::new(
        r"客户\s*(.+?)(?:\s|，|。|$)"
    ).unwrap();

    pub static ref CUSTOMER_INSTITUTION: Regex = Regex::new(
        r"(.+?)(?:公司|厂|店|馆|中心|小学|中学|大学|医院)"
    ).unwrap();

    pub static ref CUSTOMER_SHORT_NAME: Regex = Regex::new(
        r"([\x{4e00}-\x{9fa5}]{2,3})\s*(?:购买|买了|要了|要|做|干|搞|焊|安装|维修|施工)"
    ).unwrap();

    pub static ref HAN_NAME_TOKEN: Regex = Regex::new(
        r"^[\x{4e00}-\x{9fa5}]{2,3}$"
    ).unwrap();

    // Service descriptions
    pub static ref DESCRIPTION_AFTER_VERB: Regex = Regex::new(
        r"(?:焊|安装|维修|施工|做|干|搞)了?\s*(.+?)\s*(?:数量|单价|价格|总价|合计|总共|$)"
    ).unwrap();

    pub static ref DESCRIPTION_BEFORE_VERB: Regex = Regex::new(
        r"(.+?)[\s，。](?:焊|安装|维修|施工|做|干|搞)"
    ).unwrap();

    // Quantities
    pub static ref QUANTITY_LABELED: Regex = Regex::new(concat!(
        r"数量\s*(", decimal_literal!(), ")"
    )).unwrap();

    pub static ref QUANTITY_WITH_UNIT: Regex = Regex::new(concat!(
        "(", decimal_literal!(), r")\s*(", quantity_unit!(), ")"
    )).unwrap();

    pub static ref QUANTITY_LABELED_CN: Regex = Regex::new(concat!(
        r"数量\s*(", numeral_class!(), r"+)(?:\s*(", quantity_unit!(), "))?"
    )).unwrap();

    pub static ref QUANTITY_WITH_UNIT_CN: Regex = Regex::new(concat!(
        "(", numeral_class!(), r"+)\s*(", quantity_unit!(), ")"
    )).unwrap();

    // Unit prices
    pub static ref UNIT_PRICE_LABELED: Regex = Regex::new(concat!(
        r"单价\s*(", decimal_literal!(), r")\s*(?:元|块|圆)"
    )).unwrap();

    pub static ref UNIT_PRICE_PRICED: Regex = Regex::new(concat!(
        r"价格\s*(", decimal_literal!(), r")\s*(?:元|块|圆)"
    )).unwrap();

    pub static ref UNIT_PRICE_PER_ITEM: Regex = Regex::new(concat!(
        "(", decimal_literal!(), r")\s*(?:元|块|圆)\s*(?:每|个|件|台|套)"
    )).unwrap();

    pub static ref UNIT_PRICE_LABELED_CN: Regex = Regex::new(concat!(
        r"单价\s*(", numeral_class!(), r"+)\s*(?:元|块|圆)"
    )).unwrap();

    pub static ref UNIT_PRICE_PRICED_CN: Regex = Regex::new(concat!(
        r"价格\s*(", numeral_class!(), r"+)\s*(?:元|块|圆)"
    )).unwrap();

    pub static ref UNIT_PRICE_PER_ITEM_CN: Regex = Regex::new(concat!(
        "(", numeral_class!(), r"+)\s*(?:元|块|圆)\s*(?:每|个|件|台|套)"
    )).unwrap();

    // Totals
    pub static ref TOTAL_LABELED: Regex = Regex::new(concat!(
        r"总价\s*(", decimal_literal!(), r")\s*(?:元|块|圆)"
    )).unwrap();

    pub static ref TOTAL_SUMMED: Regex = Regex::new(concat!(
        r"合计\s*(", decimal_literal!(), r")\s*(?:元|块|圆)"
    )).unwrap();

    pub static ref TOTAL_ALTOGETHER: Regex = Regex::new(concat!(
        r"总共\s*(", decimal_literal!(), r")\s*(?:元|块|圆)"
    )).unwrap();

    pub static ref TOTAL_TRAILING: Regex = Regex::new(concat!(
        "(", decimal_literal!(), r")\s*(?:元|块|圆)\s*(?:总|合计|共)"
    )).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_served_stops_at_verb() {
        let caps = CUSTOMER_SERVED.captures("昨天给中心小学焊支架 数量两个").unwrap();
        assert_eq!(&caps[1], "中心小学");
    }

    #[test]
    fn test_description_runs_to_keyword_or_end() {
        let caps = DESCRIPTION_AFTER_VERB.captures("焊支架 数量两个").unwrap();
        assert_eq!(&caps[1], "支架");

        let caps = DESCRIPTION_AFTER_VERB.captures("安装了空调").unwrap();
        assert_eq!(&caps[1], "空调");
    }

    #[test]
    fn test_quantity_unit_prefers_longest_spelling() {
        let caps = QUANTITY_WITH_UNIT.captures("水管3厘米").unwrap();
        assert_eq!(&caps[2], "厘米");

        let caps = QUANTITY_WITH_UNIT.captures("地板20平方米").unwrap();
        assert_eq!(&caps[2], "平方米");
    }

    #[test]
    fn test_chinese_month_day() {
        let caps = DATE_MONTH_DAY_CN.captures("十月十五号").unwrap();
        assert_eq!(&caps[1], "十");
        assert_eq!(&caps[2], "十五");
    }
}
