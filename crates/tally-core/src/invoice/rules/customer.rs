//! Customer name extraction.

use regex::Captures;

use super::patterns::{
    CUSTOMER_BOUGHT, CUSTOMER_INSTITUTION, CUSTOMER_LABELED, CUSTOMER_ORDERED, CUSTOMER_SERVED,
    CUSTOMER_SHORT_NAME, HAN_NAME_TOKEN,
};
use super::{first_match, strip_filler, ExtractionMatch, FieldExtractor, PatternRule};
use crate::invoice::segment::Transcript;

const FILLERS: &[&str] = &["的", "一个", "了", "是"];

/// Tokens that mark the preceding token as a buyer.
const PURCHASE_TOKENS: &[&str] = &["购买", "买了", "要了", "要", "做", "干", "搞"];

fn captured_name(caps: &Captures<'_>) -> Option<String> {
    strip_filler(caps.get(1)?.as_str(), FILLERS)
}

lazy_static::lazy_static! {
    static ref RULES: Vec<PatternRule<String>> = vec![
        PatternRule { name: "served", pattern: &CUSTOMER_SERVED, handler: captured_name },
        PatternRule { name: "bought", pattern: &CUSTOMER_BOUGHT, handler: captured_name },
        PatternRule { name: "ordered", pattern: &CUSTOMER_ORDERED, handler: captured_name },
        PatternRule { name: "labeled", pattern: &CUSTOMER_LABELED, handler: captured_name },
        PatternRule { name: "institution", pattern: &CUSTOMER_INSTITUTION, handler: captured_name },
        PatternRule { name: "short_name", pattern: &CUSTOMER_SHORT_NAME, handler: captured_name },
    ];
}

/// Customer name extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct CustomerExtractor;

impl CustomerExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Scan adjacent tokens when no pattern fired.
    fn from_tokens(tokens: &[String]) -> Option<ExtractionMatch<String>> {
        tokens.windows(2).find_map(|pair| {
            let (word, next) = (&pair[0], &pair[1]);

            if HAN_NAME_TOKEN.is_match(word) && PURCHASE_TOKENS.contains(&next.as_str()) {
                return Some(ExtractionMatch::new(word.clone(), "token_buyer", word.as_str()));
            }
            if word.contains('给') {
                return Some(ExtractionMatch::new(next.clone(), "token_recipient", next.as_str()));
            }
            None
        })
    }
}

impl FieldExtractor for CustomerExtractor {
    type Output = String;

    fn extract(&self, transcript: &Transcript) -> Option<ExtractionMatch<String>> {
        first_match(&RULES, transcript.text()).or_else(|| Self::from_tokens(transcript.tokens()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::segment::{Segmenter, WhitespaceSegmenter};
    use crate::error::ExtractionError;

    fn extract(text: &str) -> Option<ExtractionMatch<String>> {
        CustomerExtractor::new().extract(&Transcript::new(text, &WhitespaceSegmenter))
    }

    fn name(text: &str) -> Option<String> {
        extract(text).map(|m| m.value)
    }

    #[test]
    fn test_served_customer() {
        let m = extract("昨天给中心小学焊支架，数量两个").unwrap();
        assert_eq!(m.value, "中心小学");
        assert_eq!(m.rule, "served");
    }

    #[test]
    fn test_served_strips_filler() {
        assert_eq!(name("给了王老板安装空调"), Some("王老板".to_string()));
    }

    #[test]
    fn test_buyer_before_digit() {
        let m = extract("张三买了5个灯泡").unwrap();
        assert_eq!(m.value, "张三");
        assert_eq!(m.rule, "bought");

        assert_eq!(extract("李四要了3箱水").unwrap().rule, "ordered");
    }

    #[test]
    fn test_labeled_customer() {
        let m = extract("客户老刘 单价50元").unwrap();
        assert_eq!(m.value, "老刘");
        assert_eq!(m.rule, "labeled");
    }

    #[test]
    fn test_institution_suffix() {
        let m = extract("红星机械厂 数量3").unwrap();
        assert_eq!(m.value, "红星机械");
        assert_eq!(m.rule, "institution");
    }

    #[test]
    fn test_short_name_before_verb() {
        let m = extract("王五维修水管").unwrap();
        assert_eq!(m.value, "王五");
        assert_eq!(m.rule, "short_name");
    }

    #[test]
    fn test_token_fallback_recipient() {
        struct Fixed;

        impl Segmenter for Fixed {
            fn segment(&self, _text: &str) -> Result<Vec<String>, ExtractionError> {
                Ok(vec!["送给".into(), "老陈".into()])
            }
        }

        let m = CustomerExtractor::new()
            .extract(&Transcript::new("送给老陈", &Fixed))
            .unwrap();
        assert_eq!(m.value, "老陈");
        assert_eq!(m.rule, "token_recipient");
    }

    #[test]
    fn test_no_customer() {
        assert_eq!(name("你好"), None);
        assert_eq!(name(""), None);
    }
}
