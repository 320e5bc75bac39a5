//! Service description extraction.

use regex::Captures;

use super::patterns::{DESCRIPTION_AFTER_VERB, DESCRIPTION_BEFORE_VERB};
use super::{first_match, strip_filler, ExtractionMatch, FieldExtractor, PatternRule};
use crate::invoice::segment::Transcript;

const FILLERS: &[&str] = &["的", "一个", "了"];

/// Service verbs, in fallback priority order.
const SERVICE_VERBS: &[&str] = &["焊", "安装", "维修", "施工", "做", "干", "搞"];

/// Keywords that end a description. A span starting with one is a field, not a service.
const STOP_KEYWORDS: &[&str] = &["数量", "单价", "价格", "总价", "合计", "总共"];

fn captured_description(caps: &Captures<'_>) -> Option<String> {
    let value = strip_filler(caps.get(1)?.as_str(), FILLERS)?;
    if STOP_KEYWORDS.iter().any(|k| value.starts_with(k)) {
        return None;
    }
    Some(value)
}

lazy_static::lazy_static! {
    static ref RULES: Vec<PatternRule<String>> = vec![
        PatternRule { name: "after_verb", pattern: &DESCRIPTION_AFTER_VERB, handler: captured_description },
        PatternRule { name: "before_verb", pattern: &DESCRIPTION_BEFORE_VERB, handler: captured_description },
    ];
}

/// Description extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct DescriptionExtractor;

impl DescriptionExtractor {
    pub fn new() -> Self {
        Self
    }

    fn from_tokens(tokens: &[String]) -> Option<ExtractionMatch<String>> {
        SERVICE_VERBS.iter().find_map(|verb| {
            let index = tokens.iter().position(|t| t == verb)?;
            let next = tokens.get(index + 1)?;
            let value = strip_filler(next, FILLERS)?;
            Some(ExtractionMatch::new(value, "token_after_verb", next.as_str()))
        })
    }
}

impl FieldExtractor for DescriptionExtractor {
    type Output = String;

    fn extract(&self, transcript: &Transcript) -> Option<ExtractionMatch<String>> {
        first_match(&RULES, transcript.text()).or_else(|| Self::from_tokens(transcript.tokens()))
    }
}
