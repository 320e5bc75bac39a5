//! Work date extraction.

use chrono::{Datelike, Days, NaiveDate};
use regex::{Captures, Regex};
use rust_decimal::prelude::ToPrimitive;

use super::patterns::{DATE_FULL_YEAR, DATE_ISO, DATE_MONTH_DAY, DATE_MONTH_DAY_CN, DATE_SHORT_YEAR};
use super::ExtractionMatch;
use crate::error::ExtractionError;
use crate::invoice::segment::Transcript;
use crate::numerals::convert;

/// Relative day keywords and how many days they reach back.
const RELATIVE_DAYS: &[(&str, u64)] = &[
    ("今天", 0),
    ("今日", 0),
    ("昨天", 1),
    ("昨日", 1),
    ("前天", 2),
];

/// How the year of an absolute date is written.
#[derive(Debug, Clone, Copy)]
enum YearForm {
    Full,
    TwoDigit,
    /// No year; the reference year applies.
    Omitted,
}

struct DateRule {
    name: &'static str,
    pattern: &'static Regex,
    year: YearForm,
    chinese: bool,
}

lazy_static::lazy_static! {
    static ref DATE_RULES: Vec<DateRule> = vec![
        DateRule { name: "full_year", pattern: &DATE_FULL_YEAR, year: YearForm::Full, chinese: false },
        DateRule { name: "short_year", pattern: &DATE_SHORT_YEAR, year: YearForm::TwoDigit, chinese: false },
        DateRule { name: "iso", pattern: &DATE_ISO, year: YearForm::Full, chinese: false },
        DateRule { name: "month_day", pattern: &DATE_MONTH_DAY, year: YearForm::Omitted, chinese: false },
        DateRule { name: "month_day_cn", pattern: &DATE_MONTH_DAY_CN, year: YearForm::Omitted, chinese: true },
    ];
}

/// Date field extractor, anchored on the reference ("today") date.
pub struct DateExtractor {
    today: NaiveDate,
}

impl DateExtractor {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Find the first date expression.
    ///
    /// Relative keywords win over absolute dates. Absolute matches that are
    /// not real calendar dates are skipped. Fails only when a relative date
    /// falls outside the calendar.
    pub fn extract(
        &self,
        transcript: &Transcript,
    ) -> Result<Option<ExtractionMatch<NaiveDate>>, ExtractionError> {
        let text = transcript.text();

        if let Some((keyword, days_back)) = RELATIVE_DAYS
            .iter()
            .find(|(keyword, _)| text.contains(keyword))
        {
            let date = self
                .today
                .checked_sub_days(Days::new(*days_back))
                .ok_or(ExtractionError::DateOutOfRange { days_back: *days_back })?;
            return Ok(Some(ExtractionMatch::new(date, "relative", *keyword)));
        }

        Ok(DATE_RULES.iter().find_map(|rule| self.apply(rule, text)))
    }

    fn apply(&self, rule: &DateRule, text: &str) -> Option<ExtractionMatch<NaiveDate>> {
        let caps = rule.pattern.captures(text)?;
        let date = match rule.year {
            YearForm::Omitted => self.build(
                self.today.year(),
                number(&caps, 1, rule.chinese)?,
                number(&caps, 2, rule.chinese)?,
            )?,
            YearForm::Full | YearForm::TwoDigit => {
                let mut year = i32::try_from(number(&caps, 1, false)?).ok()?;
                if year < 100 {
                    year += 2000;
                }
                self.build(year, number(&caps, 2, false)?, number(&caps, 3, false)?)?
            }
        };

        // Anchored patterns may consume one boundary character before group 1.
        let (start, end) = (caps.get(1)?.start(), caps.get(0)?.end());
        Some(
            ExtractionMatch::new(date, rule.name, &text[start..end])
                .with_position(start, end),
        )
    }

    fn build(&self, year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

fn number(caps: &Captures<'_>, group: usize, chinese: bool) -> Option<u32> {
    let text = caps.get(group)?.as_str();
    if chinese {
        convert(text).to_u32()
    } else {
        text.parse().ok()
    }
}
