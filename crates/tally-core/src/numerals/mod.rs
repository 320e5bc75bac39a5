//! Chinese numeral and currency conversion.
//!
//! All functions are total: text without a recognizable number yields zero
//! or an empty sequence, never an error.

mod convert;
mod extract;
pub mod tables;

pub use convert::{convert, convert_money};
pub use extract::{extract_amounts, extract_numbers, AmountMention, AmountMentions, NumberMentions};
