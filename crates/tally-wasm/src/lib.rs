//! WASM bindings for voice invoice entry.
//!
//! The browser records speech, transcribes it, and hands the transcript to
//! these bindings. Amounts cross the boundary as decimal strings.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

use tally_core::numerals;
use tally_core::{InvoiceParser, ParsedInvoice, VoiceInvoiceParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js(invoice: Option<ParsedInvoice>) -> Result<JsValue, JsValue> {
    match invoice {
        Some(invoice) => serde_wasm_bindgen::to_value(&invoice)
            .map_err(|e| JsValue::from_str(&e.to_string())),
        None => Ok(JsValue::NULL),
    }
}

fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Parse a transcript with today's date. Returns `null` on an internal fault.
#[wasm_bindgen(js_name = parseVoiceInput)]
pub fn parse_voice_input(text: &str) -> Result<JsValue, JsValue> {
    to_js(VoiceInvoiceParser::new().parse_voice_input(text))
}

/// Convert Chinese or Arabic numeral text, e.g. "两百三十五".
#[wasm_bindgen(js_name = convertChinese)]
pub fn convert_chinese(text: &str) -> f64 {
    decimal_to_f64(numerals::convert(text))
}

/// Convert a money expression, e.g. "二十元三角".
#[wasm_bindgen(js_name = convertMoney)]
pub fn convert_money(text: &str) -> f64 {
    decimal_to_f64(numerals::convert_money(text))
}

/// Money amounts mentioned in `text`, each with surrounding context.
#[wasm_bindgen(js_name = extractAmounts)]
pub fn extract_amounts(text: &str) -> Result<JsValue, JsValue> {
    let amounts: Vec<_> = numerals::extract_amounts(text).into_iter().collect();

    serde_wasm_bindgen::to_value(&amounts)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Voice parser class for browser use.
#[wasm_bindgen]
pub struct VoiceParser {
    parser: VoiceInvoiceParser,
}

#[wasm_bindgen]
impl VoiceParser {
    /// Create a parser. `reference_date` (YYYY-MM-DD) pins what "today" means.
    #[wasm_bindgen(constructor)]
    pub fn new(reference_date: Option<String>) -> Result<VoiceParser, JsValue> {
        let parser = VoiceInvoiceParser::new();
        let parser = match reference_date {
            Some(date) => parser.with_reference_date(parse_date(&date)?),
            None => parser,
        };
        parser.initialize();

        Ok(Self { parser })
    }

    /// Parse a transcript. Returns `null` on an internal fault.
    #[wasm_bindgen]
    pub fn parse(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(self.parser.parse_voice_input(text))
    }

    /// Parse a transcript, rejecting with the fault message instead of `null`.
    #[wasm_bindgen(js_name = parseStrict)]
    pub fn parse_strict(&self, text: &str) -> Result<JsValue, JsValue> {
        let invoice = InvoiceParser::parse(&self.parser, text)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_js(Some(invoice))
    }

    /// The date relative words resolve against, as YYYY-MM-DD.
    #[wasm_bindgen(getter)]
    pub fn today(&self) -> String {
        self.parser.today().to_string()
    }
}

fn parse_date(date: &str) -> Result<NaiveDate, JsValue> {
    date.parse::<NaiveDate>()
        .map_err(|e| JsValue::from_str(&format!("Invalid reference date {}: {}", date, e)))
}
