//! Invoice data produced from voice transcripts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Customer name used when no pattern resolves one.
pub const UNKNOWN_CUSTOMER: &str = "未知客户";

/// Description used when no service phrase resolves one.
pub const DEFAULT_DESCRIPTION: &str = "服务";

/// Structured invoice extracted from a single transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedInvoice {
    /// Work date; the reference date when no date expression was found.
    pub date: NaiveDate,

    /// Customer name, or [`UNKNOWN_CUSTOMER`].
    pub customer_name: String,

    /// Service description, or [`DEFAULT_DESCRIPTION`].
    pub description: String,

    /// Quantity after unit scaling (never zero).
    pub quantity: Decimal,

    /// Price per unit.
    pub unit_price: Decimal,

    /// Line total.
    pub total_price: Decimal,

    /// Heuristic score in `[0.0, 1.0]`.
    pub confidence: f32,
}

impl ParsedInvoice {
    /// Whether a customer name was recognized.
    pub fn has_customer(&self) -> bool {
        self.customer_name != UNKNOWN_CUSTOMER
    }

    /// Whether a service description was recognized.
    pub fn has_description(&self) -> bool {
        self.description != DEFAULT_DESCRIPTION
    }

    /// Whether the confidence reaches `threshold`.
    pub fn meets(&self, threshold: f32) -> bool {
        self.confidence >= threshold
    }

    /// The numeric fields as a line.
    pub fn amounts(&self) -> LineAmounts {
        LineAmounts {
            quantity: self.quantity,
            unit_price: self.unit_price,
            total_price: self.total_price,
        }
    }
}

/// Quantity, unit price and total of a single invoice line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAmounts {
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

impl LineAmounts {
    pub fn new(quantity: Decimal, unit_price: Decimal, total_price: Decimal) -> Self {
        Self {
            quantity,
            unit_price,
            total_price,
        }
    }
}

/// Outcome of looking a parsed customer name up in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum CustomerMatch {
    /// Exact match against a known customer.
    Known(String),
    /// No record yet; needs manual resolution before the draft is saved.
    Provisional(String),
}

impl CustomerMatch {
    /// The customer name regardless of resolution.
    pub fn name(&self) -> &str {
        match self {
            CustomerMatch::Known(name) | CustomerMatch::Provisional(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, CustomerMatch::Known(_))
    }
}

/// Lifecycle state of a draft invoice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DraftStatus {
    /// Editable, not yet attached to a bill.
    #[default]
    Active,
}

/// Invoice prepared for user confirmation. Never persisted by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// Resolved or provisional customer.
    pub customer: CustomerMatch,

    /// Service description.
    pub description: String,

    /// Quantity.
    pub quantity: Decimal,

    /// Price per unit.
    pub unit_price: Decimal,

    /// Line total.
    pub total_price: Decimal,

    /// Date the work was done.
    pub work_date: NaiveDate,

    /// Draft status.
    pub status: DraftStatus,

    /// Parser output the draft was built from.
    pub parsed: ParsedInvoice,
}

impl InvoiceDraft {
    /// Build a draft from a parse result and a resolved customer.
    pub fn from_parsed(parsed: ParsedInvoice, customer: CustomerMatch) -> Self {
        Self {
            customer,
            description: parsed.description.clone(),
            quantity: parsed.quantity,
            unit_price: parsed.unit_price,
            total_price: parsed.total_price,
            work_date: parsed.date,
            status: DraftStatus::Active,
            parsed,
        }
    }

    /// Validate the draft and return any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.customer.is_known() {
            issues.push(format!(
                "Customer {} is not in the directory",
                self.customer.name()
            ));
        }

        if self.unit_price.is_zero() {
            issues.push("Unit price is zero".to_string());
        }

        if self.total_price.is_zero() {
            issues.push("Total price is zero".to_string());
        }

        if let Some(expected) = self.quantity.checked_mul(self.unit_price) {
            if (expected - self.total_price).abs() >= Decimal::new(1, 2) {
                issues.push(format!(
                    "Quantity x unit price ({}) differs from total ({})",
                    expected, self.total_price
                ));
            }
        }

        issues
    }
}
