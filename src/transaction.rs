//! Canonical transaction model and its CSV output representation.

use crate::money::Money;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Canonical textual date format (`DD-MM-YYYY`).
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Output header, in column order.
pub const OUTPUT_HEADERS: [&str; 8] = [
    "Date",
    "Transaction Description",
    "Debit",
    "Credit",
    "Currency",
    "CardName",
    "Transaction",
    "Location",
];

/// Classification driving the currency and location heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum TransactionType {
    #[default]
    Domestic,
    International,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Domestic => f.write_str("Domestic"),
            TransactionType::International => f.write_str("International"),
        }
    }
}

/// One normalized statement line.
///
/// Built once per accepted transaction row and never mutated afterwards.
///
/// # Invariants
///
/// - `debit` and `credit` are rounded to 2 decimal places
/// - at most one of `debit`/`credit` is non-zero for well-formed input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Transaction date
    pub date: NaiveDate,

    /// Description, with a trailing currency code removed for international rows
    pub description: String,

    /// Amount charged
    pub debit: Money,

    /// Amount refunded or paid in
    pub credit: Money,

    /// 3-letter currency code, `INR` for domestic rows, `NA` if undetected
    pub currency: String,

    /// Cardholder label in effect when the row was read
    pub card_name: Option<String>,

    /// Domestic or international
    pub transaction_type: TransactionType,

    /// Lowercase alphabetic location token
    pub location: String,
}

impl TransactionRecord {
    /// Date rendered as `DD-MM-YYYY`.
    pub fn formatted_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Borrowed view of the record in output column order.
    pub fn to_output_row(&self) -> OutputRow<'_> {
        OutputRow {
            date: self.formatted_date(),
            description: &self.description,
            debit: self.debit,
            credit: self.credit,
            currency: &self.currency,
            card_name: self.card_name.as_deref(),
            transaction_type: self.transaction_type,
            location: &self.location,
        }
    }
}

/// A record as it is written to the output CSV.
#[derive(Debug, Serialize)]
pub struct OutputRow<'a> {
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Transaction Description")]
    pub description: &'a str,

    #[serde(rename = "Debit")]
    pub debit: Money,

    #[serde(rename = "Credit")]
    pub credit: Money,

    #[serde(rename = "Currency")]
    pub currency: &'a str,

    #[serde(rename = "CardName")]
    pub card_name: Option<&'a str>,

    #[serde(rename = "Transaction")]
    pub transaction_type: TransactionType,

    #[serde(rename = "Location")]
    pub location: &'a str,
}
