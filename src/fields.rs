//! Cell parsers: dates, amounts, and debit/credit resolution.

use crate::columns::ColumnLayout;
use crate::money::Money;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Accepted input formats, tried in order, with the number of year digits each expects.
const DATE_FORMATS: [(&str, usize); 3] = [
    ("%d-%m-%Y", 4), // 12-03-2024
    ("%m-%d-%Y", 4), // 03-25-2024
    ("%d-%m-%y", 2), // 12-03-24
];

/// chrono reads `%y` 00-69 as 20xx; two-digit years from 69 up belong to the 1900s.
const TWO_DIGIT_YEAR_PIVOT: i32 = 2069;

static CREDIT_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s*cr$").unwrap());

/// An amount cell that could not be converted to a number.
#[derive(Debug, Error)]
#[error("cannot convert {value:?} to a number")]
pub struct AmountParseError {
    pub value: String,
    #[source]
    source: rust_decimal::Error,
}

/// A unified-column amount with its credit marker resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedAmount {
    pub value: Decimal,
    pub is_credit: bool,
}

/// Parses a date in any supported format.
///
/// Returns `None` if no format matches; callers drop the row.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let year_digits = s.rsplit('-').next().map_or(0, str::len);

    DATE_FORMATS
        .iter()
        .filter(|(_, digits)| *digits == year_digits)
        .find_map(|(fmt, _)| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|date| {
            if year_digits == 2 && date.year() >= TWO_DIGIT_YEAR_PIVOT {
                date.with_year(date.year() - 100)
            } else {
                Some(date)
            }
        })
}

/// Parses a unified amount cell such as `1,200.00 Cr`.
///
/// Empty input is a zero debit. A trailing `cr` (any case, optionally
/// preceded by whitespace) marks a credit.
pub fn parse_amount(s: &str) -> Result<ParsedAmount, AmountParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(ParsedAmount {
            value: Decimal::ZERO,
            is_credit: false,
        });
    }

    let cleaned = trimmed.replace(',', "");
    let cleaned = cleaned.trim();
    let (number, is_credit) = match CREDIT_MARKER.find(cleaned) {
        Some(marker) => (&cleaned[..marker.start()], true),
        None => (cleaned, false),
    };

    let value = to_decimal(number, trimmed)?;
    Ok(ParsedAmount { value, is_credit })
}

/// Parses a plain debit or credit cell. Empty input is zero.
pub fn parse_plain_amount(s: &str) -> Result<Decimal, AmountParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    to_decimal(&trimmed.replace(',', ""), trimmed)
}

fn to_decimal(number: &str, original: &str) -> Result<Decimal, AmountParseError> {
    Decimal::from_str(number.trim()).map_err(|source| AmountParseError {
        value: original.to_string(),
        source,
    })
}

/// Resolves the `(debit, credit)` pair of a transaction row.
///
/// A unified amount column wins when the row reaches it. Otherwise separate
/// debit and credit columns are used if both were detected. With neither,
/// both sides are zero.
pub fn resolve_amounts(
    cells: &[&str],
    layout: &ColumnLayout,
) -> Result<(Money, Money), AmountParseError> {
    if let Some(cell) = layout.amount.and_then(|idx| cells.get(idx)) {
        let parsed = parse_amount(cell)?;
        let amount = Money::new(parsed.value);
        return Ok(if parsed.is_credit {
            (Money::ZERO, amount)
        } else {
            (amount, Money::ZERO)
        });
    }

    if let (Some(debit_idx), Some(credit_idx)) = (layout.debit, layout.credit) {
        let debit = match cells.get(debit_idx) {
            Some(cell) => parse_plain_amount(cell)?,
            None => Decimal::ZERO,
        };
        let credit = match cells.get(credit_idx) {
            Some(cell) => parse_plain_amount(cell)?,
            None => Decimal::ZERO,
        };
        return Ok((Money::new(debit), Money::new(credit)));
    }

    Ok((Money::ZERO, Money::ZERO))
}
