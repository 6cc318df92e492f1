//! Currency and location inference from the free-text description.
//!
//! International statement lines usually end with the merchant city followed
//! by the billing currency, e.g. `AMAZON WEB SERVICES SEATTLE USD`. Domestic
//! lines end with the city and are always in rupees.

use crate::transaction::TransactionType;
use once_cell::sync::Lazy;
use regex::Regex;

/// Currency assigned to every domestic transaction.
pub const DOMESTIC_CURRENCY: &str = "INR";

/// Currency used when an international description carries no code.
pub const UNKNOWN_CURRENCY: &str = "NA";

/// Location used when the description has no words.
pub const UNKNOWN_LOCATION: &str = "unknown";

static TRAILING_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]{3}$").unwrap());

/// Derived fields of a transaction description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub description: String,
    pub currency: String,
    pub location: String,
}

/// Computes stored description, currency and location from the raw description.
pub fn enrich(description: &str, transaction_type: TransactionType) -> Enrichment {
    Enrichment {
        description: strip_currency_suffix(description, transaction_type),
        currency: extract_currency(description, transaction_type),
        location: extract_location(description, transaction_type),
    }
}

/// Extracts the currency code.
///
/// Domestic rows are always `INR`. For international rows the last word,
/// uppercased and reduced to its letters, is used if it has exactly three;
/// otherwise a run of three letters at the very end of the description;
/// otherwise `NA`.
pub fn extract_currency(description: &str, transaction_type: TransactionType) -> String {
    if transaction_type == TransactionType::Domestic {
        return DOMESTIC_CURRENCY.to_string();
    }

    if let Some(last) = description.split_whitespace().last() {
        let code: String = last
            .to_uppercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        if code.len() == 3 {
            return code;
        }
    }

    TRAILING_CODE
        .find(&description.to_uppercase())
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_CURRENCY.to_string())
}

/// Extracts the location token: lowercase letters of one word.
///
/// Domestic rows use the last word. International rows use the word before
/// the trailing currency code, falling back to the last word for one-word
/// descriptions.
pub fn extract_location(description: &str, transaction_type: TransactionType) -> String {
    let words: Vec<&str> = description.split_whitespace().collect();

    let word = match transaction_type {
        TransactionType::International if words.len() >= 2 => Some(words[words.len() - 2]),
        _ => words.last().copied(),
    };

    match word {
        Some(word) => word
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_lowercase())
            .collect(),
        None => UNKNOWN_LOCATION.to_string(),
    }
}

/// Drops a trailing 3-letter currency code from international descriptions.
///
/// Domestic descriptions are returned unchanged (apart from trimming).
pub fn strip_currency_suffix(description: &str, transaction_type: TransactionType) -> String {
    if transaction_type == TransactionType::International {
        let words: Vec<&str> = description.split_whitespace().collect();
        if let Some((last, rest)) = words.split_last() {
            if is_currency_code(last) {
                return rest.join(" ");
            }
        }
    }
    description.trim().to_string()
}

fn is_currency_code(word: &str) -> bool {
    word.len() == 3 && word.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use TransactionType::{Domestic, International};

    #[test]
    fn test_domestic_currency_is_inr() {
        assert_eq!(extract_currency("AMAZON SEATTLE USD", Domestic), "INR");
    }

    #[test]
    fn test_international_currency_from_last_word() {
        assert_eq!(extract_currency("Swiggy Bangalore INR", International), "INR");
        assert_eq!(extract_currency("NETFLIX LOS GATOS usd", International), "USD");
        assert_eq!(extract_currency("SPOTIFY STOCKHOLM (SEK)", International), "SEK");
    }

    #[test]
    fn test_international_currency_from_trailing_run() {
        assert_eq!(extract_currency("PAYPAL *STEAMGBP", International), "GBP");
    }

    #[test]
    fn test_international_currency_missing() {
        assert_eq!(extract_currency("UBER TRIP 4411", International), "NA");
        assert_eq!(extract_currency("", International), "NA");
    }

    #[test]
    fn test_domestic_location_is_last_word() {
        assert_eq!(extract_location("ZOMATO LTD, GURGAON", Domestic), "gurgaon");
        assert_eq!(extract_location("IRCTC-Mumbai1", Domestic), "irctcmumbai");
    }

    #[test]
    fn test_international_location_is_second_to_last_word() {
        assert_eq!(
            extract_location("Swiggy Bangalore INR", International),
            "bangalore"
        );
        assert_eq!(extract_location("AIRBNB", International), "airbnb");
    }

    #[test]
    fn test_location_unknown_without_words() {
        assert_eq!(extract_location("   ", Domestic), "unknown");
        assert_eq!(extract_location("", International), "unknown");
    }

    #[test]
    fn test_strip_currency_suffix() {
        assert_eq!(
            strip_currency_suffix("Swiggy Bangalore INR", International),
            "Swiggy Bangalore"
        );
        assert_eq!(
            strip_currency_suffix("APPLE.COM/BILL  CORK   EUR", International),
            "APPLE.COM/BILL CORK"
        );
        assert_eq!(
            strip_currency_suffix("UBER TRIP 4411", International),
            "UBER TRIP 4411"
        );
        assert_eq!(
            strip_currency_suffix("Swiggy Bangalore INR", Domestic),
            "Swiggy Bangalore INR"
        );
    }

    #[test]
    fn test_enrich_is_deterministic() {
        let first = enrich("STARBUCKS SINGAPORE SGD", International);
        let second = enrich("STARBUCKS SINGAPORE SGD", International);

        assert_eq!(first, second);
        assert_eq!(first.description, "STARBUCKS SINGAPORE");
        assert_eq!(first.currency, "SGD");
        assert_eq!(first.location, "singapore");
    }
}
