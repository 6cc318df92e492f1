//! Normalized statement: ordered records plus the rows that were dropped.

use crate::error::Result;
use crate::transaction::{TransactionRecord, OUTPUT_HEADERS};
use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::io::Write;

/// Why a candidate transaction row was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The row has fewer cells than the detected columns need.
    ShortRow { required: usize, found: usize },
    /// The date cell is empty.
    MissingDate,
    /// The description cell is empty.
    MissingDescription,
    /// The date matched none of the supported formats.
    UnparseableDate(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::ShortRow { required, found } => {
                write!(f, "row has {} cells, {} required", found, required)
            }
            SkipReason::MissingDate => f.write_str("missing date"),
            SkipReason::MissingDescription => f.write_str("missing description"),
            SkipReason::UnparseableDate(value) => write!(f, "unparseable date {:?}", value),
        }
    }
}

/// A dropped row and its input line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowWarning {
    pub line: u64,
    pub reason: SkipReason,
}

impl fmt::Display for RowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

/// The result of normalizing one input file.
#[derive(Debug, Clone, Default)]
pub struct Statement {
    /// Records in output order.
    pub records: Vec<TransactionRecord>,

    /// Rows that looked like transactions but were dropped.
    pub warnings: Vec<RowWarning>,
}

impl Statement {
    /// Builds a statement, sorting the records into output order.
    pub fn new(mut records: Vec<TransactionRecord>, warnings: Vec<RowWarning>) -> Self {
        sort_records(&mut records);
        Statement { records, warnings }
    }

    /// Writes the canonical CSV: the 8-column header, then one row per record.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(writer);

        csv_writer.write_record(OUTPUT_HEADERS)?;
        for record in &self.records {
            csv_writer.serialize(record.to_output_row())?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

/// Output ordering: date ascending, then lowercased description in reverse
/// character order.
///
/// The description comparison is character-wise descending, but a description
/// that is a prefix of another still sorts first.
pub fn compare_records(a: &TransactionRecord, b: &TransactionRecord) -> Ordering {
    a.date.cmp(&b.date).then_with(|| {
        let a_desc = a.description.to_lowercase();
        let b_desc = b.description.to_lowercase();
        a_desc.chars().map(Reverse).cmp(b_desc.chars().map(Reverse))
    })
}

/// Stable sort into output order.
pub fn sort_records(records: &mut [TransactionRecord]) {
    records.sort_by(compare_records);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::transaction::TransactionType;
    use chrono::NaiveDate;

    fn record(date: (i32, u32, u32), description: &str) -> TransactionRecord {
        TransactionRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            description: description.to_string(),
            debit: Money::ZERO,
            credit: Money::ZERO,
            currency: "INR".to_string(),
            card_name: Some("John Doe".to_string()),
            transaction_type: TransactionType::Domestic,
            location: "x".to_string(),
        }
    }

    fn descriptions(records: &[TransactionRecord]) -> Vec<&str> {
        records.iter().map(|r| r.description.as_str()).collect()
    }

    #[test]
    fn test_same_date_sorts_description_descending() {
        let mut records = vec![
            record((2024, 1, 10), "Apple Store"),
            record((2024, 1, 10), "Zebra Mart"),
        ];
        sort_records(&mut records);

        assert_eq!(descriptions(&records), vec!["Zebra Mart", "Apple Store"]);
    }

    #[test]
    fn test_date_order_is_calendar_not_lexical() {
        let mut records = vec![
            record((2024, 2, 1), "b"),
            record((2023, 12, 31), "a"),
            record((2024, 1, 15), "c"),
        ];
        sort_records(&mut records);

        assert_eq!(descriptions(&records), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_tie_break_ignores_case_and_keeps_prefix_first() {
        let mut records = vec![
            record((2024, 1, 10), "amazon prime"),
            record((2024, 1, 10), "AMAZON"),
            record((2024, 1, 10), "Blinkit"),
        ];
        sort_records(&mut records);

        assert_eq!(
            descriptions(&records),
            vec!["Blinkit", "AMAZON", "amazon prime"]
        );
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut records = vec![
            record((2024, 3, 1), "Swiggy"),
            record((2024, 1, 1), "Ola"),
            record((2024, 3, 1), "Zomato"),
            record((2024, 3, 1), "swiggy"),
        ];
        sort_records(&mut records);
        let once = records.clone();
        sort_records(&mut records);

        assert_eq!(records, once);
    }

    #[test]
    fn test_write_csv_emits_header_for_empty_statement() {
        let mut out = Vec::new();
        Statement::default().write_csv(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Date,Transaction Description,Debit,Credit,Currency,CardName,Transaction,Location\r\n"
        );
    }

    #[test]
    fn test_write_csv_renders_records() {
        let statement = Statement::new(vec![record((2024, 1, 10), "Ola Cabs")], Vec::new());
        let mut out = Vec::new();
        statement.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text.lines().nth(1),
            Some("10-01-2024,Ola Cabs,0.00,0.00,INR,John Doe,Domestic,x")
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = RowWarning {
            line: 7,
            reason: SkipReason::UnparseableDate("2024/01/01".to_string()),
        };
        assert_eq!(warning.to_string(), "line 7: unparseable date \"2024/01/01\"");
    }
}
