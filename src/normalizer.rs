//! Statement normalization pass.
//!
//! Rows are read in order and folded through a [`ScanState`] that remembers
//! the current section (domestic or international), the current cardholder
//! and the detected column layout. Accepted rows become
//! [`TransactionRecord`]s; the collection is sorted once the input is
//! exhausted.

use crate::classifier::{cardholder_name, detect_transaction_type, is_blank};
use crate::columns::ColumnLayout;
use crate::enrich::enrich;
use crate::error::{NormalizerError, Result};
use crate::fields::{parse_date, resolve_amounts, AmountParseError};
use crate::statement::{RowWarning, SkipReason, Statement};
use crate::transaction::{TransactionRecord, TransactionType};
use csv::{ReaderBuilder, Trim};
use log::{debug, info, warn};
use std::io::Read;

/// What a single row turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Every cell empty; state unchanged.
    Blank,
    /// The row completed header detection.
    Header,
    /// A row read before the header was located.
    PreHeader,
    /// A single-cell row naming the cardholder.
    Cardholder(String),
    /// A candidate transaction row that was dropped.
    Skipped(SkipReason),
    /// An accepted transaction.
    Transaction(TransactionRecord),
}

/// Per-file scan state.
#[derive(Debug, Clone, Default)]
pub struct ScanState {
    /// Section currently in effect.
    pub transaction_type: TransactionType,

    /// Most recent cardholder label, if any.
    pub card_name: Option<String>,

    /// Column positions found so far.
    pub columns: ColumnLayout,

    /// Whether date and description columns have both been found.
    pub header_located: bool,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the state by one row.
    ///
    /// Only a malformed amount is an error; every other problem with a row
    /// is reported as [`RowOutcome::Skipped`].
    pub fn step(&mut self, cells: &[&str]) -> std::result::Result<RowOutcome, AmountParseError> {
        if is_blank(cells) {
            return Ok(RowOutcome::Blank);
        }

        if let Some(kind) = detect_transaction_type(cells) {
            if kind != self.transaction_type {
                debug!("Switching to {} transactions", kind);
            }
            self.transaction_type = kind;
        }

        if !self.header_located {
            self.columns.detect(cells);
            if self.columns.is_complete() {
                self.header_located = true;
                debug!("Header located: {:?}", self.columns);
                return Ok(RowOutcome::Header);
            }
            return Ok(RowOutcome::PreHeader);
        }

        if let Some(name) = cardholder_name(cells) {
            debug!("Cardholder is now {:?}", name);
            self.card_name = Some(name.to_string());
            return Ok(RowOutcome::Cardholder(name.to_string()));
        }

        self.parse_transaction(cells)
    }

    fn parse_transaction(
        &self,
        cells: &[&str],
    ) -> std::result::Result<RowOutcome, AmountParseError> {
        let required = self.columns.required_width();
        if cells.len() < required {
            return Ok(RowOutcome::Skipped(SkipReason::ShortRow {
                required,
                found: cells.len(),
            }));
        }

        let date_text = cell_at(self.columns.date, cells);
        if date_text.is_empty() {
            return Ok(RowOutcome::Skipped(SkipReason::MissingDate));
        }
        let description = cell_at(self.columns.description, cells);
        if description.is_empty() {
            return Ok(RowOutcome::Skipped(SkipReason::MissingDescription));
        }

        let date = match parse_date(date_text) {
            Some(date) => date,
            None => {
                return Ok(RowOutcome::Skipped(SkipReason::UnparseableDate(
                    date_text.to_string(),
                )))
            }
        };

        let (debit, credit) = resolve_amounts(cells, &self.columns)?;
        let enriched = enrich(description, self.transaction_type);

        Ok(RowOutcome::Transaction(TransactionRecord {
            date,
            description: enriched.description,
            debit,
            credit,
            currency: enriched.currency,
            card_name: self.card_name.clone(),
            transaction_type: self.transaction_type,
            location: enriched.location,
        }))
    }
}

fn cell_at<'a>(idx: Option<usize>, cells: &[&'a str]) -> &'a str {
    idx.and_then(|i| cells.get(i).copied()).map_or("", str::trim)
}

/// Accumulates records across one input file.
///
/// # Output Ordering
///
/// Records are sorted by date, then by description in reverse character
/// order, when [`finish`](Self::finish) is called.
#[derive(Debug, Default)]
pub struct StatementNormalizer {
    state: ScanState,
    records: Vec<TransactionRecord>,
    warnings: Vec<RowWarning>,
}

impl StatementNormalizer {
    /// Creates a normalizer with a fresh scan state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every row of a CSV statement.
    ///
    /// Dropped rows are logged at warn level and collected as warnings.
    /// A malformed amount or undecodable input aborts the pass.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for result in csv_reader.records() {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line());
            let cells: Vec<&str> = record.iter().collect();

            let outcome = self
                .state
                .step(&cells)
                .map_err(|source| NormalizerError::InvalidAmount { line, source })?;

            match outcome {
                RowOutcome::Transaction(tx) => self.records.push(tx),
                RowOutcome::Skipped(reason) => {
                    warn!("Line {}: Dropping row, {}", line, reason);
                    self.warnings.push(RowWarning { line, reason });
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Sorts the collected records and returns the statement.
    pub fn finish(self) -> Statement {
        info!(
            "Normalized {} transactions ({} rows dropped)",
            self.records.len(),
            self.warnings.len()
        );
        Statement::new(self.records, self.warnings)
    }
}

/// Normalizes one CSV statement.
///
/// # Example
///
/// ```
/// use statement_normalizer::standardize;
/// use std::io::Cursor;
///
/// let csv = "Date,Transaction Description,Amount\n12-03-2024,Ola Cabs Pune,250.00\n";
/// let statement = standardize(Cursor::new(csv)).unwrap();
/// assert_eq!(statement.records[0].location, "pune");
/// ```
pub fn standardize<R: Read>(reader: R) -> Result<Statement> {
    let mut normalizer = StatementNormalizer::new();
    normalizer.process_csv(reader)?;
    Ok(normalizer.finish())
}
