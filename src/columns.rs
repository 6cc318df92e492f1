//! Header row detection.
//!
//! Bank exports name their columns differently ("Date", "Transaction Date",
//! "Transaction Details", "Amount (INR)", ...). Columns are located by
//! case-insensitive substring match rather than fixed position.

use log::debug;

/// Detected column index per field. `None` means the column was not seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    pub date: Option<usize>,
    pub description: Option<usize>,
    pub debit: Option<usize>,
    pub credit: Option<usize>,
    pub amount: Option<usize>,
}

impl ColumnLayout {
    /// Scans a row for column names and records their positions.
    ///
    /// Each cell assigns at most one field, checked in the order date,
    /// description, debit, credit, amount. A later cell overrides an earlier
    /// match for the same field, and earlier rows' matches are kept.
    pub fn detect(&mut self, cells: &[&str]) {
        for (idx, cell) in cells.iter().enumerate() {
            let name = cell.trim().to_lowercase();
            if name.contains("date") {
                self.date = Some(idx);
            } else if name.contains("transaction description")
                || name.contains("transaction details")
            {
                self.description = Some(idx);
            } else if name.contains("debit") {
                self.debit = Some(idx);
            } else if name.contains("credit") {
                self.credit = Some(idx);
            } else if name.contains("amount") {
                self.amount = Some(idx);
            }
        }
        debug!("Column layout after scan: {:?}", self);
    }

    /// A header is complete once both date and description are known.
    pub fn is_complete(&self) -> bool {
        self.date.is_some() && self.description.is_some()
    }

    /// Minimum number of cells a data row needs to cover every detected column.
    pub fn required_width(&self) -> usize {
        [
            self.date,
            self.description,
            self.debit,
            self.credit,
            self.amount,
        ]
        .into_iter()
        .flatten()
        .max()
        .map_or(0, |idx| idx + 1)
    }
}
