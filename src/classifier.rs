//! Row classification helpers.
//!
//! Statement exports mix section markers, cardholder rows and transaction
//! rows in a single table. These functions look at one row in isolation; the
//! decision order lives in [`ScanState::step`](crate::ScanState::step).

use crate::transaction::TransactionType;

/// Returns `true` if every cell is empty or whitespace.
pub fn is_blank(cells: &[&str]) -> bool {
    cells.iter().all(|cell| cell.trim().is_empty())
}

/// Finds a "domestic"/"international" section marker in the row.
///
/// Cells are scanned left to right and the first cell mentioning either word
/// decides. Returns `None` if no cell matches.
pub fn detect_transaction_type(cells: &[&str]) -> Option<TransactionType> {
    cells.iter().find_map(|cell| {
        let text = cell.trim().to_lowercase();
        if text.contains("domestic") {
            Some(TransactionType::Domestic)
        } else if text.contains("international") {
            Some(TransactionType::International)
        } else {
            None
        }
    })
}

/// Returns the trimmed text if exactly one cell in the row is non-empty.
pub fn cardholder_name<'a>(cells: &[&'a str]) -> Option<&'a str> {
    let mut non_empty = cells.iter().copied().map(str::trim).filter(|c| !c.is_empty());
    match (non_empty.next(), non_empty.next()) {
        (Some(name), None) => Some(name),
        _ => None,
    }
}
