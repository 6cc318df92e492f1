//! Error types for the statement normalizer.

use crate::fields::AmountParseError;
use thiserror::Error;

/// Result type alias for normalizer operations
pub type Result<T> = std::result::Result<T, NormalizerError>;

/// Errors that abort a whole run.
///
/// Row-level problems (bad dates, short rows) are not errors; they end up as
/// warnings on the [`Statement`](crate::Statement).
#[derive(Error, Debug)]
pub enum NormalizerError {
    /// Failed to open, read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader or writer error
    #[error("CSV error: {0}")]
    Csv(csv::Error),

    /// Input is not valid UTF-8
    #[error("Encoding issue detected{}. Try opening the file in a spreadsheet and re-saving it as UTF-8 CSV", at_line(.line))]
    Encoding { line: Option<u64> },

    /// Amount cell that is not a number
    #[error("Invalid amount at line {line}: {source}")]
    InvalidAmount {
        line: u64,
        #[source]
        source: AmountParseError,
    },

    /// Input file does not exist
    #[error("The file '{0}' was not found. Please check the file name and try again")]
    InputNotFound(String),

    /// No input file given and none could be read from the prompt
    #[error("Missing input file argument. Usage: statement-normalizer <input.csv> [output.csv]")]
    MissingArgument,
}

fn at_line(line: &Option<u64>) -> String {
    line.map(|l| format!(" at line {}", l)).unwrap_or_default()
}

impl From<csv::Error> for NormalizerError {
    fn from(err: csv::Error) -> Self {
        if let csv::ErrorKind::Utf8 { pos, .. } = err.kind() {
            return NormalizerError::Encoding {
                line: pos.as_ref().map(|p| p.line()),
            };
        }
        NormalizerError::Csv(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_utf8_maps_to_encoding_error() {
        let bytes: &[u8] = b"Date,Transaction Description\n\xff\xfe,abc\n";
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(bytes);

        let err = reader
            .records()
            .find_map(|r| r.err())
            .expect("expected a decoding error");

        match NormalizerError::from(err) {
            NormalizerError::Encoding { .. } => {}
            other => panic!("Expected Encoding, got {:?}", other),
        }
    }

    #[test]
    fn test_encoding_message_mentions_utf8() {
        let err = NormalizerError::Encoding { line: Some(4) };
        let message = err.to_string();
        assert!(message.contains("at line 4"));
        assert!(message.contains("UTF-8"));
    }
}
