//! # Statement Normalizer
//!
//! Converts bank-statement CSV exports with differing layouts into one
//! canonical 8-column schema.
//!
//! ## Design Principles
//!
//! - **Layout detection**: columns are found by header name, not position
//! - **Fixed-point money**: amounts use 2 decimal places via `rust_decimal`
//! - **Best effort per row**: bad dates and short rows are dropped with a
//!   warning, a bad amount aborts the file
//! - **Deterministic output**: date ascending, then description in reverse
//!   character order
//!
//! ## Example
//!
//! ```no_run
//! use statement_normalizer::standardize;
//! use std::fs::File;
//!
//! let statement = standardize(File::open("HDFC-Input-Case1.csv").unwrap()).unwrap();
//! statement.write_csv(std::io::stdout()).unwrap();
//! ```

pub mod classifier;
pub mod columns;
pub mod enrich;
pub mod error;
pub mod fields;
pub mod money;
pub mod normalizer;
pub mod statement;
pub mod transaction;

pub use columns::ColumnLayout;
pub use error::{NormalizerError, Result};
pub use fields::AmountParseError;
pub use money::Money;
pub use normalizer::{standardize, RowOutcome, ScanState, StatementNormalizer};
pub use statement::{RowWarning, SkipReason, Statement};
pub use transaction::{TransactionRecord, TransactionType};
