//! Statement Normalizer CLI
//!
//! Reads a bank-statement CSV and writes the normalized statement next to it.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- HDFC-Input-Case1.csv            # writes HDFC-Output-Case1.csv
//! cargo run -- statement.csv normalized.csv
//! cargo run                                    # prompts for the input name
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use statement_normalizer::{standardize, NormalizerError, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = env::args().skip(1);

    let input = match args.next() {
        Some(arg) => arg,
        None => prompt_for_input()?,
    };
    let input = with_csv_extension(input.trim());
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| derive_output_path(&input));

    if !Path::new(&input).exists() {
        return Err(NormalizerError::InputNotFound(input));
    }

    let file = File::open(&input)?;
    let statement = standardize(BufReader::new(file))?;

    let out = File::create(&output)?;
    statement.write_csv(BufWriter::new(out))?;

    println!("Output file generated: {}", output.display());
    Ok(())
}

fn prompt_for_input() -> Result<String> {
    print!("Enter the input CSV file name (e.g., HDFC-Input-Case1.csv): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let name = line.trim();
    if name.is_empty() {
        return Err(NormalizerError::MissingArgument);
    }
    Ok(name.to_string())
}

/// Appends `.csv` unless the name already ends with it.
fn with_csv_extension(name: &str) -> String {
    if name.ends_with(".csv") {
        name.to_string()
    } else {
        format!("{}.csv", name)
    }
}

/// `HDFC-Input-Case1.csv` becomes `HDFC-Output-Case1.csv`; any other
/// `name.csv` becomes `name-Output.csv`.
fn derive_output_path(input: &str) -> PathBuf {
    if input.contains("Input") {
        PathBuf::from(input.replace("Input", "Output"))
    } else {
        PathBuf::from(input.replace(".csv", "-Output.csv"))
    }
}
