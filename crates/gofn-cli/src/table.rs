//! Delimited input and output tables
//!
//! Inputs are read with a header row; the protein column is picked by
//! name. Outputs are tab-separated with a header row.

use crate::error::{CliError, Result};
use gofn_core::batch::unique_ids;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Parse a separator argument: `tab`, `comma`, `semicolon`, `space`, `\t`
/// or any single ASCII character.
pub fn parse_separator(raw: &str) -> Result<u8> {
    match raw {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        "comma" => Ok(b','),
        "semicolon" => Ok(b';'),
        "space" => Ok(b' '),
        other => {
            let bytes = other.as_bytes();
            if bytes.len() == 1 && bytes[0].is_ascii() {
                Ok(bytes[0])
            } else {
                Err(CliError::config(format!(
                    "Separator must be 'tab', 'comma', 'semicolon', 'space' or a single ASCII character, got '{}'",
                    other
                )))
            }
        },
    }
}

/// Read the distinct, non-blank values of `column`, in first-seen order.
pub fn read_column(path: &Path, column: &str, separator: u8) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(separator)
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let index = headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| CliError::column_not_found(column, path.display().to_string(), &headers))?;

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(value) = record.get(index) {
            values.push(value.to_string());
        }
    }

    Ok(unique_ids(values))
}

/// Open the output destination: a file, or stdout when `path` is `None`.
pub fn output_writer(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Ok(Box::new(File::create(path)?))
        },
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Tab-separated writer with a fixed header.
pub struct TsvWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl<W: Write> TsvWriter<W> {
    pub fn new(writer: W, header: &[&str]) -> Result<Self> {
        let mut inner = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(writer);
        inner.write_record(header)?;
        Ok(Self { inner })
    }

    pub fn write_row(&mut self, fields: &[&str]) -> Result<()> {
        self.inner.write_record(fields)?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}
