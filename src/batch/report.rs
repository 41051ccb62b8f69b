//! Batch report rendering.
//!
//! The CSV layout targets spreadsheet programs in locales that use the
//! comma as decimal separator: UTF-8 with a byte order mark and `;` between
//! fields.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::catalog;
use crate::common::error::Result;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const CSV_DELIMITER: char = ';';
pub(crate) const CSV_HEADER: [&str; 3] = ["original_name", "output_name", "detected_extension"];

/// One processed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// File name as received
    pub original_name: String,
    /// File name in the staging directory
    pub output_name: String,
    /// Lowercase extension without the dot; `None` when undetected
    pub extension: Option<String>,
}

impl ReportRow {
    /// Extension with a leading dot, or an empty string.
    pub fn dotted_extension(&self) -> String {
        self.extension
            .as_deref()
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default()
    }
}

/// Number of files per extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatCounts {
    counts: BTreeMap<String, usize>,
}

impl FormatCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every row that has an extension.
    pub fn from_rows(rows: &[ReportRow]) -> Self {
        let mut counts = Self::new();
        for ext in rows.iter().filter_map(|row| row.extension.as_deref()) {
            counts.add(ext);
        }
        counts
    }

    pub fn add(&mut self, extension: &str) {
        *self.counts.entry(extension.to_owned()).or_insert(0) += 1;
    }

    pub fn get(&self, extension: &str) -> usize {
        self.counts.get(extension).copied().unwrap_or(0)
    }

    /// Files with any extension.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Extensions by descending count, ties broken alphabetically.
    pub fn by_frequency(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> =
            self.counts.iter().map(|(ext, &n)| (ext.as_str(), n)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// Outcome of a batch run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// One row per input, in input order
    pub rows: Vec<ReportRow>,
    pub counts: FormatCounts,
    /// Directory holding the renamed copies
    pub staging_dir: PathBuf,
    /// XLSX report, when requested
    pub xlsx_path: Option<PathBuf>,
    /// CSV report, when requested
    pub csv_path: Option<PathBuf>,
    /// ZIP package of the staging directory, when requested
    pub package_path: Option<PathBuf>,
}

impl BatchReport {
    /// Human-readable summary of the counts.
    pub fn summary(&self) -> String {
        summary(&self.counts)
    }
}

fn needs_quoting(field: &str) -> bool {
    field.contains([CSV_DELIMITER, '"', '\r', '\n'])
}

fn write_field<W: Write>(writer: &mut W, field: &str) -> std::io::Result<()> {
    if needs_quoting(field) {
        write!(writer, "\"{}\"", field.replace('"', "\"\""))
    } else {
        writer.write_all(field.as_bytes())
    }
}

fn write_record<W: Write>(writer: &mut W, fields: &[&str]) -> std::io::Result<()> {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            write!(writer, "{CSV_DELIMITER}")?;
        }
        write_field(writer, field)?;
    }
    writer.write_all(b"\n")
}

/// Write the rows as CSV (BOM, `;` delimiter, minimal quoting).
pub fn write_csv<W: Write>(writer: &mut W, rows: &[ReportRow]) -> std::io::Result<()> {
    writer.write_all(UTF8_BOM)?;
    write_record(writer, &CSV_HEADER)?;
    for row in rows {
        let extension = row.dotted_extension();
        write_record(
            writer,
            &[row.original_name.as_str(), row.output_name.as_str(), extension.as_str()],
        )?;
    }
    Ok(())
}

/// Write the CSV report to `path`.
pub fn write_csv_file(path: &Path, rows: &[ReportRow]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_csv(&mut writer, rows)?;
    writer.flush()?;
    Ok(())
}

/// Summary of the formats found, with description and suggested software.
pub fn summary(counts: &FormatCounts) -> String {
    if counts.is_empty() {
        return "No extension was detected.".to_owned();
    }

    let mut lines = vec!["Found:".to_owned()];
    for (ext, n) in counts.by_frequency() {
        lines.push(format!(
            "- {n} file(s) with extension '.{ext}' ({}; recommended software: {})",
            catalog::description(ext),
            catalog::recommended_software(ext),
        ));
    }
    lines.push(format!(
        "\nTotal files with a detected extension: {}",
        counts.total()
    ));
    lines.join("\n")
}
