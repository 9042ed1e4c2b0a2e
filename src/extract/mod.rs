//! Modality extractors: stateless batch transforms from raw TCGA-style
//! exports to cleaned per-cancer-type tables.
//!
//! Common contract: read a tab-delimited file fully into memory, drop rows
//! with any empty field, uppercase the gene-symbol column, deduplicate
//! identical rows, and write a comma-delimited file at
//! `{out_root}/{cancer_type}/{modality}.csv`. Each extractor owns its own
//! input and output exclusively for the duration of one run.
pub mod cna;
pub mod expression;
pub mod methylation;
pub mod mutation;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;

/// Build `{out_root}/{cancer_type}/{file_name}`, creating directories.
pub(crate) fn prepare_output_path(
    out_root: &Path,
    cancer_type: &str,
    file_name: &str,
) -> Result<PathBuf> {
    let dir = out_root.join(cancer_type);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    Ok(dir.join(file_name))
}

pub(crate) fn open_tsv_reader(path: &Path) -> Result<csv::Reader<fs::File>> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open raw table: {}", path.display()))
}

/// True when any field in the record is empty after trimming. Short records
/// (fewer fields than the header) also count as missing.
pub(crate) fn has_missing_field(record: &StringRecord, expected_len: usize) -> bool {
    record.len() < expected_len || record.iter().any(|field| field.trim().is_empty())
}

pub(crate) fn require_column(headers: &StringRecord, name: &str, path: &Path) -> Result<usize> {
    crate::schema::find_column(headers, name)
        .ok_or_else(|| anyhow!("Missing column '{}' in {}", name, path.display()))
}

/// Write header and rows as a comma-delimited file.
pub(crate) fn write_csv(path: &Path, header: &[String], rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    writer
        .write_record(header)
        .context("Failed to write header row")?;
    for row in rows {
        writer
            .write_record(row)
            .context("Failed to write data row")?;
    }
    writer.flush().context("Failed to flush output file")?;
    Ok(())
}

/// Append `row` unless an identical row was already kept.
pub(crate) fn dedup_push(rows: &mut Vec<Vec<String>>, seen: &mut HashSet<Vec<String>>, row: Vec<String>) {
    if seen.insert(row.clone()) {
        rows.push(row);
    }
}
