//! Copy-number-alteration extractor.
//!
//! Same cleaning as the expression extractor, with the Entrez id normalized
//! to an integer (some exports serialize it as a float).
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

use super::{dedup_push, has_missing_field, open_tsv_reader, prepare_output_path, require_column, write_csv};

const GENE_COLUMN: &str = "Hugo_Symbol";
const ENTREZ_COLUMN: &str = "Entrez_Gene_Id";

/// Extract the copy-number table into `{out_root}/{cancer_type}/cna_df.csv`.
pub fn extract_cna<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    out_root: Q,
    cancer_type: &str,
) -> Result<PathBuf> {
    let input = input.as_ref();
    let mut reader = open_tsv_reader(input)?;
    let headers = reader.headers()?.clone();
    let gene_idx = require_column(&headers, GENE_COLUMN, input)?;
    let entrez_idx = require_column(&headers, ENTREZ_COLUMN, input)?;

    let patient_indices: Vec<usize> = (0..headers.len())
        .filter(|&i| i != gene_idx && i != entrez_idx)
        .collect();
    let mut out_header = vec!["GENES".to_string(), ENTREZ_COLUMN.to_string()];
    out_header.extend(
        patient_indices
            .iter()
            .map(|&i| headers.get(i).unwrap_or("").to_string()),
    );

    let mut rows = Vec::new();
    let mut seen = HashSet::new();
    let mut dropped = 0usize;
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        if has_missing_field(&record, headers.len()) {
            dropped += 1;
            continue;
        }
        let entrez = normalize_entrez(record.get(entrez_idx).unwrap_or(""))
            .ok_or_else(|| anyhow!("Invalid Entrez id at row {}", row_idx + 1))?;
        let mut row = vec![
            record.get(gene_idx).unwrap_or("").trim().to_uppercase(),
            entrez,
        ];
        row.extend(
            patient_indices
                .iter()
                .map(|&i| record.get(i).unwrap_or("").trim().to_string()),
        );
        dedup_push(&mut rows, &mut seen, row);
    }
    log::debug!(
        "CNA extractor kept {} rows, dropped {} incomplete",
        rows.len(),
        dropped
    );

    let out_path = prepare_output_path(out_root.as_ref(), cancer_type, "cna_df.csv")?;
    write_csv(&out_path, &out_header, &rows)?;
    Ok(out_path)
}

/// Render an Entrez id as a plain integer string.
pub(crate) fn normalize_entrez(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if let Ok(id) = trimmed.parse::<i64>() {
        return Some(id.to_string());
    }
    trimmed.parse::<f64>().ok().map(|v| (v as i64).to_string())
}
