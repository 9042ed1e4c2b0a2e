//! Gene-expression extractor.
//!
//! Cleans a raw mRNA-seq export (`Hugo_Symbol`, `Entrez_Gene_Id`, one column
//! per patient) into `{out_root}/{cancer_type}/ge_df.csv`. The matched-normal
//! samples file goes through the identical transform under
//! `normal_ge_df.csv`.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{dedup_push, has_missing_field, open_tsv_reader, prepare_output_path, require_column, write_csv};

const GENE_COLUMN: &str = "Hugo_Symbol";
const ENTREZ_COLUMN: &str = "Entrez_Gene_Id";

/// Extract the tumor gene-expression table.
pub fn extract_expression<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    out_root: Q,
    cancer_type: &str,
) -> Result<PathBuf> {
    clean_expression_table(input.as_ref(), out_root.as_ref(), cancer_type, "ge_df.csv")
}

/// Extract the matched-normal gene-expression table.
pub fn extract_normal_expression<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    out_root: Q,
    cancer_type: &str,
) -> Result<PathBuf> {
    clean_expression_table(
        input.as_ref(),
        out_root.as_ref(),
        cancer_type,
        "normal_ge_df.csv",
    )
}

fn clean_expression_table(
    input: &Path,
    out_root: &Path,
    cancer_type: &str,
    file_name: &str,
) -> Result<PathBuf> {
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
    for result in reader.records() {
        let record = result?;
        if has_missing_field(&record, headers.len()) {
            dropped += 1;
            continue;
        }
        let mut row = vec![
            record.get(gene_idx).unwrap_or("").trim().to_uppercase(),
            record.get(entrez_idx).unwrap_or("").trim().to_string(),
        ];
        row.extend(
            patient_indices
                .iter()
                .map(|&i| record.get(i).unwrap_or("").trim().to_string()),
        );
        dedup_push(&mut rows, &mut seen, row);
    }
    log::debug!(
        "Expression extractor kept {} rows, dropped {} incomplete",
        rows.len(),
        dropped
    );

    let out_path = prepare_output_path(out_root, cancer_type, file_name)?;
    write_csv(&out_path, &out_header, &rows)?;
    Ok(out_path)
}
