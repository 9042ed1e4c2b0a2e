//! Methylation extractor.
//!
//! Cleans the merged hm27/hm450 export: the transcript-id column is
//! discarded, the probe gene name is uppercased, incomplete rows are dropped,
//! and duplicates removed.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{dedup_push, open_tsv_reader, prepare_output_path, require_column, write_csv};

const NAME_COLUMN: &str = "NAME";
const TRANSCRIPT_COLUMN: &str = "TRANSCRIPT_ID";

/// Extract the methylation table into `{out_root}/{cancer_type}/meth_pivot.csv`.
pub fn extract_methylation<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    out_root: Q,
    cancer_type: &str,
) -> Result<PathBuf> {
    let input = input.as_ref();
    let mut reader = open_tsv_reader(input)?;
    let headers = reader.headers()?.clone();
    let name_idx = require_column(&headers, NAME_COLUMN, input)?;
    // Transcript ids are absent from some exports; drop the column when present.
    let transcript_idx = crate::schema::find_column(&headers, TRANSCRIPT_COLUMN);

    let kept_indices: Vec<usize> = (0..headers.len())
        .filter(|&i| Some(i) != transcript_idx)
        .collect();
    let out_header: Vec<String> = kept_indices
        .iter()
        .map(|&i| headers.get(i).unwrap_or("").to_string())
        .collect();

    let mut rows = Vec::new();
    let mut seen = HashSet::new();
    let mut dropped = 0usize;
    for result in reader.records() {
        let record = result?;
        let incomplete = record.len() < headers.len()
            || kept_indices
                .iter()
                .any(|&i| record.get(i).unwrap_or("").trim().is_empty());
        if incomplete {
            dropped += 1;
            continue;
        }
        let row: Vec<String> = kept_indices
            .iter()
            .map(|&i| {
                let field = record.get(i).unwrap_or("").trim();
                if i == name_idx {
                    field.to_uppercase()
                } else {
                    field.to_string()
                }
            })
            .collect();
        dedup_push(&mut rows, &mut seen, row);
    }
    log::debug!(
        "Methylation extractor kept {} rows, dropped {} incomplete",
        rows.len(),
        dropped
    );

    let out_path = prepare_output_path(out_root.as_ref(), cancer_type, "meth_pivot.csv")?;
    write_csv(&out_path, &out_header, &rows)?;
    Ok(out_path)
}
