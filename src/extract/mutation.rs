//! Mutation extractor.
//!
//! The one extractor with a real shape change: the long-format mutation
//! export is reduced to (patient, gene, entrez, variant classification),
//! the classification is one-hot encoded, and indicator counts are summed
//! per (patient, gene, entrez) triple into a wide table with one column per
//! observed variant class.
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

use super::{open_tsv_reader, prepare_output_path, require_column, write_csv};
use crate::extract::cna::normalize_entrez;

const SAMPLE_COLUMN: &str = "Tumor_Sample_Barcode";
const GENE_COLUMN: &str = "Hugo_Symbol";
const ENTREZ_COLUMN: &str = "Entrez_Gene_Id";
const VARIANT_COLUMN: &str = "Variant_Classification";

/// Extract mutation counts into `{out_root}/{cancer_type}/mut_encoded_df.csv`.
pub fn extract_mutations<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    out_root: Q,
    cancer_type: &str,
) -> Result<PathBuf> {
    let input = input.as_ref();
    let mut reader = open_tsv_reader(input)?;
    let headers = reader.headers()?.clone();
    let sample_idx = require_column(&headers, SAMPLE_COLUMN, input)?;
    let gene_idx = require_column(&headers, GENE_COLUMN, input)?;
    let entrez_idx = require_column(&headers, ENTREZ_COLUMN, input)?;
    let variant_idx = require_column(&headers, VARIANT_COLUMN, input)?;

    let mut variant_classes: BTreeSet<String> = BTreeSet::new();
    // BTreeMap keys the aggregate by (patient, gene, entrez) and gives the
    // output a stable row order.
    let mut counts: BTreeMap<(String, String, String), HashMap<String, u32>> = BTreeMap::new();
    let mut dropped = 0usize;

    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let fields = [
            record.get(sample_idx).unwrap_or("").trim(),
            record.get(gene_idx).unwrap_or("").trim(),
            record.get(entrez_idx).unwrap_or("").trim(),
            record.get(variant_idx).unwrap_or("").trim(),
        ];
        if fields.iter().any(|f| f.is_empty()) {
            dropped += 1;
            continue;
        }

        let entrez = normalize_entrez(fields[2])
            .ok_or_else(|| anyhow!("Invalid Entrez id at row {}", row_idx + 1))?;
        let variant = fields[3].to_string();
        variant_classes.insert(variant.clone());

        let key = (fields[0].to_string(), fields[1].to_uppercase(), entrez);
        *counts.entry(key).or_default().entry(variant).or_insert(0) += 1;
    }
    log::debug!(
        "Mutation extractor aggregated {} (patient, gene) pairs across {} variant classes, dropped {} incomplete rows",
        counts.len(),
        variant_classes.len(),
        dropped
    );

    let mut out_header = vec![
        "PatientID".to_string(),
        "GENES".to_string(),
        ENTREZ_COLUMN.to_string(),
    ];
    out_header.extend(variant_classes.iter().cloned());

    let rows: Vec<Vec<String>> = counts
        .iter()
        .map(|((patient, gene, entrez), class_counts)| {
            let mut row = vec![patient.clone(), gene.clone(), entrez.clone()];
            row.extend(
                variant_classes
                    .iter()
                    .map(|class| class_counts.get(class).copied().unwrap_or(0).to_string()),
            );
            row
        })
        .collect();

    let out_path = prepare_output_path(out_root.as_ref(), cancer_type, "mut_encoded_df.csv")?;
    write_csv(&out_path, &out_header, &rows)?;
    Ok(out_path)
}
