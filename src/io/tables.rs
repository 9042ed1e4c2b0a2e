//! Delimited-table readers for expression and survival inputs.
//!
//! Both readers load the whole file into memory in one shot; a malformed row
//! fails the read with its row number rather than being skipped.
use std::collections::HashSet;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use ndarray::Array2;

use crate::data_handling::{ExpressionTable, SurvivalStatus, SurvivalTable};
use crate::error::DatasetError;
use crate::schema::{find_column, ExpressionSchema, SurvivalSchema};

/// Pick the field delimiter from the file extension (`.tsv` is tab, anything
/// else comma).
fn delimiter_for(path: &Path) -> u8 {
    let is_tsv = path.extension().map(|e| e == "tsv").unwrap_or(false);
    if is_tsv {
        b'\t'
    } else {
        b','
    }
}

/// Read a persisted expression table.
///
/// The identity column configured in the schema becomes PatientID; every
/// other column is a gene. Patient identifiers must be unique.
pub fn read_expression_csv<P: AsRef<Path>>(
    path: P,
    schema: &ExpressionSchema,
) -> Result<ExpressionTable> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_for(path))
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open expression table: {}", path.display()))?;

    let headers = reader
        .headers()
        .context("Failed to read expression header row")?
        .clone();

    let patient_idx = schema.patient_column_index(&headers).ok_or_else(|| {
        anyhow::Error::new(DatasetError::MissingKeyColumn {
            table: "expression",
            column: schema.patient_id_column.clone(),
        })
    })?;

    let gene_indices: Vec<usize> = (0..headers.len()).filter(|&i| i != patient_idx).collect();
    let genes: Vec<String> = gene_indices
        .iter()
        .map(|&i| headers.get(i).unwrap_or("").to_string())
        .collect();
    if genes.is_empty() {
        return Err(anyhow!("Expression table has no gene columns"));
    }

    let mut patient_ids = Vec::new();
    let mut seen = HashSet::new();
    let mut values = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;

        let patient_id = record
            .get(patient_idx)
            .ok_or_else(|| anyhow!("Missing patient id at row {}", row_idx + 1))?
            .trim()
            .to_string();
        if !seen.insert(patient_id.clone()) {
            return Err(anyhow!(
                "Duplicate patient id '{}' at row {}",
                patient_id,
                row_idx + 1
            ));
        }
        patient_ids.push(patient_id);

        for &idx in &gene_indices {
            let raw = record
                .get(idx)
                .ok_or_else(|| anyhow!("Missing value at row {}", row_idx + 1))?;
            let parsed = raw.trim().parse::<f32>().with_context(|| {
                format!(
                    "Invalid expression value '{}' for gene '{}' at row {}",
                    raw,
                    headers.get(idx).unwrap_or(""),
                    row_idx + 1
                )
            })?;
            values.push(parsed);
        }
    }

    let n_patients = patient_ids.len();
    let matrix = Array2::from_shape_vec((n_patients, genes.len()), values)
        .context("Failed to build expression matrix")?;

    log::debug!(
        "Read expression table {} ({} patients x {} genes)",
        path.display(),
        n_patients,
        genes.len()
    );

    Ok(ExpressionTable::new(patient_ids, genes, matrix))
}

/// Read a clinical survival table (PatientID, months, status).
///
/// Status accepts bare codes (`0` / `1`) as well as the annotated form some
/// clinical exports use (`0:LIVING` / `1:DECEASED`). One record per patient.
pub fn read_survival_csv<P: AsRef<Path>>(
    path: P,
    schema: &SurvivalSchema,
) -> Result<SurvivalTable> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_for(path))
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open survival table: {}", path.display()))?;

    let headers = reader
        .headers()
        .context("Failed to read survival header row")?
        .clone();

    let missing_key = |column: &str| {
        anyhow::Error::new(DatasetError::MissingKeyColumn {
            table: "survival",
            column: column.to_string(),
        })
    };
    let patient_idx = find_column(&headers, &schema.patient_id_column)
        .ok_or_else(|| missing_key(&schema.patient_id_column))?;
    let months_idx = find_column(&headers, &schema.months_column)
        .ok_or_else(|| missing_key(&schema.months_column))?;
    let status_idx = find_column(&headers, &schema.status_column)
        .ok_or_else(|| missing_key(&schema.status_column))?;

    let mut patient_ids = Vec::new();
    let mut seen = HashSet::new();
    let mut months = Vec::new();
    let mut status = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;

        let patient_id = record
            .get(patient_idx)
            .ok_or_else(|| anyhow!("Missing patient id at row {}", row_idx + 1))?
            .trim()
            .to_string();
        if !seen.insert(patient_id.clone()) {
            return Err(anyhow!(
                "Duplicate survival record for patient '{}' at row {}",
                patient_id,
                row_idx + 1
            ));
        }
        patient_ids.push(patient_id);

        let raw_months = record.get(months_idx).unwrap_or_default().trim();
        let parsed_months = raw_months.parse::<f32>().with_context(|| {
            format!(
                "Invalid survival months '{}' at row {}",
                raw_months,
                row_idx + 1
            )
        })?;
        months.push(parsed_months);

        let raw_status = record.get(status_idx).unwrap_or_default().trim();
        let code_str = raw_status.split(':').next().unwrap_or(raw_status).trim();
        let code = code_str.parse::<i32>().with_context(|| {
            format!(
                "Invalid survival status '{}' at row {}",
                raw_status,
                row_idx + 1
            )
        })?;
        let parsed_status = SurvivalStatus::from_code(code).ok_or_else(|| {
            anyhow!(
                "Survival status '{}' at row {} is outside {{0, 1}}",
                raw_status,
                row_idx + 1
            )
        })?;
        status.push(parsed_status);
    }

    log::debug!(
        "Read survival table {} ({} records)",
        path.display(),
        patient_ids.len()
    );

    Ok(SurvivalTable::new(patient_ids, months, status))
}
