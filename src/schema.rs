//! Typed column schemas shared by the load, preprocess, and split stages.
//!
//! Column names live here instead of being re-matched as string literals at
//! each stage; the readers validate them once against the file header.
use csv::StringRecord;
use serde::{Deserialize, Serialize};

/// Case-insensitive header lookup.
pub(crate) fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(name))
}

/// Column layout of the persisted expression table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpressionSchema {
    /// Header of the patient-identity column. The reference export writes the
    /// index column without a header, so the default is the empty string,
    /// which matches an unlabeled first column.
    pub patient_id_column: String,
}

impl Default for ExpressionSchema {
    fn default() -> Self {
        Self {
            patient_id_column: String::new(),
        }
    }
}

impl ExpressionSchema {
    /// Locate the patient-identity column in a header row.
    pub fn patient_column_index(&self, headers: &StringRecord) -> Option<usize> {
        if self.patient_id_column.is_empty() {
            headers
                .get(0)
                .filter(|header| header.trim().is_empty())
                .map(|_| 0)
        } else {
            find_column(headers, &self.patient_id_column)
        }
    }
}

/// Column layout of the clinical survival table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurvivalSchema {
    pub patient_id_column: String,
    pub months_column: String,
    pub status_column: String,
}

impl Default for SurvivalSchema {
    fn default() -> Self {
        Self {
            patient_id_column: "PatientID".to_string(),
            months_column: "Overall Survival (Months)".to_string(),
            status_column: "Overall Survival Status".to_string(),
        }
    }
}
