//! Core tables threaded through the survival dataset pipeline.
//!
//! This module defines `ExpressionTable`, `SurvivalTable`, and the derived
//! `AlignedCohort` plus the final `SurvivalDataset` split, along with the
//! row-selection helpers the builder uses to restrict and reorder them.
use std::collections::HashMap;

use ndarray::{Array1, Array2, Axis};

use crate::error::DatasetError;

/// Vital status recorded alongside the survival time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurvivalStatus {
    /// Patient survived at least to the recorded time (code 0).
    Censored,
    /// Death observed at the recorded time (code 1).
    Deceased,
}

impl SurvivalStatus {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(SurvivalStatus::Censored),
            1 => Some(SurvivalStatus::Deceased),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            SurvivalStatus::Censored => 0,
            SurvivalStatus::Deceased => 1,
        }
    }
}

/// Gene-expression feature matrix keyed by patient.
///
/// Rows are patients, columns are genes. Patient identifiers are unique and
/// row order is preserved through every transform.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionTable {
    pub patient_ids: Vec<String>,
    pub genes: Vec<String>,
    pub values: Array2<f32>,
}

impl ExpressionTable {
    pub fn new(patient_ids: Vec<String>, genes: Vec<String>, values: Array2<f32>) -> Self {
        assert_eq!(
            patient_ids.len(),
            values.nrows(),
            "patient ids must match matrix rows"
        );
        assert_eq!(
            genes.len(),
            values.ncols(),
            "gene names must match matrix columns"
        );
        ExpressionTable {
            patient_ids,
            genes,
            values,
        }
    }

    pub fn n_patients(&self) -> usize {
        self.patient_ids.len()
    }

    pub fn n_genes(&self) -> usize {
        self.genes.len()
    }

    /// Map from patient id to row index.
    pub fn row_index(&self) -> HashMap<&str, usize> {
        self.patient_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect()
    }

    /// New table holding the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> ExpressionTable {
        ExpressionTable {
            patient_ids: indices
                .iter()
                .map(|&i| self.patient_ids[i].clone())
                .collect(),
            genes: self.genes.clone(),
            values: self.values.select(Axis(0), indices),
        }
    }
}

/// Clinical survival follow-up, one record per patient.
#[derive(Debug, Clone, PartialEq)]
pub struct SurvivalTable {
    pub patient_ids: Vec<String>,
    pub months: Vec<f32>,
    pub status: Vec<SurvivalStatus>,
}

impl SurvivalTable {
    pub fn new(patient_ids: Vec<String>, months: Vec<f32>, status: Vec<SurvivalStatus>) -> Self {
        assert_eq!(
            patient_ids.len(),
            months.len(),
            "months must match patient ids"
        );
        assert_eq!(
            patient_ids.len(),
            status.len(),
            "status must match patient ids"
        );
        SurvivalTable {
            patient_ids,
            months,
            status,
        }
    }

    pub fn len(&self) -> usize {
        self.patient_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patient_ids.is_empty()
    }

    pub fn row_index(&self) -> HashMap<&str, usize> {
        self.patient_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect()
    }

    pub fn select_rows(&self, indices: &[usize]) -> SurvivalTable {
        SurvivalTable {
            patient_ids: indices
                .iter()
                .map(|&i| self.patient_ids[i].clone())
                .collect(),
            months: indices.iter().map(|&i| self.months[i]).collect(),
            status: indices.iter().map(|&i| self.status[i]).collect(),
        }
    }
}

/// Expression and survival restricted to their common patients.
///
/// A derived, recomputed view: both tables hold exactly the intersection of
/// the raw key sets, in the same row order.
#[derive(Debug, Clone)]
pub struct AlignedCohort {
    pub expression: ExpressionTable,
    pub survival: SurvivalTable,
}

impl AlignedCohort {
    /// Restrict both tables to the intersection of their patient sets.
    ///
    /// Expression row order wins; survival rows are reordered to match it.
    /// Intersection is commutative, so the resulting key set does not depend
    /// on which table is restricted first.
    pub fn align(
        expression: ExpressionTable,
        survival: SurvivalTable,
    ) -> Result<Self, DatasetError> {
        let survival_index = survival.row_index();
        let keep: Vec<usize> = (0..expression.n_patients())
            .filter(|&i| survival_index.contains_key(expression.patient_ids[i].as_str()))
            .collect();
        if keep.is_empty() {
            return Err(DatasetError::EmptyIntersection);
        }

        let dropped = expression.n_patients() - keep.len() + survival.len() - keep.len();
        if dropped > 0 {
            log::debug!(
                "Alignment dropped {} rows outside the patient intersection",
                dropped
            );
        }

        let expression = expression.select_rows(&keep);
        let survival_rows: Vec<usize> = expression
            .patient_ids
            .iter()
            .map(|id| survival_index[id.as_str()])
            .collect();
        let survival = survival.select_rows(&survival_rows);

        Ok(AlignedCohort {
            expression,
            survival,
        })
    }

    pub fn len(&self) -> usize {
        self.expression.n_patients()
    }

    pub fn is_empty(&self) -> bool {
        self.expression.n_patients() == 0
    }
}

/// The four disjoint groupings produced by the stratified split.
///
/// Inputs and labels are row-aligned; patient identifiers live on the input
/// tables, so each grouping is a patient-keyed mapping. Labels take only the
/// values 0 (long survivor) and 1 (short survivor).
#[derive(Debug, Clone)]
pub struct SurvivalDataset {
    pub train_inputs: ExpressionTable,
    pub train_labels: Array1<i32>,
    pub test_inputs: ExpressionTable,
    pub test_labels: Array1<i32>,
}

impl SurvivalDataset {
    pub fn n_train(&self) -> usize {
        self.train_inputs.n_patients()
    }

    pub fn n_test(&self) -> usize {
        self.test_inputs.n_patients()
    }

    pub fn log_summary(&self) {
        let count = |labels: &Array1<i32>, value: i32| labels.iter().filter(|&&l| l == value).count();
        log::info!(
            "Train: {} rows ({} long, {} short); Test: {} rows ({} long, {} short); {} genes",
            self.n_train(),
            count(&self.train_labels, 0),
            count(&self.train_labels, 1),
            self.n_test(),
            count(&self.test_labels, 0),
            count(&self.test_labels, 1),
            self.train_inputs.n_genes()
        );
    }
}
