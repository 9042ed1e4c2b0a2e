//! Normalization applied to the expression matrix before label derivation.
//!
//! Mirrors the reference pipeline: element-wise log1p followed by per-gene
//! robust scaling (median centering, IQR division). Both transforms are
//! deterministic and preserve row (patient) and column (gene) order.

use crate::data_handling::ExpressionTable;
use crate::error::DatasetError;
use crate::stats::{iqr, median};

/// Per-column robust scaler (median center, IQR scale).
#[derive(Clone, Debug)]
pub struct RobustScaler {
    pub center: Vec<f32>,
    pub scale: Vec<f32>,
}

/// Element-wise natural-log(1 + x) over the expression matrix.
///
/// Expression counts are expected to be non-negative. Any value at or below
/// -1.0 (or NaN) lies outside the domain of `ln_1p` and aborts the run with
/// `InvalidExpressionValue` instead of letting NaN/-inf propagate into the
/// scaler.
pub fn log1p_transform(table: &ExpressionTable) -> Result<ExpressionTable, DatasetError> {
    for ((row, col), &value) in table.values.indexed_iter() {
        if value <= -1.0 || value.is_nan() {
            return Err(DatasetError::InvalidExpressionValue {
                patient: table.patient_ids[row].clone(),
                gene: table.genes[col].clone(),
                value,
            });
        }
    }

    Ok(ExpressionTable {
        patient_ids: table.patient_ids.clone(),
        genes: table.genes.clone(),
        values: table.values.mapv(f32::ln_1p),
    })
}

/// Fit a `RobustScaler` over the columns of the expression matrix.
///
/// Columns with zero (or non-finite) IQR keep a scale of 1.0, so constant
/// genes come out centered but unscaled rather than dividing by zero.
pub fn fit_scaler(table: &ExpressionTable) -> RobustScaler {
    assert!(
        table.n_patients() > 0 && table.n_genes() > 0,
        "fit_scaler requires a non-empty matrix"
    );

    let mut center = Vec::with_capacity(table.n_genes());
    let mut scale = Vec::with_capacity(table.n_genes());
    for col in table.values.columns() {
        let column: Vec<f32> = col.iter().copied().collect();
        center.push(median(&column));
        let spread = iqr(&column);
        scale.push(if spread.is_finite() && spread > 0.0 {
            spread
        } else {
            1.0
        });
    }

    RobustScaler { center, scale }
}

/// Transform every row with the fitted scaler, returning a new table.
pub fn transform_all(table: &ExpressionTable, scaler: &RobustScaler) -> ExpressionTable {
    assert_eq!(
        scaler.center.len(),
        table.n_genes(),
        "scaler was fit on a different column set"
    );

    let mut values = table.values.clone();
    for (col, mut column) in values.columns_mut().into_iter().enumerate() {
        column.mapv_inplace(|v| (v - scaler.center[col]) / scaler.scale[col]);
    }

    ExpressionTable {
        patient_ids: table.patient_ids.clone(),
        genes: table.genes.clone(),
        values,
    }
}

/// Fit the scaler and transform in one call.
pub fn fit_transform(table: &ExpressionTable) -> ExpressionTable {
    let scaler = fit_scaler(table);
    transform_all(table, &scaler)
}

/// Full normalization step: log1p then robust scaling.
pub fn preprocess_expression(table: &ExpressionTable) -> Result<ExpressionTable, DatasetError> {
    let logged = log1p_transform(table)?;
    Ok(fit_transform(&logged))
}
