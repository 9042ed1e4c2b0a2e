//! Integration tests for table alignment and row selection.

use ndarray::Array2;
use survival_prep::data_handling::{
    AlignedCohort, ExpressionTable, SurvivalStatus, SurvivalTable,
};
use survival_prep::error::DatasetError;

fn expression(ids: &[&str]) -> ExpressionTable {
    let values: Vec<f32> = (0..ids.len() * 2).map(|v| v as f32).collect();
    ExpressionTable::new(
        ids.iter().map(|s| s.to_string()).collect(),
        vec!["G1".to_string(), "G2".to_string()],
        Array2::from_shape_vec((ids.len(), 2), values).unwrap(),
    )
}

fn survival(ids: &[&str]) -> SurvivalTable {
    SurvivalTable::new(
        ids.iter().map(|s| s.to_string()).collect(),
        vec![10.0; ids.len()],
        vec![SurvivalStatus::Censored; ids.len()],
    )
}

// ---------------------------------------------------------------------------
// SurvivalStatus codes
// ---------------------------------------------------------------------------

#[test]
fn status_codes_round_trip() {
    assert_eq!(SurvivalStatus::from_code(0), Some(SurvivalStatus::Censored));
    assert_eq!(SurvivalStatus::from_code(1), Some(SurvivalStatus::Deceased));
    assert_eq!(SurvivalStatus::from_code(2), None);
    assert_eq!(SurvivalStatus::Censored.code(), 0);
    assert_eq!(SurvivalStatus::Deceased.code(), 1);
}

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

#[test]
fn align_restricts_to_intersection() {
    let expr = expression(&["P1", "P2", "P3"]);
    let surv = survival(&["P2", "P3", "P4"]);

    let cohort = AlignedCohort::align(expr, surv).unwrap();
    assert_eq!(cohort.expression.patient_ids, vec!["P2", "P3"]);
    assert_eq!(cohort.survival.patient_ids, vec!["P2", "P3"]);
    assert_eq!(cohort.len(), 2);
}

#[test]
fn align_key_sets_are_identical() {
    let expr = expression(&["A", "B", "C", "D"]);
    let surv = survival(&["D", "B", "Z"]);

    let cohort = AlignedCohort::align(expr, surv).unwrap();
    assert_eq!(cohort.expression.patient_ids, cohort.survival.patient_ids);
}

#[test]
fn align_reorders_survival_to_expression_order() {
    let expr = expression(&["P1", "P2"]);
    let mut surv = survival(&["P2", "P1"]);
    surv.months = vec![5.0, 40.0];

    let cohort = AlignedCohort::align(expr, surv).unwrap();
    assert_eq!(cohort.survival.patient_ids, vec!["P1", "P2"]);
    assert_eq!(cohort.survival.months, vec![40.0, 5.0]);
}

#[test]
fn align_empty_intersection_errors() {
    let expr = expression(&["P1", "P2"]);
    let surv = survival(&["P3", "P4"]);
    let err = AlignedCohort::align(expr, surv).unwrap_err();
    assert_eq!(err, DatasetError::EmptyIntersection);
}

#[test]
fn align_identical_key_sets_keeps_everything() {
    let expr = expression(&["P1", "P2", "P3"]);
    let surv = survival(&["P1", "P2", "P3"]);
    let cohort = AlignedCohort::align(expr, surv).unwrap();
    assert_eq!(cohort.len(), 3);
}

// ---------------------------------------------------------------------------
// Row selection
// ---------------------------------------------------------------------------

#[test]
fn select_rows_keeps_order_and_values() {
    let expr = expression(&["P1", "P2", "P3"]);
    let picked = expr.select_rows(&[2, 0]);

    assert_eq!(picked.patient_ids, vec!["P3", "P1"]);
    assert_eq!(picked.values[(0, 0)], expr.values[(2, 0)]);
    assert_eq!(picked.values[(1, 1)], expr.values[(0, 1)]);
    assert_eq!(picked.genes, expr.genes);
}
