//! Pipeline assembling the labeled train/test split.
//!
//! Stages run in order: `load` (read + align on patient identity),
//! `preprocess` (log1p + robust scaling), `derive_labels_and_split`
//! (criteria-based labeling plus a per-class deterministic split), and
//! `dataset` (pure accessor). Each stage consumes the previous stage's
//! immutable value rather than mutating hidden fields, so calling a stage
//! out of order surfaces as `UninitializedState` instead of silently reading
//! stale data. Running the split before `preprocess` is permitted and yields
//! unnormalized features; it is documented here as a discouraged path, not an
//! error.
use std::path::{Path, PathBuf};

use anyhow::Result;
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::{SeedScope, SplitConfig};
use crate::data_handling::{AlignedCohort, SurvivalDataset, SurvivalStatus};
use crate::error::DatasetError;
use crate::io::tables::{read_expression_csv, read_survival_csv};
use crate::preprocessing::preprocess_expression;
use crate::schema::{ExpressionSchema, SurvivalSchema};

/// Label assigned to censored patients beyond the long-survival threshold.
pub const LONG_SURVIVOR: i32 = 0;
/// Label assigned to patients deceased before the short-survival threshold.
pub const SHORT_SURVIVOR: i32 = 1;

/// Builder threading the pipeline stages over two input files.
pub struct SurvivalDatasetBuilder {
    expression_path: PathBuf,
    survival_path: PathBuf,
    expression_schema: ExpressionSchema,
    survival_schema: SurvivalSchema,
    cohort: Option<AlignedCohort>,
    dataset: Option<SurvivalDataset>,
}

impl SurvivalDatasetBuilder {
    pub fn new<P: AsRef<Path>>(expression_path: P, survival_path: P) -> Self {
        Self::with_schemas(
            expression_path,
            survival_path,
            ExpressionSchema::default(),
            SurvivalSchema::default(),
        )
    }

    pub fn with_schemas<P: AsRef<Path>>(
        expression_path: P,
        survival_path: P,
        expression_schema: ExpressionSchema,
        survival_schema: SurvivalSchema,
    ) -> Self {
        SurvivalDatasetBuilder {
            expression_path: expression_path.as_ref().to_path_buf(),
            survival_path: survival_path.as_ref().to_path_buf(),
            expression_schema,
            survival_schema,
            cohort: None,
            dataset: None,
        }
    }

    /// Read both tables and restrict them to their shared patients.
    pub fn load(&mut self) -> Result<&AlignedCohort> {
        let expression = read_expression_csv(&self.expression_path, &self.expression_schema)?;
        let survival = read_survival_csv(&self.survival_path, &self.survival_schema)?;
        log::info!(
            "Loaded {} expression rows and {} survival records",
            expression.n_patients(),
            survival.len()
        );

        let cohort = AlignedCohort::align(expression, survival)?;
        log::info!("Aligned cohort holds {} patients", cohort.len());
        Ok(self.cohort.insert(cohort))
    }

    /// Normalize the expression matrix (log1p + per-gene robust scaling).
    pub fn preprocess(&mut self) -> Result<&AlignedCohort> {
        let cohort = self
            .cohort
            .take()
            .ok_or(DatasetError::UninitializedState { expected: "load" })?;
        let expression = preprocess_expression(&cohort.expression)?;
        Ok(self.cohort.insert(AlignedCohort {
            expression,
            survival: cohort.survival,
        }))
    }

    /// Derive long/short-survivor labels and split each class independently.
    pub fn derive_labels_and_split(&mut self, config: &SplitConfig) -> Result<&SurvivalDataset> {
        let cohort = self
            .cohort
            .as_ref()
            .ok_or(DatasetError::UninitializedState { expected: "load" })?;
        let dataset = derive_labels_and_split(cohort, config)?;
        dataset.log_summary();
        Ok(self.dataset.insert(dataset))
    }

    /// The assembled split. Pure accessor; no recomputation.
    pub fn dataset(&self) -> Result<&SurvivalDataset, DatasetError> {
        self.dataset.as_ref().ok_or(DatasetError::UninitializedState {
            expected: "derive_labels_and_split",
        })
    }
}

/// Label each eligible cohort row and produce the per-class stratified split.
///
/// Long survivors are censored patients past `long_criteria` months; short
/// survivors are deceased patients under `short_criteria` months. Rows
/// satisfying neither criterion are excluded entirely. Because the cohort is
/// already aligned, the inner join against expression is implicit: every
/// survival row indexes an expression row.
pub fn derive_labels_and_split(
    cohort: &AlignedCohort,
    config: &SplitConfig,
) -> Result<SurvivalDataset, DatasetError> {
    config.validate()?;

    let survival = &cohort.survival;
    let long_rows: Vec<usize> = (0..survival.len())
        .filter(|&i| {
            survival.months[i] > config.long_criteria
                && survival.status[i] == SurvivalStatus::Censored
        })
        .collect();
    let short_rows: Vec<usize> = (0..survival.len())
        .filter(|&i| {
            survival.months[i] < config.short_criteria
                && survival.status[i] == SurvivalStatus::Deceased
        })
        .collect();

    if long_rows.is_empty() {
        return Err(DatasetError::EmptyClass { class: "long" });
    }
    if short_rows.is_empty() {
        return Err(DatasetError::EmptyClass { class: "short" });
    }
    log::info!(
        "Derived {} long-survivor and {} short-survivor rows ({} excluded)",
        long_rows.len(),
        short_rows.len(),
        survival.len() - long_rows.len() - short_rows.len()
    );

    let class_seed = |class_idx: u64| match config.seed_scope {
        SeedScope::Shared => config.seed,
        SeedScope::PerClass => config.seed.wrapping_add(class_idx),
    };
    let (long_train, long_test) = split_class(&long_rows, config.test_fraction, class_seed(0));
    let (short_train, short_test) = split_class(&short_rows, config.test_fraction, class_seed(1));

    let assemble = |long: &[usize], short: &[usize]| {
        let rows: Vec<usize> = long.iter().chain(short.iter()).copied().collect();
        let labels: Vec<i32> = long
            .iter()
            .map(|_| LONG_SURVIVOR)
            .chain(short.iter().map(|_| SHORT_SURVIVOR))
            .collect();
        (
            cohort.expression.select_rows(&rows),
            Array1::from_vec(labels),
        )
    };
    let (train_inputs, train_labels) = assemble(&long_train, &short_train);
    let (test_inputs, test_labels) = assemble(&long_test, &short_test);

    Ok(SurvivalDataset {
        train_inputs,
        train_labels,
        test_inputs,
        test_labels,
    })
}

/// Deterministic shuffle-and-cut of one class's row indices.
///
/// Reserves `ceil(n * test_fraction)` rows for test; the remainder trains.
/// Returns (train, test).
fn split_class(rows: &[usize], test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut shuffled = rows.to_vec();
    let mut rng = StdRng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    let n_test = (rows.len() as f64 * test_fraction).ceil() as usize;
    let n_test = n_test.min(shuffled.len());
    let (test, train) = shuffled.split_at(n_test);
    (train.to_vec(), test.to_vec())
}
