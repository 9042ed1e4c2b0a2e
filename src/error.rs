use std::error::Error;
use std::fmt;

/// Terminal failures of the dataset-assembly pipeline.
///
/// Every variant invalidates the whole run; there is no retry or
/// partial-results path. I/O and parse failures are reported separately with
/// path/row context at the reader boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetError {
    /// The configured identity column is absent from an input table.
    MissingKeyColumn { table: &'static str, column: String },
    /// Expression and survival tables share no patient identifiers.
    EmptyIntersection,
    /// An expression value lies outside the domain of the log1p transform.
    InvalidExpressionValue {
        patient: String,
        gene: String,
        value: f32,
    },
    /// A survival-criteria class has no members after joining.
    EmptyClass { class: &'static str },
    /// An accessor was called before the pipeline stage that populates it.
    UninitializedState { expected: &'static str },
    /// The long/short criteria would let a record satisfy both classes.
    OverlappingCriteria {
        long_criteria: f32,
        short_criteria: f32,
    },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DatasetError::MissingKeyColumn { table, column } => {
                write!(f, "Missing key column '{}' in {} table", column, table)
            }
            DatasetError::EmptyIntersection => {
                write!(f, "No patient identifiers shared between expression and survival tables")
            }
            DatasetError::InvalidExpressionValue {
                patient,
                gene,
                value,
            } => write!(
                f,
                "Expression value {} for patient {} gene {} is outside the log1p domain",
                value, patient, gene
            ),
            DatasetError::EmptyClass { class } => {
                write!(f, "Survival class '{}' has no eligible rows", class)
            }
            DatasetError::UninitializedState { expected } => {
                write!(f, "Pipeline stage '{}' has not run yet", expected)
            }
            DatasetError::OverlappingCriteria {
                long_criteria,
                short_criteria,
            } => write!(
                f,
                "Long criteria ({} months) must exceed short criteria ({} months)",
                long_criteria, short_criteria
            ),
        }
    }
}

impl Error for DatasetError {}
