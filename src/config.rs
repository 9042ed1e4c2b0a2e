use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DatasetError;

/// How the split seed is scoped across the two survival classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedScope {
    /// Both classes shuffle from the same seed (reference behavior).
    Shared,
    /// Each class derives its own stream from the base seed.
    PerClass,
}

impl Default for SeedScope {
    fn default() -> Self {
        SeedScope::Shared
    }
}

impl FromStr for SeedScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "shared" => Ok(SeedScope::Shared),
            "per_class" | "per-class" => Ok(SeedScope::PerClass),
            _ => Err(format!(
                "Unknown seed scope: {}. Expected 'shared' or 'per_class'",
                s
            )),
        }
    }
}

/// Central configuration for label derivation and the train/test split.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SplitConfig {
    /// Months a censored patient must exceed to count as a long survivor.
    pub long_criteria: f32,
    /// Months a deceased patient must fall below to count as a short survivor.
    pub short_criteria: f32,
    /// Fraction of each class reserved for the test partition, in (0, 1).
    pub test_fraction: f64,
    pub seed: u64,
    #[serde(default)]
    pub seed_scope: SeedScope,
}

impl SplitConfig {
    pub fn new(
        long_criteria: f32,
        short_criteria: f32,
        test_fraction: f64,
        seed: u64,
        seed_scope: SeedScope,
    ) -> Self {
        Self {
            long_criteria,
            short_criteria,
            test_fraction,
            seed,
            seed_scope,
        }
    }

    /// Reject criteria under which a record could satisfy both classes.
    ///
    /// Class disjointness requires `long_criteria >= short_criteria`; the
    /// status conditions alone keep the classes apart only when the month
    /// thresholds do not cross.
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.long_criteria < self.short_criteria {
            return Err(DatasetError::OverlappingCriteria {
                long_criteria: self.long_criteria,
                short_criteria: self.short_criteria,
            });
        }
        Ok(())
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            long_criteria: 36.0,
            short_criteria: 12.0,
            test_fraction: 0.3,
            seed: 42,
            seed_scope: SeedScope::Shared,
        }
    }
}
