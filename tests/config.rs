//! Integration tests for SplitConfig and SeedScope.

use std::str::FromStr;

use survival_prep::config::{SeedScope, SplitConfig};
use survival_prep::error::DatasetError;

#[test]
fn default_config_matches_reference_thresholds() {
    let config = SplitConfig::default();
    assert_eq!(config.long_criteria, 36.0);
    assert_eq!(config.short_criteria, 12.0);
    assert_eq!(config.test_fraction, 0.3);
    assert_eq!(config.seed, 42);
    assert_eq!(config.seed_scope, SeedScope::Shared);
}

#[test]
fn default_config_validates() {
    assert!(SplitConfig::default().validate().is_ok());
}

#[test]
fn crossed_criteria_fail_validation() {
    let config = SplitConfig::new(10.0, 20.0, 0.3, 42, SeedScope::Shared);
    assert_eq!(
        config.validate(),
        Err(DatasetError::OverlappingCriteria {
            long_criteria: 10.0,
            short_criteria: 20.0
        })
    );
}

#[test]
fn seed_scope_parses_known_names() {
    assert_eq!(SeedScope::from_str("shared"), Ok(SeedScope::Shared));
    assert_eq!(SeedScope::from_str("per_class"), Ok(SeedScope::PerClass));
    assert_eq!(SeedScope::from_str("Per-Class"), Ok(SeedScope::PerClass));
    assert!(SeedScope::from_str("random").is_err());
}
