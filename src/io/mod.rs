//! Readers for the pipeline's persisted table inputs.
pub mod tables;
