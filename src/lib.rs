//! survival-prep: dataset assembly for long/short cancer-survival classification.
//!
//! This crate turns per-modality TCGA-style exports and clinical survival
//! records into a labeled, stratified train/test split. The core pipeline
//! (`builder`) joins expression and survival tables on patient identity,
//! normalizes features with log1p plus per-gene robust scaling, derives
//! binary long/short-survivor labels from disjoint survival criteria, and
//! splits each class independently so both classes are represented in train
//! and test at the configured ratio.
//!
//! The `extract` module holds the four stateless modality extractors
//! (expression, copy-number, methylation, mutation) that clean raw delimited
//! files into per-cancer-type tables consumed later by the builder.
pub mod builder;
pub mod config;
pub mod data_handling;
pub mod error;
pub mod extract;
pub mod io;
pub mod preprocessing;
pub mod schema;
pub mod stats;
