//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - join keys and input records (`RatingArea`, `ZipAreaLink`, `Plan`, `Rate`)
//! - per-zip outcomes (`SlcspOutcome`, `UndeterminedReason`, `SlcspRow`)
//! - run configuration (`RunConfig`, `OutputFormat`)

pub mod types;

pub use types::*;
