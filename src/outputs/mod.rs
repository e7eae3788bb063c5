//! Output writers.
//!
//! - [`csv`]: the final newsletter table, one row per newsletter or sentinel
//! - [`json`]: the run report with per brand-year outcomes
//!
//! Both files land in the configured output directory and are named after
//! the requested year range. Each is written exactly once, at the end of a run.

pub mod csv;
pub mod json;
