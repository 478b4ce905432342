//! Writing the results of a run.
//!
//! - [`table`]: the result table as CSV, the one artifact every run produces
//! - [`json`]: an optional JSON run report with the same rows plus run metadata

pub mod json;
pub mod table;
