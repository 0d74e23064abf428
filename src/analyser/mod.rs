//! Request dataset analysis.
//!
//! [`logic`] holds the data side: loading, cleaning, descriptive statistics
//! and the chart-ready numbers. [`charts`] draws those numbers and never
//! looks at the dataset itself.

pub mod charts;
pub mod logic;

pub use logic::{EdaReport, run_eda_flow};
