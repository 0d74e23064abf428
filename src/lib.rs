//! # reqscope - exploratory analysis of labelled HTTP request datasets
//!
//! reqscope loads a CSV of HTTP request observations (method, path, body,
//! a legitimate/malicious `class` label and numeric content metrics such as
//! `path_length` or `badwords_count`), fills missing bodies, prints
//! descriptive statistics and renders static charts that help tell the two
//! classes apart.
//!
//! ## Quick Start
//!
//! ```no_run
//! use reqscope::analyser::logic;
//! use reqscope::config::EdaConfig;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = EdaConfig {
//!     input: "requests.csv".into(),
//!     ..Default::default()
//! };
//! let report = logic::run_eda_flow(&config)?;
//! println!("{}", report.summary.describe);
//! println!("{} charts written", report.charts.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`analyser::logic`]: loading, cleaning, statistics and chart data
//! - [`analyser::charts`]: `plotters` rendering of the chart data
//! - [`config`]: file locations and analysis parameters
//! - [`error`]: error types
//! - [`logging`]: `tracing` subscriber setup

#![warn(clippy::all, rust_2018_idioms)]

pub mod analyser;
pub mod config;
pub mod error;
pub mod logging;
pub mod utils;
