use super::analysis::build_visual_analytics;
use super::cleaning::fill_missing_text;
use super::io::{load_df, require_columns, save_summary};
use super::profiling::{describe, null_counts};
use super::types::{EdaReport, SummaryReport, VisualAnalytics};
use crate::analyser::charts;
use crate::config::EdaConfig;
use anyhow::{Context as _, Result};
use polars::prelude::*;
use std::path::PathBuf;

/// Loads the dataset and fills missing bodies. Returns the cleaned frame
/// and how many body cells were filled.
///
/// # Errors
///
/// Fails if the dataset cannot be read or lacks a required column.
pub fn load_and_clean(config: &EdaConfig) -> Result<(DataFrame, usize)> {
    let raw = load_df(&config.input).context("Failed to load dataset")?;
    require_columns(&raw, &config.required_columns())
        .with_context(|| format!("Dataset {} is incomplete", config.input.display()))?;
    tracing::info!(
        "Loaded {} rows x {} columns from {}",
        raw.height(),
        raw.width(),
        config.input.display()
    );

    let filled = raw.column(&config.body_column)?.null_count();
    let cleaned = fill_missing_text(&raw, &config.body_column, &config.sentinel)?;
    tracing::info!(
        "Replaced {filled} missing '{}' values with '{}'",
        config.body_column,
        config.sentinel
    );

    Ok((cleaned, filled))
}

/// Summary stage: validates the config, loads and cleans the dataset,
/// computes the descriptive statistics and null counts, and persists the
/// statistics CSV. Returns the cleaned frame for [`visualise`].
///
/// # Errors
///
/// Fails on an invalid config, an unreadable or incomplete dataset, or if
/// the summary cannot be written.
pub fn summarise(config: &EdaConfig) -> Result<(DataFrame, SummaryReport)> {
    config.validate()?;

    let (cleaned, filled_nulls) = load_and_clean(config)?;

    let describe = describe(&cleaned).context("Failed to summarise dataset")?;
    let nulls = null_counts(&cleaned);
    save_summary(&describe, &config.summary_path)?;
    tracing::info!("Summary statistics saved to {}", config.summary_path.display());

    let report = SummaryReport {
        input: config.input.clone(),
        row_count: cleaned.height(),
        column_count: cleaned.width(),
        filled_nulls,
        describe,
        nulls,
        summary_path: config.summary_path.clone(),
    };
    Ok((cleaned, report))
}

/// Visual stage: derives the chart data from the cleaned frame and renders
/// the charts when enabled.
///
/// # Errors
///
/// Fails if the chart data cannot be built (including degenerate quantile
/// bucketing) or a chart cannot be rendered.
pub fn visualise(
    cleaned: &DataFrame,
    config: &EdaConfig,
) -> Result<(VisualAnalytics, Vec<PathBuf>)> {
    let analytics =
        build_visual_analytics(cleaned, config).context("Failed to prepare chart data")?;

    let charts = if config.charts.enabled {
        charts::render_all(&analytics, &config.charts)?
    } else {
        tracing::info!("Chart rendering disabled");
        Vec::new()
    };

    Ok((analytics, charts))
}

/// Runs both stages back to back. The summary CSV is on disk before chart
/// data is prepared, so it survives a visual stage failure.
///
/// # Errors
///
/// Every stage failure is fatal and returned with its context.
pub fn run_eda_flow(config: &EdaConfig) -> Result<EdaReport> {
    let start = std::time::Instant::now();

    let (cleaned, summary) = summarise(config)?;
    let (analytics, charts) = visualise(&cleaned, config)?;

    Ok(EdaReport {
        summary,
        analytics,
        charts,
        duration: start.elapsed(),
    })
}
