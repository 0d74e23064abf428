use super::types::DescribeTable;
use crate::error::EdaError;
use anyhow::{Context as _, Result};
use polars::prelude::*;
use std::path::Path;

/// Reads a CSV with a header row, inferring the schema from the first
/// 10 000 rows.
///
/// # Errors
///
/// Fails if the file is missing, unreadable or not valid CSV.
pub fn load_df(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(EdaError::InvalidPath(format!("{} is not a file", path.display())).into());
    }

    LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10_000))
        .with_has_header(true)
        .finish()
        .with_context(|| format!("Failed to scan CSV {}", path.display()))?
        .collect()
        .with_context(|| format!("Failed to read CSV {}", path.display()))
}

/// Fails with [`EdaError::MissingColumn`] naming the first absent column.
///
/// # Errors
///
/// See above.
pub fn require_columns(df: &DataFrame, names: &[&str]) -> Result<()> {
    for &name in names {
        if df.column(name).is_err() {
            return Err(EdaError::MissingColumn(name.to_owned()).into());
        }
    }
    Ok(())
}

/// Looks up a column, reporting absence as [`EdaError::MissingColumn`].
///
/// # Errors
///
/// See above.
pub fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| EdaError::MissingColumn(name.to_owned()).into())
}

/// Column values as floats; nulls (and values that do not cast) are `None`.
///
/// # Errors
///
/// Fails if the column is absent or cannot be cast to `Float64`.
pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = column(df, name)?
        .as_materialized_series()
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{name}' is not numeric"))?;
    let ca = series.f64()?;
    Ok(ca.into_iter().collect())
}

/// Column values rendered as text; nulls stay `None`.
///
/// # Errors
///
/// Fails if the column is absent or cannot be cast to `String`.
pub fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = column(df, name)?
        .as_materialized_series()
        .cast(&DataType::String)
        .with_context(|| format!("Column '{name}' cannot be read as text"))?;
    let ca = series.str()?;
    Ok(ca.into_iter().map(|v| v.map(str::to_owned)).collect())
}

/// Writes the statistics table as CSV, creating parent directories.
///
/// # Errors
///
/// Fails if the file cannot be created or written.
pub fn save_summary(table: &DescribeTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut df = table.to_frame()?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create summary file {}", path.display()))?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(&mut df)
        .context("Failed to write summary CSV")?;

    Ok(())
}
