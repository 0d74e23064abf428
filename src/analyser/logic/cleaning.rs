//! Column-level cleaning steps.
//!
//! Every step takes the frame by reference and returns a new one, so the
//! loaded dataset is never modified and each stage can be checked on its own.

use super::io;
use anyhow::{Context as _, Result};
use polars::prelude::*;
use std::collections::BTreeSet;

/// Replaces nulls in a text column with `sentinel`. Other columns and the
/// non-null cells of `column` are left as they were.
///
/// # Errors
///
/// Fails if `column` is absent.
pub fn fill_missing_text(df: &DataFrame, column: &str, sentinel: &str) -> Result<DataFrame> {
    io::column(df, column)?;

    df.clone()
        .lazy()
        .with_column(
            col(column)
                .cast(DataType::String)
                .fill_null(lit(sentinel))
                .alias(column),
        )
        .collect()
        .with_context(|| format!("Failed to fill missing values in '{column}'"))
}

/// Casts `column` to a polars `Categorical`.
///
/// # Errors
///
/// Fails if `column` is absent or cannot be cast.
pub fn to_categorical(df: &DataFrame, column: &str) -> Result<DataFrame> {
    io::column(df, column)?;

    df.clone()
        .lazy()
        .with_column(
            col(column)
                .cast(DataType::String)
                .cast(DataType::Categorical(None, CategoricalOrdering::Physical))
                .alias(column),
        )
        .collect()
        .with_context(|| format!("Failed to convert '{column}' to categorical"))
}

pub fn is_categorical(df: &DataFrame, column: &str) -> bool {
    df.column(column)
        .map(|c| matches!(c.dtype(), DataType::Categorical(..)))
        .unwrap_or(false)
}

/// Distinct non-null values of `column`, in lexical order.
///
/// # Errors
///
/// Fails if `column` is absent or cannot be read as text.
pub fn categories(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let distinct: BTreeSet<String> = io::text_values(df, column)?
        .into_iter()
        .flatten()
        .collect();
    Ok(distinct.into_iter().collect())
}
