//! Descriptive statistics for every column of the dataset.
//!
//! Numeric columns get count, mean, sample standard deviation, min, the
//! three quartiles (linear interpolation) and max. Every other column is
//! treated as categorical and gets count, distinct values, the most frequent
//! value and its frequency. Cells that do not apply to a column kind are
//! left empty, so all columns share one table layout.

use super::types::{ColumnKind, DescribeColumn, DescribeTable, NullCounts, STATISTICS, StatValue};
use crate::error::EdaError;
use anyhow::{Context as _, Result};
use polars::prelude::*;
use std::collections::HashMap;

/// # Errors
///
/// Fails with [`EdaError::DataProcessing`] for nested column types, or if a
/// column cannot be cast for its statistics.
pub fn describe(df: &DataFrame) -> Result<DescribeTable> {
    let mut columns = Vec::with_capacity(df.width());

    for col in df.get_columns() {
        let name = col.name().to_string();
        let dtype = col.dtype();

        let described = if dtype.is_nested() {
            Err(EdaError::DataProcessing(format!(
                "column '{name}' has unsupported type {dtype}"
            ))
            .into())
        } else if dtype.is_primitive_numeric() {
            describe_numeric(col)
        } else {
            describe_categorical(col)
        };
        let (kind, cells) =
            described.with_context(|| format!("Describe failed for column '{name}'"))?;

        columns.push(DescribeColumn { name, kind, cells });
    }

    Ok(DescribeTable { columns })
}

pub fn null_counts(df: &DataFrame) -> NullCounts {
    NullCounts {
        entries: df
            .get_columns()
            .iter()
            .map(|c| (c.name().to_string(), c.null_count()))
            .collect(),
    }
}

fn describe_numeric(col: &Column) -> Result<(ColumnKind, Vec<Option<StatValue>>)> {
    let series = col
        .as_materialized_series()
        .cast(&DataType::Float64)
        .map_err(|e| anyhow::anyhow!(e))?;
    let ca = series.f64().map_err(|e| anyhow::anyhow!(e))?;

    let count = (ca.len() - ca.null_count()) as f64;
    let q1 = ca.quantile(0.25, QuantileMethod::Linear)?;
    let median = ca.quantile(0.5, QuantileMethod::Linear)?;
    let q3 = ca.quantile(0.75, QuantileMethod::Linear)?;

    let cells = STATISTICS
        .iter()
        .map(|&stat| {
            let value = match stat {
                "count" => Some(count),
                "mean" => ca.mean(),
                "std" => ca.std(1),
                "min" => ca.min(),
                "25%" => q1,
                "50%" => median,
                "75%" => q3,
                "max" => ca.max(),
                _ => None,
            };
            value.map(StatValue::Number)
        })
        .collect();

    Ok((ColumnKind::Numeric, cells))
}

fn describe_categorical(col: &Column) -> Result<(ColumnKind, Vec<Option<StatValue>>)> {
    let series = col
        .as_materialized_series()
        .cast(&DataType::String)
        .map_err(|e| anyhow::anyhow!(e))?;
    let ca = series.str().map_err(|e| anyhow::anyhow!(e))?;

    // value -> (frequency, first row seen); ties on frequency go to the
    // earliest value so the output does not depend on hash order.
    let mut freq: HashMap<&str, (usize, usize)> = HashMap::new();
    for (row, value) in ca.into_iter().enumerate() {
        if let Some(v) = value {
            freq.entry(v).or_insert((0, row)).0 += 1;
        }
    }

    let count = freq.values().map(|(n, _)| n).sum::<usize>();
    let top = freq
        .iter()
        .max_by(|a, b| a.1.0.cmp(&b.1.0).then(b.1.1.cmp(&a.1.1)))
        .map(|(v, (n, _))| ((*v).to_owned(), *n));

    let cells = STATISTICS
        .iter()
        .map(|&stat| match stat {
            "count" => Some(StatValue::Number(count as f64)),
            "unique" => Some(StatValue::Number(freq.len() as f64)),
            "top" => top.as_ref().map(|(v, _)| StatValue::Text(v.clone())),
            "freq" => top.as_ref().map(|(_, n)| StatValue::Number(*n as f64)),
            _ => None,
        })
        .collect();

    Ok((ColumnKind::Categorical, cells))
}

impl DescribeTable {
    /// Statistics as a frame: a leading `statistic` column with the row
    /// labels, then one text column per described column. Inapplicable
    /// cells are null.
    ///
    /// # Errors
    ///
    /// Fails if two described columns share a name.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let mut frame_columns = Vec::with_capacity(self.columns.len() + 1);
        frame_columns.push(Column::from(Series::new(
            "statistic".into(),
            STATISTICS.to_vec(),
        )));

        for described in &self.columns {
            let values: Vec<Option<String>> = described
                .cells
                .iter()
                .map(|cell| cell.as_ref().map(ToString::to_string))
                .collect();
            frame_columns.push(Column::from(Series::new(
                described.name.as_str().into(),
                values,
            )));
        }

        DataFrame::new(frame_columns)
    }
}
