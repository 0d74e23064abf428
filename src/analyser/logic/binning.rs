//! Equal-frequency (quantile) bucketing.
//!
//! Edges sit at the linear quantiles `0, 1/k, .., 1` of the non-null
//! values. The first bucket is closed on both ends, the others are
//! `(lower, upper]`, so every non-null value lands in exactly one bucket.
//! Repeated values can collapse two quantiles onto the same edge; that
//! leaves an empty, unlabelable bucket and is reported as
//! [`EdaError::Binning`] rather than silently merged.

use super::types::{GroupedCounts, QuantileBuckets};
use crate::error::EdaError;
use anyhow::{Context as _, Result};
use polars::prelude::*;

/// # Errors
///
/// Returns [`EdaError::Binning`] if there are no non-null values or two
/// quantile edges coincide, and [`EdaError::Config`] for fewer than one label.
pub fn quantile_buckets(
    column: &str,
    values: &[Option<f64>],
    labels: &[String],
) -> Result<QuantileBuckets> {
    let k = labels.len();
    if k == 0 {
        let msg = "quantile bucketing needs at least one label".to_owned();
        return Err(EdaError::Config(msg).into());
    }

    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return Err(EdaError::Binning(format!("'{column}' has no non-null values")).into());
    }

    let edges = quantile_edges(&present, k)?;
    if let Some(w) = edges.windows(2).find(|w| w.first() >= w.get(1)) {
        let edge = w.first().copied().unwrap_or(f64::NAN);
        return Err(EdaError::Binning(format!(
            "cannot split '{column}' into {k} quantile buckets: duplicate bin edge {edge}"
        ))
        .into());
    }

    let inner = edges.get(1..).unwrap_or_default();
    let assignments = values
        .iter()
        .map(|v| v.map(|v| inner.partition_point(|&e| e < v).min(k - 1)))
        .collect();

    Ok(QuantileBuckets {
        column: column.to_owned(),
        labels: labels.to_vec(),
        edges,
        assignments,
    })
}

fn quantile_edges(values: &[f64], k: usize) -> Result<Vec<f64>> {
    let ca = Float64Chunked::from_slice("values".into(), values);
    (0..=k)
        .map(|i| {
            let q = i as f64 / k as f64;
            ca.quantile(q, QuantileMethod::Linear)?
                .with_context(|| format!("Quantile {q} of a non-empty column"))
        })
        .collect()
}

/// Counts rows per `(bucket, hue)`. Rows without a bucket or hue, or with a
/// hue outside `hues`, are not counted.
pub fn grouped_counts(
    buckets: &QuantileBuckets,
    row_hues: &[Option<String>],
    hues: &[String],
) -> GroupedCounts {
    let mut counts = vec![vec![0; hues.len()]; buckets.labels.len()];

    for (bucket, hue) in buckets.assignments.iter().zip(row_hues) {
        let (Some(b), Some(h)) = (bucket, hue) else {
            continue;
        };
        let Some(h) = hues.iter().position(|x| x == h) else {
            continue;
        };
        if let Some(cell) = counts.get_mut(*b).and_then(|row| row.get_mut(h)) {
            *cell += 1;
        }
    }

    GroupedCounts {
        groups: buckets.labels.clone(),
        hues: hues.to_vec(),
        counts,
    }
}
