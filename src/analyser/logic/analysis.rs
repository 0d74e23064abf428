use super::binning;
use super::cleaning::{categories, to_categorical};
use super::io::{numeric_values, text_values};
use super::types::{
    BoxStats, ClassBoxes, ColumnDistribution, CorrelationMatrix, DensityCurve, Histogram,
    VisualAnalytics,
};
use crate::config::EdaConfig;
use anyhow::{Context as _, Result};
use polars::prelude::*;

/// Points evaluated along a density curve.
const DENSITY_GRID_SIZE: usize = 200;

/// Builds every number the charts need from the cleaned dataset.
///
/// # Errors
///
/// Fails if a configured column is missing or not numeric, or if the bucket
/// column cannot be split into quantile buckets.
pub fn build_visual_analytics(df: &DataFrame, config: &EdaConfig) -> Result<VisualAnalytics> {
    let mut distributions = Vec::with_capacity(config.numeric_columns.len());
    for name in &config.numeric_columns {
        let values: Vec<f64> = numeric_values(df, name)?.into_iter().flatten().collect();
        let histogram = histogram(&values, config.histogram_bins);
        let density = density_curve(&values, &histogram);
        distributions.push(ColumnDistribution {
            column: name.clone(),
            histogram,
            density,
        });
    }

    let correlation = correlation_matrix(df, &config.numeric_columns)?;

    let categorised = to_categorical(df, &config.class_column)?;
    let classes = categories(&categorised, &config.class_column)?;
    tracing::debug!("Classes found in '{}': {:?}", config.class_column, classes);

    let mut class_boxes = Vec::with_capacity(config.numeric_columns.len());
    for name in &config.numeric_columns {
        class_boxes.push(ClassBoxes {
            column: name.clone(),
            boxes: box_stats(&categorised, name, &config.class_column, &classes)?,
        });
    }

    let buckets = binning::quantile_buckets(
        &config.bucket_column,
        &numeric_values(df, &config.bucket_column)?,
        &config.bucket_labels,
    )?;
    let row_classes = text_values(&categorised, &config.class_column)?;
    let bucket_counts = binning::grouped_counts(&buckets, &row_classes, &classes);

    Ok(VisualAnalytics {
        classes,
        distributions,
        correlation,
        class_boxes,
        buckets,
        bucket_counts,
    })
}

/// Equal-width histogram over `[min, max]`. A constant sample is centred in
/// a unit-wide range so it still lands in a bin.
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if bins == 0 || min > max {
        return Histogram::default();
    }

    let (lo, hi) = if (max - min).abs() < f64::EPSILON {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let width = (hi - lo) / bins as f64;

    let edges = (0..=bins)
        .map(|i| if i == bins { hi } else { lo + i as f64 * width })
        .collect();
    let mut counts = vec![0; bins];
    for v in values.iter().copied().filter(|v| v.is_finite()) {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        if let Some(c) = counts.get_mut(idx) {
            *c += 1;
        }
    }

    Histogram { edges, counts }
}

/// Gaussian kernel density estimate with Scott's bandwidth, evaluated across
/// the data range and scaled by `n * bin_width` to overlay a count histogram.
/// Returns `None` for fewer than two values or zero spread.
pub fn density_curve(values: &[f64], histogram: &Histogram) -> Option<DensityCurve> {
    let data: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let n = data.len();
    if n < 2 {
        return None;
    }

    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    let variance = data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (nf - 1.0);
    let std_dev = variance.sqrt();
    if std_dev <= 0.0 || !std_dev.is_finite() {
        return None;
    }

    let bandwidth = std_dev * nf.powf(-0.2);
    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let norm = 1.0 / (nf * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let scale = nf * histogram.bin_width();

    let step = (max - min) / (DENSITY_GRID_SIZE - 1) as f64;
    let points = (0..DENSITY_GRID_SIZE)
        .map(|i| {
            let x = min + i as f64 * step;
            let density: f64 = data
                .iter()
                .map(|&xi| (-0.5 * ((x - xi) / bandwidth).powi(2)).exp())
                .sum::<f64>()
                * norm;
            (x, density * scale)
        })
        .collect();

    Some(DensityCurve { bandwidth, points })
}

/// Pearson correlation between each pair of `columns`, using the rows where
/// both values are present. The diagonal is 1.0; pairs involving a constant
/// column are NaN.
///
/// # Errors
///
/// Fails if a column is missing or not numeric.
pub fn correlation_matrix(df: &DataFrame, columns: &[String]) -> Result<CorrelationMatrix> {
    let mut arrays = Vec::with_capacity(columns.len());
    for name in columns {
        let values = numeric_values(df, name)?;
        arrays.push(Float64Chunked::from_iter_options(
            name.as_str().into(),
            values.into_iter(),
        ));
    }

    let n = arrays.len();
    let mut data = vec![vec![f64::NAN; n]; n];
    for (i, a) in arrays.iter().enumerate() {
        for (j, b) in arrays.iter().enumerate().skip(i) {
            let corr = if i == j { 1.0 } else { pairwise_pearson(a, b)? };
            if let Some(cell) = data.get_mut(i).and_then(|row| row.get_mut(j)) {
                *cell = corr;
            }
            if let Some(cell) = data.get_mut(j).and_then(|row| row.get_mut(i)) {
                *cell = corr;
            }
        }
    }

    Ok(CorrelationMatrix {
        columns: columns.to_vec(),
        data,
    })
}

fn pairwise_pearson(a: &Float64Chunked, b: &Float64Chunked) -> Result<f64> {
    let mask = &a.is_not_null() & &b.is_not_null();
    let a = a.filter(&mask).context("Failed to align correlation inputs")?;
    let b = b.filter(&mask).context("Failed to align correlation inputs")?;
    if a.len() < 2 {
        return Ok(f64::NAN);
    }
    Ok(polars::prelude::cov::pearson_corr(&a, &b).unwrap_or(f64::NAN))
}

/// Box plot geometry of `column` for each class that has at least one value.
///
/// # Errors
///
/// Fails if either column is missing or `column` is not numeric.
pub fn box_stats(
    df: &DataFrame,
    column: &str,
    class_column: &str,
    classes: &[String],
) -> Result<Vec<BoxStats>> {
    let values = numeric_values(df, column)?;
    let labels = text_values(df, class_column)?;

    let mut boxes = Vec::with_capacity(classes.len());
    for class in classes {
        let mut group: Vec<f64> = values
            .iter()
            .zip(&labels)
            .filter(|(_, label)| label.as_deref() == Some(class.as_str()))
            .filter_map(|(v, _)| *v)
            .collect();
        if group.is_empty() {
            continue;
        }
        group.sort_by(f64::total_cmp);

        let ca = Float64Chunked::from_vec("group".into(), group.clone());
        let quartile = |q: f64| -> Result<f64> {
            ca.quantile(q, QuantileMethod::Linear)?
                .context("Quantile of a non-empty group")
        };
        let (q1, median, q3) = (quartile(0.25)?, quartile(0.5)?, quartile(0.75)?);

        let iqr = q3 - q1;
        let (low_fence, high_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);
        let inside = group.iter().copied().filter(|v| *v >= low_fence && *v <= high_fence);
        let lower_whisker = inside.clone().fold(f64::INFINITY, f64::min).min(q1);
        let upper_whisker = inside.fold(f64::NEG_INFINITY, f64::max).max(q3);
        let outliers = group
            .iter()
            .copied()
            .filter(|v| *v < low_fence || *v > high_fence)
            .collect();

        boxes.push(BoxStats {
            class: class.clone(),
            count: group.len(),
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        });
    }

    Ok(boxes)
}
