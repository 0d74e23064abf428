//! Static chart rendering for the analysis results.
//!
//! Every chart is drawn from precomputed [`VisualAnalytics`]; nothing here
//! touches the dataset. Charts are written with `plotters` as SVG or PNG
//! files, one file per chart.

use super::logic::{BoxStats, ColumnDistribution, CorrelationMatrix};
use super::logic::{GroupedCounts, VisualAnalytics};
use crate::config::{ChartConfig, ChartFormat};
use crate::error::EdaError;
use anyhow::{Context as _, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

mod bars;
mod boxplot;
mod heatmap;
mod histogram;
mod theme;

/// One renderable chart and the data it draws.
pub enum Chart<'a> {
    Histogram(&'a ColumnDistribution),
    Heatmap(&'a CorrelationMatrix),
    BoxPlot {
        column: &'a str,
        classes: &'a [String],
        boxes: &'a [BoxStats],
    },
    Bars {
        value_column: &'a str,
        counts: &'a GroupedCounts,
    },
}

impl Chart<'_> {
    /// File name without extension; unique per chart.
    pub fn file_stem(&self) -> String {
        match self {
            Self::Histogram(dist) => format!("hist_{}", dist.column),
            Self::Heatmap(_) => "correlation_heatmap".to_owned(),
            Self::BoxPlot { column, .. } => format!("box_{column}_by_class"),
            Self::Bars { value_column, .. } => format!("{value_column}_bins_by_class"),
        }
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        match self {
            Self::Histogram(dist) => histogram::draw(root, dist),
            Self::Heatmap(matrix) => heatmap::draw(root, matrix),
            Self::BoxPlot {
                column,
                classes,
                boxes,
            } => boxplot::draw(root, column, classes, boxes),
            Self::Bars {
                value_column,
                counts,
            } => bars::draw(root, value_column, counts),
        }
    }
}

/// Charts in rendering order: a histogram per numeric column, the
/// correlation heatmap, a box plot per numeric column and the bucket bars.
pub fn plan(analytics: &VisualAnalytics) -> Vec<Chart<'_>> {
    let mut charts: Vec<Chart<'_>> = analytics
        .distributions
        .iter()
        .map(Chart::Histogram)
        .collect();
    charts.push(Chart::Heatmap(&analytics.correlation));
    charts.extend(analytics.class_boxes.iter().map(|cb| Chart::BoxPlot {
        column: &cb.column,
        classes: &analytics.classes,
        boxes: &cb.boxes,
    }));
    charts.push(Chart::Bars {
        value_column: &analytics.buckets.column,
        counts: &analytics.bucket_counts,
    });
    charts
}

/// Renders every planned chart into `config.output_dir` and returns the
/// written paths.
///
/// # Errors
///
/// Fails with [`EdaError::Render`] on the first chart that cannot be drawn,
/// or if the output directory cannot be created.
pub fn render_all(analytics: &VisualAnalytics, config: &ChartConfig) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("Failed to create chart directory {}", config.output_dir.display())
    })?;

    let charts = plan(analytics);
    let mut written = Vec::with_capacity(charts.len());
    for chart in &charts {
        let path = config
            .output_dir
            .join(format!("{}.{}", chart.file_stem(), config.format.extension()));
        render_chart(chart, &path, config)?;
        tracing::debug!("Rendered {}", path.display());
        written.push(path);
    }

    tracing::info!(
        "Rendered {} charts to {}",
        written.len(),
        config.output_dir.display()
    );
    Ok(written)
}

/// # Errors
///
/// Returns [`EdaError::Render`] naming `path` when drawing or writing fails.
pub fn render_chart(chart: &Chart<'_>, path: &Path, config: &ChartConfig) -> Result<()> {
    let size = (config.width, config.height);
    let result = match config.format {
        ChartFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            chart.draw(&root).and_then(|()| Ok(root.present()?))
        }
        ChartFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            chart.draw(&root).and_then(|()| Ok(root.present()?))
        }
    };

    result.map_err(|e| EdaError::Render(format!("{}: {e:#}", path.display())).into())
}
