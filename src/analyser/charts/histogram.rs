use super::theme;
use crate::analyser::logic::ColumnDistribution;
use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

pub fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    dist: &ColumnDistribution,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let hist = &dist.histogram;
    let (x_min, x_max) = hist.range().unwrap_or((0.0, 1.0));
    let curve_max = dist
        .density
        .as_ref()
        .map(|d| d.points.iter().map(|p| p.1).fold(0.0, f64::max))
        .unwrap_or(0.0);
    let y_max = (hist.counts.iter().copied().max().unwrap_or(0) as f64)
        .max(curve_max)
        .max(1.0)
        * 1.1;

    let mut chart = ChartBuilder::on(root)
        .caption(format!("Distribution of {}", dist.column), theme::caption_style())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc(dist.column.as_str())
        .y_desc("Frequency")
        .axis_desc_style(theme::label_style())
        .bold_line_style(theme::GRID)
        .light_line_style(TRANSPARENT)
        .draw()?;

    chart.draw_series(hist.bins().map(|(lo, hi, count)| {
        Rectangle::new([(lo, 0.0), (hi, count as f64)], theme::HIST_FILL.mix(0.4).filled())
    }))?;
    chart.draw_series(hist.bins().map(|(lo, hi, count)| {
        Rectangle::new([(lo, 0.0), (hi, count as f64)], WHITE.stroke_width(1))
    }))?;

    if let Some(curve) = &dist.density {
        chart.draw_series(LineSeries::new(
            curve.points.iter().copied(),
            theme::HIST_FILL.stroke_width(2),
        ))?;
    }

    Ok(())
}
