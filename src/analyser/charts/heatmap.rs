use super::theme;
use crate::analyser::logic::CorrelationMatrix;
use crate::utils;
use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Cell `(i, j)` covers `[j, j + 1] x [n - 1 - i, n - i]`, so the first
/// column of the matrix is drawn in the top row.
pub fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    matrix: &CorrelationMatrix,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let n = matrix.columns.len();
    let size = n.max(1) as f64;
    let longest = matrix.columns.iter().map(|c| c.chars().count()).max().unwrap_or(0);

    let mut chart = ChartBuilder::on(root)
        .caption("Correlation between numeric variables", theme::caption_style())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size((longest as u32 * 9).max(60))
        .build_cartesian_2d(0f64..size, 0f64..size)?;

    let columns = &matrix.columns;
    let x_label = |x: &f64| theme::category_label(columns, *x - 0.5);
    let y_label = |y: &f64| {
        let row = size - 0.5 - *y;
        theme::category_label(columns, row)
    };

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(2 * n + 1)
        .y_labels(2 * n + 1)
        .x_label_formatter(&x_label)
        .y_label_formatter(&y_label)
        .label_style(theme::label_style())
        .draw()?;

    let cells: Vec<(f64, f64, f64)> = matrix
        .data
        .iter()
        .enumerate()
        .flat_map(|(i, row)| {
            row.iter().enumerate().map(move |(j, &v)| {
                let y0 = size - 1.0 - i as f64;
                (j as f64, y0, v)
            })
        })
        .collect();

    chart.draw_series(cells.iter().map(|&(x, y, v)| {
        Rectangle::new([(x, y), (x + 1.0, y + 1.0)], theme::coolwarm(v).filled())
    }))?;
    chart.draw_series(cells.iter().map(|&(x, y, _)| {
        Rectangle::new([(x, y), (x + 1.0, y + 1.0)], WHITE.stroke_width(1))
    }))?;
    chart.draw_series(cells.iter().map(|&(x, y, v)| {
        let text = if v.is_nan() { "nan".to_owned() } else { utils::fmt_opt(Some(v)) };
        Text::new(
            text,
            (x + 0.5, y + 0.5),
            theme::annotation_style(theme::coolwarm(v)),
        )
    }))?;

    Ok(())
}
