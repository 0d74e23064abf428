use super::theme;
use crate::analyser::logic::GroupedCounts;
use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Share of each group slot taken by its bars.
const GROUP_WIDTH: f64 = 0.8;

/// Grouped bar chart: one slot per bucket, one coloured bar per class.
pub fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    value_column: &str,
    counts: &GroupedCounts,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let slots = counts.groups.len().max(1) as f64;
    let y_max = counts.max_count().max(1) as f64 * 1.15;

    let mut chart = ChartBuilder::on(root)
        .caption(format!("{value_column} buckets by class"), theme::caption_style())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..slots - 0.5, 0f64..y_max)?;

    let x_label = |x: &f64| theme::category_label(&counts.groups, *x);
    chart
        .configure_mesh()
        .x_desc(value_column)
        .y_desc("Frequency")
        .axis_desc_style(theme::label_style())
        .x_labels(2 * counts.groups.len() + 1)
        .x_label_formatter(&x_label)
        .bold_line_style(theme::GRID)
        .light_line_style(TRANSPARENT)
        .draw()?;

    let hue_count = counts.hues.len().max(1) as f64;
    let bar_width = GROUP_WIDTH / hue_count;

    for (h, hue) in counts.hues.iter().enumerate() {
        let color = theme::palette(h);
        let offset = -GROUP_WIDTH / 2.0 + h as f64 * bar_width;
        let bars = counts.counts.iter().enumerate().filter_map(move |(g, row)| {
            let n = *row.get(h)?;
            let x0 = g as f64 + offset;
            Some(Rectangle::new([(x0, 0.0), (x0 + bar_width, n as f64)], color.filled()))
        });

        chart
            .draw_series(bars)?
            .label(hue.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(theme::label_style())
        .draw()?;

    Ok(())
}
