use super::theme;
use crate::analyser::logic::BoxStats;
use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

const HALF_WIDTH: f64 = 0.3;

pub fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    column: &str,
    classes: &[String],
    boxes: &[BoxStats],
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (lo, hi) = boxes
        .iter()
        .flat_map(|b| {
            b.outliers
                .iter()
                .copied()
                .chain([b.lower_whisker, b.upper_whisker])
        })
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let (lo, hi) = if lo > hi { (0.0, 1.0) } else { (lo, hi) };
    let pad = ((hi - lo) * 0.05).max(0.5);

    let slots = classes.len().max(1) as f64;
    let mut chart = ChartBuilder::on(root)
        .caption(format!("Distribution of {column} by class"), theme::caption_style())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..slots - 0.5, (lo - pad)..(hi + pad))?;

    let x_label = |x: &f64| theme::category_label(classes, *x);
    chart
        .configure_mesh()
        .x_desc("Class")
        .y_desc(column)
        .axis_desc_style(theme::label_style())
        .x_labels(2 * classes.len() + 1)
        .x_label_formatter(&x_label)
        .bold_line_style(theme::GRID)
        .light_line_style(TRANSPARENT)
        .draw()?;

    // Slot of each box, skipping classes that have no values.
    let placed: Vec<(f64, usize, &BoxStats)> = boxes
        .iter()
        .filter_map(|b| {
            let slot = classes.iter().position(|c| *c == b.class)?;
            Some((slot as f64, slot, b))
        })
        .collect();

    chart.draw_series(placed.iter().map(|&(x, slot, b)| {
        Rectangle::new(
            [(x - HALF_WIDTH, b.q1), (x + HALF_WIDTH, b.q3)],
            theme::palette(slot).filled(),
        )
    }))?;
    chart.draw_series(placed.iter().map(|&(x, _, b)| {
        Rectangle::new(
            [(x - HALF_WIDTH, b.q1), (x + HALF_WIDTH, b.q3)],
            theme::BOX_EDGE.stroke_width(1),
        )
    }))?;

    let edge = theme::BOX_EDGE.stroke_width(1);
    chart.draw_series(placed.iter().flat_map(|&(x, _, b)| {
        let cap = HALF_WIDTH / 2.0;
        [
            PathElement::new(
                vec![(x - HALF_WIDTH, b.median), (x + HALF_WIDTH, b.median)],
                theme::BOX_EDGE.stroke_width(2),
            ),
            PathElement::new(vec![(x, b.q3), (x, b.upper_whisker)], edge),
            PathElement::new(vec![(x, b.q1), (x, b.lower_whisker)], edge),
            PathElement::new(vec![(x - cap, b.upper_whisker), (x + cap, b.upper_whisker)], edge),
            PathElement::new(vec![(x - cap, b.lower_whisker), (x + cap, b.lower_whisker)], edge),
        ]
    }))?;

    chart.draw_series(placed.iter().flat_map(|&(x, _, b)| {
        b.outliers
            .iter()
            .map(move |&v| Circle::new((x, v), 3, theme::BOX_EDGE.stroke_width(1)))
    }))?;

    Ok(())
}
