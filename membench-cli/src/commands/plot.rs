// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Membench Contributors

//! `membench plot` command - render a time-vs-size chart from a result CSV.

use std::path::Path;

use anyhow::Context;
use membench_core::{compare, load_result_rows};
use plotters::prelude::*;

pub fn execute(input: &Path, output: &Path) -> anyhow::Result<()> {
    let rows = load_result_rows(input)?;

    // Comparing the set against itself reuses the per-size averaging and
    // ascending ordering; the A side carries the mean times.
    let records = compare(&rows, &rows);
    let write_points: Vec<(f64, f64)> = records
        .iter()
        .map(|r| (r.size_mib as f64, r.write_time.a))
        .collect();
    let read_points: Vec<(f64, f64)> = records
        .iter()
        .map(|r| (r.size_mib as f64, r.read_time.a))
        .collect();

    let x_min = records.first().map(|r| r.size_mib as f64).unwrap_or(0.0);
    let mut x_max = records.last().map(|r| r.size_mib as f64).unwrap_or(1.0);
    if x_max <= x_min {
        x_max = x_min + 1.0;
    }
    let mut y_max = write_points
        .iter()
        .chain(read_points.iter())
        .map(|&(_, y)| y)
        .filter(|y| y.is_finite())
        .fold(0.0f64, f64::max);
    if y_max <= 0.0 {
        y_max = 1.0;
    }

    let root = SVGBackend::new(output, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Memory Read/Write Performance", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max * 1.1)?;

    chart
        .configure_mesh()
        .x_desc("Test Size (MiB)")
        .y_desc("Time (s)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(write_points.clone(), &BLUE))?
        .label("Write Time")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
    chart.draw_series(
        write_points
            .iter()
            .map(|&point| Circle::new(point, 3, BLUE.filled())),
    )?;

    chart
        .draw_series(LineSeries::new(read_points.clone(), &RED))?
        .label("Read Time")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    chart.draw_series(
        read_points
            .iter()
            .map(|&point| Circle::new(point, 3, RED.filled())),
    )?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()
        .with_context(|| format!("Failed to write chart to {}", output.display()))?;
    println!("Plot saved as {}", output.display());

    Ok(())
}
