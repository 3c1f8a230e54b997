use crate::config::{ReportConfig, LATENCY_FILE};
use crate::error::Result;
use crate::measurement::{Dataset, LATENCY_FIELD_SIZE, THREAD_COUNTS};
use crate::statistics::{self, y_bounds, Series};
use std::path::PathBuf;

use super::*;

fn latency_figure(area: &Area<'_>, config: &ReportConfig, series: &[Series]) -> DrawResult {
    let (_, max) = y_bounds(series).unwrap_or((0.0, 1.0));

    let mut chart = ChartBuilder::on(area)
        .caption(
            format!("Latency vs Thread Count (Message Size: {LATENCY_FIELD_SIZE} bytes)"),
            title_font(config),
        )
        .margin(40)
        .x_label_area_size(140)
        .y_label_area_size(240)
        .build_cartesian_2d(0.5f64..8.5f64, 0f64..max * 1.1)?;

    chart
        .configure_mesh()
        .x_desc("Number of Threads")
        .y_desc("Latency (CPU Cycles)")
        .axis_desc_style(label_font(config))
        .label_style(label_font(config))
        .x_labels(8)
        .x_label_formatter(&|threads| format!("{threads:.0}"))
        .y_label_formatter(&|cycles| format!("{cycles:.1e}"))
        .bold_line_style(&BLACK.mix(0.15))
        .light_line_style(&TRANSPARENT)
        .draw()?;

    draw_variant_lines(&mut chart, config, series)
}

/// Raw cycle counts at the representative message size, one point per thread count.
pub fn latency_by_threads(config: &ReportConfig, dataset: &Dataset) -> Result<PathBuf> {
    let series = statistics::latency_by_threads(dataset, LATENCY_FIELD_SIZE, &THREAD_COUNTS)?;
    let path = render(config, LATENCY_FILE, |area| {
        latency_figure(area, config, &series)
    })?;

    println!("Plot 2 saved: {LATENCY_FILE}");
    Ok(path)
}
