use crate::config::{ReportConfig, THROUGHPUT_FILE};
use crate::error::Result;
use crate::measurement::{Dataset, MESSAGE_SIZES};
use crate::statistics::{self, y_bounds, Series};
use std::path::PathBuf;

use super::*;

fn throughput_figure(area: &Area<'_>, config: &ReportConfig, series: &[Series]) -> DrawResult {
    let (_, max) = y_bounds(series).unwrap_or((0.0, 1.0));

    let mut chart = ChartBuilder::on(area)
        .caption("Throughput vs Message Size", title_font(config))
        .margin(40)
        .x_label_area_size(140)
        .y_label_area_size(200)
        .build_cartesian_2d(message_size_axis(), 0f64..max * 1.1)?;

    chart
        .configure_mesh()
        .x_desc("Message Size (bytes)")
        .y_desc("Throughput (Normalized: bytes/cycle × 10⁹)")
        .axis_desc_style(label_font(config))
        .label_style(label_font(config))
        .x_label_formatter(&|size| format!("{size:.0}"))
        .y_label_formatter(&|throughput| format!("{throughput:.0}"))
        .bold_line_style(&BLACK.mix(0.15))
        .light_line_style(&TRANSPARENT)
        .draw()?;

    draw_variant_lines(&mut chart, config, series)
}

/// Bytes per cycle (x 10⁹) for each message size, averaged across thread counts.
pub fn throughput_by_size(config: &ReportConfig, dataset: &Dataset) -> Result<PathBuf> {
    let series = statistics::throughput_by_size(dataset, &MESSAGE_SIZES)?;
    let path = render(config, THROUGHPUT_FILE, |area| {
        throughput_figure(area, config, &series)
    })?;

    println!("Plot 1 saved: {THROUGHPUT_FILE}");
    Ok(path)
}
