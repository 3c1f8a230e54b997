use crate::config::{ReportConfig, CACHE_MISSES_FILE};
use crate::error::Result;
use crate::measurement::{Dataset, MESSAGE_SIZES};
use crate::statistics::{self, y_bounds, Series};
use std::path::PathBuf;

use super::*;

fn cache_misses_figure(area: &Area<'_>, config: &ReportConfig, series: &[Series]) -> DrawResult {
    // log axis, keep the lower bound strictly positive
    let (min, max) = y_bounds(series).unwrap_or((1.0, 10.0));
    let y_axis = (min.max(1.0) / 2.0..max * 2.0).log_scale();

    let mut chart = ChartBuilder::on(area)
        .caption("Cache Misses vs Message Size", title_font(config))
        .margin(40)
        .x_label_area_size(140)
        .y_label_area_size(200)
        .build_cartesian_2d(message_size_axis(), y_axis)?;

    chart
        .configure_mesh()
        .x_desc("Message Size (bytes)")
        .y_desc("Cache Misses (Average)")
        .axis_desc_style(label_font(config))
        .label_style(label_font(config))
        .x_label_formatter(&|size| format!("{size:.0}"))
        .y_label_formatter(&|misses| format!("{misses:.0e}"))
        .bold_line_style(&BLACK.mix(0.15))
        .light_line_style(&TRANSPARENT)
        .draw()?;

    draw_variant_lines(&mut chart, config, series)
}

pub fn cache_misses_by_size(config: &ReportConfig, dataset: &Dataset) -> Result<PathBuf> {
    let series = statistics::cache_misses_by_size(dataset, &MESSAGE_SIZES)?;
    let path = render(config, CACHE_MISSES_FILE, |area| {
        cache_misses_figure(area, config, &series)
    })?;

    println!("Plot 3 saved: {CACHE_MISSES_FILE}");
    Ok(path)
}
