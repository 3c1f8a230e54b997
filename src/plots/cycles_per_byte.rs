use crate::config::{ReportConfig, CYCLES_PER_BYTE_FILE};
use crate::error::Result;
use crate::measurement::{Dataset, MESSAGE_SIZES};
use crate::statistics::{self, y_bounds, Series};
use std::path::PathBuf;

use super::*;

fn cycles_per_byte_figure(area: &Area<'_>, config: &ReportConfig, series: &[Series]) -> DrawResult {
    let (_, max) = y_bounds(series).unwrap_or((0.0, 1.0));

    let mut chart = ChartBuilder::on(area)
        .caption("CPU Cycles per Byte Transferred", title_font(config))
        .margin(40)
        .x_label_area_size(140)
        .y_label_area_size(240)
        .build_cartesian_2d(message_size_axis(), 0f64..max * 1.1)?;

    chart
        .configure_mesh()
        .x_desc("Message Size (bytes)")
        .y_desc("CPU Cycles per Byte")
        .axis_desc_style(label_font(config))
        .label_style(label_font(config))
        .x_label_formatter(&|size| format!("{size:.0}"))
        .y_label_formatter(&|cycles| format!("{cycles:.1e}"))
        .bold_line_style(&BLACK.mix(0.15))
        .light_line_style(&TRANSPARENT)
        .draw()?;

    draw_variant_lines(&mut chart, config, series)
}

/// Mean over thread counts of cycles divided by the message size.
pub fn cycles_per_byte(config: &ReportConfig, dataset: &Dataset) -> Result<PathBuf> {
    let series = statistics::cycles_per_byte_by_size(dataset, &MESSAGE_SIZES)?;
    let path = render(config, CYCLES_PER_BYTE_FILE, |area| {
        cycles_per_byte_figure(area, config, &series)
    })?;

    println!("Plot 4 saved: {CYCLES_PER_BYTE_FILE}");
    Ok(path)
}
