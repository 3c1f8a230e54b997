use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::measurement::{Variant, MESSAGE_SIZES};
use crate::statistics::Series;
use plotters_backend::BackendCoord;
use plotters::coord::combinators::{BindKeyPoints, IntoLogRange, LogCoord, WithKeyPoints};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};
use tracing::info;

mod cache_misses;
mod cycles_per_byte;
mod latency;
mod throughput;

pub use cache_misses::cache_misses_by_size;
pub use cycles_per_byte::cycles_per_byte;
pub use latency::latency_by_threads;
pub use throughput::throughput_by_size;

static DEFAULT_FONT: &str = "sans-serif";

const FOOTER_HEIGHT: u32 = 120;
const LINE_WIDTH: u32 = 6;
const MARKER_SIZE: i32 = 14;

// matplotlib's default colour cycle
const BLUE: RGBColor = RGBColor(31, 119, 180);
const ORANGE: RGBColor = RGBColor(255, 127, 14);
const GREEN: RGBColor = RGBColor(44, 160, 44);

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

enum Marker {
    Circle,
    Square,
    Triangle,
}

fn color(variant: Variant) -> RGBColor {
    match variant {
        Variant::TwoCopy => BLUE,
        Variant::OneCopy => ORANGE,
        Variant::ZeroCopy => GREEN,
    }
}

fn marker(variant: Variant) -> Marker {
    match variant {
        Variant::TwoCopy => Marker::Circle,
        Variant::OneCopy => Marker::Square,
        Variant::ZeroCopy => Marker::Triangle,
    }
}

fn title_font(config: &ReportConfig) -> FontDesc<'static> {
    FontDesc::new(DEFAULT_FONT.into(), config.title_font_size, FontStyle::Bold)
}

fn label_font(config: &ReportConfig) -> FontDesc<'static> {
    FontDesc::new(DEFAULT_FONT.into(), config.label_font_size, FontStyle::Normal)
}

/// Log-scaled message size axis with ticks only at the measured sizes.
fn message_size_axis() -> WithKeyPoints<LogCoord<f64>> {
    let axis: LogCoord<f64> = (48f64..5500f64).log_scale().into();
    axis.with_key_points(MESSAGE_SIZES.iter().map(|&size| size as f64).collect())
}

/// Acquires a PNG surface at `file_name`, lets `draw` fill the plot area and presents it.
/// The surface is dropped before returning, on success and on error alike.
fn render<F>(config: &ReportConfig, file_name: &str, draw: F) -> Result<PathBuf>
where
    F: FnOnce(&Area<'_>) -> DrawResult,
{
    let dir = config.output_dir();
    std::fs::create_dir_all(dir).map_err(|source| ReportError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = config.plot_path(file_name);
    draw_to(&path, config, draw).map_err(|e| ReportError::Render {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    info!(path = %path.display(), "plot written");
    Ok(path)
}

fn draw_to<F>(path: &Path, config: &ReportConfig, draw: F) -> DrawResult
where
    F: FnOnce(&Area<'_>) -> DrawResult,
{
    let root = BitMapBackend::new(path, config.size).into_drawing_area();
    root.fill(&WHITE)?;

    let (plot_area, footer) = root.split_vertically(config.size.1 - FOOTER_HEIGHT);
    draw(&plot_area)?;
    draw_footer(&footer, config)?;

    root.present()?;
    Ok(())
}

fn draw_footer(area: &Area<'_>, config: &ReportConfig) -> DrawResult {
    let (width, height) = area.dim_in_pixel();
    let style = TextStyle::from(FontDesc::new(
        DEFAULT_FONT.into(),
        config.caption_font_size,
        FontStyle::Italic,
    ))
    .pos(Pos::new(HPos::Center, VPos::Center));

    area.draw_text(
        &format!("System: {}", config.caption),
        &style,
        ((width / 2) as i32, (height / 2) as i32),
    )?;
    Ok(())
}

/// Legend line segment, starting at the anchor so it stays inside the legend box.
fn legend_swatch((x, y): BackendCoord) -> [BackendCoord; 2] {
    [(x, y), (x + 40, y)]
}

/// One line with markers per variant, plus the legend.
fn draw_variant_lines<'a, X, Y>(
    chart: &mut ChartContext<'a, BitMapBackend<'a>, Cartesian2d<X, Y>>,
    config: &ReportConfig,
    series: &[Series],
) -> DrawResult
where
    X: Ranged<ValueType = f64>,
    Y: Ranged<ValueType = f64>,
{
    for s in series {
        let color = color(s.variant);
        chart
            .draw_series(LineSeries::new(
                s.points.iter().copied(),
                color.stroke_width(LINE_WIDTH),
            ))?
            .label(s.variant.label())
            .legend(move |anchor| {
                PathElement::new(legend_swatch(anchor), color.stroke_width(LINE_WIDTH))
            });

        let style = color.filled();
        match marker(s.variant) {
            Marker::Circle => {
                chart.draw_series(
                    s.points
                        .iter()
                        .map(|&point| Circle::new(point, MARKER_SIZE, style)),
                )?;
            }
            Marker::Square => {
                chart.draw_series(s.points.iter().map(|&point| {
                    EmptyElement::at(point)
                        + Rectangle::new(
                            [(-MARKER_SIZE, -MARKER_SIZE), (MARKER_SIZE, MARKER_SIZE)],
                            style,
                        )
                }))?;
            }
            Marker::Triangle => {
                chart.draw_series(
                    s.points
                        .iter()
                        .map(|&point| TriangleMarker::new(point, MARKER_SIZE + 4, style)),
                )?;
            }
        }
    }

    chart
        .configure_series_labels()
        .label_font(label_font(config))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK.mix(0.3))
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CACHE_MISSES_FILE, CYCLES_PER_BYTE_FILE, LATENCY_FILE, THROUGHPUT_FILE};
    use crate::measurement::Dataset;

    #[test]
    fn variants_have_distinct_colors() {
        let colors: Vec<_> = Variant::ALL.iter().map(|&v| color(v)).collect();
        assert_eq!(colors, vec![BLUE, ORANGE, GREEN]);
    }

    #[test]
    fn size_axis_covers_every_message_size() {
        let axis = message_size_axis();
        let range = axis.range();
        for size in MESSAGE_SIZES {
            assert!(range.contains(&(size as f64)));
        }
    }

    #[test]
    fn renders_all_four_charts() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig::new(dir.path().join("report"));
        let dataset = Dataset::embedded().unwrap();

        let written = [
            (throughput_by_size(&config, &dataset).unwrap(), THROUGHPUT_FILE),
            (latency_by_threads(&config, &dataset).unwrap(), LATENCY_FILE),
            (cache_misses_by_size(&config, &dataset).unwrap(), CACHE_MISSES_FILE),
            (cycles_per_byte(&config, &dataset).unwrap(), CYCLES_PER_BYTE_FILE),
        ];

        for (path, file_name) in written {
            assert_eq!(path, dir.path().join("report").join(file_name));
            let metadata = std::fs::metadata(&path).unwrap();
            assert!(metadata.len() > 0, "{} is empty", path.display());
        }
    }

    #[test]
    fn legend_swatch_starts_at_the_anchor() {
        assert_eq!(legend_swatch((100, 50)), [(100, 50), (140, 50)]);
    }

    #[test]
    fn unwritable_output_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();

        let config = ReportConfig::new(blocker.join("plots"));
        let dataset = Dataset::embedded().unwrap();

        let err = throughput_by_size(&config, &dataset).unwrap_err();
        assert!(matches!(err, ReportError::OutputDir { .. }), "got {err:?}");
    }

    #[test]
    fn failed_render_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig::new(dir.path());

        let err = render(&config, "broken.png", |_| Err("no surface".into())).unwrap_err();
        match err {
            ReportError::Render { path, reason } => {
                assert_eq!(path, dir.path().join("broken.png"));
                assert_eq!(reason, "no surface");
            }
            other => panic!("expected render error, got {other:?}"),
        }
    }
}
