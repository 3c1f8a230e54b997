use crate::error::{ReportError, Result};
use crate::measurement::{Dataset, Measurement, Variant};
use statrs::statistics::Statistics;
use tracing::debug;

/// Bytes per cycle are tiny; scale them so the axis reads in whole numbers.
pub const THROUGHPUT_SCALE: f64 = 1e9;

/// One line of a chart: a variant and its (x, y) points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub variant: Variant,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn y_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|&(_, y)| y)
    }
}

/// Smallest and largest y over all series.
pub fn y_bounds(series: &[Series]) -> Option<(f64, f64)> {
    series
        .iter()
        .flat_map(Series::y_values)
        .fold(None, |bounds, y| match bounds {
            None => Some((y, y)),
            Some((min, max)) => Some((min.min(y), max.max(y))),
        })
}

fn group_mean<F>(dataset: &Dataset, variant: Variant, field_size: u32, value: F) -> Result<f64>
where
    F: Fn(&Measurement) -> f64,
{
    let values: Vec<f64> = dataset.group(variant, field_size).map(value).collect();
    if values.is_empty() {
        return Err(ReportError::EmptyGroup {
            variant,
            field_size,
        });
    }

    Ok(values.iter().mean())
}

fn by_size<F>(dataset: &Dataset, sizes: &[u32], metric: F) -> Result<Vec<Series>>
where
    F: Fn(&Dataset, Variant, u32) -> Result<f64>,
{
    Variant::ALL
        .iter()
        .map(|&variant| {
            let points = sizes
                .iter()
                .map(|&size| Ok((size as f64, metric(dataset, variant, size)?)))
                .collect::<Result<Vec<_>>>()?;
            debug!(%variant, ?points, "series");
            Ok(Series { variant, points })
        })
        .collect()
}

pub fn mean_cycles(dataset: &Dataset, variant: Variant, field_size: u32) -> Result<f64> {
    group_mean(dataset, variant, field_size, |m| m.cycles as f64)
}

/// `field_size / mean(cycles)`, scaled by [`THROUGHPUT_SCALE`].
pub fn throughput(dataset: &Dataset, variant: Variant, field_size: u32) -> Result<f64> {
    let mean = mean_cycles(dataset, variant, field_size)?;
    Ok(field_size as f64 / mean * THROUGHPUT_SCALE)
}

pub fn mean_cache_misses(dataset: &Dataset, variant: Variant, field_size: u32) -> Result<f64> {
    group_mean(dataset, variant, field_size, |m| m.cache_misses as f64)
}

/// Mean over thread counts of `cycles / field_size`.
pub fn cycles_per_byte(dataset: &Dataset, variant: Variant, field_size: u32) -> Result<f64> {
    group_mean(dataset, variant, field_size, |m| {
        m.cycles as f64 / m.field_size as f64
    })
}

pub fn throughput_by_size(dataset: &Dataset, sizes: &[u32]) -> Result<Vec<Series>> {
    by_size(dataset, sizes, throughput)
}

pub fn cache_misses_by_size(dataset: &Dataset, sizes: &[u32]) -> Result<Vec<Series>> {
    by_size(dataset, sizes, mean_cache_misses)
}

pub fn cycles_per_byte_by_size(dataset: &Dataset, sizes: &[u32]) -> Result<Vec<Series>> {
    by_size(dataset, sizes, cycles_per_byte)
}

/// Raw cycle counts at `field_size` for each thread count.
pub fn latency_by_threads(
    dataset: &Dataset,
    field_size: u32,
    threads: &[u32],
) -> Result<Vec<Series>> {
    Variant::ALL
        .iter()
        .map(|&variant| {
            let points = threads
                .iter()
                .map(|&threads| {
                    let record = dataset.get(variant, field_size, threads).ok_or(
                        ReportError::MissingRecord {
                            variant,
                            field_size,
                            threads,
                        },
                    )?;
                    Ok((threads as f64, record.cycles as f64))
                })
                .collect::<Result<Vec<_>>>()?;
            debug!(%variant, ?points, "series");
            Ok(Series { variant, points })
        })
        .collect()
}
