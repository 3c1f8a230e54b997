use std::path::{Path, PathBuf};

pub const SYSTEM_CONFIG: &str = "Linux 6.8.0-100, perf tool, Network namespaces (ns1/ns2)";

pub const THROUGHPUT_FILE: &str = "MT25074_Part_D_Plot1_Throughput_vs_Size.png";
pub const LATENCY_FILE: &str = "MT25074_Part_D_Plot2_Latency_vs_Threads.png";
pub const CACHE_MISSES_FILE: &str = "MT25074_Part_D_Plot3_CacheMisses_vs_Size.png";
pub const CYCLES_PER_BYTE_FILE: &str = "MT25074_Part_D_Plot4_CyclesPerByte.png";

/// 10x6 inches at 300 dpi.
const SIZE: (u32, u32) = (3000, 1800);

/// Settings shared by every chart. Built once in `main` and handed to each render by reference.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    output_dir: PathBuf,
    pub size: (u32, u32),
    pub caption: &'static str,
    pub title_font_size: f64,
    pub label_font_size: f64,
    pub caption_font_size: f64,
}

impl ReportConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            size: SIZE,
            caption: SYSTEM_CONFIG,
            title_font_size: 70.0,
            label_font_size: 50.0,
            caption_font_size: 38.0,
        }
    }

    pub fn plot_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_path_joins_output_dir() {
        let config = ReportConfig::new("/tmp/report");
        assert_eq!(
            config.plot_path(THROUGHPUT_FILE),
            PathBuf::from("/tmp/report/MT25074_Part_D_Plot1_Throughput_vs_Size.png")
        );
    }

    #[test]
    fn caption_is_the_measurement_environment() {
        let config = ReportConfig::new(".");
        assert_eq!(config.caption, SYSTEM_CONFIG);
        assert_eq!(config.size, (3000, 1800));
    }
}
