use crate::measurement::Variant;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no data for group {variant} / {field_size} bytes")]
    EmptyGroup { variant: Variant, field_size: u32 },

    #[error("missing record for {variant} / {field_size} bytes / {threads} threads")]
    MissingRecord {
        variant: Variant,
        field_size: u32,
        threads: u32,
    },

    #[error("duplicate record for {variant} / {field_size} bytes / {threads} threads")]
    DuplicateRecord {
        variant: Variant,
        field_size: u32,
        threads: u32,
    },

    #[error("couldn't create output dir {}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't render {}: {reason}", path.display())]
    Render { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, ReportError>;
