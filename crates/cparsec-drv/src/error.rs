//! Error handling for the `cparsec` driver.
//!
//! Structured variants using `thiserror`, following the same shape as the
//! rest of the workspace's error types: one variant per failure source,
//! `#[from]` conversions where a foreign error type flows straight through.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("failed to read input file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse failed: {0}")]
    Parse(#[from] cparsec_util::ParserError),

    #[error("failed to initialize logging: {0}")]
    Logging(String),

    /// Reserved for cases not covered by a specific variant above.
    #[allow(dead_code)]
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, DriverError>;
