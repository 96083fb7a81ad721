//! Run parameters for a demultiplexing job.

use std::path::{Path, PathBuf};

use crate::{
    classify::DEFAULT_MARKER,
    error::{ConfigError, Result},
    partition::DEFAULT_FLUSH_THRESHOLD,
};

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "demultiplexed";

/// Default number of records between progress log lines
pub const DEFAULT_PROGRESS_INTERVAL: usize = 1_000_000;

/// Parameters of a demultiplexing run
///
/// Use [`DemuxConfigBuilder`] to create one; `build` validates every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemuxConfig {
    /// Directory receiving one FASTQ file per partition
    pub output_dir: PathBuf,

    /// Upper-cased marker expected right after the barcode
    pub marker: String,

    /// Number of buffered records that triggers a flush
    pub flush_threshold: usize,

    /// Records between progress log lines
    pub progress_interval: usize,

    /// Replace an existing, non-empty output directory
    pub force: bool,
}
impl Default for DemuxConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            marker: DEFAULT_MARKER.to_string(),
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            force: false,
        }
    }
}

/// Builder for [`DemuxConfig`]
///
/// ```rust
/// use fqdemux::config::DemuxConfigBuilder;
///
/// let config = DemuxConfigBuilder::default()
///     .output_dir("out")
///     .marker("catg")
///     .flush_threshold(500_000)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.marker, "CATG");
/// assert_eq!(config.flush_threshold, 500_000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DemuxConfigBuilder {
    output_dir: Option<PathBuf>,
    marker: Option<String>,
    flush_threshold: Option<usize>,
    progress_interval: Option<usize>,
    force: bool,
}
impl DemuxConfigBuilder {
    #[must_use]
    pub fn output_dir<P: AsRef<Path>>(mut self, output_dir: P) -> Self {
        self.output_dir = Some(output_dir.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn marker(mut self, marker: &str) -> Self {
        self.marker = Some(marker.to_string());
        self
    }

    #[must_use]
    pub fn flush_threshold(mut self, flush_threshold: usize) -> Self {
        self.flush_threshold = Some(flush_threshold);
        self
    }

    #[must_use]
    pub fn progress_interval(mut self, progress_interval: usize) -> Self {
        self.progress_interval = Some(progress_interval);
        self
    }

    #[must_use]
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Validates the parameters and builds the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The marker is empty or contains characters other than A, C, G or T
    /// * The flush threshold is zero
    pub fn build(self) -> Result<DemuxConfig> {
        let defaults = DemuxConfig::default();

        let marker = match self.marker {
            Some(marker) => marker.trim().to_ascii_uppercase(),
            None => defaults.marker,
        };
        if marker.is_empty()
            || !marker
                .bytes()
                .all(|b| matches!(b, b'A' | b'C' | b'G' | b'T'))
        {
            return Err(ConfigError::InvalidMarker(marker).into());
        }

        let flush_threshold = self.flush_threshold.unwrap_or(defaults.flush_threshold);
        if flush_threshold == 0 {
            return Err(ConfigError::InvalidThreshold.into());
        }

        Ok(DemuxConfig {
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            marker,
            flush_threshold,
            progress_interval: self
                .progress_interval
                .unwrap_or(defaults.progress_interval)
                .max(1),
            force: self.force,
        })
    }
}
