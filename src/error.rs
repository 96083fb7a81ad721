use std::path::PathBuf;

/// Custom Result type for demultiplexing operations, wrapping the custom [`Error`] type
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the fqdemux library, encompassing all possible error cases
/// that can occur while building the barcode index, reading records, or writing partitions.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    /// Errors in the barcode mapping or run configuration
    ConfigError(#[from] ConfigError),
    /// Errors that occur while reading sequencing records
    ReadError(#[from] ReadError),
    /// Errors that occur while writing partition output
    WriteError(#[from] WriteError),
    /// Standard I/O errors from the Rust standard library
    IoError(#[from] std::io::Error),
}
impl Error {
    /// Returns true if the error was raised before any record was processed
    pub fn is_config(&self) -> bool {
        matches!(self, Self::ConfigError(_))
    }
}

/// Errors in the barcode mapping or the run parameters.
///
/// All of these are detected before the first record is read.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Two mapping entries share the same normalized barcode at the same length
    ///
    /// # Fields
    /// * `barcode` - The normalized barcode sequence
    /// * `length` - The barcode length
    /// * `existing` - The sample that first claimed the barcode
    /// * `duplicate` - The sample that attempted to claim it again
    #[error("Duplicate barcode {barcode} (length {length}) for samples {existing} and {duplicate}")]
    DuplicateBarcode {
        barcode: String,
        length: usize,
        existing: String,
        duplicate: String,
    },

    /// The mapping input did not yield a single barcode
    #[error("No barcodes found in mapping input")]
    EmptyIndex,

    /// The barcode contains characters outside of A/C/G/T
    #[error("Invalid barcode {barcode:?} for sample {sample}: only A, C, G and T are allowed")]
    InvalidBarcode { sample: String, barcode: String },

    /// The barcode is empty after trimming
    #[error("Empty barcode for sample {0}")]
    EmptyBarcode(String),

    /// A mapping line does not consist of exactly two non-empty tab-separated fields
    ///
    /// # Fields
    /// * `line` - 1-based line number in the mapping input
    /// * `content` - The offending line
    #[error("Malformed mapping line {line}: {content:?} (expected <sample>\\t<barcode>)")]
    MalformedMapping { line: usize, content: String },

    /// The marker sequence is empty or contains characters outside of A/C/G/T
    #[error("Invalid marker sequence: {0:?}")]
    InvalidMarker(String),

    /// The flush threshold must be at least one record
    #[error("Flush threshold must be greater than zero")]
    InvalidThreshold,
}

/// Errors that can occur while reading sequencing records
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    /// The FASTQ parser rejected the input
    #[error("Failed to parse FASTQ input: {0}")]
    Fastq(#[from] seq_io::fastq::Error),

    /// Sequence and quality lines of a record differ in length
    ///
    /// # Fields
    /// * `record` - The record header
    /// * `seq` - Length of the sequence line
    /// * `qual` - Length of the quality line
    #[error("Record {record} has sequence length {seq} but quality length {qual}")]
    UnequalQualityLength {
        record: String,
        seq: usize,
        qual: usize,
    },

    /// The record input could not be opened
    #[error("Failed to open record input {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while writing partition output
#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    /// The partition file could not be created or opened for appending
    #[error("Failed to open partition file {path}")]
    PartitionOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Appending buffered records to the partition file failed
    #[error("Failed to append to partition file {path}")]
    PartitionAppend {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output directory already holds files and replacement was not requested
    #[error("Output directory {0} already exists and is not empty")]
    OutputDirExists(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_duplicate_barcode_display() {
        let err = ConfigError::DuplicateBarcode {
            barcode: "ACGT".to_string(),
            length: 4,
            existing: "SampleA".to_string(),
            duplicate: "SampleC".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("ACGT"));
        assert!(display.contains("SampleA"));
        assert!(display.contains("SampleC"));
    }

    #[test]
    fn test_partition_error_names_path() {
        let err = WriteError::PartitionOpen {
            path: PathBuf::from("/out/SampleA.ACGT.fastq"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/out/SampleA.ACGT.fastq"));
        let source = err.source().and_then(|s| s.downcast_ref::<std::io::Error>());
        assert_eq!(
            source.map(std::io::Error::kind),
            Some(std::io::ErrorKind::PermissionDenied)
        );
    }

    #[test]
    fn test_barcode_errors_are_config() {
        let err: Error = ConfigError::EmptyBarcode("SampleA".to_string()).into();
        assert!(err.is_config());
        assert!(err.to_string().contains("SampleA"));
    }

    #[test]
    fn test_is_config() {
        let err: Error = ConfigError::EmptyIndex.into();
        assert!(err.is_config());

        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(!err.is_config());
    }

    #[test]
    fn test_error_send_sync() {
        fn is_send<T: Send>() {}
        fn is_sync<T: Sync>() {}

        is_send::<Error>();
        is_sync::<Error>();
    }
}
