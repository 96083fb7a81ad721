//! # fqdemux
//!
//! Barcode-prefix demultiplexing of FASTQ reads.
//!
//! Every read is matched against a set of sample barcodes at its 5' end. When a barcode
//! matches and the restriction-site marker (`CATG` by default) immediately follows it,
//! the barcode is removed from the sequence and quality lines and the read is appended to
//! `<output_dir>/<sample>.<barcode>.fastq`. Reads without a barcode, or with a barcode but
//! no marker, are dropped and only counted.
//!
//! Barcodes of different lengths may be mixed. Lengths are always tried longest first.
//!
//! ## Usage
//!
//! ```rust
//! use fqdemux::{
//!     barcode::BarcodeIndex, config::DemuxConfigBuilder, demux::Demultiplexer,
//!     partition::MemorySink, reader::FastqSource,
//! };
//! use std::io::Cursor;
//!
//! # fn main() -> fqdemux::Result<()> {
//! let index = BarcodeIndex::build([("SampleA", "ACGT"), ("SampleB", "GGTT")])?;
//! let config = DemuxConfigBuilder::default().build()?;
//!
//! let input = "@read1\nACGTCATGAAAA\n+\n############\n";
//! let mut demux = Demultiplexer::new(&index, &config, MemorySink::new());
//! demux.run(FastqSource::new(Cursor::new(input)))?;
//!
//! let (stats, sink) = demux.finish()?;
//! assert_eq!(stats.records_classified(), 1);
//! assert_eq!(
//!     sink.contents("SampleA.ACGT"),
//!     Some(&b"@read1\nCATGAAAA\n+\n########\n"[..])
//! );
//! # Ok(())
//! # }
//! ```

pub mod barcode;
pub mod classify;
pub mod config;
pub mod demux;
mod error;
pub mod partition;
pub mod reader;
mod record;
pub mod setup;
pub mod stats;

pub use error::{ConfigError, Error, ReadError, Result, WriteError};
pub use record::{FastqRecord, Record, TrimmedRecord};
