//! # barcode
//!
//! Sample barcodes and the length-partitioned index used to look them up.
//!
//! Barcodes are read from a tab-separated mapping (`sample<TAB>barcode`), normalized to
//! upper case, checked against the A/C/G/T alphabet and grouped by their length. Lookups
//! are exact: a read prefix either equals a configured barcode of the same length or it
//! does not match.
//!
//! ```rust
//! use fqdemux::barcode::BarcodeIndex;
//!
//! let index = BarcodeIndex::build([("SampleA", "ACGT"), ("SampleB", "ggttca")]).unwrap();
//!
//! // Longest barcodes are always tried first
//! assert_eq!(index.candidate_lengths(), &[6, 4]);
//!
//! let entry = index.lookup(b"GGTTCA", 6).unwrap();
//! assert_eq!(entry.partition_id(), "SampleB.GGTTCA");
//! ```

mod entry;
mod index;
mod mapping;

pub use entry::BarcodeEntry;
pub use index::{BarcodeIndex, LengthShare};
pub use mapping::{parse_mapping, read_mapping, MappingEntry};
