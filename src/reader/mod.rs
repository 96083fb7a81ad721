mod fastq;

pub use fastq::FastqSource;

use crate::{error::Result, Record};

/// A lazy, finite stream of sequencing records
///
/// Anything that yields `Result<Record>` can feed the demultiplexer. The stream is
/// exhausted when the underlying input ends.
pub trait RecordSource: Iterator<Item = Result<Record>> {}
impl<T> RecordSource for T where T: Iterator<Item = Result<Record>> {}
