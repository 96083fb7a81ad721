use std::collections::HashMap;

use tracing::debug;

use super::PartitionSink;
use crate::{error::Result, TrimmedRecord};

/// Default number of buffered records that triggers a flush
pub const DEFAULT_FLUSH_THRESHOLD: usize = 1_000_000;

/// In-memory accumulation of trimmed records per partition
///
/// A single counter tracks records buffered across all partitions. Once it reaches the
/// threshold every non-empty partition is appended to the sink and its buffer released.
///
/// [`finish`](Self::finish) must be called once the input is exhausted, otherwise the
/// last partial batch is never written.
pub struct PartitionBuffer<S: PartitionSink> {
    /// Destination of flushed batches
    sink: S,

    /// Pending records, keyed by partition id
    buffers: HashMap<String, Vec<TrimmedRecord>>,

    /// Records buffered since the last flush
    buffered: usize,

    /// Flush as soon as `buffered` reaches this value
    threshold: usize,

    /// Number of flushes that wrote at least one record
    num_flushes: usize,

    /// Records handed to the sink so far
    records_flushed: usize,
}
impl<S: PartitionSink> PartitionBuffer<S> {
    /// Creates a buffer that flushes into `sink` every `threshold` records
    ///
    /// A threshold of zero is treated as one.
    pub fn new(sink: S, threshold: usize) -> Self {
        Self {
            sink,
            buffers: HashMap::new(),
            buffered: 0,
            threshold: threshold.max(1),
            num_flushes: 0,
            records_flushed: 0,
        }
    }

    /// Adds a record to its partition's buffer
    pub fn accept(&mut self, partition_id: &str, record: TrimmedRecord) {
        match self.buffers.get_mut(partition_id) {
            Some(records) => records.push(record),
            None => {
                self.buffers.insert(partition_id.to_string(), vec![record]);
            }
        }
        self.buffered += 1;
    }

    /// Flushes every partition if the threshold has been reached
    ///
    /// Returns `true` if a flush happened.
    pub fn maybe_flush(&mut self) -> Result<bool> {
        if self.buffered < self.threshold {
            return Ok(false);
        }
        self.flush()?;
        Ok(true)
    }

    /// Appends every non-empty partition to the sink and clears the buffers
    ///
    /// Partitions are written in sorted order. If the sink fails, partitions written
    /// before the failure stay written. Flushing with nothing buffered writes nothing.
    ///
    /// Returns the number of records written.
    pub fn flush(&mut self) -> Result<usize> {
        let mut pending: Vec<(&String, &mut Vec<TrimmedRecord>)> = self
            .buffers
            .iter_mut()
            .filter(|(_, records)| !records.is_empty())
            .collect();
        if pending.is_empty() {
            return Ok(0);
        }
        pending.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let num_partitions = pending.len();
        let mut written = 0;
        for (partition_id, records) in pending {
            self.sink.append(partition_id, records.as_slice())?;
            written += records.len();
            *records = Vec::new();
        }

        debug!(
            partitions = num_partitions,
            records = written,
            "Flushed partition buffers"
        );
        self.buffered = 0;
        self.num_flushes += 1;
        self.records_flushed += written;
        Ok(written)
    }

    /// Flushes whatever is left and returns the sink
    pub fn finish(mut self) -> Result<S> {
        self.flush()?;
        Ok(self.sink)
    }

    /// Records currently held in memory
    pub fn buffered(&self) -> usize {
        self.buffered
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn num_flushes(&self) -> usize {
        self.num_flushes
    }

    pub fn records_flushed(&self) -> usize {
        self.records_flushed
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
