//! # partition
//!
//! Buffered, append-only output of classified records.
//!
//! Records accumulate in memory per partition until a global record count is reached,
//! at which point every non-empty partition is appended to its sink in one batch.
//! Sinks never truncate: a partition written by several flushes holds every batch in order.

mod buffer;
mod sink;

pub use buffer::{PartitionBuffer, DEFAULT_FLUSH_THRESHOLD};
pub use sink::{DirectorySink, MemorySink, PartitionSink, PARTITION_EXTENSION};
