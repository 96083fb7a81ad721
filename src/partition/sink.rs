use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use auto_impl::auto_impl;

use crate::{
    error::{Result, WriteError},
    FastqRecord, TrimmedRecord,
};

/// File extension of partition output files
pub const PARTITION_EXTENSION: &str = "fastq";

/// Destination for flushed partition batches
#[auto_impl(&mut, Box)]
pub trait PartitionSink {
    /// Appends a batch of records to the named partition
    ///
    /// Creates the partition if it does not exist yet and never discards what was
    /// appended before.
    fn append(&mut self, partition_id: &str, records: &[TrimmedRecord]) -> Result<()>;
}

/// Writes each partition to `<dir>/<partition_id>.fastq`
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}
impl DirectorySink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Output path of a partition
    pub fn path_for(&self, partition_id: &str) -> PathBuf {
        self.dir.join(format!("{partition_id}.{PARTITION_EXTENSION}"))
    }

    fn open(path: &Path) -> Result<BufWriter<File>> {
        let handle = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| WriteError::PartitionOpen {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(BufWriter::new(handle))
    }
}
impl PartitionSink for DirectorySink {
    fn append(&mut self, partition_id: &str, records: &[TrimmedRecord]) -> Result<()> {
        let path = self.path_for(partition_id);
        let mut writer = Self::open(&path)?;
        records
            .iter()
            .try_for_each(|record| record.write_fastq(&mut writer))
            .and_then(|()| writer.flush())
            .map_err(|source| WriteError::PartitionAppend { path, source })?;
        Ok(())
    }
}

/// Keeps every partition in memory
///
/// Useful for inspecting output without touching the filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    partitions: HashMap<String, Vec<u8>>,
    num_appends: usize,
}
impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialized FASTQ content of a partition
    pub fn contents(&self, partition_id: &str) -> Option<&[u8]> {
        self.partitions.get(partition_id).map(Vec::as_slice)
    }

    /// Number of partitions that received at least one batch
    pub fn num_partitions(&self) -> usize {
        self.partitions.len()
    }

    /// Number of batches appended across all partitions
    pub fn num_appends(&self) -> usize {
        self.num_appends
    }
}
impl PartitionSink for MemorySink {
    fn append(&mut self, partition_id: &str, records: &[TrimmedRecord]) -> Result<()> {
        let buffer = self.partitions.entry(partition_id.to_string()).or_default();
        for record in records {
            record.write_fastq(&mut *buffer)?;
        }
        self.num_appends += 1;
        Ok(())
    }
}
