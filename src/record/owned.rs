use super::{FastqRecord, TrimmedRecord};
use crate::error::{ReadError, Result};

/// An owned sequencing record as read from the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    head: Vec<u8>,
    seq: Vec<u8>,
    sep: Vec<u8>,
    qual: Vec<u8>,
}
impl Record {
    pub fn new(head: Vec<u8>, seq: Vec<u8>, qual: Vec<u8>) -> Self {
        Self {
            head,
            seq,
            sep: Vec::new(),
            qual,
        }
    }

    /// Sets the text that follows `+` on the separator line
    #[must_use]
    pub fn with_sep(mut self, sep: Vec<u8>) -> Self {
        self.sep = sep;
        self
    }

    /// Checks that the sequence and quality lines have the same length
    pub fn validate(&self) -> Result<()> {
        if self.seq.len() != self.qual.len() {
            return Err(ReadError::UnequalQualityLength {
                record: String::from_utf8_lossy(&self.head).into_owned(),
                seq: self.seq.len(),
                qual: self.qual.len(),
            }
            .into());
        }
        Ok(())
    }

    /// Upper-cases the sequence in place
    pub fn normalize(&mut self) {
        self.seq.make_ascii_uppercase();
    }

    /// Removes the first `n` bases from both sequence and quality
    ///
    /// `n` is clamped to the record length.
    pub fn strip_prefix(self, n: usize) -> TrimmedRecord {
        let Self {
            head,
            mut seq,
            sep,
            mut qual,
        } = self;
        seq.drain(..n.min(seq.len()));
        qual.drain(..n.min(qual.len()));
        TrimmedRecord::new(head, seq, sep, qual, n)
    }
}
impl FastqRecord for Record {
    fn head(&self) -> &[u8] {
        &self.head
    }
    fn seq(&self) -> &[u8] {
        &self.seq
    }
    fn sep(&self) -> &[u8] {
        &self.sep
    }
    fn qual(&self) -> &[u8] {
        &self.qual
    }
}
