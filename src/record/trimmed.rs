use super::FastqRecord;

/// A record whose barcode prefix has been removed from sequence and quality
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimmedRecord {
    head: Vec<u8>,
    seq: Vec<u8>,
    sep: Vec<u8>,
    qual: Vec<u8>,

    /// Number of leading bases that were removed
    stripped: usize,
}
impl TrimmedRecord {
    pub(crate) fn new(
        head: Vec<u8>,
        seq: Vec<u8>,
        sep: Vec<u8>,
        qual: Vec<u8>,
        stripped: usize,
    ) -> Self {
        Self {
            head,
            seq,
            sep,
            qual,
            stripped,
        }
    }

    pub fn stripped(&self) -> usize {
        self.stripped
    }
}
impl FastqRecord for TrimmedRecord {
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
