use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use seq_io::fastq::{Reader, Record as _};

use crate::{
    error::{ReadError, Result},
    Record,
};

/// Path that selects standard input
const STDIN_PATH: &str = "-";

/// FASTQ record source backed by [`seq_io`]
///
/// Records are copied out of the parser's buffer so they can be held across flushes.
pub struct FastqSource<R: Read> {
    inner: Reader<R>,
    n_processed: usize,
}
impl<R: Read> FastqSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner: Reader::new(inner),
            n_processed: 0,
        }
    }

    /// Number of records yielded so far
    pub fn n_processed(&self) -> usize {
        self.n_processed
    }
}
impl FastqSource<Box<dyn Read>> {
    /// Opens a FASTQ file, or standard input when `path` is `-`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let handle: Box<dyn Read> = if path == Path::new(STDIN_PATH) {
            Box::new(io::stdin())
        } else {
            let file = File::open(path).map_err(|source| ReadError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            Box::new(file)
        };
        Ok(Self::new(handle))
    }
}
impl<R: Read> Iterator for FastqSource<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.inner.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(ReadError::from(e).into())),
        };
        let owned = Record::new(
            record.head().to_vec(),
            record.seq().to_vec(),
            record.qual().to_vec(),
        );
        self.n_processed += 1;
        Some(Ok(owned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, FastqRecord};
    use std::io::Cursor;

    #[test]
    fn test_read_records() -> Result<()> {
        let input = "@r1 desc\nACGT\n+\nIIII\n@r2\nGGTTCC\n+r2\n######\n";
        let mut source = FastqSource::new(Cursor::new(input));

        let first = source.next().transpose()?.map(|r| r.seq().to_vec());
        assert_eq!(first.as_deref(), Some(&b"ACGT"[..]));

        let second = source.next().transpose()?;
        let second = second.as_ref().map(|r| (r.head(), r.qual()));
        assert_eq!(second, Some((&b"r2"[..], &b"######"[..])));

        assert!(source.next().is_none());
        assert_eq!(source.n_processed(), 2);
        Ok(())
    }

    #[test]
    fn test_empty_input() {
        let mut source = FastqSource::new(Cursor::new(""));
        assert!(source.next().is_none());
    }

    #[test]
    fn test_malformed_input() {
        let mut source = FastqSource::new(Cursor::new(">not fastq\nACGT\n"));
        assert!(matches!(
            source.next(),
            Some(Err(Error::ReadError(ReadError::Fastq(_))))
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let result = FastqSource::open("/nonexistent/reads.fastq");
        assert!(matches!(
            result,
            Err(Error::ReadError(ReadError::Open { .. }))
        ));
    }
}
