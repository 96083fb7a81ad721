mod owned;
mod trimmed;

use std::io::{self, Write};

pub use owned::Record;
pub use trimmed::TrimmedRecord;

/// Accessors shared by every four-line sequencing record
pub trait FastqRecord {
    /// Header line without the leading `@`
    fn head(&self) -> &[u8];

    /// Sequence line
    fn seq(&self) -> &[u8];

    /// Text following the `+` of the separator line (usually empty)
    fn sep(&self) -> &[u8];

    /// Quality line
    fn qual(&self) -> &[u8];

    /// Number of bases in the sequence line
    fn len(&self) -> usize {
        self.seq().len()
    }

    fn is_empty(&self) -> bool {
        self.seq().is_empty()
    }

    /// Writes the record as four FASTQ lines
    fn write_fastq<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        writer.write_all(b"@")?;
        writer.write_all(self.head())?;
        writer.write_all(b"\n")?;
        writer.write_all(self.seq())?;
        writer.write_all(b"\n+")?;
        writer.write_all(self.sep())?;
        writer.write_all(b"\n")?;
        writer.write_all(self.qual())?;
        writer.write_all(b"\n")
    }
}
