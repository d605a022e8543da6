//! FASTA/FASTQ record output.

use crate::record::SeqRecord;
use std::io::{self, BufWriter, Write};

/// Quality byte written for FASTQ output of records that carry none.
pub const FILL_QUALITY: u8 = b'I';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Fasta,
    Fastq,
}

/// Buffered record writer. Sequences are written on a single line.
pub struct SeqWriter<W: Write> {
    out: BufWriter<W>,
    format: OutputFormat,
    written: u64,
}

impl<W: Write> SeqWriter<W> {
    pub fn new(inner: W, format: OutputFormat) -> Self {
        Self {
            out: BufWriter::new(inner),
            format,
            written: 0,
        }
    }

    pub fn write_record(&mut self, id: &str, seq: &[u8], qual: Option<&[u8]>) -> io::Result<()> {
        match self.format {
            OutputFormat::Fasta => {
                self.out.write_all(b">")?;
                self.out.write_all(id.as_bytes())?;
                self.out.write_all(b"\n")?;
                self.out.write_all(seq)?;
                self.out.write_all(b"\n")?;
            }
            OutputFormat::Fastq => {
                self.out.write_all(b"@")?;
                self.out.write_all(id.as_bytes())?;
                self.out.write_all(b"\n")?;
                self.out.write_all(seq)?;
                self.out.write_all(b"\n+\n")?;
                match qual {
                    Some(q) => self.out.write_all(q)?,
                    None => {
                        for _ in 0..seq.len() {
                            self.out.write_all(&[FILL_QUALITY])?;
                        }
                    }
                }
                self.out.write_all(b"\n")?;
            }
        }
        self.written += 1;
        Ok(())
    }

    #[inline]
    pub fn write(&mut self, rec: &SeqRecord) -> io::Result<()> {
        self.write_record(&rec.header, &rec.seq, rec.qual.as_deref())
    }

    pub fn records_written(&self) -> u64 {
        self.written
    }

    /// Flush and hand back the inner writer.
    pub fn finish(self) -> io::Result<W> {
        self.out.into_inner().map_err(|e| e.into_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fasta_framing_is_two_lines() {
        let mut w = SeqWriter::new(Vec::new(), OutputFormat::Fasta);
        w.write_record("X", b"AC-GT", None).unwrap();
        assert_eq!(w.records_written(), 1);
        assert_eq!(w.finish().unwrap(), b">X\nAC-GT\n");
    }

    #[test]
    fn fastq_fills_missing_quality() {
        let mut w = SeqWriter::new(Vec::new(), OutputFormat::Fastq);
        w.write_record("r1 desc", b"ACG", None).unwrap();
        w.write(&SeqRecord::fastq("r2", "T", "#")).unwrap();
        let out = String::from_utf8(w.finish().unwrap()).unwrap();
        assert_eq!(out, "@r1 desc\nACG\n+\nIII\n@r2\nT\n+\n#\n");
    }
}
