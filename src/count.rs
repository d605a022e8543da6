//! `wc` for sequence files: record, base and GC counts.
//!
//! Reports are tab-separated rows written through a `csv` writer:
//!
//! | options         | row                          |
//! |-----------------|------------------------------|
//! | (none)          | `file  records`              |
//! | `per_record`    | `file  id  length` (or GC)   |
//! | `gc`            | `file  gc_fraction`          |
//! | `total_bases`   | `file  bases`                |
//! | `grand_total`   | `GRAND_TOTAL_BASES  bases`   |

use std::io::Write;

use crate::error::StreamError;
use crate::reader::SeqReader;

#[derive(Debug, Clone, Copy, Default)]
pub struct CountOptions {
    /// One row per record instead of per file.
    pub per_record: bool,
    /// Report GC fraction instead of lengths.
    pub gc: bool,
    /// Count `-` gap characters as bases.
    pub include_gaps: bool,
    /// Total bases per file.
    pub total_bases: bool,
    /// Total bases across all files, reported by [`WcReport::finish`].
    pub grand_total: bool,
}

/// Bases and G/C bases of one sequence or file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseCount {
    pub bases: u64,
    pub gc: u64,
}

impl BaseCount {
    pub fn of(seq: &[u8], include_gaps: bool) -> Self {
        let mut c = BaseCount::default();
        for &b in seq {
            if !include_gaps && b == b'-' {
                continue;
            }
            c.bases += 1;
            if matches!(b, b'G' | b'C' | b'g' | b'c') {
                c.gc += 1;
            }
        }
        c
    }

    pub fn add(&mut self, other: BaseCount) {
        self.bases += other.bases;
        self.gc += other.gc;
    }

    /// `None` when there are no bases to divide by.
    pub fn gc_fraction(&self) -> Option<f64> {
        (self.bases > 0).then(|| self.gc as f64 / self.bases as f64)
    }
}

fn fmt_fraction(f: Option<f64>) -> String {
    match f {
        Some(v) => format!("{v:.4}"),
        None => "nan".to_string(),
    }
}

/// Totals for one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileCount {
    pub records: u64,
    pub bases: BaseCount,
}

/// Streams `wc` rows for any number of files.
pub struct WcReport<W: Write> {
    out: csv::Writer<W>,
    opts: CountOptions,
    grand_total: u64,
}

impl<W: Write> WcReport<W> {
    pub fn new(out: W, opts: CountOptions) -> Self {
        let out = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(out);
        Self {
            out,
            opts,
            grand_total: 0,
        }
    }

    /// Count every record of `reader`, reporting it under `name`.
    pub fn count_file(
        &mut self,
        name: &str,
        reader: &mut SeqReader,
    ) -> Result<FileCount, StreamError> {
        let mut file = FileCount::default();
        while let Some(rec) = reader.read_record()? {
            let c = BaseCount::of(&rec.seq, self.opts.include_gaps);
            file.records += 1;
            file.bases.add(c);
            if self.opts.per_record {
                let value = if self.opts.gc {
                    fmt_fraction(c.gc_fraction())
                } else {
                    c.bases.to_string()
                };
                self.out
                    .write_record([name, rec.header.as_str(), value.as_str()])?;
            }
        }
        self.grand_total += file.bases.bases;

        if !self.opts.per_record {
            let value = if self.opts.total_bases {
                file.bases.bases.to_string()
            } else if self.opts.gc {
                fmt_fraction(file.bases.gc_fraction())
            } else {
                file.records.to_string()
            };
            self.out.write_record([name, value.as_str()])?;
        }
        Ok(file)
    }

    /// Emit the grand total row if requested and flush.
    pub fn finish(mut self) -> Result<W, StreamError> {
        if self.opts.grand_total {
            let total = self.grand_total.to_string();
            self.out.write_record(["GRAND_TOTAL_BASES", total.as_str()])?;
        }
        self.out
            .into_inner()
            .map_err(|e| StreamError::Write(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaps_are_excluded_unless_asked() {
        assert_eq!(BaseCount::of(b"AC-G-T", false), BaseCount { bases: 4, gc: 2 });
        assert_eq!(BaseCount::of(b"AC-G-T", true), BaseCount { bases: 6, gc: 2 });
        assert_eq!(BaseCount::of(b"ggcc", false).gc_fraction(), Some(1.0));
        assert_eq!(BaseCount::of(b"--", false).gc_fraction(), None);
    }

    #[test]
    fn fraction_formatting() {
        assert_eq!(fmt_fraction(Some(0.5)), "0.5000");
        assert_eq!(fmt_fraction(None), "nan");
    }
}
