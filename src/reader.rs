use crate::error::{FormatError, IoContext, SeqError};
use crate::policy::{FormatHint, LineMode, ReaderOptions};
use crate::record::SeqRecord;
use crate::util::{STDIN_PATH, looks_like_gzip, open_file, peek_gzip};

#[cfg(feature = "gzip")]
use flate2::read::MultiGzDecoder;
#[cfg(feature = "mmap")]
use std::io::Cursor;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

const BUF_CAPACITY: usize = 256 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Stdin,
    Reader,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Path(p) => write!(f, "{}", p.display()),
            Source::Stdin => f.write_str(STDIN_PATH),
            Source::Reader => f.write_str("<reader>"),
        }
    }
}

/// Streaming FASTA/FASTQ reader (plain or .gz).
///
/// Records are pulled one at a time; nothing beyond the current record is
/// buffered apart from a single look-ahead header line.
pub struct SeqReader {
    src: Source,
    rdr: Box<dyn BufRead + Send>,
    opts: ReaderOptions,
    line_num: u64,
    byte_pos: u64,
    // Header line already consumed while finishing the previous record.
    pending_header: Option<Vec<u8>>,
}

impl SeqReader {
    /// Open `path`, treating `-` as standard input.
    pub fn open<P: AsRef<Path>>(path: P, opts: ReaderOptions) -> Result<Self, SeqError> {
        let path = path.as_ref();
        if path.as_os_str() == STDIN_PATH {
            Self::from_stdin(opts)
        } else {
            Self::from_path(path, opts)
        }
    }

    /// Open from a file path. Auto-detect `.gz` by extension or magic bytes.
    pub fn from_path<P: AsRef<Path>>(path: P, opts: ReaderOptions) -> Result<Self, SeqError> {
        let path = path.as_ref();
        let f = open_file(path).map_err(|e| SeqError::io_err(e, IoContext::default()))?;

        let is_gz = path.extension().and_then(|s| s.to_str()) == Some("gz")
            || looks_like_gzip(&f).unwrap_or(false);

        let rdr: Box<dyn BufRead + Send> = if is_gz {
            #[cfg(feature = "gzip")]
            {
                Box::new(BufReader::with_capacity(BUF_CAPACITY, MultiGzDecoder::new(f)))
            }
            #[cfg(not(feature = "gzip"))]
            {
                return Err(SeqError::fmt_err(
                    FormatError::GzipDisabled,
                    IoContext::default(),
                ));
            }
        } else {
            #[cfg(feature = "mmap")]
            {
                use memmap2::Mmap;
                // SAFETY: the map is read-only and owned by the cursor; the
                // file is not expected to be truncated while we read it.
                let mmap = unsafe { Mmap::map(&f) }
                    .map_err(|e| SeqError::io_err(e, IoContext::default()))?;
                Box::new(BufReader::with_capacity(BUF_CAPACITY, Cursor::new(mmap)))
            }
            #[cfg(not(feature = "mmap"))]
            {
                Box::new(BufReader::with_capacity(BUF_CAPACITY, f))
            }
        };

        log::debug!("opened {} (gzip: {is_gz})", path.display());
        Ok(Self::with_source(Source::Path(path.to_path_buf()), rdr, opts))
    }

    /// Read from standard input; gzip is detected from the first bytes.
    pub fn from_stdin(opts: ReaderOptions) -> Result<Self, SeqError> {
        let mut buffered = BufReader::with_capacity(BUF_CAPACITY, io::stdin());
        let is_gz =
            peek_gzip(&mut buffered).map_err(|e| SeqError::io_err(e, IoContext::default()))?;

        let rdr: Box<dyn BufRead + Send> = if is_gz {
            #[cfg(feature = "gzip")]
            {
                Box::new(BufReader::with_capacity(
                    BUF_CAPACITY,
                    MultiGzDecoder::new(buffered),
                ))
            }
            #[cfg(not(feature = "gzip"))]
            {
                return Err(SeqError::fmt_err(
                    FormatError::GzipDisabled,
                    IoContext::default(),
                ));
            }
        } else {
            Box::new(buffered)
        };
        Ok(Self::with_source(Source::Stdin, rdr, opts))
    }

    /// Wrap an arbitrary `BufRead` (in-memory data, pipes, ...).
    pub fn from_bufread<R: BufRead + Send + 'static>(reader: R, opts: ReaderOptions) -> Self {
        Self::with_source(Source::Reader, Box::new(reader), opts)
    }

    fn with_source(src: Source, rdr: Box<dyn BufRead + Send>, opts: ReaderOptions) -> Self {
        Self {
            src,
            rdr,
            opts,
            line_num: 0,
            byte_pos: 0,
            pending_header: None,
        }
    }

    pub fn source(&self) -> &Source {
        &self.src
    }

    /// True once no further record can be read. Blank lines are skipped.
    pub fn at_end(&mut self) -> Result<bool, SeqError> {
        if self.pending_header.is_some() {
            return Ok(false);
        }
        match self.next_nonempty_line()? {
            Some(h) => {
                self.pending_header = Some(h);
                Ok(false)
            }
            None => Ok(true),
        }
    }

    /// Next record, or `None` at end of stream.
    pub fn read_record(&mut self) -> Result<Option<SeqRecord>, SeqError> {
        let line = match self.pending_header.take() {
            Some(h) => h,
            None => match self.next_nonempty_line()? {
                Some(h) => h,
                None => return Ok(None),
            },
        };

        match line.split_first() {
            Some((b'>', rest)) => {
                if self.opts.format == FormatHint::Fastq {
                    return Err(SeqError::fmt_err(FormatError::FastaNotAllowed, self.ctx()));
                }
                let header = decode_header(rest);
                self.read_fasta_body(header).map(Some)
            }
            Some((b'@', rest)) => {
                if self.opts.format == FormatHint::Fasta {
                    return Err(SeqError::fmt_err(FormatError::FastqNotAllowed, self.ctx()));
                }
                let header = decode_header(rest);
                self.read_fastq_body(header).map(Some)
            }
            _ => Err(SeqError::fmt_err(FormatError::MissingHeader, self.ctx())),
        }
    }

    /// Release the underlying handle.
    pub fn close(self) {
        log::trace!("closing {} after {} lines", self.src, self.line_num);
    }

    fn read_fasta_body(&mut self, header: String) -> Result<SeqRecord, SeqError> {
        let mut seq = Vec::<u8>::with_capacity(256);
        let mut line = Vec::<u8>::with_capacity(256);
        loop {
            if self.read_line(&mut line)? == 0 {
                break;
            }
            if line.first() == Some(&b'>') {
                self.pending_header = Some(std::mem::take(&mut line));
                break;
            }
            seq.extend_from_slice(line.trim_ascii());
        }
        Ok(SeqRecord {
            header,
            seq,
            qual: None,
        })
    }

    fn read_fastq_body(&mut self, header: String) -> Result<SeqRecord, SeqError> {
        let mut line = Vec::<u8>::with_capacity(256);

        let (seq, qual) = match self.opts.line_mode {
            LineMode::Single => {
                // sequence: exactly one line
                self.read_required_line(&mut line)?;
                let seq = line.trim_ascii().to_vec();

                self.read_required_line(&mut line)?;
                if line.first() != Some(&b'+') {
                    return Err(SeqError::fmt_err(FormatError::MissingPlus, self.ctx()));
                }

                // qual: exactly one line
                self.read_required_line(&mut line)?;
                (seq, line.trim_ascii().to_vec())
            }
            LineMode::Multi => {
                let mut seq = Vec::<u8>::with_capacity(256);
                loop {
                    self.read_required_line(&mut line)?;
                    if line.first() == Some(&b'+') {
                        break;
                    }
                    seq.extend_from_slice(line.trim_ascii());
                }

                // Quality lines may legitimately start with '@' or '+', so
                // stop on length rather than on content.
                let mut qual = Vec::<u8>::with_capacity(seq.len());
                while qual.len() < seq.len() {
                    self.read_required_line(&mut line)?;
                    qual.extend_from_slice(line.trim_ascii());
                }
                (seq, qual)
            }
        };

        if qual.len() != seq.len() {
            return Err(SeqError::fmt_err(
                FormatError::LengthMismatch {
                    seq: seq.len(),
                    qual: qual.len(),
                },
                self.ctx(),
            ));
        }
        Ok(SeqRecord {
            header,
            seq,
            qual: Some(qual),
        })
    }

    fn next_nonempty_line(&mut self) -> Result<Option<Vec<u8>>, SeqError> {
        let mut h = Vec::<u8>::with_capacity(128);
        loop {
            if self.read_line(&mut h)? == 0 {
                return Ok(None);
            }
            if !h.trim_ascii().is_empty() {
                return Ok(Some(h));
            }
        }
    }

    /// Like [`Self::read_line`], but end of stream is a truncated record.
    fn read_required_line(&mut self, buf: &mut Vec<u8>) -> Result<(), SeqError> {
        if self.read_line(buf)? == 0 {
            return Err(SeqError::fmt_err(FormatError::UnexpectedEof, self.ctx()));
        }
        Ok(())
    }

    /// One raw line without its terminator; 0 at end of stream.
    ///
    /// The line counter moves before the read, so an I/O error reports the
    /// line that could not be read.
    fn read_line(&mut self, buf: &mut Vec<u8>) -> Result<usize, SeqError> {
        buf.clear();
        self.line_num += 1;
        let n = match self.rdr.read_until(b'\n', buf) {
            Ok(n) => n,
            Err(e) => {
                self.byte_pos += buf.len() as u64;
                return Err(SeqError::io_err(e, self.ctx()));
            }
        };
        if n == 0 {
            self.line_num -= 1;
            return Ok(0);
        }
        self.byte_pos += n as u64;
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        Ok(n)
    }

    #[inline]
    fn ctx(&self) -> IoContext {
        IoContext {
            byte_pos: self.byte_pos,
            line_num: self.line_num,
        }
    }
}

/// Headers are text; bytes that are not UTF-8 are replaced rather than
/// failing the record.
fn decode_header(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw.trim_ascii_end()).into_owned()
}

impl Iterator for SeqReader {
    type Item = Result<SeqRecord, SeqError>;
    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}
