use std::io;
use thiserror::Error;

/// Position in the input stream where a problem was noticed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IoContext {
    pub byte_pos: u64,
    pub line_num: u64,
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("expected a '>' or '@' header at start of record")]
    MissingHeader,
    #[error("found FASTA header '>' where only FASTQ is accepted")]
    FastaNotAllowed,
    #[error("found FASTQ header '@' where only FASTA is accepted")]
    FastqNotAllowed,
    #[error("missing '+' separator line")]
    MissingPlus,
    #[error("unexpected EOF inside record")]
    UnexpectedEof,
    #[error("quality length ({qual}) does not match sequence length ({seq})")]
    LengthMismatch { seq: usize, qual: usize },
    #[error("gzip input found but the `gzip` feature is disabled")]
    GzipDisabled,
}

#[derive(Debug, Error)]
pub enum SeqError {
    #[error("I/O error at line {}: {source}", ctx.line_num)]
    Io {
        #[source]
        source: io::Error,
        ctx: IoContext,
    },
    #[error("format error at line {}: {source}", ctx.line_num)]
    Format {
        #[source]
        source: FormatError,
        ctx: IoContext,
    },
}

impl SeqError {
    pub(crate) fn io_err(source: io::Error, ctx: IoContext) -> Self {
        Self::Io { source, ctx }
    }
    pub(crate) fn fmt_err(source: FormatError, ctx: IoContext) -> Self {
        Self::Format { source, ctx }
    }

    /// Where in the stream the error was raised.
    pub fn context(&self) -> IoContext {
        match self {
            Self::Io { ctx, .. } | Self::Format { ctx, .. } => *ctx,
        }
    }
}

/// Fatal conditions of a multi-file join. Any of these aborts the run before
/// a single record is written.
#[derive(Debug, Error)]
pub enum JoinError {
    #[error("could not open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: SeqError,
    },
    #[error("error reading {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: SeqError,
    },
    #[error("{key} found more than once in {path}")]
    DuplicateKey { key: String, path: String },
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
}

/// Failures of the streaming tools (`head`, `tail`, `wc`).
#[derive(Debug, Error)]
pub enum StreamError {
    #[error(transparent)]
    Read(#[from] SeqError),
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
    #[error("failed to write table: {0}")]
    Table(#[from] csv::Error),
}
