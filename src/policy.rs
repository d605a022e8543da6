//! Configuration knobs for readers and the join engine.

use std::num::NonZeroUsize;

/// Which record formats a reader accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatHint {
    /// Decide per record from the header sigil (`>` or `@`).
    #[default]
    Auto,
    Fasta,
    Fastq,
}

/// How sequence/quality lines are laid out in FASTQ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMode {
    /// Sequence and quality occupy exactly one line each.
    Single,
    /// Sequence/quality may span multiple lines (general FASTQ).
    Multi,
}

#[derive(Debug, Clone)]
pub struct ReaderOptions {
    pub format: FormatHint,
    /// FASTQ layout. FASTA sequences are always allowed to wrap.
    pub line_mode: LineMode,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            format: FormatHint::Auto,
            line_mode: LineMode::Multi,
        }
    }
}

/// What to do when a join key shows up twice in the same file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Abort the run.
    #[default]
    Error,
    /// Keep the first record, discard later ones.
    Drop,
    /// Append the later record (after the separator) to the key's buffer.
    /// The key's buffer then no longer lines up with the others.
    Append,
}

/// How a join key is derived from a record header.
#[derive(Debug, Clone)]
pub struct KeyOptions {
    /// Upper-case the key.
    pub case_fold: bool,
    /// Set of delimiter characters; runs of them form one boundary.
    pub delimiter: String,
    /// 1-based token to join on; `None` joins on the whole header.
    pub field: Option<NonZeroUsize>,
}

impl Default for KeyOptions {
    fn default() -> Self {
        Self {
            case_fold: false,
            delimiter: " ".to_string(),
            field: None,
        }
    }
}

/// Accumulator behaviour for `join`.
#[derive(Debug, Clone)]
pub struct JoinOptions {
    /// Fill gaps for keys absent from a file.
    pub pad: bool,
    pub pad_char: u8,
    /// Inserted between the contributions of consecutive files.
    pub separator: Vec<u8>,
    pub duplicates: DuplicatePolicy,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            pad: true,
            pad_char: b'-',
            separator: Vec::new(),
            duplicates: DuplicatePolicy::Error,
        }
    }
}
