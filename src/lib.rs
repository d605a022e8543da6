//! Unix line tools for sequence files: each FASTA/FASTQ record plays the
//! part of a line.
//!
//! - Streaming FASTA/FASTQ reader, plain and `.gz` (auto-detect), files or stdin.
//! - `head`/`tail` record windows, `wc` record/base/GC counts.
//! - `join`: concatenate same-keyed records across alignment files, padding
//!   keys that are missing from a file so all outputs stay the same length.
//! - Optional `mmap` for plain files; `zlib` feature for the system zlib backend.

pub mod count;
pub mod error;
pub mod join;
pub mod policy;
pub mod reader;
pub mod record;
mod util;
pub mod window;
pub mod writer;

pub use crate::count::{BaseCount, CountOptions, FileCount, WcReport};
pub use crate::error::{FormatError, IoContext, JoinError, SeqError, StreamError};
pub use crate::join::{Accumulator, JoinConfig, JoinStats, Joined, Joiner, KeyExtractor};
pub use crate::policy::{DuplicatePolicy, FormatHint, JoinOptions, KeyOptions, LineMode, ReaderOptions};
pub use crate::reader::{SeqReader, Source};
pub use crate::record::SeqRecord;
pub use crate::util::STDIN_PATH;
pub use crate::window::{HeadCount, TailCount, head, tail};
pub use crate::writer::{OutputFormat, SeqWriter};
