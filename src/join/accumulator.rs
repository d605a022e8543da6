//! Per-key sequence accumulation with gap padding.
//!
//! Files are fed one at a time through [`Accumulator::begin_file`],
//! [`Accumulator::ingest`] and [`Accumulator::end_file`]. Each file
//! contributes one *block* to every key: the real sequence for keys present
//! in the file, or a run of pad characters as wide as the file's first record
//! for keys that are absent. With padding on, every buffer therefore has the
//! same length after each `end_file`:
//!
//! ```text
//! sum(widths) + separator.len() * (files - 1)
//! ```
//!
//! Keys first seen in a later file are pre-padded from the recorded widths
//! before their first block is appended.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};

use crate::error::JoinError;
use crate::policy::{DuplicatePolicy, JoinOptions};

/// A record whose length differs from the first record of its file.
///
/// Only a notice: the record is still joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthMismatch {
    pub key: String,
    pub file: String,
    pub expected: usize,
    pub found: usize,
}

impl std::fmt::Display for LengthMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} in {} is {} long, other records in the file are {}",
            self.key, self.file, self.found, self.expected
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestAction {
    /// First occurrence of the key in this file; sequence appended.
    Appended,
    /// Repeated key, discarded under [`DuplicatePolicy::Drop`].
    DuplicateDropped,
    /// Repeated key, concatenated under [`DuplicatePolicy::Append`].
    DuplicateAppended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct IngestOutcome {
    pub action: IngestAction,
    pub mismatch: Option<LengthMismatch>,
}

#[derive(Debug, Default)]
struct Column {
    seq: Vec<u8>,
    blocks: usize,
}

impl Column {
    fn push_block(&mut self, separator: &[u8], data: &[u8]) {
        if self.blocks > 0 {
            self.seq.extend_from_slice(separator);
        }
        self.seq.extend_from_slice(data);
        self.blocks += 1;
    }

    fn push_gap(&mut self, separator: &[u8], width: usize, pad: u8) {
        if self.blocks > 0 {
            self.seq.extend_from_slice(separator);
        }
        self.seq.resize(self.seq.len() + width, pad);
        self.blocks += 1;
    }
}

/// Width of `widths.len()` consecutive blocks joined by `sep_len` separators.
fn joined_width(widths: &[usize], sep_len: usize) -> usize {
    widths.iter().sum::<usize>() + sep_len * widths.len().saturating_sub(1)
}

/// Owns every key's buffer for the duration of one join run.
#[derive(Debug)]
pub struct Accumulator {
    opts: JoinOptions,
    columns: BTreeMap<String, Column>,
    seen: HashSet<String>,
    // One entry per file that produced at least one record.
    widths: Vec<usize>,
    current_width: Option<usize>,
    current_file: String,
    files_done: usize,
}

impl Accumulator {
    pub fn new(opts: JoinOptions) -> Self {
        Self {
            opts,
            columns: BTreeMap::new(),
            seen: HashSet::new(),
            widths: Vec::new(),
            current_width: None,
            current_file: String::new(),
            files_done: 0,
        }
    }

    /// Start a new file. `name` only appears in diagnostics.
    pub fn begin_file(&mut self, name: &str) {
        self.seen.clear();
        self.current_width = None;
        self.current_file.clear();
        self.current_file.push_str(name);
    }

    /// Add one record of the current file.
    pub fn ingest(&mut self, key: String, seq: &[u8]) -> Result<IngestOutcome, JoinError> {
        let mismatch = match self.current_width {
            None => {
                self.current_width = Some(seq.len());
                self.widths.push(seq.len());
                None
            }
            Some(expected) if expected != seq.len() => Some(LengthMismatch {
                key: key.clone(),
                file: self.current_file.clone(),
                expected,
                found: seq.len(),
            }),
            Some(_) => None,
        };

        if self.seen.contains(&key) {
            let action = match self.opts.duplicates {
                DuplicatePolicy::Error => {
                    return Err(JoinError::DuplicateKey {
                        key,
                        path: self.current_file.clone(),
                    });
                }
                DuplicatePolicy::Drop => IngestAction::DuplicateDropped,
                DuplicatePolicy::Append => {
                    if let Some(col) = self.columns.get_mut(&key) {
                        col.push_block(&self.opts.separator, seq);
                    }
                    IngestAction::DuplicateAppended
                }
            };
            return Ok(IngestOutcome { action, mismatch });
        }
        self.seen.insert(key.clone());

        let col = match self.columns.entry(key) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                let mut col = Column::default();
                let prior = &self.widths[..self.files_done];
                if self.opts.pad && !prior.is_empty() {
                    col.seq.reserve(
                        joined_width(prior, self.opts.separator.len())
                            + self.opts.separator.len()
                            + seq.len(),
                    );
                    for &width in prior {
                        col.push_gap(&self.opts.separator, width, self.opts.pad_char);
                    }
                }
                e.insert(col)
            }
        };
        col.push_block(&self.opts.separator, seq);

        Ok(IngestOutcome {
            action: IngestAction::Appended,
            mismatch,
        })
    }

    /// Close the current file, giving every absent key a gap block.
    ///
    /// A file that produced no records leaves all buffers untouched.
    pub fn end_file(&mut self) {
        let Some(width) = self.current_width.take() else {
            log::debug!("{}: no records joined, no block added", self.current_file);
            return;
        };
        if self.opts.pad {
            for (key, col) in self.columns.iter_mut() {
                if !self.seen.contains(key) {
                    col.push_gap(&self.opts.separator, width, self.opts.pad_char);
                }
            }
        }
        self.files_done += 1;
    }

    /// Buffer length every key should have after the files closed so far.
    pub fn expected_width(&self) -> usize {
        joined_width(&self.widths[..self.files_done], self.opts.separator.len())
    }

    /// True when every buffer has [`Self::expected_width`] bytes.
    pub fn is_aligned(&self) -> bool {
        let want = self.expected_width();
        self.columns.values().all(|c| c.seq.len() == want)
    }

    /// Widths recorded so far, one per file that produced records.
    pub fn file_widths(&self) -> &[usize] {
        &self.widths
    }

    pub fn files_done(&self) -> usize {
        self.files_done
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Hand over the joined buffers; the accumulator is consumed.
    pub fn finalize(self) -> Joined {
        Joined {
            columns: self
                .columns
                .into_iter()
                .map(|(key, col)| (key, col.seq))
                .collect(),
        }
    }
}

/// Final key -> buffer mapping, iterated in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Joined {
    columns: BTreeMap<String, Vec<u8>>,
}

impl Joined {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> + '_ {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.columns.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
