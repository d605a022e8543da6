//! `join` for sequence files: merge records sharing a key across files into
//! one concatenated sequence per key.
//!
//! Every input is assumed to be an alignment, so only the first record of
//! each file sets that file's width. Keys missing from a file are padded to
//! that width, which keeps the output a valid alignment.
//!
//! Nothing is written until every input has been read: a failure in the
//! last file still produces no output.

mod accumulator;
mod key;

pub use accumulator::{Accumulator, IngestAction, IngestOutcome, Joined, LengthMismatch};
pub use key::KeyExtractor;

use std::io::Write;
use std::path::Path;

use crate::error::JoinError;
use crate::policy::{JoinOptions, KeyOptions, ReaderOptions};
use crate::reader::SeqReader;
use crate::util::STDIN_PATH;
use crate::writer::{OutputFormat, SeqWriter};

#[derive(Debug, Clone, Default)]
pub struct JoinConfig {
    pub key: KeyOptions,
    pub join: JoinOptions,
    pub reader: ReaderOptions,
}

/// Counters gathered over a run, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinStats {
    pub files: usize,
    pub records: u64,
    pub skipped: u64,
    pub mismatches: u64,
    pub duplicates: u64,
}

/// Drives an [`Accumulator`] over a sequence of record streams.
pub struct Joiner {
    keys: KeyExtractor,
    acc: Accumulator,
    stats: JoinStats,
}

impl Joiner {
    pub fn new(key: KeyOptions, join: JoinOptions) -> Self {
        Self {
            keys: KeyExtractor::new(key),
            acc: Accumulator::new(join),
            stats: JoinStats::default(),
        }
    }

    /// Consume one whole stream as the next file of the join.
    pub fn add_stream(&mut self, name: &str, mut reader: SeqReader) -> Result<(), JoinError> {
        self.acc.begin_file(name);
        while let Some(rec) = reader.read_record().map_err(|source| JoinError::Read {
            path: name.to_string(),
            source,
        })? {
            let Some(key) = self.keys.extract(&rec.header) else {
                log::trace!("{name}: no join field in '{}', skipped", rec.header);
                self.stats.skipped += 1;
                continue;
            };
            let outcome = self.acc.ingest(key, &rec.seq)?;
            self.stats.records += 1;
            if let Some(m) = outcome.mismatch {
                log::warn!("{m}");
                self.stats.mismatches += 1;
            }
            if outcome.action != IngestAction::Appended {
                log::debug!("{name}: repeated key in '{}' ({:?})", rec.header, outcome.action);
                self.stats.duplicates += 1;
            }
        }
        reader.close();
        self.acc.end_file();
        self.stats.files += 1;
        Ok(())
    }

    pub fn finish(self) -> (Joined, JoinStats) {
        (self.acc.finalize(), self.stats)
    }
}

/// Join `paths` in order; an empty list reads standard input once.
pub fn join_paths<P: AsRef<Path>>(
    paths: &[P],
    cfg: &JoinConfig,
) -> Result<(Joined, JoinStats), JoinError> {
    let mut joiner = Joiner::new(cfg.key.clone(), cfg.join.clone());
    let stdin = [Path::new(STDIN_PATH)];
    let paths: Vec<&Path> = if paths.is_empty() {
        stdin.to_vec()
    } else {
        paths.iter().map(|p| p.as_ref()).collect()
    };

    for path in paths {
        let name = path.display().to_string();
        let reader = SeqReader::open(path, cfg.reader.clone()).map_err(|source| {
            JoinError::Open {
                path: name.clone(),
                source,
            }
        })?;
        joiner.add_stream(&name, reader)?;
    }
    Ok(joiner.finish())
}

/// Write every joined key as one record, in key order.
pub fn write_joined<W: Write>(joined: &Joined, out: &mut SeqWriter<W>) -> Result<(), JoinError> {
    for (key, seq) in joined.iter() {
        out.write_record(key, seq, None)?;
    }
    Ok(())
}

/// Full `join` run: read everything, then emit FASTA to `out`.
pub fn run_join<P: AsRef<Path>, W: Write>(
    paths: &[P],
    cfg: &JoinConfig,
    out: W,
) -> Result<JoinStats, JoinError> {
    let (joined, stats) = join_paths(paths, cfg)?;
    log::info!(
        "joined {} keys from {} files ({} records, {} skipped, {} length warnings)",
        joined.len(),
        stats.files,
        stats.records,
        stats.skipped,
        stats.mismatches
    );
    let mut writer = SeqWriter::new(out, OutputFormat::Fasta);
    write_joined(&joined, &mut writer)?;
    writer.finish()?;
    Ok(stats)
}
