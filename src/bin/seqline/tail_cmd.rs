//! CLI for `seqline tail`.
use std::io;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use seqline::*;

use crate::head_cmd::FormatChoice;

#[derive(Debug, Args)]
pub struct TailCmd {
    /// Print the last N records of each file, or every record from the N-th with +N.
    #[arg(short='n', long="lines", value_name="[+]N", default_value="10")]
    pub lines: TailCount,
    /// Output format.
    #[arg(short='f', long, value_enum, default_value_t=FormatChoice::Fasta)]
    pub format: FormatChoice,
    /// Input files; '-' or none reads stdin.
    #[arg(value_name="FILE")]
    pub files: Vec<PathBuf>,
}

pub fn run(cmd: TailCmd) -> Result<()> {
    let mut out = SeqWriter::new(io::stdout().lock(), cmd.format.into());
    for path in crate::input_paths(&cmd.files) {
        let mut reader = SeqReader::open(&path, ReaderOptions::default())
            .with_context(|| format!("could not open {}", path.display()))?;
        let n = tail(&mut reader, cmd.lines, &mut out)
            .with_context(|| format!("error reading {}", path.display()))?;
        log::debug!("{}: {n} records", path.display());
        reader.close();
    }
    out.finish().context("flush output")?;
    Ok(())
}
