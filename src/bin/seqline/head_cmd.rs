//! CLI for `seqline head`.
use std::io;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use seqline::*;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatChoice { Fasta, Fastq }

impl From<FormatChoice> for OutputFormat {
    fn from(c: FormatChoice) -> Self {
        match c {
            FormatChoice::Fasta => OutputFormat::Fasta,
            FormatChoice::Fastq => OutputFormat::Fastq,
        }
    }
}

#[derive(Debug, Args)]
pub struct HeadCmd {
    /// Print the first N records of each file; -N prints all but the last N.
    #[arg(short='n', long="lines", value_name="[-]N", default_value="10", allow_negative_numbers=true)]
    pub lines: HeadCount,
    /// Output format.
    #[arg(short='f', long, value_enum, default_value_t=FormatChoice::Fasta)]
    pub format: FormatChoice,
    /// Input files; '-' or none reads stdin.
    #[arg(value_name="FILE")]
    pub files: Vec<PathBuf>,
}

pub fn run(cmd: HeadCmd) -> Result<()> {
    let mut out = SeqWriter::new(io::stdout().lock(), cmd.format.into());
    for path in crate::input_paths(&cmd.files) {
        let mut reader = SeqReader::open(&path, ReaderOptions::default())
            .with_context(|| format!("could not open {}", path.display()))?;
        let n = head(&mut reader, cmd.lines, &mut out)
            .with_context(|| format!("error reading {}", path.display()))?;
        log::debug!("{}: {n} records", path.display());
        reader.close();
    }
    out.finish().context("flush output")?;
    Ok(())
}
