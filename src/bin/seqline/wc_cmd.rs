//! CLI for `seqline wc` (records, bases, GC).
use std::io;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use seqline::*;

#[derive(Debug, Args)]
pub struct WcCmd {
    /// Give the length of each record.
    #[arg(short='m', long="length")]
    pub length: bool,
    /// Give the GC fraction (of each file, or of each record with -m).
    #[arg(short='g', long)]
    pub gc: bool,
    /// Include gaps ('-') in the base count.
    #[arg(short='i', long)]
    pub include_gap: bool,
    /// Total bases per file.
    #[arg(short='b', long, conflicts_with_all=["length", "gc"])]
    pub total_bases: bool,
    /// Total bases across all files.
    #[arg(short='B', long, conflicts_with_all=["length", "gc"])]
    pub grand_total_bases: bool,
    /// Input files; '-' or none reads stdin.
    #[arg(value_name="FILE")]
    pub files: Vec<PathBuf>,
}

pub fn run(cmd: WcCmd) -> Result<()> {
    let opts = CountOptions {
        per_record: cmd.length,
        gc: cmd.gc,
        include_gaps: cmd.include_gap,
        total_bases: cmd.total_bases,
        grand_total: cmd.grand_total_bases,
    };
    let mut report = WcReport::new(io::stdout().lock(), opts);
    for path in crate::input_paths(&cmd.files) {
        let name = path.display().to_string();
        let mut reader = SeqReader::open(&path, ReaderOptions::default())
            .with_context(|| format!("could not open {name}"))?;
        report
            .count_file(&name, &mut reader)
            .with_context(|| format!("error reading {name}"))?;
        reader.close();
    }
    report.finish().context("flush output")?;
    Ok(())
}
