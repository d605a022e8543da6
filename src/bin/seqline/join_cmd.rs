//! CLI for `seqline join` (concatenate same-named records across alignments).
use std::fs::File;
use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use seqline::join::{join_paths, write_joined};
use seqline::*;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DuplicateChoice { Error, Drop, Append }

impl From<DuplicateChoice> for DuplicatePolicy {
    fn from(c: DuplicateChoice) -> Self {
        match c {
            DuplicateChoice::Error => DuplicatePolicy::Error,
            DuplicateChoice::Drop => DuplicatePolicy::Drop,
            DuplicateChoice::Append => DuplicatePolicy::Append,
        }
    }
}

#[derive(Debug, Args)]
pub struct JoinCmd {
    /// Do not pad sequences missing from a file.
    #[arg(short='n', long)]
    pub no_pad: bool,
    /// Allow duplicate names within a file; they are appended (same as --on-duplicate append).
    #[arg(short='D', long, conflicts_with="on_duplicate")]
    pub allow_duplicates: bool,
    /// What to do with a name seen twice in one file.
    #[arg(long, value_enum, default_value_t=DuplicateChoice::Error)]
    pub on_duplicate: DuplicateChoice,
    /// Ignore case when matching names.
    #[arg(short='i', long)]
    pub ignore_case: bool,
    /// Field (1-based) of the name to join on, after splitting on --delim; records without it are skipped.
    #[arg(short='f', long, value_name="N")]
    pub field: Option<NonZeroUsize>,
    /// Character used for padding.
    #[arg(short='p', long, value_name="CHAR", default_value="-", value_parser=parse_pad_char, allow_hyphen_values=true)]
    pub pad_char: u8,
    /// Field delimiter characters.
    #[arg(short='d', long, value_name="CHARS", default_value=" ", allow_hyphen_values=true)]
    pub delim: String,
    /// Separator between joined sequences.
    #[arg(short='s', long, value_name="STRING", default_value="", allow_hyphen_values=true)]
    pub separator: String,
    /// Output FASTA (default: stdout). Only created once every input was read.
    #[arg(short='o', long, value_name="FILE")]
    pub outfile: Option<PathBuf>,
    /// Input files; '-' or none reads stdin.
    #[arg(value_name="FILE")]
    pub files: Vec<PathBuf>,
}

fn parse_pad_char(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("pad character must be a single ASCII character, got '{s}'")),
    }
}

impl JoinCmd {
    fn config(&self) -> JoinConfig {
        let duplicates = if self.allow_duplicates {
            DuplicatePolicy::Append
        } else {
            self.on_duplicate.into()
        };
        JoinConfig {
            key: KeyOptions {
                case_fold: self.ignore_case,
                delimiter: self.delim.clone(),
                field: self.field,
            },
            join: JoinOptions {
                pad: !self.no_pad,
                pad_char: self.pad_char,
                separator: self.separator.clone().into_bytes(),
                duplicates,
            },
            reader: ReaderOptions::default(),
        }
    }
}

pub fn run(cmd: JoinCmd) -> Result<()> {
    let cfg = cmd.config();
    let (joined, stats) = join_paths(&cmd.files, &cfg)?;
    log::info!(
        "joined {} keys from {} files ({} records, {} skipped, {} length warnings)",
        joined.len(), stats.files, stats.records, stats.skipped, stats.mismatches
    );

    let out: Box<dyn Write> = match &cmd.outfile {
        Some(p) => Box::new(File::create(p).with_context(|| format!("create {}", p.display()))?),
        None => Box::new(io::stdout().lock()),
    };
    let mut w = SeqWriter::new(out, OutputFormat::Fasta);
    write_joined(&joined, &mut w)?;
    w.finish().context("flush joined output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Wrapper {
        #[command(flatten)]
        cmd: JoinCmd,
    }

    fn duplicates(args: &[&str]) -> Result<DuplicatePolicy, clap::Error> {
        let argv = std::iter::once("join").chain(args.iter().copied());
        Wrapper::try_parse_from(argv).map(|w| w.cmd.config().join.duplicates)
    }

    #[test]
    fn duplicate_flags_select_policy() {
        assert_eq!(duplicates(&["a.fa"]).unwrap(), DuplicatePolicy::Error);
        assert_eq!(duplicates(&["-D", "a.fa"]).unwrap(), DuplicatePolicy::Append);
        assert_eq!(duplicates(&["--allow-duplicates"]).unwrap(), DuplicatePolicy::Append);
        assert_eq!(duplicates(&["--on-duplicate", "drop"]).unwrap(), DuplicatePolicy::Drop);
        assert_eq!(duplicates(&["--on-duplicate", "append"]).unwrap(), DuplicatePolicy::Append);
        assert!(duplicates(&["-D", "--on-duplicate", "drop"]).is_err());
    }

    #[test]
    fn options_reach_join_config() {
        let w = Wrapper::try_parse_from(["join", "-n", "-i", "-f", "2", "-d", "_", "-p", "?", "-s", "|"])
            .unwrap();
        let cfg = w.cmd.config();
        assert!(!cfg.join.pad);
        assert_eq!(cfg.join.pad_char, b'?');
        assert_eq!(cfg.join.separator, b"|");
        assert!(cfg.key.case_fold);
        assert_eq!(cfg.key.delimiter, "_");
        assert_eq!(cfg.key.field.map(|f| f.get()), Some(2));
    }

    #[test]
    fn pad_char_must_be_one_ascii_byte() {
        assert_eq!(parse_pad_char("?"), Ok(b'?'));
        assert!(parse_pad_char("--").is_err());
        assert!(parse_pad_char("").is_err());
        assert!(parse_pad_char("é").is_err());
    }
}
