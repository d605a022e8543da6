//! Command-line interface for the `seqline` crate.
//!
//! Subcommands are implemented in separate files (modules) under `src/bin/seqline/`:
//! - `join_cmd.rs`
//! - `head_cmd.rs`
//! - `tail_cmd.rs`
//! - `wc_cmd.rs`
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use seqline::STDIN_PATH;

#[derive(Debug, Parser)]
#[command(name="seqline", version=env!("CARGO_PKG_VERSION"), about="Unix line tools for FASTA/FASTQ records", disable_help_subcommand=true)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace). `RUST_LOG` also applies.
    #[arg(short, long, action=ArgAction::Count, global=true)]
    verbose: u8,
    /// Only log errors.
    #[arg(short, long, global=true, conflicts_with="verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Join records with matching names across files (`join`).
    Join(join_cmd::JoinCmd),
    /// First records of each file (`head`).
    Head(head_cmd::HeadCmd),
    /// Last records of each file (`tail`).
    Tail(tail_cmd::TailCmd),
    /// Count records, bases or GC content (`wc`).
    Wc(wc_cmd::WcCmd),
}

#[path = "seqline/join_cmd.rs"] mod join_cmd;
#[path = "seqline/head_cmd.rs"] mod head_cmd;
#[path = "seqline/tail_cmd.rs"] mod tail_cmd;
#[path = "seqline/wc_cmd.rs"] mod wc_cmd;

/// Input list with the "no files means stdin" rule applied.
fn input_paths(files: &[PathBuf]) -> Vec<PathBuf> {
    if files.is_empty() {
        vec![Path::new(STDIN_PATH).to_path_buf()]
    } else {
        files.to_vec()
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    match cli.command {
        Command::Join(cmd) => join_cmd::run(cmd),
        Command::Head(cmd) => head_cmd::run(cmd),
        Command::Tail(cmd) => tail_cmd::run(cmd),
        Command::Wc(cmd) => wc_cmd::run(cmd),
    }
}
