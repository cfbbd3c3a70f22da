// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

mod command;
mod input;
mod logging;
mod repl;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::{Parser, ValueHint};
use color_eyre::eyre::WrapErr;
use treemap::TreeMap;

use crate::logging::OutputOptions;
use crate::repl::Session;

/// Loads a presorted list of `key count` entries into a red-black tree and answers
/// commands about it, one per line.
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// The file holding the initial entries.
    ///
    /// The first line is the number of entries, followed by one `key count` pair per line.
    #[clap(value_hint = ValueHint::FilePath, env = "BBST_INPUT")]
    input: PathBuf,
    /// Read commands from this file instead of stdin.
    #[clap(long, value_hint = ValueHint::FilePath, env = "BBST_COMMANDS")]
    commands: Option<PathBuf>,
    /// Don't print the command overview on start-up.
    #[clap(long)]
    no_banner: bool,
    #[clap(flatten)]
    output: OutputOptions,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    args.output.init()?;

    let entries = input::read_entries(&args.input)?;
    let (tree, height) = TreeMap::from_sorted(&entries)
        .wrap_err("failed to build the tree from the input entries")?;
    tracing::info!(entries = tree.len(), height, "tree built");

    let mut session = Session::new(tree, !args.no_banner);
    let stdout = io::stdout().lock();

    let processed = match &args.commands {
        Some(path) => {
            let file = File::open(path)
                .wrap_err_with(|| format!("failed to open command file {}", path.display()))?;
            session.run(BufReader::new(file), stdout)
        }
        None => session.run(io::stdin().lock(), stdout),
    };

    processed.wrap_err("failed to process commands")
}
