// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::io::{self, IsTerminal};

use clap::{ArgAction, Parser, ValueEnum};
use color_eyre::eyre::eyre;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
pub struct OutputOptions {
    /// Whether to emit colors in diagnostics.
    #[clap(long, value_enum, default_value_t = ColorMode::Auto, env = "BBST_COLOR")]
    pub color: ColorMode,
    /// Enables more verbose logging, repeat for even more output.
    ///
    /// `RUST_LOG` takes precedence when set.
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Determine whether to color output based on whether stderr is a terminal.
    Auto,
    /// Always color output.
    Always,
    /// Never color output.
    Never,
}

impl ColorMode {
    fn should_color(self) -> bool {
        match self {
            ColorMode::Auto => io::stderr().is_terminal(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl OutputOptions {
    /// Installs the global `tracing` subscriber. Diagnostics go to stderr so they never mix with
    /// command results on stdout.
    pub fn init(&self) -> color_eyre::Result<()> {
        let filter = EnvFilter::builder()
            .with_default_directive(verbosity_level(self.verbose).into())
            .from_env_lossy();

        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_ansi(self.color.should_color())
            .with_env_filter(filter)
            .try_init()
            .map_err(|err| eyre!(err))
    }
}

/// This maps the occurrence of `--verbose` flags to the correct log level
fn verbosity_level(num: u8) -> LevelFilter {
    match num {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        2.. => LevelFilter::TRACE,
    }
}
