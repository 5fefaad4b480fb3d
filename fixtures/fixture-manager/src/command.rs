// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use fixture_details::AllFixtures;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

#[derive(Debug, Parser)]
pub struct FixtureManagerApp {
    /// Log more detail (repeat for more)
    #[clap(long, short, parse(from_occurrences), global = true)]
    verbose: usize,

    #[clap(subcommand)]
    command: FixtureManagerCommand,
}

#[derive(Debug, Parser)]
pub enum FixtureManagerCommand {
    /// Generate random on-sets and write them to the data directory
    GenerateInputs {
        #[clap(long, short, default_value_t = 8)]
        bits: usize,

        #[clap(long, short, default_value_t = 64)]
        count: usize,
    },
    /// Minimize and optimize stored on-sets, checking every step
    Verify {
        #[clap(long, short, default_value_t = 8)]
        bits: usize,

        #[clap(long, default_value_t = 1)]
        max_depth: usize,
    },
}

impl FixtureManagerApp {
    pub fn exec(self) -> Result<()> {
        let level = match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        TermLogger::init(
            level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        )?;
        self.command.exec()
    }
}

impl FixtureManagerCommand {
    pub fn exec(self) -> Result<()> {
        let fixtures = AllFixtures::get();
        match self {
            Self::GenerateInputs { bits, count } => {
                let path = fixtures.generate_inputs(bits, count)?;
                println!("{}", path);
                Ok(())
            }
            Self::Verify { bits, max_depth } => {
                let summary = fixtures.verify(bits, max_depth)?;
                println!(
                    "{} functions, {} cubes, {} literals, node size {} -> {}",
                    summary.function_count,
                    summary.cube_count,
                    summary.cover_literal_count,
                    summary.cover_node_size,
                    summary.optimized_node_size
                );
                Ok(())
            }
        }
    }
}
