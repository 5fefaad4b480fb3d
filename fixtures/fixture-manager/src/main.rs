// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod command;

use clap::Parser;
use color_eyre::Result;
use command::FixtureManagerApp;

fn main() -> Result<()> {
    color_eyre::install()?;
    let app = FixtureManagerApp::parse();
    app.exec()
}
