// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # accel-harness
//!
//! Command-line driver for the tensor op harness and the vector template.
//!
//! ## Usage
//! ```bash
//! # Multiply two 2048-element ramps on the soft accelerator and verify
//! accel-harness run
//!
//! # Another shape and primitive, summary only, machine-readable outcome
//! accel-harness run --dims 1,3,64,64 --op add --quiet-elements --json
//!
//! # Accelerator queries
//! accel-harness status
//!
//! # Vector template demo
//! accel-harness vxe
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "accel-harness",
    about = "Tensor accelerator verification harness",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (CLI flags override its values).
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one element-wise op on the accelerator and verify every element.
    Run(commands::run::RunArgs),

    /// Print the accelerator queries.
    Status,

    /// Print the target architecture and vector operation demos.
    Vxe,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Run(args) => commands::run::execute(cli.config.as_deref(), args),
        Commands::Status => commands::status::execute(cli.config.as_deref()),
        Commands::Vxe => commands::vxe::execute(),
    }
}
