// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared CLI plumbing.

pub mod run;
pub mod status;
pub mod vxe;

use harness::HarnessConfig;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Installs the global `fmt` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows the `-v` count.
/// Logs go to stderr so stdout carries only the verification report.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .init();
}

/// Loads the config file if one was given, else the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<HarnessConfig> {
    let config = match path {
        Some(path) => {
            tracing::info!("loading config from {}", path.display());
            HarnessConfig::from_file(path)?
        }
        None => HarnessConfig::default(),
    };
    Ok(config)
}
