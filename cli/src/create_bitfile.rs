// This file is part of lvfpga-tools, a set of launchers and project tools for the LabVIEW FPGA and Vivado toolchains.
//
// Copyright 2025 Canonical Ltd.
//
// SPDX-License-Identifier: GPL-3.0-only
//
// lvfpga-tools is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License version 3, as published by the Free Software Foundation.
//
// lvfpga-tools is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranties of MERCHANTABILITY, SATISFACTORY QUALITY, or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with this program.  If not, see http://www.gnu.org/licenses/.


//! `create-bitfile`: converts the Vivado bitstream into a LabVIEW FPGA bitfile.
//!
//! Run from the implementation directory holding `toplevel.bin`. The converter and its
//! environment come from the `environment.ini` installed beside this executable. The launcher
//! takes no arguments.

use clap::Parser;
use log::debug;
use lvfpga::error::LvfpgaError;
use lvfpga::launcher::{BitfileLauncher, LaunchOutcome, tool_failure_diagnostic};
use lvfpga::process::own_dir;

#[derive(Parser, Debug)]
#[command(name = "create-bitfile")]
#[command(bin_name = "create-bitfile")]
#[command(about = "Create a LabVIEW FPGA bitfile from the bitstream in the current directory")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {}

fn run() -> Result<LaunchOutcome, LvfpgaError> {
    let launcher_dir = own_dir()?;
    let working_dir = std::env::current_dir().map_err(|e| {
        LvfpgaError::Internal(format!("Cannot determine the working directory: {e}"))
    })?;
    let launcher = BitfileLauncher::new(&launcher_dir, &working_dir);
    debug!("launch paths {:?}", launcher.paths());

    let outcome = launcher.run()?;
    if let LaunchOutcome::ToolFailed { .. } = outcome {
        eprintln!("{}", tool_failure_diagnostic(&launcher.paths().config));
    }
    Ok(outcome)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    debug!("parsed cli command with {cli:?}");
    let code = match run() {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("{e}");
            1
        }
    };
    std::process::exit(code);
}
