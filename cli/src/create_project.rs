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


//! `create-project`: hands every argument to `vivado-project-tools create_project`.
//!
//! The project tool is looked up in the directory this executable resolves to, so both can be
//! installed together anywhere. Arguments are passed on untouched and the tool's exit code is
//! returned as is.

use clap::Parser;
use log::debug;
use lvfpga::forwarder::Forwarder;
use lvfpga::process::own_dir;
use std::ffi::OsString;

#[derive(Parser, Debug)]
#[command(name = "create-project")]
#[command(bin_name = "create-project")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Arguments for `vivado-project-tools create_project`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<OsString>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    debug!("parsed cli command with {cli:?}");

    let code = match own_dir().and_then(|dir| Forwarder::create_project(&dir).forward(cli.args)) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            1
        }
    };
    std::process::exit(code);
}
