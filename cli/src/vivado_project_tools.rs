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


//! `vivado-project-tools`: creates and updates the Vivado project of an exported LabVIEW FPGA
//! target, unpacks its dependency archives, migrates CLIPs and generates target support files.
//!
//! Works on the current directory. See [`lvfpga::project`] for the expected layout.

use clap::{Parser, Subcommand};
use log::{debug, error, info};
use lvfpga::clip::migrate_clip_handler;
use lvfpga::error::LvfpgaError;
use lvfpga::project::{ProjectLayout, create_project_handler, deps::extract_deps};
use lvfpga::target_support::gen_lv_target_support_handler;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vivado-project-tools")]
#[command(bin_name = "vivado-project-tools")]
#[command(about = "Vivado project tools for LabVIEW FPGA targets", version)]
struct Cli {
    #[arg(
        long = "xilinx",
        env = "XILINX",
        help = r#"Vivado installation root.
Without it the project scripts are generated but Vivado is not run.
        "#
    )]
    xilinx: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the project scripts and create or update the Vivado project
    #[command(name = "create_project")]
    CreateProject {
        /// Create a new project even if one already exists
        #[arg(short = 'o', long = "overwrite")]
        overwrite: bool,
        /// Refresh the file set of the existing project
        #[arg(short = 'u', long = "updatefiles")]
        updatefiles: bool,
    },
    /// Recreate githubdeps/ from the .zip archives in the current directory
    #[command(name = "extract_deps")]
    ExtractDeps,
    /// Turn the CLIP named in [CLIPMigrationSettings] into a signal CSV, an instantiation
    /// example and updated constraints
    #[command(name = "migrate_clip")]
    MigrateClip,
    /// Generate the BoardIO, clock, Window and target files named in [LVFPGATargetSettings]
    #[command(name = "gen_lv_target_support")]
    GenLvTargetSupport,
}

fn run(cli: Cli) -> Result<i32, LvfpgaError> {
    let project_dir = std::env::current_dir().map_err(|e| {
        LvfpgaError::Internal(format!("Cannot determine the working directory: {e}"))
    })?;
    match cli.command {
        Commands::CreateProject {
            overwrite,
            updatefiles,
        } => {
            let layout = ProjectLayout::new(project_dir);
            let outcome =
                create_project_handler(&layout, overwrite, updatefiles, cli.xilinx.as_deref())?;
            Ok(outcome.exit_code())
        }
        Commands::ExtractDeps => {
            let extracted = extract_deps(&project_dir)?;
            info!("{extracted} dependency entries available");
            Ok(0)
        }
        Commands::MigrateClip => {
            let signals = migrate_clip_handler(&project_dir)?;
            info!("{} CLIP signals migrated", signals.len());
            Ok(0)
        }
        Commands::GenLvTargetSupport => {
            gen_lv_target_support_handler(&project_dir)?;
            Ok(0)
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    debug!("parsed cli command with {cli:?}");
    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            1
        }
    };
    std::process::exit(code);
}
