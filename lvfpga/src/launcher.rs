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

//! Bitfile conversion launcher.
//!
//! The build specification drops an `environment.ini` next to the launcher. The launcher reads
//! it, takes the converter executable from `createBitfileExePath` and runs it with three
//! positional arguments, always in this order:
//!
//! 1. the bitfile template, beside the launcher
//! 2. the code generation results log, beside the launcher
//! 3. the bitstream produced by Vivado, in the current working directory
//!
//! All bindings from `environment.ini` are passed to the converter's environment. The launcher's
//! own environment is left untouched.
//!
//! # Examples
//!
//! ```rust,no_run
//! # use lvfpga::launcher::BitfileLauncher;
//! # use std::path::Path;
//! # fn example() -> Result<(), lvfpga::error::LvfpgaError> {
//! let launcher = BitfileLauncher::new(Path::new("/opt/export"), Path::new("/work/impl_1"));
//! let outcome = launcher.run()?;
//! std::process::exit(outcome.exit_code());
//! # }
//! ```

use crate::config::environment::EnvironmentConfig;
use crate::config::{CREATE_BITFILE_EXE_KEY, ENVIRONMENT_FILE_NAME};
use crate::error::LvfpgaError;
use crate::process::ToolInvocation;
use log::{error, info, warn};
use std::path::{Path, PathBuf};

/// Bitfile template shipped beside the launcher.
pub static BITFILE_TEMPLATE_FILE_NAME: &str = "BitfileTemplate.lvbitx";

/// Code generation results written beside the launcher by the LabVIEW export.
pub static CODE_GENERATION_LOG_FILE_NAME: &str = "CodeGenerationResults.lvtxt";

/// Bitstream written by Vivado into the directory the launcher is run from.
pub static BITSTREAM_FILE_NAME: &str = "toplevel.bin";

/// The paths one launcher run works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPaths {
    pub config: PathBuf,
    pub template: PathBuf,
    pub code_generation_log: PathBuf,
    pub bitstream: PathBuf,
}

impl LaunchPaths {
    pub fn new(launcher_dir: &Path, working_dir: &Path) -> LaunchPaths {
        LaunchPaths {
            config: launcher_dir.join(ENVIRONMENT_FILE_NAME),
            template: launcher_dir.join(BITFILE_TEMPLATE_FILE_NAME),
            code_generation_log: launcher_dir.join(CODE_GENERATION_LOG_FILE_NAME),
            bitstream: working_dir.join(BITSTREAM_FILE_NAME),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    BitfileCreated,
    /// The converter was missing, could not be started or returned non-zero. `exit_code` is
    /// `None` when there was no exit code to report.
    ToolFailed { exit_code: Option<i32> },
}

impl LaunchOutcome {
    /// Exit code of the launcher process.
    ///
    /// A failed conversion is reported but does not fail the launcher: callers that chain on the
    /// launcher's status have always seen 0 here, and the converter's failure is left to the
    /// diagnostic.
    pub fn exit_code(&self) -> i32 {
        0
    }
}

/// Text shown to the operator when the converter fails.
pub fn tool_failure_diagnostic(config_path: &Path) -> String {
    format!(
        "Error: Failed to create the bitfile. Verify that {CREATE_BITFILE_EXE_KEY} in {} points \
        to a valid installation.",
        config_path.display()
    )
}

#[derive(Debug, Clone)]
pub struct BitfileLauncher {
    paths: LaunchPaths,
}

impl BitfileLauncher {
    pub fn new(launcher_dir: &Path, working_dir: &Path) -> BitfileLauncher {
        BitfileLauncher {
            paths: LaunchPaths::new(launcher_dir, working_dir),
        }
    }

    pub fn paths(&self) -> &LaunchPaths {
        &self.paths
    }

    pub fn load_config(&self) -> Result<EnvironmentConfig, LvfpgaError> {
        EnvironmentConfig::from_file(&self.paths.config)
    }

    /// The converter command line for `config`, or `None` when no converter is configured.
    pub fn invocation(&self, config: &EnvironmentConfig) -> Option<ToolInvocation> {
        let exe = config.create_bitfile_exe()?;
        let invocation = config
            .bindings()
            .fold(ToolInvocation::new(exe), |inv, (key, value)| {
                inv.env(key, value)
            })
            .arg(&self.paths.template)
            .arg(&self.paths.code_generation_log)
            .arg(&self.paths.bitstream);
        Some(invocation)
    }

    /// Load the configuration and run the converter.
    ///
    /// # Returns: `Result<LaunchOutcome, LvfpgaError>`
    /// * `Ok(LaunchOutcome::BitfileCreated)` - The converter exited 0
    /// * `Ok(LaunchOutcome::ToolFailed)` - The converter is unset, could not start, or failed
    /// * `Err(LvfpgaError::ConfigurationMissing)` - No `environment.ini`; nothing was started
    /// * `Err(LvfpgaError::IORead)` - `environment.ini` exists but could not be read
    pub fn run(&self) -> Result<LaunchOutcome, LvfpgaError> {
        let config = self.load_config()?;
        let Some(invocation) = self.invocation(&config) else {
            warn!(
                "{CREATE_BITFILE_EXE_KEY} is not set in {:?}",
                config.source()
            );
            return Ok(LaunchOutcome::ToolFailed { exit_code: None });
        };

        info!("Creating bitfile {:?}", self.paths.bitstream);
        match invocation.status() {
            Ok(status) if status.success() => {
                info!("Bitfile conversion finished");
                Ok(LaunchOutcome::BitfileCreated)
            }
            Ok(status) => {
                error!("{} failed with {status}", invocation.command_line());
                Ok(LaunchOutcome::ToolFailed {
                    exit_code: status.code(),
                })
            }
            Err(e) => {
                error!("{e}");
                Ok(LaunchOutcome::ToolFailed { exit_code: None })
            }
        }
    }
}
