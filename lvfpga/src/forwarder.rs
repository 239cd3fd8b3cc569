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

use crate::error::LvfpgaError;
use crate::process::{NOT_FOUND_EXIT_CODE, ToolInvocation, exit_code, is_not_found};
use log::{debug, error};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Executable name of the project tool the forwarder hands off to.
pub static PROJECT_TOOL_NAME: &str = "vivado-project-tools";

/// Subcommand the forwarder puts in front of the caller's arguments.
pub static CREATE_PROJECT_SUBCOMMAND: &str = "create_project";

/// Pass-through to another executable. Arguments are neither validated nor interpreted.
#[derive(Debug, Clone)]
pub struct Forwarder {
    program: PathBuf,
    leading_args: Vec<OsString>,
}

impl Forwarder {
    pub fn new(program: impl Into<PathBuf>) -> Forwarder {
        Forwarder {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// The project tool next to `dir`, preset to its `create_project` subcommand.
    pub fn create_project(dir: &Path) -> Forwarder {
        let mut forwarder = Forwarder::new(crate::process::sibling_executable(
            dir,
            PROJECT_TOOL_NAME,
        ));
        forwarder.leading_args.push(CREATE_PROJECT_SUBCOMMAND.into());
        forwarder
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn invocation<I, S>(&self, args: I) -> ToolInvocation
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        ToolInvocation::new(&self.program)
            .args(self.leading_args.iter().cloned())
            .args(args)
    }

    /// Run the target with `args` appended and return the exit code it reported.
    ///
    /// A target that could not be started is reported as 127 if it does not exist and as an
    /// error otherwise.
    pub fn forward<I, S>(&self, args: I) -> Result<i32, LvfpgaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let invocation = self.invocation(args);
        debug!("Forwarding to {}", invocation.command_line());
        match invocation.status() {
            Ok(status) => Ok(exit_code(&status)),
            Err(e) if is_not_found(&e) => {
                error!("{e}");
                Ok(NOT_FOUND_EXIT_CODE)
            }
            Err(e) => Err(e),
        }
    }
}
