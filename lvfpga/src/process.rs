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

//! Synchronous invocation of external toolchain executables.
//!
//! Every external program (bitfile converter, project tool, Vivado) is described by a
//! [`ToolInvocation`] and run to completion with inherited stdio, so the tool's own console
//! output reaches the operator unchanged.

use crate::error::LvfpgaError;
use log::{debug, trace};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Exit code used when the program could not be started at all, as a POSIX shell reports
/// "command not found".
pub const NOT_FOUND_EXIT_CODE: i32 = 127;

/// Exit code reported for a child that terminated without one (killed by a signal).
pub const NO_EXIT_CODE: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub working_dir: Option<PathBuf>,
    pub env: Vec<(OsString, OsString)>,
}

impl ToolInvocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        ToolInvocation {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Render the invocation the way an operator would type it. Only used for logging.
    pub fn command_line(&self) -> String {
        let mut line = quote_for_display(&self.program.to_string_lossy());
        for arg in &self.args {
            line.push(' ');
            line.push_str(&quote_for_display(&arg.to_string_lossy()));
        }
        line
    }

    /// Run the program to completion and return its exit status.
    ///
    /// # Returns: `Result<ExitStatus, LvfpgaError>`
    /// * `Ok(ExitStatus)` - The program ran; success or failure is up to the caller
    /// * `Err(LvfpgaError::Spawn)` - The program could not be started
    pub fn status(&self) -> Result<ExitStatus, LvfpgaError> {
        debug!("Running {}", self.command_line());
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.working_dir {
            trace!("Working directory {dir:?}");
            command.current_dir(dir);
        }
        for (key, value) in &self.env {
            trace!("Binding {key:?}={value:?} for the child process");
            command.env(key, value);
        }
        let status = command.status().map_err(|e| LvfpgaError::Spawn {
            program: self.program.clone(),
            e,
        })?;
        trace!("{:?} finished with {status}", self.program);
        Ok(status)
    }
}

fn quote_for_display(text: &str) -> String {
    if text.contains(' ') {
        format!("\"{text}\"")
    } else {
        text.to_string()
    }
}

/// Map an exit status onto the code this process should exit with.
pub fn exit_code(status: &ExitStatus) -> i32 {
    status.code().unwrap_or(NO_EXIT_CODE)
}

/// Whether a spawn failure means the program does not exist.
pub fn is_not_found(err: &LvfpgaError) -> bool {
    matches!(err, LvfpgaError::Spawn { e, .. } if e.kind() == std::io::ErrorKind::NotFound)
}

/// `program` joined to `dir`, with the platform executable suffix.
pub fn sibling_executable(dir: &Path, program: &str) -> PathBuf {
    dir.join(format!("{program}{}", std::env::consts::EXE_SUFFIX))
}

/// Canonical directory of the running executable.
pub fn own_dir() -> Result<PathBuf, LvfpgaError> {
    let exe = std::env::current_exe()
        .map_err(|e| LvfpgaError::Internal(format!("Cannot locate the running executable: {e}")))?;
    let exe = exe.canonicalize().map_err(|e| LvfpgaError::IORead {
        file: exe.clone(),
        e,
    })?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        LvfpgaError::Internal(format!("Executable {exe:?} has no parent directory"))
    })
}
