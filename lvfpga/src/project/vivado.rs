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

use crate::process::ToolInvocation;
use crate::project::{ProjectLayout, ProjectMode};
use std::path::{Path, PathBuf};

/// The Vivado launcher below an installation root (the `XILINX` variable).
pub fn vivado_executable(install_root: &Path) -> PathBuf {
    let bin = install_root.join("bin");
    if cfg!(windows) {
        bin.join("vivado.bat")
    } else {
        bin.join("vivado")
    }
}

/// Batch-mode Vivado run for `mode`, executed inside the project's Vivado directory.
pub fn vivado_invocation(
    install_root: &Path,
    layout: &ProjectLayout,
    project_name: &str,
    mode: ProjectMode,
) -> ToolInvocation {
    let invocation = ToolInvocation::new(vivado_executable(install_root))
        .working_dir(layout.vivado_project_dir());
    match mode {
        ProjectMode::New => invocation
            .args(["-mode", "batch", "-source"])
            .arg(layout.new_project_script()),
        ProjectMode::Update => invocation
            .arg(format!("{project_name}.xpr"))
            .args(["-mode", "batch", "-source"])
            .arg(layout.update_project_script()),
    }
}
