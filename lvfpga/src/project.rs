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

//! Vivado project creation and update.
//!
//! The project tool works on a project directory laid out as:
//!
//! ```text
//! <project>/
//! ├── vivadoprojectsettings.ini
//! ├── TCL/
//! │   ├── CreateNewProjectTemplate.tcl
//! │   └── UpdateProjectFilesTemplate.tcl
//! ├── objects/                   (generated)
//! │   ├── TCL/CreateNewProject.tcl
//! │   ├── TCL/UpdateProjectFiles.tcl
//! │   └── gathereddeps/
//! ├── duplicate_files.log        (only when base names clash)
//! └── VivadoProject/<name>.xpr   (written by Vivado)
//! ```
//!
//! [`create_project`] gathers the sources, renders both TCL scripts and, when an installation
//! is known, runs Vivado in batch mode on the script matching the [`ProjectMode`].

pub mod deps;
pub mod files;
pub mod tcl;
pub mod vivado;

use crate::config::PROJECT_SETTINGS_FILE_NAME;
use crate::config::project_settings::ProjectSettings;
use crate::error::LvfpgaError;
use crate::process::exit_code;
use crate::system_io::fs_create_dir;
use log::{error, info, warn};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectMode {
    /// Create the project from scratch
    New,
    /// Refresh the file set of an existing project
    Update,
}

/// Pick the mode from the command line flags and whether the project already exists.
pub fn select_mode(
    overwrite: bool,
    update_files: bool,
    project_file: &Path,
) -> Result<ProjectMode, LvfpgaError> {
    match (overwrite, update_files) {
        (false, false) if project_file.exists() => {
            Err(LvfpgaError::ProjectExists(project_file.into()))
        }
        (false, false) => Ok(ProjectMode::New),
        (false, true) if !project_file.exists() => {
            Err(LvfpgaError::ProjectMissing(project_file.into()))
        }
        (false, true) => Ok(ProjectMode::Update),
        (true, false) => Ok(ProjectMode::New),
        (true, true) => Err(LvfpgaError::Argument(
            "--overwrite and --updatefiles cannot be combined".to_string(),
        )),
    }
}

/// Locations inside a project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> ProjectLayout {
        ProjectLayout { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join(PROJECT_SETTINGS_FILE_NAME)
    }

    pub fn tcl_dir(&self) -> PathBuf {
        self.root.join("TCL")
    }

    pub fn new_project_template(&self) -> PathBuf {
        self.tcl_dir().join("CreateNewProjectTemplate.tcl")
    }

    pub fn update_project_template(&self) -> PathBuf {
        self.tcl_dir().join("UpdateProjectFilesTemplate.tcl")
    }

    pub fn new_project_script(&self) -> PathBuf {
        self.root.join("objects/TCL/CreateNewProject.tcl")
    }

    pub fn update_project_script(&self) -> PathBuf {
        self.root.join("objects/TCL/UpdateProjectFiles.tcl")
    }

    pub fn gathered_deps_dir(&self) -> PathBuf {
        self.root.join("objects/gathereddeps")
    }

    pub fn duplicates_log(&self) -> PathBuf {
        self.root.join("duplicate_files.log")
    }

    pub fn vivado_project_dir(&self) -> PathBuf {
        self.root.join("VivadoProject")
    }

    pub fn project_file(&self, project_name: &str) -> PathBuf {
        self.vivado_project_dir().join(format!("{project_name}.xpr"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectOutcome {
    /// Scripts were generated but no Vivado installation was given.
    ScriptsOnly,
    /// Vivado ran and exited with `exit_code`.
    VivadoFinished { exit_code: i32 },
}

impl ProjectOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            ProjectOutcome::ScriptsOnly => 0,
            ProjectOutcome::VivadoFinished { exit_code } => *exit_code,
        }
    }
}

/// Sorted list of project sources with dependencies relocated into the project tree.
pub fn project_files(
    settings: &ProjectSettings,
    layout: &ProjectLayout,
) -> Result<Vec<PathBuf>, LvfpgaError> {
    let gathered = files::gather_files(&settings.file_lists, layout.root())?;
    files::check_duplicates(&gathered, &layout.duplicates_log())?;
    let mut relocated = files::gather_dependencies(
        gathered,
        layout.root(),
        &layout.gathered_deps_dir(),
    )?;
    relocated.sort();
    Ok(relocated)
}

/// Render both project scripts. The file set is the same for both.
pub fn generate_scripts(
    settings: &ProjectSettings,
    layout: &ProjectLayout,
) -> Result<(), LvfpgaError> {
    let project_files = project_files(settings, layout)?;
    let add_files = tcl::add_files_text(&project_files, &layout.tcl_dir());
    for (template, script) in [
        (layout.new_project_template(), layout.new_project_script()),
        (layout.update_project_template(), layout.update_project_script()),
    ] {
        tcl::render_template_file(
            &template,
            &script,
            &add_files,
            &settings.project_name,
            &settings.top_level_entity,
        )?;
        info!("Generated {script:?}");
    }
    Ok(())
}

/// Generate the project scripts and, if `vivado_root` is set, run Vivado for `mode`.
pub fn create_project(
    settings: &ProjectSettings,
    layout: &ProjectLayout,
    mode: ProjectMode,
    vivado_root: Option<&Path>,
) -> Result<ProjectOutcome, LvfpgaError> {
    generate_scripts(settings, layout)?;
    fs_create_dir(&layout.vivado_project_dir())?;

    let Some(root) = vivado_root else {
        warn!("Environment variable 'XILINX' is not set.");
        return Ok(ProjectOutcome::ScriptsOnly);
    };
    let invocation = vivado::vivado_invocation(root, layout, &settings.project_name, mode);
    let status = invocation.status()?;
    if !status.success() {
        error!("Error running command: {}", invocation.command_line());
    }
    Ok(ProjectOutcome::VivadoFinished {
        exit_code: exit_code(&status),
    })
}

/// Load the settings from `layout`, pick the mode from the flags and run [`create_project`].
pub fn create_project_handler(
    layout: &ProjectLayout,
    overwrite: bool,
    update_files: bool,
    vivado_root: Option<&Path>,
) -> Result<ProjectOutcome, LvfpgaError> {
    let settings = ProjectSettings::from_file(&layout.settings_file(), layout.root())?;
    let project_file = layout.project_file(&settings.project_name);
    info!("Project file path: {project_file:?}");
    let mode = select_mode(overwrite, update_files, &project_file)?;
    create_project(&settings, layout, mode, vivado_root)
}
