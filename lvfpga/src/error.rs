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

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LvfpgaError {
    #[error(
        "LvfpgaError::ConfigurationMissing: {file:?} was not found. \
        Rebuild the build specification to regenerate it."
    )]
    ConfigurationMissing { file: PathBuf },
    #[error(
        "LvfpgaError::SettingsMissing: {file:?} was not found. \
        Make sure it exists in the working directory."
    )]
    SettingsMissing { file: PathBuf },
    #[error("LvfpgaError::ConfigParse: {file:?}: {message}")]
    ConfigParse { file: PathBuf, message: String },
    #[error("LvfpgaError::MissingSetting: `{key}` in section [{section}] is missing from {file:?}")]
    MissingSetting {
        file: PathBuf,
        section: String,
        key: String,
    },
    #[error("LvfpgaError::FileListMissing: File list path {0:?} does not exist.")]
    FileListMissing(PathBuf),
    #[error("LvfpgaError::DuplicateFiles: Duplicate files found. Check {log:?} for details.")]
    DuplicateFiles { log: PathBuf },
    #[error(
        "LvfpgaError::ProjectExists: The project file {0:?} already exists. \
        Use the --overwrite or --updatefiles flag to modify the project."
    )]
    ProjectExists(PathBuf),
    #[error(
        "LvfpgaError::ProjectMissing: The project file {0:?} does not exist. \
        Run without the --updatefiles flag to create a new project."
    )]
    ProjectMissing(PathBuf),
    #[error("LvfpgaError::Argument: {0}")]
    Argument(String),
    #[error("LvfpgaError::Spawn: Failed to start {program:?}: {e}")]
    Spawn {
        program: PathBuf,
        e: std::io::Error,
    },
    #[error("LvfpgaError::Archive: Failed to extract {archive:?}: {e}")]
    Archive {
        archive: PathBuf,
        e: zip::result::ZipError,
    },
    #[error("LvfpgaError::Xml: {file:?}: {message}")]
    Xml { file: PathBuf, message: String },
    #[error("LvfpgaError::Csv: {file:?}: {e}")]
    Csv { file: PathBuf, e: csv::Error },
    #[error("LvfpgaError::Template: Failed to render {file:?}: {message}")]
    Template { file: PathBuf, message: String },
    #[error("LvfpgaError::Vhdl: {file:?}: {message}")]
    Vhdl { file: PathBuf, message: String },
    #[error("LvfpgaError::IORead: An IO error occurred when reading from {file:?}: {e}")]
    IORead { file: PathBuf, e: std::io::Error },
    #[error("LvfpgaError::IOWrite: An IO error occurred when writing to {file:?}: {e}")]
    IOWrite { file: PathBuf, e: std::io::Error },
    #[error("LvfpgaError::IOCreate: An IO error occurred when creating {file:?}: {e}")]
    IOCreate { file: PathBuf, e: std::io::Error },
    #[error("LvfpgaError::IODelete: An IO error occurred when deleting {file:?}: {e}")]
    IODelete { file: PathBuf, e: std::io::Error },
    #[error("LvfpgaError::IOReadDir: An IO error occurred when reading directory {dir:?}: {e}")]
    IOReadDir { dir: PathBuf, e: std::io::Error },
    #[error("LvfpgaError::IOCopy: An IO error occurred when copying {from:?} to {to:?}: {e}")]
    IOCopy {
        from: PathBuf,
        to: PathBuf,
        e: std::io::Error,
    },
    #[error("LvfpgaError::Internal: An Internal error occurred: {0}")]
    Internal(String),
}
