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

//! Collecting the source files of a Vivado project.
//!
//! A project names one or more file lists. Each list holds one entry per line: a source file, or
//! a directory whose design files are picked up recursively. The collected files are checked for
//! clashing base names, and files from downloaded dependencies (`githubdeps`) are copied into
//! the project tree so Vivado never references the download location.

use crate::error::LvfpgaError;
use crate::system_io::{fs_copy, fs_create_dir, fs_read, fs_remove_file, fs_write};
use log::{debug, info, trace};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions picked up when a file list entry names a directory.
pub static DESIGN_FILE_EXTENSIONS: &[&str] = &["vhd", "v", "sv", "xdc", "edf", "dcp", "xci"];

/// Folder name marking files that come from extracted dependency archives.
pub static DEPENDENCY_MARKER: &str = "githubdeps";

fn is_design_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DESIGN_FILE_EXTENSIONS.contains(&ext))
}

fn collect_design_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), LvfpgaError> {
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| LvfpgaError::IOReadDir {
            dir: dir.into(),
            e: e.into(),
        })?;
        if entry.file_type().is_file() && is_design_file(entry.path()) {
            trace!("Picked up {:?}", entry.path());
            out.push(entry.into_path());
        }
    }
    Ok(())
}

/// Read every file list and return the files they name, in list order.
///
/// Relative entries are resolved against `project_dir`.
///
/// # Returns: `Result<Vec<PathBuf>, LvfpgaError>`
/// * `Ok(Vec<PathBuf>)` - All files named by the lists
/// * `Err(LvfpgaError::FileListMissing)` - A list does not exist
pub fn gather_files(file_lists: &[PathBuf], project_dir: &Path) -> Result<Vec<PathBuf>, LvfpgaError> {
    let mut files = Vec::new();
    for list in file_lists {
        if !list.is_file() {
            return Err(LvfpgaError::FileListMissing(list.clone()));
        }
        debug!("Reading file list {list:?}");
        for line in fs_read(list)?.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let entry = project_dir.join(line);
            if entry.is_dir() {
                info!("Directory found: {line}");
                collect_design_files(&entry, &mut files)?;
            } else {
                files.push(entry);
            }
        }
    }
    Ok(files)
}

/// Group `files` by base name, keeping only names that occur more than once.
pub fn find_duplicates(files: &[PathBuf]) -> BTreeMap<String, Vec<PathBuf>> {
    let mut by_name: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for file in files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        by_name.entry(name).or_default().push(file.clone());
    }
    by_name.retain(|_, paths| paths.len() > 1);
    by_name
}

/// Fail when two files share a base name, writing the clashes to `log_path`.
///
/// A log left over from an earlier run is always removed first.
pub fn check_duplicates(files: &[PathBuf], log_path: &Path) -> Result<(), LvfpgaError> {
    if log_path.exists() {
        fs_remove_file(log_path)?;
    }
    let duplicates = find_duplicates(files);
    if duplicates.is_empty() {
        return Ok(());
    }

    let mut report = String::new();
    for (name, paths) in &duplicates {
        let _ = writeln!(report, "Duplicate file: {name}");
        for path in paths {
            let _ = writeln!(report, "  {}", path.display());
        }
        report.push('\n');
    }
    fs_write(log_path, report)?;
    Err(LvfpgaError::DuplicateFiles {
        log: log_path.into(),
    })
}

fn is_dependency(file: &Path, project_dir: &Path) -> bool {
    file.strip_prefix(project_dir)
        .unwrap_or(file)
        .components()
        .any(|component| component.as_os_str() == DEPENDENCY_MARKER)
}

/// Copy dependency files into `target_dir` and return the list with those files replaced by
/// their copies.
///
/// A file is a dependency when a folder named [`DEPENDENCY_MARKER`] appears in its path below
/// `project_dir`. Folders above the project directory are not looked at.
pub fn gather_dependencies(
    files: Vec<PathBuf>,
    project_dir: &Path,
    target_dir: &Path,
) -> Result<Vec<PathBuf>, LvfpgaError> {
    fs_create_dir(target_dir)?;
    files
        .into_iter()
        .map(|file| {
            if !is_dependency(&file, project_dir) {
                return Ok(file);
            }
            let Some(name) = file.file_name() else {
                return Err(LvfpgaError::Argument(format!(
                    "Dependency {file:?} has no file name"
                )));
            };
            let target = target_dir.join(name);
            fs_copy(&file, &target)?;
            Ok(target)
        })
        .collect()
}
