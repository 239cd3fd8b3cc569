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
use crate::system_io::{fs_create_parent_dir, fs_read, fs_write};
use log::trace;
use std::path::{Component, Path, PathBuf};

pub static ADD_FILES_PLACEHOLDER: &str = "ADD_FILES";
pub static PROJECT_NAME_PLACEHOLDER: &str = "PROJ_NAME";
pub static TOP_ENTITY_PLACEHOLDER: &str = "TOP_ENTITY";

/// `path` expressed relative to `base`. Both are normalised lexically; if they share no
/// common root (different drives) `path` is returned unchanged.
pub fn relative_path(path: &Path, base: &Path) -> PathBuf {
    let path = normalize(path);
    let base = normalize(base);
    let path_parts: Vec<Component> = path.components().collect();
    let base_parts: Vec<Component> = base.components().collect();

    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 && path.has_root() {
        return path;
    }

    let mut ret = PathBuf::new();
    for _ in common..base_parts.len() {
        ret.push("..");
    }
    for part in &path_parts[common..] {
        ret.push(part.as_os_str());
    }
    if ret.as_os_str().is_empty() {
        ret.push(".");
    }
    ret
}

fn normalize(path: &Path) -> PathBuf {
    let mut ret = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match ret.components().next_back() {
                Some(Component::Normal(_)) => {
                    ret.pop();
                }
                // `..` above the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => ret.push(".."),
            },
            other => ret.push(other.as_os_str()),
        }
    }
    ret
}

/// TCL lines adding `files` to a project, relative to `tcl_dir` where the script lives.
pub fn add_files_text(files: &[PathBuf], tcl_dir: &Path) -> String {
    files
        .iter()
        .map(|file| {
            let relative = relative_path(file, tcl_dir)
                .to_string_lossy()
                .replace('\\', "/");
            if relative.contains(' ') {
                format!("add_files {{\"{relative}\"}}")
            } else {
                format!("add_files {{{relative}}}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Substitute the project placeholders in `template`.
pub fn fill_template(template: &str, add_files: &str, project_name: &str, top_entity: &str) -> String {
    template
        .replace(ADD_FILES_PLACEHOLDER, add_files)
        .replace(PROJECT_NAME_PLACEHOLDER, project_name)
        .replace(TOP_ENTITY_PLACEHOLDER, top_entity)
}

/// Render the template at `template_path` into `output_path`, creating its directory.
pub fn render_template_file(
    template_path: &Path,
    output_path: &Path,
    add_files: &str,
    project_name: &str,
    top_entity: &str,
) -> Result<(), LvfpgaError> {
    trace!("Rendering {template_path:?} into {output_path:?}");
    let rendered = fill_template(&fs_read(template_path)?, add_files, project_name, top_entity);
    fs_create_parent_dir(output_path)?;
    fs_write(output_path, rendered)
}
