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

//! Unpacking dependency archives.
//!
//! Dependencies arrive as `.zip` files in the project directory. [`extract_deps`] wipes the
//! dependency folder and unpacks every archive into it. A bad archive is logged and skipped so
//! the remaining ones still land.

use crate::error::LvfpgaError;
use crate::system_io::{fs_create_dir, fs_read_dir, fs_remove_dir_all};
use log::{error, info, warn};
use std::fs::File;
use std::path::Path;

/// Folder, relative to the project directory, the archives are extracted into.
pub static DEPS_FOLDER_NAME: &str = "githubdeps";

fn extract_archive(archive_path: &Path, dest_dir: &Path) -> Result<(), LvfpgaError> {
    let file = File::open(archive_path).map_err(|e| LvfpgaError::IORead {
        file: archive_path.into(),
        e,
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| LvfpgaError::Archive {
        archive: archive_path.into(),
        e,
    })?;
    archive.extract(dest_dir).map_err(|e| LvfpgaError::Archive {
        archive: archive_path.into(),
        e,
    })
}

/// Recreate `project_dir/githubdeps` from the `.zip` files in `project_dir`.
///
/// # Returns: `Result<usize, LvfpgaError>`
/// * `Ok(usize)` - Number of top level entries in the dependency folder afterwards
/// * `Err(LvfpgaError)` - The folder could not be recreated or listed
pub fn extract_deps(project_dir: &Path) -> Result<usize, LvfpgaError> {
    let deps_dir = project_dir.join(DEPS_FOLDER_NAME);
    info!("Cleaning target directory: {deps_dir:?}");
    if deps_dir.exists() {
        if let Err(e) = fs_remove_dir_all(&deps_dir) {
            warn!("{e}");
        }
    }
    fs_create_dir(&deps_dir)?;

    let mut archives: Vec<String> = fs_read_dir(project_dir)?
        .into_iter()
        .filter(|name| name.ends_with(".zip"))
        .collect();
    archives.sort();

    for name in archives {
        let archive_path = project_dir.join(&name);
        info!("Extracting '{name}' into {deps_dir:?}...");
        match extract_archive(&archive_path, &deps_dir) {
            Ok(()) => info!("Successfully extracted '{name}'"),
            Err(e) => error!("{e}"),
        }
    }

    let extracted = fs_read_dir(&deps_dir)?.len();
    info!("Extracted {extracted} items to {deps_dir:?}");
    Ok(extracted)
}
