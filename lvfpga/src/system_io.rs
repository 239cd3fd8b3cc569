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

//! Error Wrapping File System I/O Helpers
//!
//! This module provides wrappers around standard Rust file system operations, with automatic
//! conversion to `LvfpgaError` types. All functions include trace logging and report the path
//! and operation that failed.
//!
//! Includes: read, write, copy, and directory operations.
//!
//! # Examples
//!
//! ```rust,no_run
//! # use lvfpga::system_io::{fs_read, fs_write};
//! # use std::path::Path;
//!
//! # fn example() -> Result<(), lvfpga::error::LvfpgaError> {
//! let template = fs_read(Path::new("TCL/CreateNewProjectTemplate.tcl"))?;
//! fs_write(Path::new("objects/TCL/CreateNewProject.tcl"), template)?;
//! # Ok(())
//! # }
//! ```

use crate::error::LvfpgaError;
use log::trace;
use std::fs::OpenOptions;
use std::fs::{create_dir_all, remove_dir_all, remove_file};
use std::io::{Read, Write};
use std::path::Path;

/// Read the contents of a file to a String.
///
/// # Arguments
///
/// * `file_path` - Path to the file to read
///
/// # Returns: `Result<String, LvfpgaError>`
/// * `Ok(String)` - The complete contents of the file
/// * `Err(LvfpgaError::IORead)` - If the file cannot be read (doesn't exist, permissions, etc.)
pub fn fs_read(file_path: &Path) -> Result<String, LvfpgaError> {
    trace!("Attempting to read from {file_path:?}");
    let mut buf: String = String::new();
    let result = OpenOptions::new()
        .read(true)
        .open(file_path)
        .and_then(|mut f| f.read_to_string(&mut buf));

    match result {
        Ok(_) => {
            trace!("Reading done");
            Ok(buf)
        }
        Err(e) => Err(LvfpgaError::IORead {
            file: file_path.into(),
            e,
        }),
    }
}

/// Write a string value to a file, creating it if needed and truncating any old content.
///
/// Parent directories are not created; use [`fs_create_dir`] first when the destination may be
/// new.
///
/// # Arguments
///
/// * `file_path` - Path to the file to write
/// * `value` - The string value to write (implements `AsRef<str>`)
///
/// # Returns: `Result<(), LvfpgaError>`
/// * `Ok(())` - Write succeeded
/// * `Err(LvfpgaError::IOWrite)` - If the write fails
pub fn fs_write(file_path: &Path, value: impl AsRef<str>) -> Result<(), LvfpgaError> {
    trace!(
        "Attempting to write {} bytes to {:?}",
        value.as_ref().len(),
        file_path
    );
    let result = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(file_path)
        .and_then(|mut f| f.write_all(value.as_ref().as_bytes()));
    match result {
        Ok(_) => {
            trace!("Write done.");
            Ok(())
        }
        Err(e) => Err(LvfpgaError::IOWrite {
            file: file_path.into(),
            e,
        }),
    }
}

/// Recursively create directories up to the specified path.
///
/// # Returns: `Result<(), LvfpgaError>`
/// * `Ok(())` - Directory created (or already existed)
/// * `Err(LvfpgaError::IOCreate)` - If directory creation fails (permissions, etc.)
pub fn fs_create_dir(path: &Path) -> Result<(), LvfpgaError> {
    trace!("Attempting to Create '{path:?}'");
    let result = create_dir_all(path);
    match result {
        Ok(_) => {
            trace!("Directory created at {path:?}.");
            Ok(())
        }
        Err(e) => Err(LvfpgaError::IOCreate {
            file: path.into(),
            e,
        }),
    }
}

/// Create the parent directory of `file_path` if it has one.
pub fn fs_create_parent_dir(file_path: &Path) -> Result<(), LvfpgaError> {
    match file_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs_create_dir(parent),
        _ => Ok(()),
    }
}

/// Remove a single file.
///
/// # Returns: `Result<(), LvfpgaError>`
/// * `Ok(())` - File removed
/// * `Err(LvfpgaError::IODelete)` - If removal fails (doesn't exist, permissions, etc.)
pub fn fs_remove_file(path: &Path) -> Result<(), LvfpgaError> {
    trace!("Attempting to delete '{path:?}'");
    match remove_file(path) {
        Ok(_) => {
            trace!("Deleted {path:?}");
            Ok(())
        }
        Err(e) => Err(LvfpgaError::IODelete {
            file: path.into(),
            e,
        }),
    }
}

/// Remove a directory and everything below it.
///
/// # Returns: `Result<(), LvfpgaError>`
/// * `Ok(())` - Directory tree removed
/// * `Err(LvfpgaError::IODelete)` - If removal fails (doesn't exist, permissions, etc.)
pub fn fs_remove_dir_all(path: &Path) -> Result<(), LvfpgaError> {
    trace!("Attempting to delete tree '{path:?}'");
    match remove_dir_all(path) {
        Ok(_) => {
            trace!("Deleted {path:?}");
            Ok(())
        }
        Err(e) => Err(LvfpgaError::IODelete {
            file: path.into(),
            e,
        }),
    }
}

/// Copy a file, overwriting the destination.
///
/// A destination left read-only by an earlier copy is made writable first so that repeated
/// runs can refresh it.
///
/// # Returns: `Result<(), LvfpgaError>`
/// * `Ok(())` - File copied
/// * `Err(LvfpgaError::IOCopy)` - If the copy or the permission change fails
pub fn fs_copy(from: &Path, to: &Path) -> Result<(), LvfpgaError> {
    trace!("Attempting to copy {from:?} to {to:?}");
    let copy_err = |e| LvfpgaError::IOCopy {
        from: from.into(),
        to: to.into(),
        e,
    };
    if let Ok(metadata) = to.metadata() {
        let mut permissions = metadata.permissions();
        if permissions.readonly() {
            permissions.set_readonly(false);
            std::fs::set_permissions(to, permissions).map_err(copy_err)?;
        }
    }
    std::fs::copy(from, to).map_err(copy_err)?;
    trace!("Copy done.");
    Ok(())
}

/// Read the contents of a directory and return entry names.
///
/// Entries that cannot be read are silently skipped. Names are returned in the order the
/// operating system yields them.
///
/// # Returns: `Result<Vec<String>, LvfpgaError>`
/// * `Ok(Vec<String>)` - List of entry names in the directory (files and subdirectories)
/// * `Err(LvfpgaError::IOReadDir)` - If the directory cannot be read
pub fn fs_read_dir(dir: &Path) -> Result<Vec<String>, LvfpgaError> {
    trace!("Attempting to read directory '{dir:?}'");
    std::fs::read_dir(dir).map_or_else(
        |e| {
            Err(LvfpgaError::IOReadDir {
                dir: dir.to_owned(),
                e,
            })
        },
        |iter| {
            let ret = iter
                .filter_map(Result::ok)
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect();
            trace!("Dir reading done.");
            Ok(ret)
        },
    )
}
