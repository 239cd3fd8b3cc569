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

use crate::config::CREATE_BITFILE_EXE_KEY;
use crate::config::ini::parse_assignments;
use crate::error::LvfpgaError;
use crate::system_io::fs_read;
use log::trace;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Bindings read from an `environment.ini`.
///
/// Loaded once per invocation and handed to the launcher by reference. The bindings are only
/// ever applied to the environment of the child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    source: PathBuf,
    bindings: BTreeMap<String, String>,
}

impl EnvironmentConfig {
    /// Build a config from file contents. Later assignments to the same key replace earlier ones.
    pub fn parse(text: &str, source: &Path) -> EnvironmentConfig {
        let mut bindings = BTreeMap::new();
        for (key, value) in parse_assignments(text) {
            if let Some(previous) = bindings.insert(key.clone(), value) {
                trace!("{key} reassigned, dropping previous value {previous:?}");
            }
        }
        EnvironmentConfig {
            source: source.into(),
            bindings,
        }
    }

    /// Read `file_path`, failing with `ConfigurationMissing` when it is not a file.
    pub fn from_file(file_path: &Path) -> Result<EnvironmentConfig, LvfpgaError> {
        if !file_path.is_file() {
            return Err(LvfpgaError::ConfigurationMissing {
                file: file_path.into(),
            });
        }
        let config = EnvironmentConfig::parse(&fs_read(file_path)?, file_path);
        trace!("Loaded {config:?}");
        Ok(config)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.bindings.get(key).map(String::as_str)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The bitfile conversion executable, if configured and non-empty.
    pub fn create_bitfile_exe(&self) -> Option<PathBuf> {
        self.get(CREATE_BITFILE_EXE_KEY)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }
}
