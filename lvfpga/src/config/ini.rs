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

//! Readers for the two INI flavours used by the toolchain.
//!
//! - [`parse_assignments`] reads the flat `key=value` files written next to a build
//!   specification (`environment.ini`). No sections, no continuation lines.
//! - [`IniDocument`] reads sectioned settings files (`vivadoprojectsettings.ini`,
//!   `projectsettings.ini`) through `rust-ini`: `[Section]` headers, `=` or `:` delimiters,
//!   case-insensitive names and indented continuation lines. Keys outside a section and repeated
//!   sections or keys are rejected.

use crate::error::LvfpgaError;
use ini::{Ini, ParseOption};
use log::{trace, warn};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with(';')
}

/// Parse `key=value` lines in file order.
///
/// Blank lines and `#`/`;` comments are skipped, as are lines without an `=`. Only the first
/// `=` splits, so values may contain further `=` characters. Keys and values are trimmed.
pub fn parse_assignments(text: &str) -> Vec<(String, String)> {
    let mut ret = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || is_comment(line) {
            continue;
        }
        match line.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                ret.push((key.trim().to_string(), value.trim().to_string()));
            }
            _ => warn!("Ignoring line {} which is not a key=value pair: {line:?}", index + 1),
        }
    }
    trace!("Parsed {} assignments", ret.len());
    ret
}

/// A parsed sectioned INI file.
#[derive(Debug, Clone)]
pub struct IniDocument {
    source: PathBuf,
    ini: Ini,
}

impl IniDocument {
    /// Parse `text`. `origin` is only used to give errors a file to point at.
    pub fn parse(text: &str, origin: &Path) -> Result<IniDocument, LvfpgaError> {
        let parse_err = |message: String| LvfpgaError::ConfigParse {
            file: origin.into(),
            message,
        };
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            enabled_indented_mutiline_value: true,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(text, options).map_err(|e| parse_err(e.to_string()))?;

        if ini
            .section(None::<String>)
            .is_some_and(|general| !general.is_empty())
        {
            return Err(parse_err("File contains no section headers.".to_string()));
        }

        let mut seen_sections = BTreeSet::new();
        for (name, properties) in ini.iter() {
            let Some(name) = name else { continue };
            if !seen_sections.insert(name.to_lowercase()) {
                return Err(parse_err(format!("Section [{name}] appears more than once")));
            }
            let mut seen_keys = BTreeSet::new();
            for (key, _) in properties.iter() {
                if !seen_keys.insert(key.to_lowercase()) {
                    return Err(parse_err(format!(
                        "Key `{key}` appears more than once in section [{name}]"
                    )));
                }
            }
            trace!("Section [{name}] with {} keys", seen_keys.len());
        }

        Ok(IniDocument {
            source: origin.into(),
            ini,
        })
    }

    /// Read and parse `file_path`, failing with `SettingsMissing` when it is not a file.
    pub fn from_file(file_path: &Path) -> Result<IniDocument, LvfpgaError> {
        if !file_path.is_file() {
            return Err(LvfpgaError::SettingsMissing {
                file: file_path.into(),
            });
        }
        IniDocument::parse(&crate::system_io::fs_read(file_path)?, file_path)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.ini.section(Some(section)).is_some()
    }

    /// Look up `key` in `section`. Both names are matched case-insensitively.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.ini
            .section(Some(section))
            .and_then(|properties| properties.get(key))
    }

    /// Like [`IniDocument::get`], failing with `MissingSetting` when the key is absent.
    pub fn required(&self, section: &str, key: &str) -> Result<&str, LvfpgaError> {
        self.get(section, key)
            .ok_or_else(|| LvfpgaError::MissingSetting {
                file: self.source.clone(),
                section: section.to_string(),
                key: key.to_string(),
            })
    }
}
