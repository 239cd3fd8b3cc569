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

//! Just enough VHDL reading to write instantiation examples.

use crate::error::LvfpgaError;
use crate::system_io::{fs_create_parent_dir, fs_read, fs_write};
use log::{info, warn};
use regex::Regex;
use std::fmt::Write as _;
use std::path::Path;

/// Architecture named in generated instantiations.
pub static DEFAULT_ARCHITECTURE: &str = "rtl";

/// The name and port names of a VHDL entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VhdlEntity {
    pub name: String,
    pub ports: Vec<String>,
}

fn pattern(re: &str) -> Result<Regex, LvfpgaError> {
    Regex::new(re).map_err(|e| LvfpgaError::Internal(format!("Bad pattern {re:?}: {e}")))
}

/// Find the first entity declared in `text` and list its ports in declaration order.
///
/// An entity without a port clause has no ports. `file` only names the source in errors.
pub fn parse_entity(text: &str, file: &Path) -> Result<VhdlEntity, LvfpgaError> {
    let vhdl_err = |message: &str| LvfpgaError::Vhdl {
        file: file.into(),
        message: message.to_string(),
    };
    let entity = pattern(r"(?i)\bentity\s+(\w+)\s+is\b")?
        .captures(text)
        .ok_or_else(|| vhdl_err("Could not find an entity declaration"))?;
    let (Some(whole), Some(name)) = (entity.get(0), entity.get(1)) else {
        return Err(vhdl_err("Could not find an entity declaration"));
    };
    let name = name.as_str().to_string();

    let Some(port_start) = pattern(r"(?i)\bport\s*\(")?.find_at(text, whole.end()) else {
        warn!("Entity {name} in {file:?} has no port declaration");
        return Ok(VhdlEntity {
            name,
            ports: Vec::new(),
        });
    };
    let body = &text[port_start.end()..];
    let mut depth = 1;
    let mut port_end = None;
    for (index, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    port_end = Some(index);
                    break;
                }
            }
            _ => {}
        }
    }
    let port_end = port_end.ok_or_else(|| vhdl_err("Could not find the end of the port declaration"))?;

    let section = pattern(r"(?m)--.*$")?.replace_all(&body[..port_end], "");
    let ports = section
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .flat_map(|(names, _)| names.split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    Ok(VhdlEntity { name, ports })
}

/// Text of an entity instantiation mapping every port to a signal of the same name.
pub fn instantiation_text(entity: &VhdlEntity, source_name: &str, architecture: &str) -> String {
    let name = &entity.name;
    let mut text = String::new();
    let _ = writeln!(text, "-- Entity instantiation for {name}");
    let _ = writeln!(text, "-- Generated from {source_name}");
    text.push('\n');
    let _ = writeln!(text, "{name}: entity work.{name} ({architecture})");
    text.push_str("port map (\n");
    let mappings: Vec<String> = entity
        .ports
        .iter()
        .map(|port| format!("    {port} => {port}"))
        .collect();
    text.push_str(&mappings.join(",\n"));
    text.push_str("\n);\n");
    text
}

/// Read the entity in `vhdl_path` and write its instantiation to `output_path`.
pub fn write_instantiation(vhdl_path: &Path, output_path: &Path) -> Result<VhdlEntity, LvfpgaError> {
    let entity = parse_entity(&fs_read(vhdl_path)?, vhdl_path)?;
    let source_name = vhdl_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    fs_create_parent_dir(output_path)?;
    fs_write(
        output_path,
        instantiation_text(&entity, &source_name, DEFAULT_ARCHITECTURE),
    )?;
    info!(
        "Wrote instantiation of {} with {} ports to {output_path:?}",
        entity.name,
        entity.ports.len()
    );
    Ok(entity)
}
