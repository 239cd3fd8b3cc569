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

//! Migrating a CLIP (component-level IP) into a LabVIEW FPGA target project.
//!
//! The CLIP's XML description names the signals of its `LabVIEW` interface. Migration turns
//! those into the signal CSV read by [`crate::target_support`], writes an instantiation example
//! for the CLIP's top-level entity and copies its constraints with the instance path filled in.
//! Optionally it also writes the VHDL signal declarations that connect the CLIP to the Window.

use crate::config::PROJECT_SETTINGS_FILE_NAME;
use crate::config::ini::IniDocument;
use crate::config::project_settings::ClipSettings;
use crate::error::LvfpgaError;
use crate::signals::{IO_SOCKET_PREFIX, LvDataType, SignalRecord, csv_direction, write_signal_csv};
use crate::system_io::{fs_create_parent_dir, fs_read, fs_write};
use crate::vhdl::write_instantiation;
use crate::xml::{attribute, child, child_text, is_named, parse_document};
use log::{info, warn};
use roxmltree::Node;
use std::fmt::Write as _;
use std::path::Path;

/// Placeholder in CLIP constraint files replaced by the instance path.
pub static INSTANCE_PATH_PLACEHOLDER: &str = "%ClipInstancePath%";

/// Name of the CLIP interface whose signals are migrated.
pub static LABVIEW_INTERFACE: &str = "LabVIEW";

static SIMPLE_TYPE_NAMES: [&str; 9] = [
    "Boolean", "U8", "U16", "U32", "U64", "I8", "I16", "I32", "I64",
];

static NOT_AVAILABLE: &str = "N/A";

/// A signal of the CLIP's LabVIEW interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipSignal {
    pub name: String,
    pub hdl_name: Option<String>,
    /// As written in the CLIP, `ToCLIP` or `FromCLIP`.
    pub direction: Option<String>,
    pub signal_type: Option<String>,
    pub data_type: LvDataType,
    pub use_in_single_cycle_timed_loop: Option<String>,
    pub required_clock_domain: Option<String>,
}

impl ClipSignal {
    /// `IO Socket\` followed by the signal name with `.` turned into `\`.
    pub fn lv_name(&self) -> String {
        format!("{IO_SOCKET_PREFIX}{}", self.name.replace('.', "\\"))
    }

    /// Direction as written to the CSV: `input`, `output`, or the CLIP's own value.
    pub fn csv_direction(&self) -> &str {
        self.direction.as_deref().map_or(NOT_AVAILABLE, csv_direction)
    }

    pub fn to_record(&self) -> SignalRecord {
        SignalRecord {
            lv_name: self.lv_name(),
            hdl_name: self.hdl_name.as_deref().unwrap_or(NOT_AVAILABLE).to_string(),
            direction: self.csv_direction().to_string(),
            signal_type: self.signal_type.as_deref().unwrap_or(NOT_AVAILABLE).to_string(),
            data_type: self.data_type.to_string(),
            use_in_single_cycle_timed_loop: self
                .use_in_single_cycle_timed_loop
                .clone()
                .unwrap_or_default(),
            required_clock_domain: self.required_clock_domain.clone().unwrap_or_default(),
        }
    }

    /// VHDL declaration of the signal connecting this CLIP signal to the Window.
    pub fn window_declaration(&self) -> String {
        format!(
            "signal {} : {}; -- {} ({})",
            self.hdl_name.as_deref().unwrap_or(&self.name),
            self.data_type.vhdl_type(),
            self.name,
            self.csv_direction()
        )
    }
}

/// The LabVIEW type described by a `DataType` element. A missing element gives `N/A`, an
/// element without a known type `Unknown`.
pub fn data_type(node: Option<Node>) -> LvDataType {
    let Some(node) = node else {
        return LvDataType::Other(NOT_AVAILABLE.to_string());
    };
    if let Some(simple) = SIMPLE_TYPE_NAMES
        .iter()
        .find(|name| child(node, name).is_some())
        .and_then(|name| LvDataType::simple(name))
    {
        return simple;
    }
    if let Some(fxp) = child(node, "FXP") {
        return LvDataType::Fxp {
            word_length: child_text(fxp, "WordLength").unwrap_or_else(|| "?".to_string()),
            integer_word_length: child_text(fxp, "IntegerWordLength")
                .unwrap_or_else(|| "?".to_string()),
            signed: child(fxp, "Unsigned").is_none(),
        };
    }
    if let Some(array) = child(node, "Array") {
        let element = SIMPLE_TYPE_NAMES
            .iter()
            .chain(&["FXP"])
            .find(|name| child(array, name).is_some())
            .unwrap_or(&"Unknown");
        return LvDataType::Array {
            element: element.to_string(),
            size: child_text(array, "Size").unwrap_or_else(|| "?".to_string()),
        };
    }
    LvDataType::Other("Unknown".to_string())
}

/// Signals of the `LabVIEW` interface in a CLIP description, in document order.
///
/// Signals without a name are skipped with a warning.
///
/// # Returns: `Result<Vec<ClipSignal>, LvfpgaError>`
/// * `Ok(Vec<ClipSignal>)` - The named signals, possibly none
/// * `Err(LvfpgaError::Xml)` - The text is not XML, or there is no `LabVIEW` interface
pub fn clip_signals(text: &str, file: &Path) -> Result<Vec<ClipSignal>, LvfpgaError> {
    let doc = parse_document(text, file)?;
    let interface = doc
        .root_element()
        .descendants()
        .find(|node| {
            is_named(*node, "Interface")
                && node.attributes().any(|a| {
                    a.name().eq_ignore_ascii_case("Name")
                        && a.value().eq_ignore_ascii_case(LABVIEW_INTERFACE)
                })
        })
        .ok_or_else(|| LvfpgaError::Xml {
            file: file.into(),
            message: format!("No {LABVIEW_INTERFACE} interface found"),
        })?;

    let mut signals = Vec::new();
    for node in interface
        .descendants()
        .filter(|node| is_named(*node, "SignalList"))
        .flat_map(|list| list.children())
        .filter(|node| is_named(*node, "Signal"))
    {
        let Some(name) = attribute(node, "Name").filter(|name| !name.is_empty()) else {
            warn!("Signal without a name found, skipping");
            continue;
        };
        signals.push(ClipSignal {
            name,
            hdl_name: child_text(node, "HDLName"),
            direction: child_text(node, "Direction"),
            signal_type: child_text(node, "SignalType"),
            data_type: data_type(child(node, "DataType")),
            use_in_single_cycle_timed_loop: child_text(node, "UseInLabVIEWSingleCycleTimedLoop"),
            required_clock_domain: child_text(node, "RequiredClockDomain"),
        });
    }
    if signals.is_empty() {
        warn!("No signals found in the {LABVIEW_INTERFACE} interface of {file:?}");
    }
    Ok(signals)
}

/// Text of the Window signal declarations for `signals`.
pub fn window_signals_text(signals: &[ClipSignal], source_name: &str) -> String {
    let mut text = String::from("-- VHDL Signal declarations for CLIP to Window connections\n");
    let _ = writeln!(text, "-- Generated from {source_name}");
    text.push('\n');
    for signal in signals {
        let _ = writeln!(text, "{}", signal.window_declaration());
    }
    text
}

/// Copy the constraints in `xdc_in` to `xdc_out`, replacing every
/// [`INSTANCE_PATH_PLACEHOLDER`] with `instance_path`.
pub fn update_constraints(xdc_in: &Path, xdc_out: &Path, instance_path: &str) -> Result<(), LvfpgaError> {
    let updated = fs_read(xdc_in)?.replace(INSTANCE_PATH_PLACEHOLDER, instance_path);
    fs_create_parent_dir(xdc_out)?;
    fs_write(xdc_out, updated)?;
    info!("Updated constraints written to {xdc_out:?}");
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Run every migration step for `settings`, stopping at the first failure.
pub fn migrate_clip(settings: &ClipSettings) -> Result<Vec<ClipSignal>, LvfpgaError> {
    let signals = clip_signals(&fs_read(&settings.clip_xml)?, &settings.clip_xml)?;
    let records: Vec<SignalRecord> = signals.iter().map(ClipSignal::to_record).collect();
    write_signal_csv(&settings.signals_csv, &records)?;
    info!("Wrote {} signals to {:?}", records.len(), settings.signals_csv);

    write_instantiation(&settings.clip_hdl_top, &settings.instantiation_example)?;
    update_constraints(&settings.clip_xdc, &settings.updated_xdc, &settings.instance_path)?;

    if let Some(definitions) = &settings.window_signal_definitions {
        fs_create_parent_dir(definitions)?;
        fs_write(
            definitions,
            window_signals_text(&signals, &file_name(&settings.clip_xml)),
        )?;
        info!("Generated VHDL signal declarations: {definitions:?}");
    }
    Ok(signals)
}

/// Load `[CLIPMigrationSettings]` from the settings file in `project_dir` and migrate.
pub fn migrate_clip_handler(project_dir: &Path) -> Result<Vec<ClipSignal>, LvfpgaError> {
    let doc = IniDocument::from_file(&project_dir.join(PROJECT_SETTINGS_FILE_NAME))?;
    let settings = ClipSettings::from_document(&doc, project_dir)?;
    let signals = migrate_clip(&settings)?;
    info!("CLIP migration completed successfully.");
    Ok(signals)
}
