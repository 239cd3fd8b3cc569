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

use crate::config::{CLIP_MIGRATION_SECTION, PROJECT_SETTINGS_SECTION, TARGET_SUPPORT_SECTION};
use crate::config::ini::IniDocument;
use crate::error::LvfpgaError;
use log::trace;
use std::path::{Path, PathBuf};

/// The `[VivadoProjectSettings]` section of a project settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSettings {
    pub project_name: String,
    pub top_level_entity: String,
    /// Files listing the sources of the project, resolved against the project directory.
    pub file_lists: Vec<PathBuf>,
}

impl ProjectSettings {
    pub fn from_file(file_path: &Path, project_dir: &Path) -> Result<ProjectSettings, LvfpgaError> {
        let doc = IniDocument::from_file(file_path)?;
        ProjectSettings::from_document(&doc, project_dir)
    }

    pub fn from_document(
        doc: &IniDocument,
        project_dir: &Path,
    ) -> Result<ProjectSettings, LvfpgaError> {
        let required = |key: &str| {
            doc.required(PROJECT_SETTINGS_SECTION, key)
                .map(str::to_string)
        };

        let settings = ProjectSettings {
            project_name: required("VivadoProjectName")?,
            top_level_entity: required("TopLevelEntity")?,
            file_lists: required("VivadoProjectFilesLists")?
                .split_whitespace()
                .map(|list| project_dir.join(list))
                .collect(),
        };
        trace!("Project settings: {settings:?}");
        Ok(settings)
    }
}

/// The `[CLIPMigrationSettings]` section. Paths are resolved against the project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipSettings {
    pub clip_xml: PathBuf,
    pub signals_csv: PathBuf,
    pub clip_hdl_top: PathBuf,
    pub clip_xdc: PathBuf,
    pub instantiation_example: PathBuf,
    /// Hierarchical HDL path of the CLIP instance, substituted into the constraints.
    pub instance_path: String,
    pub updated_xdc: PathBuf,
    pub window_signal_definitions: Option<PathBuf>,
}

impl ClipSettings {
    pub fn from_document(doc: &IniDocument, project_dir: &Path) -> Result<ClipSettings, LvfpgaError> {
        let path = |key: &str| {
            doc.required(CLIP_MIGRATION_SECTION, key)
                .map(|value| project_dir.join(value))
        };
        let settings = ClipSettings {
            clip_xml: path("CLIPXML")?,
            signals_csv: path("CustomSignalsCSV")?,
            clip_hdl_top: path("CLIPHDLTop")?,
            clip_xdc: path("CLIPXDC")?,
            instantiation_example: path("CLIPInstantiationExample")?,
            instance_path: doc
                .required(CLIP_MIGRATION_SECTION, "CLIPInstancePath")?
                .to_string(),
            updated_xdc: path("UpdatedCLIPXDC")?,
            window_signal_definitions: doc
                .get(CLIP_MIGRATION_SECTION, "CLIPtoWindowSignalDefinitions")
                .map(|value| project_dir.join(value)),
        };
        trace!("CLIP migration settings: {settings:?}");
        Ok(settings)
    }
}

/// `true`, `yes` and `1` in any case are true, anything else false. A missing value gives
/// `default`.
pub fn parse_flag(value: Option<&str>, default: bool) -> bool {
    value.map_or(default, |value| {
        matches!(value.to_lowercase().as_str(), "true" | "yes" | "1")
    })
}

/// The `[LVFPGATargetSettings]` section. Paths are resolved against the project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSettings {
    pub signals_csv: PathBuf,
    pub boardio_xml: PathBuf,
    pub clock_xml: PathBuf,
    pub window_vhdl_template: PathBuf,
    pub window_vhdl_output: PathBuf,
    pub window_instantiation_example: Option<PathBuf>,
    pub target_xml_template: PathBuf,
    pub target_xml_output: PathBuf,
    pub include_clip_socket: bool,
    pub include_custom_io: bool,
}

impl TargetSettings {
    pub fn from_document(doc: &IniDocument, project_dir: &Path) -> Result<TargetSettings, LvfpgaError> {
        if !doc.has_section(TARGET_SUPPORT_SECTION) {
            return Err(LvfpgaError::ConfigParse {
                file: doc.source().into(),
                message: format!("Section [{TARGET_SUPPORT_SECTION}] is missing"),
            });
        }
        let path = |key: &str| {
            doc.required(TARGET_SUPPORT_SECTION, key)
                .map(|value| project_dir.join(value))
        };
        let settings = TargetSettings {
            signals_csv: path("CustomSignalsCSV")?,
            boardio_xml: path("BoardIOXML")?,
            clock_xml: path("ClockXML")?,
            window_vhdl_template: path("WindowVhdlTemplate")?,
            window_vhdl_output: path("WindowVhdlOutput")?,
            window_instantiation_example: doc
                .get(TARGET_SUPPORT_SECTION, "WindowInstantiationExample")
                .map(|value| project_dir.join(value)),
            target_xml_template: path("TargetXMLTemplate")?,
            target_xml_output: path("TargetXMLOutput")?,
            include_clip_socket: parse_flag(
                doc.get(TARGET_SUPPORT_SECTION, "IncludeCLIPSocketInTarget"),
                true,
            ),
            include_custom_io: parse_flag(
                doc.get(TARGET_SUPPORT_SECTION, "IncludeCustomIOInTarget"),
                true,
            ),
        };
        trace!("Target support settings: {settings:?}");
        Ok(settings)
    }
}
