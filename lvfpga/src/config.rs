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

pub mod environment;
pub mod ini;
pub mod project_settings;

/// Name of the launcher configuration file. The build specification writes it next to the
/// launcher executable.
pub static ENVIRONMENT_FILE_NAME: &str = "environment.ini";

/// Key in [`ENVIRONMENT_FILE_NAME`] holding the path of the bitfile conversion executable.
pub static CREATE_BITFILE_EXE_KEY: &str = "createBitfileExePath";

/// Name of the project tool settings file, looked up in the project directory.
pub static PROJECT_SETTINGS_FILE_NAME: &str = "vivadoprojectsettings.ini";

/// Section of [`PROJECT_SETTINGS_FILE_NAME`] read by the project tool.
pub static PROJECT_SETTINGS_SECTION: &str = "VivadoProjectSettings";

/// Section of [`PROJECT_SETTINGS_FILE_NAME`] read by CLIP migration.
pub static CLIP_MIGRATION_SECTION: &str = "CLIPMigrationSettings";

/// Section of [`PROJECT_SETTINGS_FILE_NAME`] read by target support generation.
pub static TARGET_SUPPORT_SECTION: &str = "LVFPGATargetSettings";
