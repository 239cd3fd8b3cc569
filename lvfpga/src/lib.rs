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

//! lvfpga - launchers and project tooling for LabVIEW FPGA targets built with Vivado.
//!
//! - [`launcher`] runs the bitfile converter configured in an `environment.ini`
//! - [`forwarder`] hands the caller's arguments to the project tool
//! - [`project`] gathers sources, renders the Vivado TCL scripts, runs Vivado and unpacks
//!   dependency archives
//! - [`clip`] migrates a CLIP into the target project
//! - [`target_support`] generates the target support files from the migrated signals
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level of the binaries (`trace`, `debug`, `info`, `warn`,
//!   `error` or `off`). Defaults to `info`
//! - `XILINX` - Vivado installation root used by the project tool

pub mod clip;
pub mod config;
pub mod error;
pub mod forwarder;
pub mod launcher;
pub mod process;
pub mod project;
pub mod signals;
pub mod system_io;
pub mod target_support;
pub mod vhdl;
pub mod xml;
