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

//! Generating LabVIEW FPGA target support files from the signal CSV.
//!
//! From the CSV written by [`crate::clip`] this produces:
//!
//! - the BoardIO XML, with one `IOResource` per non-clock signal nested in `ResourceList`s that
//!   follow the dotted signal name
//! - the clock list XML, with one `Clock` per clock input
//! - the Window VHDL, rendered from a Tera template
//! - the target XML, rendered from a Tera template
//! - optionally an instantiation example for the generated Window

use crate::config::PROJECT_SETTINGS_FILE_NAME;
use crate::config::ini::IniDocument;
use crate::config::project_settings::TargetSettings;
use crate::error::LvfpgaError;
use crate::signals::{LvDataType, SignalRecord, read_signal_csv};
use crate::system_io::{fs_create_parent_dir, fs_read, fs_write};
use crate::vhdl::write_instantiation;
use crate::xml::XmlElement;
use log::{info, warn};
use serde::Serialize;
use std::path::Path;
use tera::{Context, Tera};

pub static BOARDIO_WRAPPER_NAME: &str = "BoardIO";
pub static DOCUMENT_ROOT_PREFIX: &str = "#{document-root}/Stock/";
pub static CLOCK_HIERARCHY: &str = "AppletonWindow";
pub static DEFAULT_CLOCK_FREQUENCY: &str = "250M";
pub static DEFAULT_ACCURACY_PPM: &str = "100";
pub static DEFAULT_JITTER_PS: &str = "250";

/// The LabVIEW stock prototype for `record`.
pub fn prototype(record: &SignalRecord) -> String {
    let Some(stem) = record.data_type().prototype_stem() else {
        return format!("{DOCUMENT_ROOT_PREFIX}unknownSignal");
    };
    let direction = match record.direction.as_str() {
        "output" | "ToCLIP" => "OutputWithoutReadback",
        "input" | "FromCLIP" => "Input",
        _ => "Unknown",
    };
    format!("{DOCUMENT_ROOT_PREFIX}{stem}Digital{direction}")
}

/// The `IOResource` element for a non-clock signal.
pub fn io_resource(record: &SignalRecord) -> XmlElement {
    let mut resource = XmlElement::new("IOResource")
        .with_attribute("name", record.lv_name.as_str())
        .with_attribute("prototype", prototype(record));
    if let LvDataType::Fxp {
        word_length,
        integer_word_length,
        signed,
    } = record.data_type()
    {
        resource = resource
            .with_attribute("wordLength", word_length)
            .with_attribute("integerWordLength", integer_word_length)
            .with_attribute("unsigned", (!signed).to_string());
    }
    resource.push(XmlElement::new("VHDLName").with_text(record.hdl_name.as_str()));
    if !record.required_clock_domain.is_empty() {
        resource.push(
            XmlElement::new("RequiredClockDomain")
                .with_text(record.required_clock_domain.as_str()),
        );
    }
    if !record.use_in_single_cycle_timed_loop.is_empty() {
        resource.push(
            XmlElement::new("UseInSingleCycleTimedLoop")
                .with_text(record.use_in_single_cycle_timed_loop.as_str()),
        );
    }
    resource
}

fn default_value(name: &str, value: &str) -> XmlElement {
    let mut element = XmlElement::new(name);
    element.push(XmlElement::new("DefaultValue").with_text(value));
    element
}

/// The `Clock` element for a clock input.
pub fn clock(record: &SignalRecord) -> XmlElement {
    let mut clock = XmlElement::new("Clock").with_attribute("name", record.original_name());
    clock.push(default_value("FreqInHertz", DEFAULT_CLOCK_FREQUENCY));
    clock.push(default_value("AccuracyInPPM", DEFAULT_ACCURACY_PPM));
    clock.push(default_value("JitterInPicoSeconds", DEFAULT_JITTER_PS));
    clock.push(XmlElement::new("GeneratePeriodConstraints").with_text("false"));
    clock
}

/// Build the BoardIO and clock list documents for `records`.
pub fn boardio_and_clocks(records: &[SignalRecord]) -> (XmlElement, XmlElement) {
    let mut boardio = XmlElement::new("boardio");
    let mut clocks = XmlElement::new("ClockList");
    clocks.push(XmlElement::new("HierarchyForDerivedClockPeriodConstraints").with_text(CLOCK_HIERARCHY));
    {
        let resources = boardio.named_child("ResourceList", BOARDIO_WRAPPER_NAME);
        for record in records {
            if record.is_clock() && record.is_input() {
                clocks.push(clock(record));
                continue;
            }
            let original_name = record.original_name();
            let mut parent = &mut *resources;
            if let Some((groups, _)) = original_name.rsplit_once('.') {
                for group in groups.split('.') {
                    parent = parent.named_child("ResourceList", group);
                }
            }
            parent.push(io_resource(record));
        }
    }
    (boardio, clocks)
}

/// A port of the generated Window, as seen by the Window template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowSignal {
    pub name: String,
    /// `in` or `out`
    pub direction: &'static str,
    #[serde(rename = "type")]
    pub vhdl_type: String,
    pub lv_name: String,
}

/// Window ports for every non-clock signal.
pub fn window_signals(records: &[SignalRecord]) -> Vec<WindowSignal> {
    records
        .iter()
        .filter(|record| !record.is_clock())
        .map(|record| WindowSignal {
            name: record.hdl_name.clone(),
            direction: if record.is_input() { "in" } else { "out" },
            vhdl_type: record.data_type().vhdl_type(),
            lv_name: record.lv_name.clone(),
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct WindowContext<'a> {
    custom_signals: &'a [WindowSignal],
    include_clip_socket: bool,
    include_custom_io: bool,
}

#[derive(Debug, Serialize)]
struct TargetContext {
    include_clip_socket: bool,
    include_custom_io: bool,
    custom_boardio: String,
    custom_clock: String,
}

fn template_error(file: &Path, e: tera::Error) -> LvfpgaError {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(&e);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    LvfpgaError::Template {
        file: file.into(),
        message,
    }
}

/// Render the Tera template in `template_path` with `context` into `output_path`.
pub fn render_template(
    template_path: &Path,
    context: &impl Serialize,
    output_path: &Path,
) -> Result<(), LvfpgaError> {
    let template = fs_read(template_path)?;
    let context = Context::from_serialize(context).map_err(|e| template_error(template_path, e))?;
    let rendered =
        Tera::one_off(&template, &context, false).map_err(|e| template_error(template_path, e))?;
    fs_create_parent_dir(output_path)?;
    fs_write(output_path, rendered)?;
    info!("Generated {output_path:?} from {template_path:?}");
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Generate every target support file named by `settings`, stopping at the first failure.
pub fn gen_lv_target_support(settings: &TargetSettings) -> Result<(), LvfpgaError> {
    info!("Generating support files from {:?}...", settings.signals_csv);
    let records = read_signal_csv(&settings.signals_csv)?;
    if records.is_empty() {
        warn!("{:?} lists no signals", settings.signals_csv);
    }

    let (boardio, clocks) = boardio_and_clocks(&records);
    boardio.write_file(&settings.boardio_xml)?;
    clocks.write_file(&settings.clock_xml)?;

    let signals = window_signals(&records);
    render_template(
        &settings.window_vhdl_template,
        &WindowContext {
            custom_signals: &signals,
            include_clip_socket: settings.include_clip_socket,
            include_custom_io: settings.include_custom_io,
        },
        &settings.window_vhdl_output,
    )?;
    if let Some(example) = &settings.window_instantiation_example {
        write_instantiation(&settings.window_vhdl_output, example)?;
    }

    render_template(
        &settings.target_xml_template,
        &TargetContext {
            include_clip_socket: settings.include_clip_socket,
            include_custom_io: settings.include_custom_io,
            custom_boardio: file_name(&settings.boardio_xml),
            custom_clock: file_name(&settings.clock_xml),
        },
        &settings.target_xml_output,
    )?;
    info!("Target support file generation complete.");
    Ok(())
}

/// Load `[LVFPGATargetSettings]` from the settings file in `project_dir` and generate.
pub fn gen_lv_target_support_handler(project_dir: &Path) -> Result<(), LvfpgaError> {
    let doc = IniDocument::from_file(&project_dir.join(PROJECT_SETTINGS_FILE_NAME))?;
    let settings = TargetSettings::from_document(&doc, project_dir)?;
    gen_lv_target_support(&settings)
}
