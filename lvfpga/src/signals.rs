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

//! Signals exchanged between a CLIP and a LabVIEW FPGA target.
//!
//! CLIP migration writes one [`SignalRecord`] per signal of the CLIP's LabVIEW interface to a
//! CSV file. Target support generation reads that file back. The `DataType` column holds the
//! LabVIEW type as text, e.g. `U16`, `FXP(24,8,Signed)` or `Array<Boolean>[4]`, which
//! [`LvDataType`] parses and maps onto VHDL.

use crate::error::LvfpgaError;
use crate::system_io::{fs_create_parent_dir, fs_read, fs_write};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Prefix of every LabVIEW name generated for a CLIP signal.
pub static IO_SOCKET_PREFIX: &str = "IO Socket\\";

/// Column order of the signal CSV file.
pub static SIGNAL_CSV_HEADER: [&str; 7] = [
    "LVName",
    "HDLName",
    "Direction",
    "SignalType",
    "DataType",
    "UseInLabVIEWSingleCycleTimedLoop",
    "RequiredClockDomain",
];

static INTEGER_WIDTHS: [u32; 4] = [8, 16, 32, 64];

/// A LabVIEW data type as written in the `DataType` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LvDataType {
    Boolean,
    /// `U8` to `U64` and `I8` to `I64`
    Integer { signed: bool, bits: u32 },
    /// Fixed point. Lengths are kept as written, `?` when the CLIP did not give one.
    Fxp {
        word_length: String,
        integer_word_length: String,
        signed: bool,
    },
    /// An array of `size` elements of the simple type named `element`.
    Array { element: String, size: String },
    /// Anything else, e.g. `N/A` or `Unknown`.
    Other(String),
}

impl LvDataType {
    /// Parse one of the simple type names: `Boolean`, `U8`..`U64` or `I8`..`I64`.
    pub fn simple(name: &str) -> Option<LvDataType> {
        if name == "Boolean" {
            return Some(LvDataType::Boolean);
        }
        let signed = match name.get(..1)? {
            "U" => false,
            "I" => true,
            _ => return None,
        };
        let bits: u32 = name.get(1..)?.parse().ok()?;
        INTEGER_WIDTHS
            .contains(&bits)
            .then_some(LvDataType::Integer { signed, bits })
    }

    /// Parse the text of a `DataType` column. Text that is not understood becomes
    /// [`LvDataType::Other`].
    pub fn parse(text: &str) -> LvDataType {
        if let Some(simple) = LvDataType::simple(text) {
            return simple;
        }
        if let Some(params) = text
            .strip_prefix("FXP(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let params: Vec<&str> = params.split(',').collect();
            if let [word_length, integer_word_length, sign] = params[..] {
                return LvDataType::Fxp {
                    word_length: word_length.to_string(),
                    integer_word_length: integer_word_length.to_string(),
                    signed: sign != "Unsigned",
                };
            }
        }
        if let Some((element, size)) = text
            .strip_prefix("Array<")
            .and_then(|rest| rest.split_once(">["))
            .and_then(|(element, rest)| Some((element, rest.strip_suffix(']')?)))
        {
            return LvDataType::Array {
                element: element.to_string(),
                size: size.to_string(),
            };
        }
        LvDataType::Other(text.to_string())
    }

    /// Stem of the LabVIEW stock prototype for this type, if there is one.
    pub fn prototype_stem(&self) -> Option<&'static str> {
        match self {
            LvDataType::Boolean => Some("bool"),
            LvDataType::Fxp { .. } => Some("FXP"),
            LvDataType::Integer { signed, bits } => match (signed, bits) {
                (false, 8) => Some("u8"),
                (false, 16) => Some("u16"),
                (false, 32) => Some("u32"),
                (false, 64) => Some("u64"),
                (true, 8) => Some("i8"),
                (true, 16) => Some("i16"),
                (true, 32) => Some("i32"),
                (true, 64) => Some("i64"),
                _ => None,
            },
            LvDataType::Array { .. } | LvDataType::Other(_) => None,
        }
    }

    /// The VHDL type carrying a value of this type.
    ///
    /// Fixed point and array widths that cannot be worked out fall back to 32 bits. Types
    /// without a mapping become `std_logic`.
    pub fn vhdl_type(&self) -> String {
        let vector = |width: u32| format!("std_logic_vector({} downto 0)", width - 1);
        match self {
            LvDataType::Boolean | LvDataType::Other(_) => "std_logic".to_string(),
            LvDataType::Integer { bits, .. } => vector(*bits),
            LvDataType::Fxp { word_length, .. } => {
                vector(word_length.parse().ok().filter(|w| *w > 0).unwrap_or(32))
            }
            LvDataType::Array { element, size } => {
                let element_width = match LvDataType::simple(element) {
                    Some(LvDataType::Boolean) => 1,
                    Some(LvDataType::Integer { bits, .. }) => bits,
                    _ => 32,
                };
                let total = size
                    .parse::<u32>()
                    .ok()
                    .and_then(|size| size.checked_mul(element_width))
                    .filter(|w| *w > 0);
                if total.is_none() {
                    warn!("Cannot work out the width of {self}, using 32 bits");
                }
                vector(total.unwrap_or(32))
            }
        }
    }
}

impl fmt::Display for LvDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LvDataType::Boolean => write!(f, "Boolean"),
            LvDataType::Integer { signed, bits } => {
                write!(f, "{}{bits}", if *signed { "I" } else { "U" })
            }
            LvDataType::Fxp {
                word_length,
                integer_word_length,
                signed,
            } => write!(
                f,
                "FXP({word_length},{integer_word_length},{})",
                if *signed { "Signed" } else { "Unsigned" }
            ),
            LvDataType::Array { element, size } => write!(f, "Array<{element}>[{size}]"),
            LvDataType::Other(text) => write!(f, "{text}"),
        }
    }
}

/// Map a CLIP direction (`ToCLIP`, `FromCLIP`) onto the CSV form (`output`, `input`).
/// Other values are kept.
pub fn csv_direction(clip_direction: &str) -> &str {
    match clip_direction {
        "ToCLIP" => "output",
        "FromCLIP" => "input",
        other => other,
    }
}

/// One row of the signal CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalRecord {
    #[serde(rename = "LVName")]
    pub lv_name: String,
    #[serde(rename = "HDLName")]
    pub hdl_name: String,
    #[serde(rename = "Direction")]
    pub direction: String,
    #[serde(rename = "SignalType")]
    pub signal_type: String,
    #[serde(rename = "DataType")]
    pub data_type: String,
    #[serde(rename = "UseInLabVIEWSingleCycleTimedLoop")]
    pub use_in_single_cycle_timed_loop: String,
    #[serde(rename = "RequiredClockDomain")]
    pub required_clock_domain: String,
}

impl SignalRecord {
    pub fn data_type(&self) -> LvDataType {
        LvDataType::parse(&self.data_type)
    }

    /// True for signals driven by the CLIP into the target.
    pub fn is_input(&self) -> bool {
        matches!(self.direction.as_str(), "input" | "FromCLIP")
    }

    pub fn is_clock(&self) -> bool {
        self.signal_type.eq_ignore_ascii_case("clock")
    }

    /// The CLIP signal name: the LabVIEW name without [`IO_SOCKET_PREFIX`], with `\` turned
    /// back into `.`.
    pub fn original_name(&self) -> String {
        self.lv_name
            .strip_prefix(IO_SOCKET_PREFIX)
            .unwrap_or(&self.lv_name)
            .replace('\\', ".")
    }
}

/// Write `records` to `file_path` under [`SIGNAL_CSV_HEADER`]. The header is written even
/// when there are no records.
pub fn write_signal_csv(file_path: &Path, records: &[SignalRecord]) -> Result<(), LvfpgaError> {
    let csv_err = |e: csv::Error| LvfpgaError::Csv {
        file: file_path.into(),
        e,
    };
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(SIGNAL_CSV_HEADER).map_err(csv_err)?;
    for record in records {
        writer.serialize(record).map_err(csv_err)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv_err(e.into_error().into()))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| LvfpgaError::Internal(format!("CSV output is not UTF-8: {e}")))?;
    fs_create_parent_dir(file_path)?;
    fs_write(file_path, text)?;
    debug!("Wrote {} signals to {file_path:?}", records.len());
    Ok(())
}

/// Read a signal CSV file. Columns are matched by header name.
pub fn read_signal_csv(file_path: &Path) -> Result<Vec<SignalRecord>, LvfpgaError> {
    let text = fs_read(file_path)?;
    let records = csv::Reader::from_reader(text.as_bytes())
        .deserialize()
        .collect::<Result<Vec<SignalRecord>, csv::Error>>()
        .map_err(|e| LvfpgaError::Csv {
            file: file_path.into(),
            e,
        })?;
    debug!("Read {} signals from {file_path:?}", records.len());
    Ok(records)
}
