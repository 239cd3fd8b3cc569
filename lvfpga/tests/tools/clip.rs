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

use crate::common::{init_logging, read_lines, write_file};
use googletest::prelude::*;
use lvfpga::clip::{migrate_clip_handler, update_constraints};
use lvfpga::signals::read_signal_csv;
use std::path::Path;
use tempfile::TempDir;

static CLIP_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<CLIPDeclaration Name="MyClip">
  <Interface Name="Fabric"/>
  <interface name="labview">
    <SignalList>
      <Signal Name="Bank0.Led">
        <HDLName>led_out</HDLName>
        <Direction>ToCLIP</Direction>
        <SignalType>data</SignalType>
        <DataType><Boolean/></DataType>
        <UseInLabVIEWSingleCycleTimedLoop>Allowed</UseInLabVIEWSingleCycleTimedLoop>
      </Signal>
      <Signal>
        <HDLName>nameless</HDLName>
      </Signal>
      <Signal name="Clk40">
        <HDLName>clk40</HDLName>
        <Direction>FromCLIP</Direction>
        <SignalType>clock</SignalType>
        <DataType><Boolean/></DataType>
      </Signal>
      <Signal Name="Adc">
        <Direction>FromCLIP</Direction>
        <DataType><FXP><WordLength>24</WordLength><IntegerWordLength>8</IntegerWordLength></FXP></DataType>
        <RequiredClockDomain>Clk40</RequiredClockDomain>
      </Signal>
    </SignalList>
  </interface>
</CLIPDeclaration>
"#;

static CLIP_TOP: &str = "entity MyClip is
  port (
    led_out : in std_logic;
    clk40, adc : out std_logic
  );
end entity;
";

static SETTINGS: &str = "[CLIPMigrationSettings]
CLIPXML = clip/MyClip.xml
CustomSignalsCSV = objects/signals.csv
CLIPHDLTop = clip/MyClip.vhd
CLIPXDC = clip/MyClip.xdc
CLIPInstantiationExample = objects/MyClipInstantiation.vhd
CLIPInstancePath = TopLevel/MyClipInst
UpdatedCLIPXDC = objects/xdc/MyClip.xdc
CLIPtoWindowSignalDefinitions = objects/WindowSignals.vhd
";

fn clip_fixture(settings: &str) -> TempDir {
    init_logging();
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    write_file(root, "vivadoprojectsettings.ini", settings);
    write_file(root, "clip/MyClip.xml", CLIP_XML);
    write_file(root, "clip/MyClip.vhd", CLIP_TOP);
    write_file(
        root,
        "clip/MyClip.xdc",
        "create_clock -period 25 [get_pins %ClipInstancePath%/clk40]\n\
        set_false_path -to [get_cells %ClipInstancePath%/sync*]\n",
    );
    dir
}

#[gtest]
fn clip_is_migrated() {
    let dir = clip_fixture(SETTINGS);
    let root = dir.path();

    let signals = migrate_clip_handler(root).expect("migrate");
    expect_that!(signals.len(), eq(3));

    let records = read_signal_csv(&root.join("objects/signals.csv")).expect("csv");
    let rows: Vec<Vec<&str>> = records
        .iter()
        .map(|r| {
            vec![
                r.lv_name.as_str(),
                r.hdl_name.as_str(),
                r.direction.as_str(),
                r.signal_type.as_str(),
                r.data_type.as_str(),
                r.use_in_single_cycle_timed_loop.as_str(),
                r.required_clock_domain.as_str(),
            ]
        })
        .collect();
    expect_that!(
        rows,
        eq(&vec![
            vec!["IO Socket\\Bank0\\Led", "led_out", "output", "data", "Boolean", "Allowed", ""],
            vec!["IO Socket\\Clk40", "clk40", "input", "clock", "Boolean", "", ""],
            vec!["IO Socket\\Adc", "N/A", "input", "N/A", "FXP(24,8,Signed)", "", "Clk40"],
        ])
    );

    expect_that!(
        read_lines(&root.join("objects/xdc/MyClip.xdc")),
        eq(&vec![
            "create_clock -period 25 [get_pins TopLevel/MyClipInst/clk40]",
            "set_false_path -to [get_cells TopLevel/MyClipInst/sync*]",
        ])
    );

    let instantiation = read_lines(&root.join("objects/MyClipInstantiation.vhd"));
    expect_that!(
        instantiation,
        eq(&vec![
            "-- Entity instantiation for MyClip",
            "-- Generated from MyClip.vhd",
            "",
            "MyClip: entity work.MyClip (rtl)",
            "port map (",
            "    led_out => led_out,",
            "    clk40 => clk40,",
            "    adc => adc",
            ");",
        ])
    );

    expect_that!(
        read_lines(&root.join("objects/WindowSignals.vhd")),
        eq(&vec![
            "-- VHDL Signal declarations for CLIP to Window connections",
            "-- Generated from MyClip.xml",
            "",
            "signal led_out : std_logic; -- Bank0.Led (output)",
            "signal clk40 : std_logic; -- Clk40 (input)",
            "signal Adc : std_logic_vector(23 downto 0); -- Adc (input)",
        ])
    );
}

#[gtest]
fn window_declarations_are_optional() {
    let settings = SETTINGS.replace("CLIPtoWindowSignalDefinitions = objects/WindowSignals.vhd\n", "");
    let dir = clip_fixture(&settings);
    expect_that!(migrate_clip_handler(dir.path()), ok(anything()));
    expect_false!(dir.path().join("objects/WindowSignals.vhd").exists());
}

#[gtest]
fn clip_without_labview_interface_is_rejected() {
    let dir = clip_fixture(SETTINGS);
    write_file(
        dir.path(),
        "clip/MyClip.xml",
        "<CLIPDeclaration><Interface Name=\"Fabric\"/></CLIPDeclaration>",
    );
    expect_that!(
        migrate_clip_handler(dir.path()),
        err(displays_as(contains_substring("No LabVIEW interface found")))
    );
    expect_false!(dir.path().join("objects/signals.csv").exists());
}

#[gtest]
fn clip_migration_needs_the_settings_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    expect_that!(
        migrate_clip_handler(dir.path()),
        err(displays_as(contains_substring("LvfpgaError::SettingsMissing")))
    );
}

#[gtest]
fn constraints_without_placeholder_are_copied() {
    let dir = tempfile::tempdir().expect("tempdir");
    let xdc = write_file(dir.path(), "in.xdc", "set_property IOSTANDARD LVCMOS33 [get_ports x]\n");
    let out = dir.path().join("out/out.xdc");
    expect_that!(update_constraints(&xdc, &out, "Top/Inst"), ok(anything()));
    expect_that!(
        read_lines(Path::new(&out)),
        eq(&vec!["set_property IOSTANDARD LVCMOS33 [get_ports x]"])
    );
}
