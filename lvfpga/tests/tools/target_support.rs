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
use lvfpga::target_support::gen_lv_target_support_handler;
use tempfile::TempDir;

static SIGNALS_CSV: &str = "\
LVName,HDLName,Direction,SignalType,DataType,UseInLabVIEWSingleCycleTimedLoop,RequiredClockDomain
IO Socket\\Bank0\\Led,led_out,output,data,Boolean,Allowed,
IO Socket\\Clk40,clk40,input,clock,Boolean,,
IO Socket\\Adc,adc_in,input,data,\"FXP(24,8,Signed)\",,Clk40
";

static WINDOW_TEMPLATE: &str = "\
entity Window is
  port (
{% if include_clip_socket %}    -- CLIP socket
{% endif %}{% for s in custom_signals %}    {{ s.name }} : {{ s.direction }} {{ s.type }}{% if not loop.last %};{% endif %} -- {{ s.lv_name }}
{% endfor %}  );
end entity Window;
";

static TARGET_TEMPLATE: &str = "\
<Target>
{% if include_custom_io %}  <BoardIO>{{ custom_boardio }}</BoardIO>
{% endif %}  <Clocks>{{ custom_clock }}</Clocks>
</Target>
";

static SETTINGS: &str = "[LVFPGATargetSettings]
CustomSignalsCSV = objects/signals.csv
BoardIOXML = objects/xml/CustomBoardIO.xml
ClockXML = objects/xml/CustomClocks.xml
WindowVhdlTemplate = templates/Window.vhd.tera
WindowVhdlOutput = objects/rtl/Window.vhd
WindowInstantiationExample = objects/rtl/WindowInstantiation.vhd
TargetXMLTemplate = templates/Target.xml.tera
TargetXMLOutput = objects/xml/Target.xml
IncludeCLIPSocketInTarget = false
";

fn target_fixture(settings: &str) -> TempDir {
    init_logging();
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    write_file(root, "vivadoprojectsettings.ini", settings);
    write_file(root, "objects/signals.csv", SIGNALS_CSV);
    write_file(root, "templates/Window.vhd.tera", WINDOW_TEMPLATE);
    write_file(root, "templates/Target.xml.tera", TARGET_TEMPLATE);
    dir
}

#[gtest]
fn target_support_files_are_generated() {
    let dir = target_fixture(SETTINGS);
    let root = dir.path();
    expect_that!(gen_lv_target_support_handler(root), ok(anything()));

    expect_that!(
        read_lines(&root.join("objects/xml/CustomBoardIO.xml")),
        eq(&vec![
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>",
            "<boardio>",
            "  <ResourceList name=\"BoardIO\">",
            "    <ResourceList name=\"Bank0\">",
            "      <IOResource name=\"IO Socket\\Bank0\\Led\" prototype=\"#{document-root}/Stock/boolDigitalOutputWithoutReadback\">",
            "        <VHDLName>led_out</VHDLName>",
            "        <UseInSingleCycleTimedLoop>Allowed</UseInSingleCycleTimedLoop>",
            "      </IOResource>",
            "    </ResourceList>",
            "    <IOResource name=\"IO Socket\\Adc\" prototype=\"#{document-root}/Stock/FXPDigitalInput\" wordLength=\"24\" integerWordLength=\"8\" unsigned=\"false\">",
            "      <VHDLName>adc_in</VHDLName>",
            "      <RequiredClockDomain>Clk40</RequiredClockDomain>",
            "    </IOResource>",
            "  </ResourceList>",
            "</boardio>",
        ])
    );

    expect_that!(
        read_lines(&root.join("objects/xml/CustomClocks.xml")),
        eq(&vec![
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>",
            "<ClockList>",
            "  <HierarchyForDerivedClockPeriodConstraints>AppletonWindow</HierarchyForDerivedClockPeriodConstraints>",
            "  <Clock name=\"Clk40\">",
            "    <FreqInHertz>",
            "      <DefaultValue>250M</DefaultValue>",
            "    </FreqInHertz>",
            "    <AccuracyInPPM>",
            "      <DefaultValue>100</DefaultValue>",
            "    </AccuracyInPPM>",
            "    <JitterInPicoSeconds>",
            "      <DefaultValue>250</DefaultValue>",
            "    </JitterInPicoSeconds>",
            "    <GeneratePeriodConstraints>false</GeneratePeriodConstraints>",
            "  </Clock>",
            "</ClockList>",
        ])
    );

    expect_that!(
        read_lines(&root.join("objects/rtl/Window.vhd")),
        eq(&vec![
            "entity Window is",
            "  port (",
            "    led_out : out std_logic; -- IO Socket\\Bank0\\Led",
            "    adc_in : in std_logic_vector(23 downto 0) -- IO Socket\\Adc",
            "  );",
            "end entity Window;",
        ])
    );

    expect_that!(
        read_lines(&root.join("objects/rtl/WindowInstantiation.vhd")),
        eq(&vec![
            "-- Entity instantiation for Window",
            "-- Generated from Window.vhd",
            "",
            "Window: entity work.Window (rtl)",
            "port map (",
            "    led_out => led_out,",
            "    adc_in => adc_in",
            ");",
        ])
    );

    expect_that!(
        read_lines(&root.join("objects/xml/Target.xml")),
        eq(&vec![
            "<Target>",
            "  <BoardIO>CustomBoardIO.xml</BoardIO>",
            "  <Clocks>CustomClocks.xml</Clocks>",
            "</Target>",
        ])
    );
}

#[gtest]
fn clip_socket_is_included_by_default() {
    let settings = SETTINGS
        .replace("IncludeCLIPSocketInTarget = false\n", "")
        .replace("WindowInstantiationExample = objects/rtl/WindowInstantiation.vhd\n", "");
    let dir = target_fixture(&settings);
    expect_that!(gen_lv_target_support_handler(dir.path()), ok(anything()));
    expect_that!(
        std::fs::read_to_string(dir.path().join("objects/rtl/Window.vhd")),
        ok(contains_substring("  port (\n    -- CLIP socket\n    led_out"))
    );
    expect_false!(dir.path().join("objects/rtl/WindowInstantiation.vhd").exists());
}

#[gtest]
fn broken_template_names_the_file() {
    let dir = target_fixture(SETTINGS);
    write_file(dir.path(), "templates/Window.vhd.tera", "{% for s in custom_signals %}");
    expect_that!(
        gen_lv_target_support_handler(dir.path()),
        err(displays_as(contains_substring("Window.vhd.tera")))
    );
}

#[gtest]
fn malformed_signal_csv_is_reported() {
    let dir = target_fixture(SETTINGS);
    write_file(dir.path(), "objects/signals.csv", "LVName,HDLName\nIO Socket\\x,x\n");
    expect_that!(
        gen_lv_target_support_handler(dir.path()),
        err(displays_as(contains_substring("LvfpgaError::Csv")))
    );
}

#[gtest]
fn missing_section_is_reported() {
    let dir = target_fixture("[VivadoProjectSettings]\nVivadoProjectName = demo\n");
    expect_that!(
        gen_lv_target_support_handler(dir.path()),
        err(displays_as(contains_substring("[LVFPGATargetSettings] is missing")))
    );
}
