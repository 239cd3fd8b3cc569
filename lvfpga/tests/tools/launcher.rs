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


use crate::common::write_file;
use googletest::prelude::*;
use lvfpga::config::environment::EnvironmentConfig;
use lvfpga::launcher::{BitfileLauncher, LaunchOutcome, LaunchPaths, tool_failure_diagnostic};
use rstest::*;
use std::ffi::OsString;
use std::path::Path;

#[gtest]
fn paths_are_derived_from_launcher_and_working_dir() {
    let paths = LaunchPaths::new(Path::new("/opt/export"), Path::new("/work/impl_1"));
    expect_that!(paths.config, eq(Path::new("/opt/export/environment.ini")));
    expect_that!(
        paths.template,
        eq(Path::new("/opt/export/BitfileTemplate.lvbitx"))
    );
    expect_that!(
        paths.code_generation_log,
        eq(Path::new("/opt/export/CodeGenerationResults.lvtxt"))
    );
    expect_that!(paths.bitstream, eq(Path::new("/work/impl_1/toplevel.bin")));
}

#[gtest]
fn invocation_orders_arguments_and_carries_bindings() {
    let launcher = BitfileLauncher::new(Path::new("/opt/export"), Path::new("/work"));
    let config = EnvironmentConfig::parse(
        "createBitfileExePath=/opt/lv/CreateBitfile\nLVFPGA_TARGET=PXIe-7976\n",
        Path::new("/opt/export/environment.ini"),
    );
    let invocation = launcher
        .invocation(&config)
        .expect("converter should be configured");

    expect_that!(invocation.program, eq(Path::new("/opt/lv/CreateBitfile")));
    expect_that!(
        invocation.args,
        eq(&vec![
            OsString::from("/opt/export/BitfileTemplate.lvbitx"),
            OsString::from("/opt/export/CodeGenerationResults.lvtxt"),
            OsString::from("/work/toplevel.bin"),
        ])
    );
    expect_true!(
        invocation
            .env
            .contains(&("LVFPGA_TARGET".into(), "PXIe-7976".into()))
    );
}

#[gtest]
#[rstest]
#[case::missing_key("LVFPGA_TARGET=PXIe-7976\n")]
#[case::empty_value("createBitfileExePath=\n")]
fn invocation_without_converter(#[case] text: &str) {
    let launcher = BitfileLauncher::new(Path::new("/opt/export"), Path::new("/work"));
    let config = EnvironmentConfig::parse(text, Path::new("/opt/export/environment.ini"));
    expect_that!(launcher.invocation(&config), none());
}

#[gtest]
fn missing_configuration_fails_fast() {
    let launcher_dir = tempfile::tempdir().expect("tempdir");
    let working_dir = tempfile::tempdir().expect("tempdir");
    let launcher = BitfileLauncher::new(launcher_dir.path(), working_dir.path());

    let r = launcher.run();
    expect_that!(
        r,
        err(displays_as(contains_substring(
            "Rebuild the build specification"
        )))
    );
    expect_that!(
        r,
        err(displays_as(contains_substring(
            "LvfpgaError::ConfigurationMissing"
        )))
    );
    assert_that!(r, err(displays_as(contains_substring("environment.ini"))));
}

#[gtest]
fn missing_converter_key_is_a_tool_failure() {
    let launcher_dir = tempfile::tempdir().expect("tempdir");
    let working_dir = tempfile::tempdir().expect("tempdir");
    write_file(launcher_dir.path(), "environment.ini", "SOME_KEY=1\n");

    let outcome = BitfileLauncher::new(launcher_dir.path(), working_dir.path())
        .run()
        .expect("run");
    expect_that!(outcome, eq(&LaunchOutcome::ToolFailed { exit_code: None }));
    expect_that!(outcome.exit_code(), eq(0));
}

#[gtest]
fn converter_that_cannot_start_is_a_tool_failure() {
    let launcher_dir = tempfile::tempdir().expect("tempdir");
    let working_dir = tempfile::tempdir().expect("tempdir");
    let missing = launcher_dir.path().join("no-such-converter");
    write_file(
        launcher_dir.path(),
        "environment.ini",
        &format!("createBitfileExePath={}\n", missing.display()),
    );

    let outcome = BitfileLauncher::new(launcher_dir.path(), working_dir.path())
        .run()
        .expect("run");
    expect_that!(outcome, eq(&LaunchOutcome::ToolFailed { exit_code: None }));
    expect_that!(outcome.exit_code(), eq(0));
}

#[gtest]
fn failure_diagnostic_names_key_and_config() {
    let message = tool_failure_diagnostic(Path::new("/opt/export/environment.ini"));
    assert_that!(message, contains_substring("createBitfileExePath"));
    assert_that!(message, contains_substring("/opt/export/environment.ini"));
    assert_that!(message, contains_substring("valid installation"));
}

#[cfg(unix)]
mod with_converter {
    use crate::common::{init_logging, read_lines, recorder, write_file};
    use googletest::prelude::*;
    use lvfpga::launcher::{BitfileLauncher, LaunchOutcome};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    static BINDING: &str = "LVFPGA_TEST_TARGET_CLASS";

    struct Fixture {
        launcher_dir: TempDir,
        working_dir: TempDir,
        args_log: PathBuf,
        env_log: PathBuf,
    }

    impl Fixture {
        fn new(exit_code: i32) -> Fixture {
            init_logging();
            let launcher_dir = tempfile::tempdir().expect("tempdir");
            let working_dir = tempfile::tempdir().expect("tempdir");
            let args_log = launcher_dir.path().join("args.log");
            let env_log = launcher_dir.path().join("env.log");
            let converter = recorder(
                launcher_dir.path(),
                "CreateBitfile",
                &args_log,
                BINDING,
                &env_log,
                exit_code,
            );
            write_file(
                launcher_dir.path(),
                "environment.ini",
                &format!(
                    "createBitfileExePath={}\n{BINDING}=PXIe-7976R\n",
                    converter.display()
                ),
            );
            Fixture {
                launcher_dir,
                working_dir,
                args_log,
                env_log,
            }
        }

        fn launcher(&self) -> BitfileLauncher {
            BitfileLauncher::new(self.launcher_dir.path(), self.working_dir.path())
        }

        fn expected_args(&self) -> Vec<String> {
            [
                self.launcher_dir.path().join("BitfileTemplate.lvbitx"),
                self.launcher_dir.path().join("CodeGenerationResults.lvtxt"),
                self.working_dir.path().join("toplevel.bin"),
            ]
            .iter()
            .map(|p| p.display().to_string())
            .collect()
        }
    }

    #[gtest]
    fn converter_receives_template_log_and_bitstream_in_order() {
        let fixture = Fixture::new(0);
        let outcome = fixture.launcher().run().expect("run");
        expect_that!(outcome, eq(&LaunchOutcome::BitfileCreated));
        expect_that!(outcome.exit_code(), eq(0));
        expect_that!(read_lines(&fixture.args_log), eq(&fixture.expected_args()));
    }

    #[gtest]
    fn missing_configuration_starts_nothing() {
        let fixture = Fixture::new(0);
        std::fs::remove_file(fixture.launcher_dir.path().join("environment.ini"))
            .expect("remove config");
        expect_that!(fixture.launcher().run(), err(anything()));
        expect_false!(fixture.args_log.exists());
        expect_false!(Path::new(&fixture.env_log).exists());
    }

    #[gtest]
    fn failing_converter_still_exits_zero() {
        let fixture = Fixture::new(3);
        let outcome = fixture.launcher().run().expect("run");
        expect_that!(
            outcome,
            eq(&LaunchOutcome::ToolFailed { exit_code: Some(3) })
        );
        expect_that!(outcome.exit_code(), eq(0));
        expect_that!(read_lines(&fixture.args_log), eq(&fixture.expected_args()));
    }

    #[gtest]
    fn repeated_runs_are_identical() {
        let fixture = Fixture::new(0);
        let first = fixture.launcher().run().expect("first run");
        let second = fixture.launcher().run().expect("second run");
        expect_that!(first, eq(&second));

        let mut twice = fixture.expected_args();
        twice.extend(fixture.expected_args());
        expect_that!(read_lines(&fixture.args_log), eq(&twice));
    }

    #[gtest]
    fn bindings_reach_only_the_converter() {
        let fixture = Fixture::new(0);
        fixture.launcher().run().expect("run");
        expect_that!(read_lines(&fixture.env_log), eq(&vec!["PXIe-7976R"]));
        expect_that!(std::env::var_os(BINDING), none());
    }
}
