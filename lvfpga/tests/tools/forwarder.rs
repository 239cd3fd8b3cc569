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


use googletest::prelude::*;
use lvfpga::forwarder::Forwarder;
use lvfpga::process::{NOT_FOUND_EXIT_CODE, sibling_executable};
use std::ffi::OsString;
use std::path::Path;

#[gtest]
fn create_project_targets_the_sibling_tool() {
    let forwarder = Forwarder::create_project(Path::new("/opt/lvfpga/bin"));
    expect_that!(
        forwarder.program(),
        eq(sibling_executable(
            Path::new("/opt/lvfpga/bin"),
            "vivado-project-tools"
        ))
    );
    let invocation = forwarder.invocation(["--overwrite"]);
    expect_that!(
        invocation.args,
        eq(&vec![
            OsString::from("create_project"),
            OsString::from("--overwrite")
        ])
    );
}

#[gtest]
fn plain_forwarder_adds_nothing() {
    let invocation = Forwarder::new("/usr/bin/tool").invocation(["-u", "two words"]);
    expect_that!(
        invocation.args,
        eq(&vec![OsString::from("-u"), OsString::from("two words")])
    );
}

#[gtest]
fn missing_target_reports_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    expect_that!(
        Forwarder::new(dir.path().join("absent")).forward(["create_project"]),
        ok(eq(&NOT_FOUND_EXIT_CODE))
    );
}

#[cfg(unix)]
mod with_target {
    use crate::common::{read_lines, recorder};
    use googletest::prelude::*;
    use lvfpga::forwarder::Forwarder;
    use rstest::*;

    #[gtest]
    #[rstest]
    #[case::success(0)]
    #[case::failure(1)]
    #[case::other(42)]
    fn exit_code_is_passed_through(#[case] exit_code: i32) {
        let dir = tempfile::tempdir().expect("tempdir");
        let args_log = dir.path().join("args.log");
        let tool = recorder(
            dir.path(),
            "tool",
            &args_log,
            "HOME",
            &dir.path().join("env.log"),
            exit_code,
        );
        expect_that!(Forwarder::new(tool).forward(["--x"]), ok(eq(&exit_code)));
    }

    #[gtest]
    fn arguments_are_forwarded_verbatim() {
        let dir = tempfile::tempdir().expect("tempdir");
        let args_log = dir.path().join("args.log");
        recorder(
            dir.path(),
            "vivado-project-tools",
            &args_log,
            "HOME",
            &dir.path().join("env.log"),
            0,
        );
        let args = ["--overwrite", "-u", "with space", "", "*.vhd"];
        expect_that!(
            Forwarder::create_project(dir.path()).forward(args),
            ok(eq(&0))
        );

        let mut expected = vec!["create_project".to_string()];
        expected.extend(args.iter().map(|a| a.to_string()));
        expect_that!(read_lines(&args_log), eq(&expected));
    }
}
