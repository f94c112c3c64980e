// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use crate::Invocation;

use doty::{cli::ExitStatus, error::ErrorKind, log::LevelControl, options::LogLevel};

use indoc::indoc;
use sealed_test::prelude::*;
use simple_test_case::test_case;
use std::{
    env,
    fs::{create_dir_all, write},
};
use toml::Value;

#[test]
fn bare_doty_builds() {
    let doty = Invocation::new(&["doty", "-n"]);
    let error = doty.doty_error();

    assert_eq!(error.kind(), ErrorKind::NotImplemented);
    assert_eq!(error.payload().get("operation"), Some(&Value::from("build")));
    assert_eq!(error.payload().get("dry_run"), Some(&Value::from(true)));
    assert_eq!(error.payload().get("preserve_tmp"), Some(&Value::from(false)));
    assert_eq!(doty.status(), ExitStatus::Failure);
}

#[test]
fn global_flags_reach_leaf_from_anywhere() {
    let doty = Invocation::new(&[
        "doty",
        "-c",
        "outer.toml",
        "-K",
        "doty.key",
        "populate",
        "--preserve-tmp=true",
    ]);
    let error = doty.doty_error();

    assert_eq!(error.payload().get("operation"), Some(&Value::from("populate")));
    assert_eq!(error.payload().get("config_file"), Some(&Value::from("outer.toml")));
    assert_eq!(error.payload().get("key_file"), Some(&Value::from("doty.key")));
    assert_eq!(error.payload().get("preserve_tmp"), Some(&Value::from(true)));
}

#[test_case(&["doty", "-K", "doty.key", "pkg"], "status"; "key file onto pkg default")]
#[test_case(&["doty", "-K", "doty.key", "pkg", "status"], "status"; "key file onto pkg leaf")]
#[test_case(&["doty", "-p", "pkg", "upgrade"], "upgrade"; "preserve tmp onto pkg leaf")]
#[test_case(&["doty", "-p", "-K", "doty.key", "internal", "run-configure", "Testfile.sh", "pre"], "run-configure"; "global flags onto internal leaf")]
#[test]
fn global_flags_land_on_every_node(args: &[&str], operation: &str) {
    let doty = Invocation::new(args);
    let error = doty.doty_error();

    assert_eq!(error.kind(), ErrorKind::NotImplemented);
    assert_eq!(error.payload().get("operation"), Some(&Value::from(operation)));
}

#[test]
fn preserve_tmp_moved_onto_health_parses() {
    let doty = Invocation::new(&["doty", "-p", "health", "-q"]);
    assert_ne!(doty.status(), ExitStatus::Usage, "{:?}", doty.result);
}

#[test]
fn clustered_short_flags_keep_their_value() {
    let doty = Invocation::new(&["doty", "-nc", "doty.toml", "build"]);
    let payload = doty.doty_error().payload();

    assert_eq!(payload.get("operation"), Some(&Value::from("build")));
    assert_eq!(payload.get("config_file"), Some(&Value::from("doty.toml")));
    assert_eq!(payload.get("dry_run"), Some(&Value::from(true)));
}

#[test]
fn explicit_false_dry_run_sticks() {
    let doty = Invocation::new(&["doty", "pkg", "upgrade", "--dry-run=false"]);
    assert_eq!(doty.doty_error().payload().get("dry_run"), Some(&Value::from(false)));
}

#[test]
fn verbose_switches_logger_to_debug() {
    let doty = Invocation::new(&["doty", "-V", "crypto", "key"]);

    assert_eq!(doty.logger.level(), LogLevel::Debug);
    assert!(doty.logger.is_debug());
}

#[test]
fn log_level_reaches_logger() {
    let doty = Invocation::new(&["doty", "--log-level", "warning", "pkg"]);
    assert_eq!(doty.logger.level(), LogLevel::Warning);
}

#[test]
fn run_configure_carries_script_and_commands() {
    let doty = Invocation::new(&[
        "doty",
        "internal",
        "run-configure",
        "Testfile.sh",
        "pre-populate",
        "post-populate",
    ]);
    let payload = doty.doty_error().payload();

    assert_eq!(payload.get("operation"), Some(&Value::from("run-configure")));
    assert_eq!(payload.get("file"), Some(&Value::from("Testfile.sh")));
    assert_eq!(
        payload.get("commands"),
        Some(&Value::from(vec!["pre-populate", "post-populate"]))
    );
}

#[test_case(&["doty", "--help"], ExitStatus::Success; "help")]
#[test_case(&["doty", "pkg", "status", "--version"], ExitStatus::Success; "version on leaf")]
#[test_case(&["doty", "internal"], ExitStatus::Success; "internal shows help")]
#[test_case(&["doty", "crypto", "file"], ExitStatus::Success; "crypto file shows help")]
#[test_case(&["doty", "--bogus"], ExitStatus::Usage; "unknown flag")]
#[test_case(&["doty", "--log-level", "loud"], ExitStatus::Usage; "bad log level")]
#[test_case(&["doty", "internal", "run-configure", "Testfile.sh"], ExitStatus::Usage; "missing hook")]
#[test_case(&["doty", "crypto", "modify"], ExitStatus::Failure; "stub operation")]
#[test]
fn exit_status(args: &[&str], expect: ExitStatus) {
    assert_eq!(Invocation::new(args).status(), expect);
}

#[sealed_test]
fn config_show_renders_explicit_file() -> anyhow::Result<()> {
    write(
        "doty.toml",
        indoc! {r#"
            [settings]
            dotfiles_dir = "/srv/dotfiles"
            target_dir = "/home/blah"
        "#},
    )?;

    let doty = Invocation::new(&["doty", "config", "-c", "doty.toml"]);
    assert!(doty.result.is_ok(), "{:?}", doty.result);

    Ok(())
}

#[cfg(target_os = "linux")]
#[sealed_test]
fn config_show_uses_default_file() -> anyhow::Result<()> {
    // INVARIANT: XDG_CONFIG_HOME is ignored unless absolute.
    env::set_var("XDG_CONFIG_HOME", env::current_dir()?.join("xdg"));
    create_dir_all("xdg/doty")?;
    write(
        "xdg/doty/config.toml",
        indoc! {r#"
            [settings]
            dotfiles_dir = "/srv/dotfiles"
            target_dir = "/home/blah"
        "#},
    )?;

    let doty = Invocation::new(&["doty", "config", "show"]);
    assert!(doty.result.is_ok(), "{:?}", doty.result);

    Ok(())
}

#[sealed_test]
fn config_show_missing_file_fails() {
    let doty = Invocation::new(&["doty", "config", "show", "-c", "missing.toml"]);

    assert_eq!(doty.doty_error().kind(), ErrorKind::Config);
    assert_eq!(doty.status(), ExitStatus::Failure);
}
