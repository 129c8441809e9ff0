//! Integration tests for `install`, `check`, and `init` against a real
//! temporary directory.
#![cfg(unix)]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]

mod common;

use common::{IntegrationTestContext, link_target, logger};
use linkpack::cli::{CheckOpts, InitOpts, InstallOpts};
use linkpack::commands::{check, init, install};
use linkpack::fs::OsDriver;

const CONFIG: &str = r#"targets = ["vimrc", "config"]

[options.vimrc]
link = ".vimrc"

[options.config]
link = ".config"
targets = ["nvim", "git"]
"#;

fn context() -> IntegrationTestContext {
    let ctx = IntegrationTestContext::new();
    ctx.add_file("vimrc")
        .add_dir("config/nvim")
        .add_file("config/git")
        .write_config(CONFIG);
    ctx
}

#[test]
fn install_creates_every_link() {
    let ctx = context();
    let summary = install::run(&OsDriver, &ctx.workspace(), &InstallOpts::default(), &logger())
        .unwrap();

    assert_eq!(summary.created, 3);
    assert_eq!(summary.conflicts, 0);
    assert_eq!(link_target(&ctx.home().join(".vimrc")), ctx.source().join("vimrc"));
    assert_eq!(
        link_target(&ctx.home().join(".config").join("nvim")),
        ctx.source().join("config").join("nvim")
    );
    assert_eq!(
        link_target(&ctx.home().join(".config").join("git")),
        ctx.source().join("config").join("git")
    );
    assert!(ctx.home().join(".config").is_dir());
}

#[test]
fn install_is_idempotent() {
    let ctx = context();
    let ws = ctx.workspace();
    install::run(&OsDriver, &ws, &InstallOpts::default(), &logger()).unwrap();
    let again = install::run(&OsDriver, &ws, &InstallOpts::default(), &logger()).unwrap();

    assert_eq!(again.created, 0);
    assert_eq!(again.existing, 3);
}

#[test]
fn dry_run_leaves_destination_untouched() {
    let ctx = context();
    let summary =
        install::run(&OsDriver, &ctx.workspace(), &InstallOpts { dry_run: true }, &logger())
            .unwrap();

    assert_eq!(summary.created, 3);
    assert_eq!(std::fs::read_dir(ctx.home()).unwrap().count(), 0);
}

#[test]
fn conflicting_file_is_preserved() {
    let ctx = context();
    std::fs::write(ctx.home().join(".vimrc"), "mine").unwrap();

    let log = logger();
    let summary = install::run(&OsDriver, &ctx.workspace(), &InstallOpts::default(), &log).unwrap();

    assert_eq!(summary.conflicts, 1);
    assert_eq!(summary.created, 2);
    assert_eq!(log.warning_count(), 1);
    assert_eq!(std::fs::read_to_string(ctx.home().join(".vimrc")).unwrap(), "mine");
}

#[test]
fn check_reports_missing_then_linked() {
    let ctx = context();
    let ws = ctx.workspace();

    let mut out = Vec::new();
    let err = check::run(&OsDriver, &ws, &CheckOpts::default(), &mut out, &logger()).unwrap_err();
    assert!(err.to_string().contains("3 link(s) not in place"), "{err}");
    let report = String::from_utf8(out).unwrap();
    assert_eq!(report.lines().filter(|l| l.starts_with("missing\t")).count(), 3);

    install::run(&OsDriver, &ws, &InstallOpts::default(), &logger()).unwrap();

    let mut out = Vec::new();
    check::run(&OsDriver, &ws, &CheckOpts::default(), &mut out, &logger()).unwrap();
    let report = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 3, "{report}");
    assert!(lines.iter().all(|l| l.starts_with("linked\t")), "{report}");
    assert!(lines[0].ends_with(".config/git"), "{report}");
    assert!(lines[2].ends_with(".vimrc"), "{report}");
}

#[test]
fn init_then_install_links_every_entry() {
    let ctx = IntegrationTestContext::new();
    ctx.add_file("zshrc").add_file("bashrc").add_file(".hidden");
    let ws = ctx.workspace();

    let config = init::run(&OsDriver, &ws, &InitOpts::default(), &logger()).unwrap();
    assert_eq!(config.targets, ["bashrc", "zshrc"]);
    assert!(ctx.config_path().is_file());

    let err = init::run(&OsDriver, &ws, &InitOpts::default(), &logger()).unwrap_err();
    assert!(err.to_string().contains("already exists"), "{err}");

    let summary = install::run(&OsDriver, &ws, &InstallOpts::default(), &logger()).unwrap();
    assert_eq!(summary.created, 2);
    assert_eq!(link_target(&ctx.home().join("zshrc")), ctx.source().join("zshrc"));
}
