//! Integration tests for `show`, driven through the recording driver.
#![cfg(unix)]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]

use std::path::PathBuf;

use linkpack::cli::{GlobalOpts, ShowOpts};
use linkpack::commands::{Workspace, show};
use linkpack::fs::{Call, Op, RecordingDriver};
use linkpack::logging::Logger;

const CONFIG_PATH: &str = "/dots/linkpack.toml";

const CONFIG: &str = r#"baseDir = "${HOME}"
targets = ["vimrc", "config"]

[options.vimrc]
link = ".vimrc"

[options.config]
link = ".config"
targets = ["nvim"]

[options.unused]
targets = ["ignored"]
"#;

fn env(name: &str) -> Option<String> {
    match name {
        "HOME" => Some("/home/user".to_string()),
        _ => None,
    }
}

fn workspace() -> Workspace {
    let global = GlobalOpts {
        config: PathBuf::from(CONFIG_PATH),
        base_dir: None,
        source: None,
    };
    Workspace::resolve(&global, Some(PathBuf::from("/work")), env).unwrap()
}

fn render(driver: &RecordingDriver, json: bool) -> (anyhow::Result<()>, String) {
    let mut out = Vec::new();
    let result = show::run(
        driver,
        &workspace(),
        &ShowOpts { json },
        &mut out,
        &Logger::new("test"),
    );
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn json_output_is_sorted_and_substituted() {
    let driver = RecordingDriver::new().with_file(CONFIG_PATH, CONFIG);
    let (result, out) = render(&driver, true);
    result.unwrap();

    insta::assert_snapshot!(out, @r#"
    {
      "root": {
        "children": [
          {
            "target": {
              "base": "",
              "segments": [
                "config"
              ]
            },
            "link": {
              "base": "/home/user",
              "segments": [
                ".config"
              ]
            },
            "children": [
              {
                "target": {
                  "base": "",
                  "segments": [
                    "config",
                    "nvim"
                  ]
                },
                "link": {
                  "base": "/home/user",
                  "segments": [
                    ".config",
                    "nvim"
                  ]
                }
              }
            ]
          },
          {
            "target": {
              "base": "",
              "segments": [
                "vimrc"
              ]
            },
            "link": {
              "base": "/home/user",
              "segments": [
                ".vimrc"
              ]
            }
          }
        ]
      }
    }
    "#);
}

#[test]
fn text_output_lists_every_link() {
    let driver = RecordingDriver::new().with_file(CONFIG_PATH, CONFIG);
    let (result, out) = render(&driver, false);
    result.unwrap();

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4, "{out}");
    assert_eq!(lines[0], ".");
    assert!(lines[1].ends_with("/home/user/.config -> config"), "{out}");
    assert!(lines[2].ends_with("/home/user/.config/nvim -> config/nvim"), "{out}");
    assert!(lines[3].ends_with("/home/user/.vimrc -> vimrc"), "{out}");
}

#[test]
fn reads_only_the_configuration() {
    let driver = RecordingDriver::new().with_file(CONFIG_PATH, CONFIG);
    let (result, _) = render(&driver, false);
    result.unwrap();

    assert_eq!(
        driver.calls(),
        [Call::ReadFile {
            path: PathBuf::from(CONFIG_PATH)
        }]
    );
}

#[test]
fn relative_base_dir_resolves_against_cwd() {
    let driver =
        RecordingDriver::new().with_file(CONFIG_PATH, "baseDir = \"out\"\ntargets = [\"a\"]\n");
    let (result, out) = render(&driver, false);
    result.unwrap();
    assert!(out.contains("/work/out/a -> a"), "{out}");
}

#[test]
fn default_base_dir_comes_from_environment() {
    let driver = RecordingDriver::new().with_file(CONFIG_PATH, "targets = [\"a\"]\n");
    let (result, out) = render(&driver, false);
    result.unwrap();
    assert!(out.contains("/home/user/.config/a -> a"), "{out}");
}

#[test]
fn read_failure_produces_no_output() {
    let driver = RecordingDriver::new().with_error(
        Op::ReadFile,
        CONFIG_PATH,
        std::io::ErrorKind::PermissionDenied,
    );
    let (result, out) = render(&driver, false);

    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("failed to read configuration"), "{err}");
    assert!(out.is_empty());
}

#[test]
fn missing_configuration_is_an_error() {
    let (result, out) = render(&RecordingDriver::new(), true);
    assert!(result.is_err());
    assert!(out.is_empty());
}

#[test]
fn malformed_document_produces_no_output() {
    let driver = RecordingDriver::new().with_file(CONFIG_PATH, "targets = \"vimrc\"\n");
    let (result, out) = render(&driver, false);

    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("failed to decode configuration"), "{err}");
    assert!(out.is_empty());
}

#[test]
fn undefined_variable_produces_no_output() {
    let driver = RecordingDriver::new().with_file(
        CONFIG_PATH,
        "targets = [\"a\"]\n[options.a]\nlink = \"${MISSING}\"\n",
    );
    let (result, out) = render(&driver, false);

    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("failed to resolve configuration"), "{err}");
    assert!(format!("{err:#}").contains("undefined variable 'MISSING'"), "{err:#}");
    assert!(out.is_empty());
}

#[test]
fn yaml_configuration_is_supported() {
    let driver = RecordingDriver::new().with_file(
        "/dots/linkpack.yaml",
        "baseDir: /srv\ntargets:\n  - b\n  - a\n",
    );
    let global = GlobalOpts {
        config: PathBuf::from("/dots/linkpack.yaml"),
        base_dir: None,
        source: None,
    };
    let ws = Workspace::resolve(&global, None, env).unwrap();
    let mut out = Vec::new();
    show::run(&driver, &ws, &ShowOpts { json: false }, &mut out, &Logger::new("test")).unwrap();

    let out = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[1].ends_with("/srv/a -> a"), "{out}");
    assert!(lines[2].ends_with("/srv/b -> b"), "{out}");
}
