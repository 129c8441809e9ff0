//! Declarative symlink trees.
//!
//! `linkpack` reads a recursive package configuration and resolves it into
//! a deterministic tree of `(target, link)` pairs, then renders, checks, or
//! applies that tree.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: the configuration model, its TOML/YAML codecs, and the loader
//! - **[`tree`]**: path model and the pure tree builder
//! - **[`fs`]**: the storage [`Driver`](fs::Driver) seam with real and recording implementations
//! - **[`commands`]**: subcommand orchestration (`show`, `check`, `install`, `init`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod tree;
