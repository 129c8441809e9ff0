use std::io::Write as _;

use anyhow::Result;
use clap::Parser;

use linkpack::cli::{Cli, Command};
use linkpack::commands::{self, Workspace};
use linkpack::fs::OsDriver;
use linkpack::logging::{Logger, init_subscriber};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    let name = args.command.name();
    init_subscriber(args.verbose, name);
    let log = Logger::new(name);

    let result = dispatch(&args, &log);

    if let Err(e) = &result
        && let Some(path) = log.log_path()
    {
        log.debug(&format!("{name} failed: {e:#}; log at {}", path.display()));
    }
    result
}

fn dispatch(args: &Cli, log: &Logger) -> Result<()> {
    let driver = OsDriver;
    let workspace = || Workspace::from_env(&args.global);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &args.command {
        Command::Show(opts) => commands::show::run(&driver, &workspace()?, opts, &mut out, log),
        Command::Check(opts) => commands::check::run(&driver, &workspace()?, opts, &mut out, log),
        Command::Install(opts) => {
            commands::install::run(&driver, &workspace()?, opts, log).map(drop)
        }
        Command::Init(opts) => commands::init::run(&driver, &workspace()?, opts, log).map(drop),
        Command::Version => {
            let version = option_env!("LINKPACK_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            writeln!(out, "linkpack {version}").map_err(Into::into)
        }
    }
}
