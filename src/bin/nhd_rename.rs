use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use indoc::indoc;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::io;
use std::path::PathBuf;

use nhd_rename::{NhdRenamer, RenameSettings};

fn command() -> Command {
    Command::new("nhd_rename")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rename NHD pattern files based on their metadata")
        .long_about(indoc!(
            r#"
            Rename NHD pattern files based on their metadata.

            Each file is renamed to `<town id>-<player id>_<pattern name>.nhd`, next to
            the original. When that name is taken, `_1`, `_2`, ... is appended.
        "#
        ))
        .arg(
            Arg::new("path")
                .required(true)
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Path to an NHD file or directory containing NHD files"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .short('n')
                .action(ArgAction::SetTrue)
                .help("Show what would be renamed without making changes"),
        )
}

fn init_logging() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialize logging: {e}");
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let path = matches
        .get_one::<PathBuf>("path")
        .context("missing required argument `path`")?;
    let settings = RenameSettings::new().dry_run(matches.get_flag("dry-run"));

    let mut renamer = NhdRenamer::new(settings, io::stdout().lock());
    renamer
        .run(path)
        .with_context(|| format!("failed while processing `{}`", path.display()))?;

    Ok(())
}

fn main() -> Result<()> {
    let matches = command().get_matches();
    init_logging();
    run(&matches)
}
