//! # docindex
//!
//! A CLI tool that writes an HTML index page for a directory of documents,
//! using a CSV file to describe them.
//!
//! ## Overview
//!
//! docindex is built on top of docindexlib. It lists the PDFs in a directory,
//! matches them by filename against the rows of `sources.csv`, and prints one
//! table row per document: a link to the file, its description, an optional
//! blog link, any extra CSV columns, and the file size.
//!
//! ## Usage
//!
//! ```bash
//! # Index the current directory
//! docindex > index.html
//!
//! # Newest-first naming scheme: reverse the listing
//! docindex ~/papers --reverse -o ~/papers/index.html
//!
//! # Several extensions, skip drafts
//! docindex --ext pdf --ext epub --exclude "draft-*"
//!
//! # Fail on duplicate filenames in the CSV
//! docindex --strict
//!
//! # Inspect the table as JSON
//! docindex --format json
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use docindexlib::{build_listing, DuplicatePolicy, ListingOptions};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("docindex")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Generate an HTML index of documents described by a CSV file")
        .arg(
            Arg::new("path")
                .help("Directory to index (defaults to current directory)")
                .default_value("."),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("Metadata file, relative to the directory unless absolute [default: sources.csv]"),
        )
        .arg(
            Arg::new("ext")
                .short('x')
                .long("ext")
                .action(ArgAction::Append)
                .help("Extension to list (can be specified multiple times) [default: pdf]"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Exclude filenames matching glob pattern"),
        )
        .arg(
            Arg::new("reverse")
                .short('r')
                .long("reverse")
                .action(ArgAction::SetTrue)
                .help("List files in reverse order"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .action(ArgAction::SetTrue)
                .help("Fail when the CSV describes the same file twice"),
        )
        .arg(
            Arg::new("title")
                .short('t')
                .long("title")
                .help("Page title and heading"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("JSON configuration file; flags override its values"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_parser(["html", "json"])
                .default_value("html")
                .help("Output format"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Write to a file instead of stdout"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log more (repeat for debug output)"),
        )
}

/// Install the stderr logger. `RUST_LOG` wins over `-v`.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Build listing options from the config file and flags
fn build_options(matches: &ArgMatches) -> anyhow::Result<ListingOptions> {
    let mut options = match matches.get_one::<String>("config") {
        Some(path) => ListingOptions::from_json_file(path)?,
        None => ListingOptions::new(),
    };

    if let Some(csv) = matches.get_one::<String>("csv") {
        options.csv = PathBuf::from(csv);
    }

    if let Some(exts) = matches.get_many::<String>("ext") {
        options.extensions = exts.cloned().collect();
    }

    if let Some(excludes) = matches.get_many::<String>("exclude") {
        options.exclude.extend(excludes.cloned());
    }

    if matches.get_flag("reverse") {
        options.reverse = true;
    }

    if matches.get_flag("strict") {
        options.duplicates = DuplicatePolicy::Reject;
    }

    if let Some(title) = matches.get_one::<String>("title") {
        options.page.title = title.clone();
        options.page.heading = title.clone();
    }

    Ok(options)
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let path = matches
        .get_one::<String>("path")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let options = build_options(matches)?;
    debug!(?options, "resolved options");

    let listing = build_listing(path, &options)
        .with_context(|| format!("cannot build listing for '{path}'"))?;

    let rendered = match matches.get_one::<String>("format").map(|s| s.as_str()) {
        Some("json") => {
            let mut json = serde_json::to_string_pretty(&listing.table)?;
            json.push('\n');
            json
        }
        _ => listing.to_html(&options),
    };

    match matches.get_one::<String>("output") {
        Some(out) => {
            fs::write(out, rendered).with_context(|| format!("cannot write '{out}'"))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_count("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
