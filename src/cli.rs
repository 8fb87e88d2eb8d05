use std::path::PathBuf;

use clap::{Arg, ArgGroup, ArgMatches, Command};

use crate::patch::{EditSource, Request};

pub const FILE: &str = "file";
pub const FILE_SHORT: char = 'f';
pub const PLAN: &str = "plan";
pub const REPLACE_LINES: &str = "replace-lines";
pub const WITH: &str = "with";
pub const OUTPUT: &str = "output";
pub const OUTPUT_SHORT: char = 'o';
pub const DRY_RUN: &str = "dry-run";
pub const JSON: &str = "json";
pub const VERBOSE: &str = "verbose";
pub const VERBOSE_SHORT: char = 'v';

const EDIT_GROUP: &str = "edit";

pub fn build() -> Command {
    Command::new("region-splice")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Replace one contiguous region of a text file, leaving every other line untouched.")
        .arg(
            Arg::new(FILE)
                .short(FILE_SHORT)
                .long(FILE)
                .help("File to edit")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new(PLAN)
                .long(PLAN)
                .help("JSON edit plan describing which lines to keep and what to insert")
                .value_name("PLAN")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(REPLACE_LINES)
                .long(REPLACE_LINES)
                .help("Replace lines FIRST through LAST (1-based, inclusive)")
                .value_name("FIRST:LAST")
                .value_parser(parse_line_span)
                .requires(WITH),
        )
        .arg(
            Arg::new(WITH)
                .long(WITH)
                .help("File holding the replacement for --replace-lines")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .requires(REPLACE_LINES),
        )
        .group(
            ArgGroup::new(EDIT_GROUP)
                .args([PLAN, REPLACE_LINES])
                .required(true)
                .multiple(false),
        )
        .arg(
            Arg::new(OUTPUT)
                .short(OUTPUT_SHORT)
                .long(OUTPUT)
                .help("Write the result here instead of overwriting the file")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(DRY_RUN)
                .long(DRY_RUN)
                .help("Show what would be done without making changes")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new(JSON)
                .long(JSON)
                .help("Print the change report as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new(VERBOSE)
                .short(VERBOSE_SHORT)
                .long(VERBOSE)
                .help("Log debug output to stderr")
                .action(clap::ArgAction::SetTrue),
        )
}

/// Parses `FIRST:LAST` into a pair of 1-based line numbers.
fn parse_line_span(value: &str) -> Result<(usize, usize), String> {
    let (first, last) = value
        .split_once(':')
        .ok_or_else(|| format!("expected FIRST:LAST, got {value:?}"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid line number {part:?}: {e}"))
    };
    Ok((parse(first)?, parse(last)?))
}

/// Builds a run request from parsed arguments.
pub fn request_from(matches: &ArgMatches) -> Result<Request, String> {
    let file = matches
        .get_one::<PathBuf>(FILE)
        .cloned()
        .ok_or("--file is required")?;

    let edit = if let Some(plan) = matches.get_one::<PathBuf>(PLAN) {
        EditSource::Plan(plan.clone())
    } else {
        let (first, last) = matches
            .get_one::<(usize, usize)>(REPLACE_LINES)
            .copied()
            .ok_or("either --plan or --replace-lines is required")?;
        let with = matches
            .get_one::<PathBuf>(WITH)
            .cloned()
            .ok_or("--replace-lines requires --with")?;
        EditSource::ReplaceLines { first, last, with }
    };

    Ok(Request {
        file,
        edit,
        output: matches.get_one::<PathBuf>(OUTPUT).cloned(),
        dry_run: matches.get_flag(DRY_RUN),
    })
}
