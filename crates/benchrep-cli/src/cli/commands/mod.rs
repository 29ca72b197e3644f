use super::args::*;

pub mod csv;
pub mod stats;
pub mod tex;

use crate::context::TaskContext;
use anyhow::Context;
use regex::Regex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let ctx = TaskContext {
        cwd: cli.cwd,
        verbose: cli.verbose,
        templates_root: cli.templates_root,
    };
    tracing::debug!(cwd = %ctx.cwd.display(), "dispatching command");
    match cli.cmd {
        Command::Csv(args) => match args.cmd {
            CsvCmd::Query(args) => csv::query::run(args, &ctx),
            CsvCmd::Summary(args) => csv::summary::run(args, &ctx),
            CsvCmd::Wins(args) => csv::wins::run(args, &ctx),
            CsvCmd::Xml(args) => csv::xml::run(args, &ctx),
            CsvCmd::Ghbench(args) => csv::ghbench::run(args, &ctx),
        },
        Command::Tex(args) => match args.cmd {
            TexCmd::Query(args) => tex::query::run(args, &ctx),
            TexCmd::QueryTimes(args) => tex::query_times::run(args, &ctx),
        },
        Command::Stats(args) => match args.cmd {
            StatsCmd::Docker(args) => stats::docker::run(args, &ctx),
        },
    }
}

/// Compiles the optional query-name inclusion filter.
pub(crate) fn query_filter(pattern: &Option<String>) -> anyhow::Result<Option<Regex>> {
    pattern
        .as_deref()
        .map(|p| Regex::new(p).with_context(|| format!("invalid query regex '{p}'")))
        .transpose()
}

pub(crate) fn filter_matches(filter: &Option<Regex>, query: &str) -> bool {
    filter.as_ref().is_none_or(|regex| regex.is_match(query))
}

/// Parses the `--mark-rows` list; entries that are not numbers mark nothing.
pub(crate) fn parse_mark_rows(mark_rows: &Option<String>) -> Vec<usize> {
    mark_rows
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .filter_map(|value| value.trim().parse::<usize>().ok())
        .collect()
}

/// Creates a buffered output file for a table or plot artifact.
pub(crate) fn create_output(path: &Path) -> anyhow::Result<Box<dyn Write>> {
    let file = File::create(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}
