use super::{color_scheme, legend_list};
use crate::cli::args::TexQueryTimesArgs;
use crate::cli::commands::create_output;
use crate::context::TaskContext;
use crate::exit_codes::EXIT_SUCCESS;
use crate::templates;
use benchrep_core::parse::DelimitedReader;
use benchrep_core::{labels, render, template};
use regex::Regex;
use std::collections::HashMap;
use std::io::Write;

/// Plots one query's result arrival times as one line per experiment:
/// the Nth result of each experiment against the timestamp it arrived at.
pub fn run(args: TexQueryTimesArgs, ctx: &TaskContext) -> anyhow::Result<i32> {
    let directories = &args.source.experiment_dir;
    let experiment_names = labels::experiment_names(
        directories,
        args.source.override_experiment_labels.as_deref(),
    )?;
    let experiment_ids: Vec<usize> = (0..experiment_names.len()).collect();
    let scheme = color_scheme(&args.color, directories.len());

    // arrival_rows[i] maps experiment id to that experiment's i-th
    // arrival timestamp; only the first record of the query counts.
    let mut arrival_rows: Vec<HashMap<usize, String>> = Vec::new();
    for (experiment_id, directory) in directories.iter().enumerate() {
        let mut found = false;
        let input = directory.join(&args.source.input_name);
        for record in DelimitedReader::open(&input, args.source.input_delimiter)? {
            let record = record?;
            if found || record.field("name") != Some(args.query.as_str()) {
                continue;
            }
            found = true;
            let timestamps = record.field("timestamps").unwrap_or("");
            for (index, timestamp) in timestamps.split([' ', ',']).enumerate() {
                if index >= arrival_rows.len() {
                    arrival_rows.push(HashMap::new());
                }
                arrival_rows[index].insert(experiment_id, timestamp.to_string());
            }
        }
    }

    // Pivoted data file: one column per experiment, one row per arrival.
    let csv_path = ctx.cwd.join(format!("{}.csv", args.name));
    let mut out = create_output(&csv_path)?;
    writeln!(out, "{}", experiment_names.join(";"))?;
    for row in &arrival_rows {
        let cells: Vec<String> = experiment_ids
            .iter()
            .map(|id| row.get(id).cloned().unwrap_or_default())
            .collect();
        writeln!(out, "{}", cells.join(";"))?;
    }
    out.flush()?;

    let lines: Vec<String> = experiment_names
        .iter()
        .map(|name| {
            format!(
                "\\addplot+[mark=none] table [y expr=\\coordindex+1, x={name}, \
col sep=semicolon]{{\"{}.csv\"}};",
                args.name
            )
        })
        .collect();

    let mut values: Vec<(&str, String)> = vec![
        ("LEGEND", legend_list(&experiment_names)),
        ("LINES", lines.join("\n")),
        ("COLOR_SCHEME", scheme),
        ("LEGEND_POS", args.legend_pos.clone()),
    ];
    if let Some(max_y) = args.max_y {
        values.push(("Y_MAX", format!("ymax={max_y},")));
    }

    let show_legend = args.legend;
    let log_y = args.log_y;
    let modifier = move |mut contents: String| {
        if !show_legend {
            let legend = Regex::new(r"(?m)^\\legend.*$").expect("static pattern");
            contents = legend.replace_all(&contents, "").into_owned();
        }
        if log_y {
            let ymin = Regex::new(r"(?m)^ymin=0,$").expect("static pattern");
            contents = ymin
                .replace(&contents, "ymode=log,log origin=infty,")
                .into_owned();
        }
        contents
    };

    let template_text = ctx.template("plot_query_times.tex", templates::PLOT_QUERY_TIMES_TEX)?;
    let tex_path = ctx.cwd.join(format!("{}.tex", args.name));
    template::instantiate_to_file(&template_text, &tex_path, &values, Some(&modifier))?;

    if args.svg {
        render::tex_to_svg(&args.name, &ctx.cwd)?;
    }

    println!("✓ Wrote {}", tex_path.display());
    Ok(EXIT_SUCCESS)
}
