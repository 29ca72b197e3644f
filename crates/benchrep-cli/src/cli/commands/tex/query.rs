use super::{color_scheme, legend_list};
use crate::cli::args::{Metric, TexQueryArgs};
use crate::cli::commands::{create_output, filter_matches, query_filter};
use crate::context::TaskContext;
use crate::exit_codes::EXIT_SUCCESS;
use crate::templates;
use benchrep_core::parse::DelimitedReader;
use benchrep_core::record::leading_int;
use benchrep_core::{labels, render, stats, template, OrderedMap, ReportError};
use regex::Regex;
use std::collections::HashMap;
use std::io::Write;

/// Plots per-query averages (with min/max error bars) as grouped bars,
/// one bar per experiment. For the time metric the first-result arrival
/// average is overlaid as a star marker.
pub fn run(args: TexQueryArgs, ctx: &TaskContext) -> anyhow::Result<i32> {
    let directories = &args.source.experiment_dir;
    let experiment_names = labels::experiment_names(
        directories,
        args.source.override_experiment_labels.as_deref(),
    )?;
    let filter = query_filter(&args.query_regex)?;
    let scheme = color_scheme(&args.color, directories.len());
    let metric = args.metric;

    // Accumulate mean/minus/plus columns per query, experiment by
    // experiment; insertion order fixes the row order of the plot data.
    let mut query_names: Option<Vec<String>> = None;
    let mut plot_rows: OrderedMap<Vec<f64>> = OrderedMap::new();
    let mut max_query_values: HashMap<String, f64> = HashMap::new();

    for directory in directories {
        let mut totals: OrderedMap<Vec<f64>> = OrderedMap::new();
        let mut first_arrivals: OrderedMap<Vec<f64>> = OrderedMap::new();

        let input = directory.join(&args.source.input_name);
        for record in DelimitedReader::open(&input, args.source.input_delimiter)? {
            let record = record?;
            let query = record.field("name").unwrap_or("");
            if !filter_matches(&filter, query) {
                continue;
            }
            let raw = match record.field(metric.field()) {
                Some(value) if !value.is_empty() => value,
                _ => "0",
            };
            let value = leading_int(raw).map_or(f64::NAN, |n| n as f64);
            let value = if value.is_nan() {
                value
            } else {
                value.max(args.zero_replacement)
            };
            totals.entry_or_insert_with(query, Vec::new).push(value);

            if let Some(timestamps) = record.field("timestamps") {
                if !timestamps.is_empty() {
                    let first = timestamps.split(' ').next().unwrap_or("");
                    let first = leading_int(first).map_or(f64::NAN, |n| n as f64);
                    first_arrivals
                        .entry_or_insert_with(query, Vec::new)
                        .push(first);
                }
            }
        }

        let mut averages: OrderedMap<f64> = OrderedMap::new();
        let mut minus: HashMap<String, f64> = HashMap::new();
        let mut plus: HashMap<String, f64> = HashMap::new();
        for (query, samples) in totals.iter() {
            let bars = stats::error_bars(samples);
            averages.insert(query.clone(), stats::average(samples));
            minus.insert(query.clone(), bars.below);
            plus.insert(query.clone(), bars.above);

            let max_value = stats::max(samples);
            max_query_values
                .entry(query.clone())
                .and_modify(|current| *current = current.max(max_value))
                .or_insert(max_value);
        }
        let mut first_averages: HashMap<String, f64> = HashMap::new();
        let mut first_minus: HashMap<String, f64> = HashMap::new();
        let mut first_plus: HashMap<String, f64> = HashMap::new();
        for (query, samples) in first_arrivals.iter() {
            let bars = stats::error_bars(samples);
            first_averages.insert(query.clone(), stats::average(samples));
            first_minus.insert(query.clone(), bars.below);
            first_plus.insert(query.clone(), bars.above);
        }

        // All experiments must report the same queries in the same order.
        match &query_names {
            None => {
                let names: Vec<String> = averages.keys().cloned().collect();
                for name in &names {
                    plot_rows.insert(name.clone(), Vec::new());
                }
                query_names = Some(names);
            }
            Some(existing) => {
                let current: Vec<String> = averages.keys().cloned().collect();
                if *existing != current {
                    return Err(ReportError::QuerySetMismatch.into());
                }
            }
        }

        for query in query_names.as_ref().expect("query names set above") {
            let row = plot_rows.get_mut(query).expect("row seeded above");
            row.push(averages.get(query).copied().unwrap_or(f64::NAN));
            row.push(minus.get(query).copied().unwrap_or(f64::NAN));
            row.push(plus.get(query).copied().unwrap_or(f64::NAN));
            if metric == Metric::Time {
                // A zero first-arrival means no timestamp was recorded.
                row.push(nonzero_or_nan(first_averages.get(query)));
                row.push(nonzero_or_nan(first_minus.get(query)));
                row.push(nonzero_or_nan(first_plus.get(query)));
            }
        }
    }

    let Some(raw_query_names) = query_names else {
        return Err(ReportError::NoQueries.into());
    };

    if args.relative {
        // Scale each query's columns so its largest observed value is 1.
        for query in raw_query_names.clone() {
            let scale = max_query_values.get(&query).copied().unwrap_or(f64::NAN);
            if let Some(row) = plot_rows.get_mut(&query) {
                for value in row.iter_mut() {
                    *value /= scale;
                }
            }
        }
    }

    let query_labels =
        labels::query_names(raw_query_names, args.override_query_labels.as_deref())?;
    let plot_rows = labels::relabel(plot_rows, &query_labels);

    // Plot data file.
    let experiment_ids: Vec<usize> = (0..experiment_names.len()).collect();
    let csv_path = ctx.cwd.join(format!("{}.csv", args.name));
    let mut out = create_output(&csv_path)?;
    let header_groups: Vec<String> = experiment_ids
        .iter()
        .map(|id| {
            let mut group = format!("{id}-mean;{id}-minus;{id}-plus");
            if metric == Metric::Time {
                group = format!("{group};{id}-first-mean;{id}-first-minus;{id}-first-plus");
            }
            group
        })
        .collect();
    writeln!(out, "query;{}", header_groups.join(";"))?;
    for (query, row) in plot_rows.iter() {
        let cells: Vec<String> = row.iter().map(|value| format!("{value}")).collect();
        writeln!(out, "{query};{}", cells.join(";"))?;
    }
    out.flush()?;

    // Bar definitions referencing the data file.
    let y_modifier = if metric == Metric::Time && !args.relative {
        " / 1000"
    } else {
        ""
    };
    let mut bar_lines: Vec<String> = experiment_ids
        .iter()
        .map(|&id| {
            let offset = bar_offset(id, experiment_names.len());
            let legend_shift = if offset == 0.0 { 0.0 } else { -offset };
            format!(
                "\\addplot+[ybar, xshift={offset}pt,legend image post style={{xshift={legend_shift}pt}}] \
table [x=query, y expr=(\\thisrow{{{id}-mean}}{y_modifier}), \
y error plus expr=(\\thisrow{{{id}-plus}}{y_modifier}), \
y error minus expr=(\\thisrow{{{id}-minus}}{y_modifier}), \
col sep=semicolon]{{\"{}.csv\"}};",
                args.name
            )
        })
        .collect();
    if metric == Metric::Time {
        bar_lines.extend(experiment_ids.iter().map(|&id| {
            let offset = bar_offset(id, experiment_names.len());
            format!(
                "\\addplot+[only marks,xshift={offset}pt,mark=star,mark options={{color=gray,scale=0.5}}] \
table [x=query, y expr=(\\thisrow{{{id}-first-mean}}{y_modifier}), \
col sep=semicolon]{{\"{}.csv\"}};",
                args.name
            )
        }));
    }

    let mut values: Vec<(&str, String)> = vec![
        ("X_LIMITS", (directories.len() * 2).to_string()),
        (
            "WIDTH",
            (query_labels.len() * (experiment_names.len() + 1) * 4).to_string(),
        ),
        ("QUERIES", query_labels.join(",")),
        ("LEGEND", legend_list(&experiment_names)),
        ("BARS", bar_lines.join("\n")),
        ("COLOR_SCHEME", scheme),
        ("LEGEND_POS", args.legend_pos.clone()),
    ];
    if let Some(max_y) = args.max_y {
        values.push(("Y_MAX", format!("ymax={max_y},")));
    }

    let show_legend = args.legend;
    let log_y = args.log_y;
    let relative = args.relative;
    let modifier = move |mut contents: String| {
        if !show_legend {
            let legend = Regex::new(r"\\legend\{.*\}").expect("static pattern");
            contents = legend.replace_all(&contents, "").into_owned();
        }
        if log_y {
            contents = contents.replace(
                "ymin=0,",
                "ymin=0.000001,ymode=log,log origin=infty,log basis y={10},",
            );
            contents = contents.replace(" / 1000)", " / 1000)+1e-5");
        }
        if relative {
            contents = contents.replace("ylabel={Duration (s)},", "ylabel={},");
        }
        if metric == Metric::HttpRequests {
            contents = contents.replace("ylabel={Duration (s)},", "ylabel={HTTP Requests},");
        }
        contents
    };

    let template_text = ctx.template("plot_query_data.tex", templates::PLOT_QUERY_DATA_TEX)?;
    let tex_path = ctx.cwd.join(format!("{}.tex", args.name));
    template::instantiate_to_file(&template_text, &tex_path, &values, Some(&modifier))?;

    if args.svg {
        render::tex_to_svg(&args.name, &ctx.cwd)?;
    }

    println!("✓ Wrote {}", tex_path.display());
    Ok(EXIT_SUCCESS)
}

/// Horizontal shift of an experiment's bars within each query group.
fn bar_offset(id: usize, experiment_count: usize) -> f64 {
    (id as f64 - (experiment_count as f64 - 1.0) / 2.0) * 2.75
}

/// Missing and zero both mean "nothing arrived"; either renders as NaN so
/// the star marker is skipped instead of drawn at the axis.
fn nonzero_or_nan(value: Option<&f64>) -> f64 {
    match value {
        Some(&v) if v != 0.0 => v,
        _ => f64::NAN,
    }
}
