use crate::cli::args::GhbenchArgs;
use crate::cli::commands::{filter_matches, query_filter};
use crate::context::TaskContext;
use crate::exit_codes::EXIT_SUCCESS;
use anyhow::Context;
use benchrep_core::labels;
use benchrep_core::parse::DelimitedReader;
use benchrep_core::record::numeric_field;
use benchrep_core::{stats, OrderedMap};
use serde::Serialize;

/// One entry of the Benchmark Github Action data file.
#[derive(Debug, Serialize)]
struct BenchmarkEntry {
    name: String,
    unit: String,
    value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extra: Option<String>,
}

struct QuerySamples {
    name: String,
    values: Vec<f64>,
    extra: String,
}

/// Aggregates average query times into the JSON format consumed by the
/// Benchmark Github Action.
pub fn run(args: GhbenchArgs, ctx: &TaskContext) -> anyhow::Result<i32> {
    let experiment_names = labels::experiment_names(
        &args.source.experiment_dir,
        args.source.override_experiment_labels.as_deref(),
    )?;
    let filter = query_filter(&args.query_regex)?;

    let mut entries: Vec<BenchmarkEntry> = Vec::new();
    for (experiment_id, directory) in args.source.experiment_dir.iter().enumerate() {
        let mut raw: OrderedMap<QuerySamples> = OrderedMap::new();

        let input = directory.join(&args.source.input_name);
        for record in DelimitedReader::open(&input, args.source.input_delimiter)? {
            let record = record?;
            let query = record.field("name").unwrap_or("");
            if !filter_matches(&filter, query) {
                continue;
            }
            let value = numeric_field(&record, "time");
            if let Some(samples) = raw.get_mut(query) {
                samples.values.push(value);
            } else {
                raw.insert(
                    query,
                    QuerySamples {
                        name: format!("{} - {}", experiment_names[experiment_id], query),
                        values: vec![value],
                        extra: format!(
                            "Results: {}; Error: {}; HTTP Requests: {}",
                            record.field("results").unwrap_or(""),
                            record.field("error").unwrap_or(""),
                            record.field("httpRequests").unwrap_or(""),
                        ),
                    },
                );
            }
        }

        let mut total = 0.0;
        for (_, samples) in raw.iter() {
            let value = stats::average(&samples.values);
            total += value;
            if args.detailed {
                entries.push(BenchmarkEntry {
                    name: samples.name.clone(),
                    unit: "ms".to_string(),
                    value,
                    range: None,
                    extra: Some(samples.extra.clone()),
                });
            }
        }
        if args.total {
            entries.push(BenchmarkEntry {
                name: experiment_names[experiment_id].clone(),
                unit: "ms".to_string(),
                value: total,
                range: None,
                extra: None,
            });
        }
    }

    let out_path = ctx.cwd.join(&args.name);
    let json = serde_json::to_string_pretty(&entries).context("failed to serialize entries")?;
    std::fs::write(&out_path, json)
        .with_context(|| format!("failed to write {}", out_path.display()))?;

    println!("✓ Wrote {}", out_path.display());
    Ok(EXIT_SUCCESS)
}
