use crate::cli::args::SummaryArgs;
use crate::cli::commands::{create_output, filter_matches, parse_mark_rows, query_filter};
use crate::context::TaskContext;
use crate::exit_codes::EXIT_SUCCESS;
use benchrep_core::labels;
use benchrep_core::parse::DelimitedReader;
use benchrep_core::record::numeric_field;
use benchrep_core::table;
use benchrep_core::{stats, OrderedMap};

/// One row per (experiment, query): average time, last reported result
/// count, and the last error flag.
pub fn run(args: SummaryArgs, ctx: &TaskContext) -> anyhow::Result<i32> {
    let experiment_names = labels::experiment_names(
        &args.source.experiment_dir,
        args.source.override_experiment_labels.as_deref(),
    )?;
    let filter = query_filter(&args.query_regex)?;
    let mark_rows = parse_mark_rows(&args.mark_rows);

    let out_path = ctx.cwd.join(&args.name);
    let mut serializer = table::serializer(args.markdown, create_output(&out_path)?);
    let header: Vec<String> = ["Experiment", "Query", "Time", "Results", "Timeout"]
        .map(String::from)
        .into();
    serializer.write_header(&header, &[])?;

    let mut row_id = 0usize;
    for (experiment_id, directory) in args.source.experiment_dir.iter().enumerate() {
        let mut times: OrderedMap<Vec<f64>> = OrderedMap::new();
        let mut results: OrderedMap<String> = OrderedMap::new();
        let mut timeouts: OrderedMap<String> = OrderedMap::new();

        let input = directory.join(&args.source.input_name);
        for record in DelimitedReader::open(&input, args.source.input_delimiter)? {
            let record = record?;
            let query = record.field("name").unwrap_or("");
            if !filter_matches(&filter, query) {
                continue;
            }
            times
                .entry_or_insert_with(query, Vec::new)
                .push(numeric_field(&record, "time"));
            results.insert(query, record.field("results").unwrap_or("").to_string());
            timeouts.insert(query, record.field("error").unwrap_or("").to_string());
        }

        let averages: OrderedMap<f64> = times
            .iter()
            .map(|(query, samples)| (query.clone(), stats::average(samples)))
            .collect();

        let query_labels = labels::query_names(
            results.keys().cloned().collect(),
            args.override_query_labels.as_deref(),
        )?;
        let averages = labels::relabel(averages, &query_labels);
        let results = labels::relabel(results, &query_labels);
        let timeouts = labels::relabel(timeouts, &query_labels);

        for (query, time) in averages.iter() {
            let row = vec![
                experiment_names[experiment_id].clone(),
                query.clone(),
                format!("{time}"),
                results.get(query).cloned().unwrap_or_default(),
                timeouts.get(query).cloned().unwrap_or_default(),
            ];
            serializer.write_row(&row, mark_rows.contains(&row_id))?;
            row_id += 1;
        }
    }
    serializer.close()?;

    println!("✓ Wrote {}", out_path.display());
    Ok(EXIT_SUCCESS)
}
