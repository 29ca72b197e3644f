use crate::cli::args::WinsArgs;
use crate::cli::commands::{create_output, filter_matches, parse_mark_rows, query_filter};
use crate::context::TaskContext;
use crate::exit_codes::EXIT_SUCCESS;
use benchrep_core::correctness;
use benchrep_core::labels;
use benchrep_core::parse::DelimitedReader;
use benchrep_core::record::numeric_field;
use benchrep_core::table::{self, Alignment};
use benchrep_core::{stats, OrderedMap};
use std::collections::HashMap;

/// Tallies, per query, which experiment reported the strictly lowest
/// execution time. Results failing the correctness reference can never
/// win: their time is treated as +infinity during selection.
pub fn run(args: WinsArgs, ctx: &TaskContext) -> anyhow::Result<i32> {
    let experiment_names = labels::experiment_names(
        &args.source.experiment_dir,
        args.source.override_experiment_labels.as_deref(),
    )?;
    let filter = query_filter(&args.query_regex)?;
    let checker = match &args.correctness_reference {
        Some(path) => Some(correctness::load_checker(path)?),
        None => None,
    };
    let mark_rows = parse_mark_rows(&args.mark_rows);

    // Collect the (last) time and result count per query and experiment.
    let mut times: Vec<HashMap<String, f64>> = Vec::new();
    let mut queries: Vec<String> = Vec::new();
    for (experiment_id, directory) in args.source.experiment_dir.iter().enumerate() {
        let mut per_query: HashMap<String, f64> = HashMap::new();
        let mut cardinalities: OrderedMap<f64> = OrderedMap::new();

        let input = directory.join(&args.source.input_name);
        for record in DelimitedReader::open(&input, args.source.input_delimiter)? {
            let record = record?;
            let query = record.field("name").unwrap_or("");
            if !filter_matches(&filter, query) {
                continue;
            }
            if experiment_id == 0 {
                queries.push(query.to_string());
            }
            per_query.insert(query.to_string(), numeric_field(&record, "time"));
            cardinalities.insert(query, numeric_field(&record, "results"));
        }

        if let Some(checker) = &checker {
            for (query, cardinality) in cardinalities.iter() {
                if checker.correctness(experiment_id, query, *cardinality) != 1.0 {
                    per_query.insert(query.clone(), f64::INFINITY);
                }
            }
        }
        times.push(per_query);
    }

    let wins = stats::count_wins(&times, &queries);

    let out_path = ctx.cwd.join(&args.name);
    let mut serializer = table::serializer(args.markdown, create_output(&out_path)?);
    let mut header = vec![String::new()];
    header.extend(experiment_names.iter().cloned());
    let mut align = vec![Alignment::Left];
    align.extend(experiment_names.iter().map(|_| Alignment::Right));
    serializer.write_header(&header, &align)?;

    let mut row = vec!["Wins".to_string()];
    row.extend(
        (0..experiment_names.len()).map(|id| wins.get(&id).copied().unwrap_or(0).to_string()),
    );
    serializer.write_row(&row, mark_rows.contains(&0))?;
    serializer.close()?;

    println!("✓ Wrote {}", out_path.display());
    Ok(EXIT_SUCCESS)
}
