use crate::cli::args::CsvQueryArgs;
use crate::cli::commands::{create_output, filter_matches, parse_mark_rows, query_filter};
use crate::context::TaskContext;
use crate::exit_codes::EXIT_SUCCESS;
use benchrep_core::correctness;
use benchrep_core::labels;
use benchrep_core::parse::DelimitedReader;
use benchrep_core::record::numeric_field;
use benchrep_core::table;

/// Streams every matching record of every experiment into one table:
/// one row per query execution, in input order.
pub fn run(args: CsvQueryArgs, ctx: &TaskContext) -> anyhow::Result<i32> {
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

    let out_path = ctx.cwd.join(&args.name);
    let mut serializer = table::serializer(args.markdown, create_output(&out_path)?);
    let mut header: Vec<String> = ["experiment", "time", "requests", "results"]
        .map(String::from)
        .into();
    if checker.is_some() {
        header.push("correctness".to_string());
    }
    serializer.write_header(&header, &[])?;

    let mut row_id = 0usize;
    for (experiment_id, directory) in args.source.experiment_dir.iter().enumerate() {
        let input = directory.join(&args.source.input_name);
        for record in DelimitedReader::open(&input, args.source.input_delimiter)? {
            let record = record?;
            let query = record.field("name").unwrap_or("");
            if !filter_matches(&filter, query) {
                continue;
            }
            let requests = match record.field("httpRequests") {
                Some(value) if !value.is_empty() => value,
                _ => "0",
            };
            let mut row = vec![
                experiment_names[experiment_id].clone(),
                record.field("time").unwrap_or("").to_string(),
                requests.to_string(),
                record.field("results").unwrap_or("").to_string(),
            ];
            if let Some(checker) = &checker {
                let actual = numeric_field(&record, "results");
                row.push(format!(
                    "{}",
                    checker.correctness(experiment_id, query, actual)
                ));
            }
            serializer.write_row(&row, mark_rows.contains(&row_id))?;
            row_id += 1;
        }
    }
    serializer.close()?;

    if ctx.verbose {
        eprintln!("Listed {row_id} rows from {} experiments", experiment_names.len());
    }
    println!("✓ Wrote {}", out_path.display());
    Ok(EXIT_SUCCESS)
}
