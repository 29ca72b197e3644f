use crate::cli::args::DockerArgs;
use crate::context::TaskContext;
use crate::exit_codes::EXIT_SUCCESS;
use benchrep_core::parse::DelimitedReader;
use benchrep_core::record::leading_float;
use benchrep_core::stats;
use std::collections::HashMap;

/// Summarizes a container resource-usage CSV: average CPU and memory,
/// and the final network counters. Columns that are missing print NaN
/// rather than aborting the report.
pub fn run(args: DockerArgs, ctx: &TaskContext) -> anyhow::Result<i32> {
    let path = ctx.cwd.join(&args.docker_csv_file);
    let mut columns: HashMap<String, Vec<f64>> = HashMap::new();
    for record in DelimitedReader::open(&path, args.input_delimiter)? {
        let record = record?;
        for (key, value) in record.fields() {
            columns
                .entry(key.to_string())
                .or_default()
                .push(leading_float(value).unwrap_or(f64::NAN));
        }
    }

    let digits = args.digits;
    let average = |key: &str| stats::average(column(&columns, key));
    let last = |key: &str| {
        column(&columns, key)
            .last()
            .copied()
            .unwrap_or(f64::NAN)
    };
    const MEBIBYTE: f64 = 1024.0 * 1024.0;

    println!("CPU: {:.digits$} %", average("cpu_percentage"));
    println!(
        "Memory relative: {:.digits$} MB",
        average("memory") / MEBIBYTE
    );
    println!(
        "Memory absolute: {:.digits$} %",
        average("memory_percentage")
    );
    println!("Received: {:.digits$} MB", last("received") / MEBIBYTE);
    println!(
        "Transmitted: {:.digits$} MB",
        last("transmitted") / MEBIBYTE
    );
    Ok(EXIT_SUCCESS)
}

fn column<'a>(columns: &'a HashMap<String, Vec<f64>>, key: &str) -> &'a [f64] {
    columns.get(key).map_or(&[], Vec::as_slice)
}
