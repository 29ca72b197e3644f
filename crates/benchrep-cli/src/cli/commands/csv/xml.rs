use crate::cli::args::XmlArgs;
use crate::cli::commands::create_output;
use crate::context::TaskContext;
use crate::exit_codes::EXIT_SUCCESS;
use anyhow::Context;
use benchrep_core::parse::read_query_records;
use benchrep_core::table::{DelimitedTable, TableSerializer};

/// Converts each experiment's XML benchmark output into a query-times CSV
/// file inside the same experiment directory, so the tabular and plotting
/// commands can consume it.
pub fn run(args: XmlArgs, ctx: &TaskContext) -> anyhow::Result<i32> {
    for directory in &args.experiment_dir {
        let input = directory.join(&args.input_name);
        let contents = std::fs::read_to_string(&input)
            .with_context(|| format!("failed to open input file {}", input.display()))?;
        let records = read_query_records(&contents, &input.display().to_string())?;

        let out_path = directory.join(&args.name);
        let mut serializer = DelimitedTable::new(create_output(&out_path)?);
        let header: Vec<String> = ["name", "id", "results", "time"].map(String::from).into();
        serializer.write_header(&header, &[])?;
        for record in &records {
            let row = vec![
                record.field("name").unwrap_or("").to_string(),
                "0".to_string(),
                record.field("results").unwrap_or("NaN").to_string(),
                record.field("time").unwrap_or("NaN").to_string(),
            ];
            serializer.write_row(&row, false)?;
        }
        serializer.close()?;

        if ctx.verbose {
            eprintln!(
                "Converted {} records from {}",
                records.len(),
                input.display()
            );
        }
        println!("✓ Wrote {}", out_path.display());
    }
    Ok(EXIT_SUCCESS)
}
