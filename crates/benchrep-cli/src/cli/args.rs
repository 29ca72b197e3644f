use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "benchrep",
    version,
    about = "Convert benchmark experiment output into CSV/Markdown tables and LaTeX TikZ plots"
)]
pub struct Cli {
    /// The working directory output files are written to
    #[arg(long, global = true, default_value = ".")]
    pub cwd: PathBuf,

    /// If more logging output should be generated
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding plot templates (defaults to the embedded ones)
    #[arg(long, global = true)]
    pub templates_root: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create CSV or Markdown tables
    Csv(CsvArgs),
    /// Create LaTeX TikZ plot files
    Tex(TexArgs),
    /// Derive statistics from experiments
    Stats(StatsArgs),
}

#[derive(clap::Args)]
pub struct CsvArgs {
    #[command(subcommand)]
    pub cmd: CsvCmd,
}

#[derive(Subcommand)]
pub enum CsvCmd {
    /// List all query execution times from the given experiments
    Query(CsvQueryArgs),
    /// Summarize query results from the given experiments in a table
    Summary(SummaryArgs),
    /// Show distribution of query wins from the given experiments in a table
    Wins(WinsArgs),
    /// Convert XML benchmark output files to CSV
    Xml(XmlArgs),
    /// Generate a JSON file for usage in the Benchmark Github Action
    Ghbench(GhbenchArgs),
}

#[derive(clap::Args)]
pub struct TexArgs {
    #[command(subcommand)]
    pub cmd: TexCmd,
}

#[derive(Subcommand)]
pub enum TexCmd {
    /// Plot the query execution times from the given experiments
    Query(TexQueryArgs),
    /// Plot the query result arrival times from the given experiments
    QueryTimes(TexQueryTimesArgs),
}

#[derive(clap::Args)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub cmd: StatsCmd,
}

#[derive(Subcommand)]
pub enum StatsCmd {
    /// Show the stats of a Docker resource CSV file from an experiment
    Docker(DockerArgs),
}

/// Input-file options shared by the commands reading per-experiment
/// query-times files.
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Experiment directories to read input files from
    #[arg(required = true, value_name = "EXPERIMENT_DIR")]
    pub experiment_dir: Vec<PathBuf>,

    /// Custom input file name per experiment
    #[arg(long, default_value = "query-times.csv")]
    pub input_name: String,

    /// Delimiter for the input CSV file
    #[arg(long, default_value_t = ';')]
    pub input_delimiter: char,

    /// Comma-separated list of experiment labels to use
    #[arg(long)]
    pub override_experiment_labels: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct CsvQueryArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Regex for queries to include (before any label overrides)
    #[arg(short = 'q', long)]
    pub query_regex: Option<String>,

    /// Custom output file name
    #[arg(short, long, default_value = "data_all.csv")]
    pub name: String,

    /// Serialize the output as Markdown
    #[arg(long)]
    pub markdown: bool,

    /// Path to a JSON file mapping queries to expected cardinality
    #[arg(long)]
    pub correctness_reference: Option<PathBuf>,

    /// Comma-separated list of 0-based row ids to mark (Markdown only)
    #[arg(long)]
    pub mark_rows: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Regex for queries to include (before any label overrides)
    #[arg(short = 'q', long)]
    pub query_regex: Option<String>,

    /// Custom output file name
    #[arg(short, long, default_value = "data_summary.csv")]
    pub name: String,

    /// Comma-separated list of query labels to use
    #[arg(long)]
    pub override_query_labels: Option<String>,

    /// Serialize the output as Markdown
    #[arg(long)]
    pub markdown: bool,

    /// Comma-separated list of 0-based row ids to mark (Markdown only)
    #[arg(long)]
    pub mark_rows: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct WinsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Regex for queries to include (before any label overrides)
    #[arg(short = 'q', long)]
    pub query_regex: Option<String>,

    /// Custom output file name
    #[arg(short, long, default_value = "data_wins.csv")]
    pub name: String,

    /// Serialize the output as Markdown
    #[arg(long)]
    pub markdown: bool,

    /// Path to a JSON file mapping queries to expected cardinality
    #[arg(long)]
    pub correctness_reference: Option<PathBuf>,

    /// Comma-separated list of 0-based row ids to mark (Markdown only)
    #[arg(long)]
    pub mark_rows: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct XmlArgs {
    /// Experiment directories to read input files from
    #[arg(required = true, value_name = "EXPERIMENT_DIR")]
    pub experiment_dir: Vec<PathBuf>,

    /// Custom output file name (written into each experiment directory)
    #[arg(short, long, default_value = "query-times.csv")]
    pub name: String,

    /// Custom input file name per experiment
    #[arg(long, default_value = "bsbm.xml")]
    pub input_name: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct GhbenchArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Regex for queries to include (before any label overrides)
    #[arg(short = 'q', long)]
    pub query_regex: Option<String>,

    /// Custom output file name
    #[arg(short, long, default_value = "ghbench.json")]
    pub name: String,

    /// Report the total execution time across each experiment
    #[arg(long)]
    pub total: bool,

    /// Skip the separate execution time entry for each query
    #[arg(long = "no-detailed", action = ArgAction::SetFalse)]
    pub detailed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Metric {
    /// Query execution time in milliseconds
    Time,
    /// Number of HTTP requests issued per query
    #[value(name = "http-requests", alias = "httpRequests")]
    HttpRequests,
}

impl Metric {
    /// The input-file field the metric is read from.
    pub fn field(self) -> &'static str {
        match self {
            Metric::Time => "time",
            Metric::HttpRequests => "httpRequests",
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct TexQueryArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Regex for queries to include (before any label overrides)
    #[arg(short = 'q', long)]
    pub query_regex: Option<String>,

    /// Custom output file name (without extension)
    #[arg(short, long, default_value = "plot_queries_data")]
    pub name: String,

    /// Color scheme name from colorbrewer2.org
    #[arg(short, long)]
    pub color: Option<String>,

    /// The upper limit of the Y-axis. Defaults to maximum Y value
    #[arg(long)]
    pub max_y: Option<f64>,

    /// Omit the legend from the plot
    #[arg(long = "no-legend", action = ArgAction::SetFalse)]
    pub legend: bool,

    /// The legend position X,Y (anchor north-east)
    #[arg(long, default_value = "1.0,1.0")]
    pub legend_pos: String,

    /// If the Y-axis must have a log scale
    #[arg(long)]
    pub log_y: bool,

    /// Comma-separated list of query labels to use
    #[arg(long)]
    pub override_query_labels: Option<String>,

    /// If zero values occur, what value they should be replaced with
    #[arg(long, default_value_t = 0.0)]
    pub zero_replacement: f64,

    /// Convert the TeX file to SVG via the tex2svg command
    #[arg(long)]
    pub svg: bool,

    /// The metric to plot
    #[arg(long, value_enum, default_value = "time")]
    pub metric: Metric,

    /// Scale every query's values so the maximum becomes 1
    #[arg(long)]
    pub relative: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct TexQueryTimesArgs {
    /// The query whose result arrival times should be plotted
    #[arg(value_name = "QUERY")]
    pub query: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Custom output file name (without extension)
    #[arg(short, long, default_value = "query_times")]
    pub name: String,

    /// Color scheme name from colorbrewer2.org
    #[arg(short, long)]
    pub color: Option<String>,

    /// The upper limit of the Y-axis. Defaults to maximum Y value
    #[arg(long)]
    pub max_y: Option<f64>,

    /// Omit the legend from the plot
    #[arg(long = "no-legend", action = ArgAction::SetFalse)]
    pub legend: bool,

    /// The legend position X,Y (anchor north-east)
    #[arg(long, default_value = "1.0,1.0")]
    pub legend_pos: String,

    /// If the Y-axis must have a log scale
    #[arg(long)]
    pub log_y: bool,

    /// Convert the TeX file to SVG via the tex2svg command
    #[arg(long)]
    pub svg: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct DockerArgs {
    /// The Docker resource CSV file to summarize
    #[arg(value_name = "DOCKER_CSV_FILE")]
    pub docker_csv_file: PathBuf,

    /// The precision of output numbers
    #[arg(short, long, default_value_t = 2)]
    pub digits: usize,

    /// Delimiter for the input CSV file
    #[arg(long, default_value_t = ',')]
    pub input_delimiter: char,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn csv_query_defaults() {
        let cli = Cli::parse_from(["benchrep", "csv", "query", "exp-a", "exp-b"]);
        let Command::Csv(csv) = cli.cmd else {
            panic!("expected csv subcommand");
        };
        let CsvCmd::Query(args) = csv.cmd else {
            panic!("expected query subcommand");
        };
        assert_eq!(args.name, "data_all.csv");
        assert_eq!(args.source.input_name, "query-times.csv");
        assert_eq!(args.source.input_delimiter, ';');
        assert_eq!(args.source.experiment_dir.len(), 2);
        assert!(!args.markdown);
    }

    #[test]
    fn tex_query_no_legend_flag() {
        let cli = Cli::parse_from(["benchrep", "tex", "query", "--no-legend", "exp-a"]);
        let Command::Tex(tex) = cli.cmd else {
            panic!("expected tex subcommand");
        };
        let TexCmd::Query(args) = tex.cmd else {
            panic!("expected query subcommand");
        };
        assert!(!args.legend);
        assert_eq!(args.metric, Metric::Time);
        assert_eq!(args.legend_pos, "1.0,1.0");
    }

    #[test]
    fn tex_query_times_takes_query_then_dirs() {
        let cli = Cli::parse_from(["benchrep", "tex", "query-times", "q3", "exp-a", "exp-b"]);
        let Command::Tex(tex) = cli.cmd else {
            panic!("expected tex subcommand");
        };
        let TexCmd::QueryTimes(args) = tex.cmd else {
            panic!("expected query-times subcommand");
        };
        assert_eq!(args.query, "q3");
        assert_eq!(args.source.experiment_dir.len(), 2);
    }

    #[test]
    fn global_cwd_is_accepted_after_subcommand() {
        let cli = Cli::parse_from(["benchrep", "csv", "wins", "exp-a", "--cwd", "/tmp"]);
        assert_eq!(cli.cwd, std::path::PathBuf::from("/tmp"));
    }
}
