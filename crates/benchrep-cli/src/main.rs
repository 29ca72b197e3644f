use clap::Parser;

mod cli;
mod context;
mod exit_codes;
mod templates;

use cli::args::Cli;
use cli::commands::dispatch;

fn main() {
    let cli = Cli::parse();
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", if cli.verbose { "debug" } else { "info" });
    }
    env_logger::init();
    let code = match dispatch(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fatal: {e:?}");
            exit_codes::EXIT_FAILURE
        }
    };
    std::process::exit(code);
}
