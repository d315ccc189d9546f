use std::process::ExitCode;

use clap::Parser;
use console::style;
use restyle::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    restyle::init_tracing(cli.verbose);

    match restyle::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
