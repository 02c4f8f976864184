//! `criteria`: field catalog listing and saved filter normalization.

mod cli;
mod commands;
mod logging;

use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();
    logging::init_logging(cli.log_json);
    if let Err(e) = commands::run(cli) {
        eprintln!("\nError: {e:#}\n");
        std::process::exit(1);
    }
}
