use clap::Parser;
use std::io;
use tracing::{debug, error};
use tracing_subscriber::FmtSubscriber;

use gmix_cli::cli::{Cli, Commands};
mod commands;
use crate::commands::{fleet, report};

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    debug!("gmix-cli v{}", env!("CARGO_PKG_VERSION"));

    let result = match &cli.command {
        Commands::Report(args) => report::handle(args),
        Commands::Fleet(args) => fleet::handle(args),
    };

    if let Err(err) = result {
        error!("{err:#}");
        std::process::exit(1);
    }
}
